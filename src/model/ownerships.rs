use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ownership row joined with the owning user's name and the game's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Ownership {
    #[serde(rename = "OwnershipID")]
    pub ownership_id: i32,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "GameID")]
    pub game_id: i32,
    #[serde(rename = "GameName")]
    pub game_name: String,
    #[serde(rename = "PurchaseDate")]
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewOwnership {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(rename = "GameID")]
    pub game_id: i32,
    #[serde(rename = "PurchaseDate", default)]
    pub purchase_date: Option<NaiveDate>,
}

/// Body for POST /ownerships/link.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LinkRequest {
    #[serde(rename = "Username", default)]
    pub username: Option<String>,
    #[serde(rename = "GameName", default)]
    pub game_name: Option<String>,
}
