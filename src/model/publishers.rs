use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Publisher {
    #[serde(rename = "PublisherID")]
    pub publisher_id: i32,
    #[serde(rename = "PublisherName")]
    pub publisher_name: String,
}

/// Body for POST and PUT.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PublisherPayload {
    #[serde(rename = "PublisherName")]
    pub publisher_name: String,
}

/// Body for `create-noname-publishers`. `count` defaults to 10.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NonamePublishersRequest {
    #[serde(rename = "startNum", default)]
    pub start_num: Option<i64>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NonamePublishersReport {
    pub message: String,
    pub publishers: Vec<Publisher>,
}
