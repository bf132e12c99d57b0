use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A user as exposed by the API. The stored password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
}

/// Body for POST /users.
///
/// `PasswordHash` is persisted exactly as the client sends it. Nothing here
/// hashes or verifies it; callers must hash before submitting.
#[derive(Clone, Deserialize, ToSchema)]
pub struct NewUser {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
