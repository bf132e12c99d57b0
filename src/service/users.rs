use super::RequestValidator;
use crate::error::AppError;
use crate::model::{NewUser, User};
use crate::store::CatalogStore;

pub struct UsersService;

impl UsersService {
    pub async fn list(store: &dyn CatalogStore) -> Result<Vec<User>, AppError> {
        store.list_users().await
    }

    pub async fn get(store: &dyn CatalogStore, id: i32) -> Result<User, AppError> {
        store
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// The password hash is stored as received; see [`NewUser`].
    pub async fn create(store: &dyn CatalogStore, user: &NewUser) -> Result<User, AppError> {
        RequestValidator::require_non_blank("Username", &user.username)?;
        RequestValidator::require_email("Email", &user.email)?;
        RequestValidator::require_non_blank("PasswordHash", &user.password_hash)?;
        let created = store.insert_user(user).await?;
        tracing::info!(user_id = created.user_id, "user created");
        Ok(created)
    }
}
