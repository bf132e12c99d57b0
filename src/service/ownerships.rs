//! User-game ownership records.

use crate::error::AppError;
use crate::model::{LinkRequest, NewOwnership, Ownership};
use crate::store::CatalogStore;

pub struct OwnershipService;

impl OwnershipService {
    pub async fn list(store: &dyn CatalogStore) -> Result<Vec<Ownership>, AppError> {
        store.list_ownerships().await
    }

    pub async fn get(store: &dyn CatalogStore, id: i32) -> Result<Ownership, AppError> {
        store.get_ownership(id).await?.ok_or_else(not_found)
    }

    pub async fn create(store: &dyn CatalogStore, ownership: &NewOwnership) -> Result<Ownership, AppError> {
        if store.get_user(ownership.user_id).await?.is_none() {
            return Err(AppError::Reference(format!("User {} does not exist", ownership.user_id)));
        }
        if store.get_game(ownership.game_id).await?.is_none() {
            return Err(AppError::Reference(format!("Game {} does not exist", ownership.game_id)));
        }
        let created = store.insert_ownership(ownership).await?;
        tracing::info!(ownership_id = created.ownership_id, "ownership created");
        Ok(created)
    }

    pub async fn delete(store: &dyn CatalogStore, id: i32) -> Result<(), AppError> {
        if !store.delete_ownership(id).await? {
            return Err(not_found());
        }
        Ok(())
    }

    /// Resolve both names first; nothing is written unless both exist.
    pub async fn link_by_name(store: &dyn CatalogStore, request: &LinkRequest) -> Result<Ownership, AppError> {
        let (username, game_name) = match (request.username.as_deref(), request.game_name.as_deref()) {
            (Some(u), Some(g)) if !u.trim().is_empty() && !g.trim().is_empty() => (u, g),
            _ => return Err(AppError::Validation("Username and GameName are required".into())),
        };

        let user = store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::Reference(format!("User '{}' not found", username)))?;
        let game = store
            .find_game_by_name(game_name)
            .await?
            .ok_or_else(|| AppError::Reference(format!("Game '{}' not found", game_name)))?;

        let created = store
            .insert_ownership(&NewOwnership {
                user_id: user.user_id,
                game_id: game.game_id,
                purchase_date: None,
            })
            .await?;
        tracing::info!(
            ownership_id = created.ownership_id,
            username,
            game_name,
            "user linked to game"
        );
        Ok(created)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Ownership not found".into())
}
