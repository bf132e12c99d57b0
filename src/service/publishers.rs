//! Publisher CRUD and the placeholder-publisher helper.

use super::RequestValidator;
use crate::error::AppError;
use crate::model::{Game, NonamePublishersReport, NonamePublishersRequest, Publisher};
use crate::store::CatalogStore;

pub const DEFAULT_NONAME_COUNT: u32 = 10;
pub const MAX_NONAME_COUNT: u32 = 100;

pub struct PublishersService;

impl PublishersService {
    pub async fn list(store: &dyn CatalogStore) -> Result<Vec<Publisher>, AppError> {
        store.list_publishers().await
    }

    pub async fn get(store: &dyn CatalogStore, id: i32) -> Result<Publisher, AppError> {
        store.get_publisher(id).await?.ok_or_else(not_found)
    }

    pub async fn create(store: &dyn CatalogStore, name: &str) -> Result<Publisher, AppError> {
        RequestValidator::require_non_blank("PublisherName", name)?;
        let created = store.insert_publisher(name).await?;
        tracing::info!(publisher_id = created.publisher_id, "publisher created");
        Ok(created)
    }

    pub async fn update(store: &dyn CatalogStore, id: i32, name: &str) -> Result<Publisher, AppError> {
        RequestValidator::require_non_blank("PublisherName", name)?;
        store.update_publisher(id, name).await?.ok_or_else(not_found)
    }

    pub async fn delete(store: &dyn CatalogStore, id: i32) -> Result<(), AppError> {
        if !store.delete_publisher(id).await? {
            return Err(not_found());
        }
        tracing::info!(publisher_id = id, "publisher deleted");
        Ok(())
    }

    /// Games of an existing publisher; an unknown publisher is NotFound, a publisher without games yields `[]`.
    pub async fn games_by_publisher(store: &dyn CatalogStore, id: i32) -> Result<Vec<Game>, AppError> {
        if store.get_publisher(id).await?.is_none() {
            return Err(not_found());
        }
        store.games_by_publisher(id).await
    }

    /// Insert `Noname{n}` publishers for n = startNum, startNum + 1, ... in one transaction.
    pub async fn create_noname_publishers(
        store: &dyn CatalogStore,
        request: &NonamePublishersRequest,
    ) -> Result<NonamePublishersReport, AppError> {
        let start = request
            .start_num
            .ok_or_else(|| AppError::Validation("startNum is required".into()))?;
        RequestValidator::require_range("startNum", start, 0, i64::MAX - i64::from(MAX_NONAME_COUNT))?;
        let count = request.count.unwrap_or(DEFAULT_NONAME_COUNT);
        RequestValidator::require_range("count", i64::from(count), 1, i64::from(MAX_NONAME_COUNT))?;

        let names = noname_names(start, count);
        let publishers = store
            .insert_publishers(&names)
            .await
            .map_err(|e| AppError::Internal(format!("creating noname publishers failed: {}", e)))?;
        tracing::info!(start, count, "noname publishers created");
        Ok(NonamePublishersReport {
            message: "Noname publishers created successfully".into(),
            publishers,
        })
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Publisher not found".into())
}

fn noname_names(start: i64, count: u32) -> Vec<String> {
    (start..start + i64::from(count))
        .map(|n| format!("Noname{}", n))
        .collect()
}
