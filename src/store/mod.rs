//! Persistence for the catalog. Handlers and services only see [`CatalogStore`];
//! the concrete backend is chosen at startup and injected through `AppState`.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_tables};

use crate::error::AppError;
use crate::model::{Game, NewGame, NewOwnership, NewUser, Ownership, Publisher, SeedPublisher, StatisticOp, User};
use async_trait::async_trait;

/// Row-level operations over the four catalog tables.
///
/// Every method is a single statement unless noted; bulk inserts run in one transaction.
/// Implementations reject writes whose foreign keys do not resolve.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap connectivity check used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_publishers(&self) -> Result<Vec<Publisher>, AppError>;
    async fn get_publisher(&self, id: i32) -> Result<Option<Publisher>, AppError>;
    async fn insert_publisher(&self, name: &str) -> Result<Publisher, AppError>;
    /// All-or-nothing.
    async fn insert_publishers(&self, names: &[String]) -> Result<Vec<Publisher>, AppError>;
    async fn update_publisher(&self, id: i32, name: &str) -> Result<Option<Publisher>, AppError>;
    /// Returns false when no row matched. Games of the publisher are detached, not deleted.
    async fn delete_publisher(&self, id: i32) -> Result<bool, AppError>;
    async fn games_by_publisher(&self, publisher_id: i32) -> Result<Vec<Game>, AppError>;

    async fn list_games(&self) -> Result<Vec<Game>, AppError>;
    async fn get_game(&self, id: i32) -> Result<Option<Game>, AppError>;
    /// Lowest id wins when names repeat.
    async fn find_game_by_name(&self, name: &str) -> Result<Option<Game>, AppError>;
    async fn insert_game(&self, game: &NewGame) -> Result<Game, AppError>;
    /// Aggregate over the character length of game names; `None` when the aggregate is NULL.
    async fn game_name_statistic(&self, op: StatisticOp) -> Result<Option<f64>, AppError>;
    /// Inserts publishers and their games in one transaction.
    async fn insert_seed(&self, seed: &[SeedPublisher]) -> Result<(Vec<Publisher>, Vec<Game>), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError>;
    /// Lowest id wins when usernames repeat.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: &NewUser) -> Result<User, AppError>;

    async fn list_ownerships(&self) -> Result<Vec<Ownership>, AppError>;
    async fn get_ownership(&self, id: i32) -> Result<Option<Ownership>, AppError>;
    async fn insert_ownership(&self, ownership: &NewOwnership) -> Result<Ownership, AppError>;
    async fn delete_ownership(&self, id: i32) -> Result<bool, AppError>;
}
