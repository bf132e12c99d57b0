//! Game catalog: REST service over games, publishers, users and game ownership.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Environment, Settings, StorageBackend};
pub use error::{AppError, ConfigError};
pub use routes::app_router;
pub use state::AppState;
pub use store::{CatalogStore, MemoryStore, PgStore};
