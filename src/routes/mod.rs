//! Router assembly: one route group per resource plus common and docs routes.

mod common;
mod games;
mod ownerships;
mod publishers;
mod users;

pub use common::common_routes;
pub use games::game_routes;
pub use ownerships::ownership_routes;
pub use publishers::publisher_routes;
pub use users::user_routes;

use crate::error::AppError;
use crate::openapi::docs_routes;
use crate::state::AppState;
use axum::http::Uri;
use axum::Router;

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Full API without middleware; `server::build_app` adds the layers.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/games", game_routes(state.clone()))
        .nest("/publishers", publisher_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/ownerships", ownership_routes(state.clone()))
        .merge(common_routes(state))
        .merge(docs_routes())
        .fallback(route_not_found)
}
