use crate::handlers::users::{create_user, get_user, list_users};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Mounted under `/users`.
pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user))
        .with_state(state)
}
