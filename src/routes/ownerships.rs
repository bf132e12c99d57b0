use crate::handlers::ownerships::{
    create_ownership, delete_ownership, get_ownership, link_user_to_game, list_ownerships,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

/// Mounted under `/ownerships`.
pub fn ownership_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_ownerships).post(create_ownership))
        .route("/link", post(link_user_to_game))
        .route("/:id", get(get_ownership).delete(delete_ownership))
        .with_state(state)
}
