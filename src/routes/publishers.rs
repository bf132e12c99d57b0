use crate::handlers::publishers::{
    create_noname_publishers, create_publisher, delete_publisher, games_by_publisher, get_publisher,
    list_publishers, update_publisher,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

/// Mounted under `/publishers`.
pub fn publisher_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_publishers).post(create_publisher))
        .route("/create-noname-publishers", post(create_noname_publishers))
        .route(
            "/:id",
            get(get_publisher).put(update_publisher).delete(delete_publisher),
        )
        .route("/:id/games", get(games_by_publisher))
        .with_state(state)
}
