use crate::handlers::games::{create_game, create_random_tables, game_statistics, get_game, list_games};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

/// Mounted under `/games`. Static segments win over `/:id`.
pub fn game_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/statistics", get(game_statistics))
        .route("/create-random-tables", post(create_random_tables))
        .route("/:id", get(get_game))
        .with_state(state)
}
