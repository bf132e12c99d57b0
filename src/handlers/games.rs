//! /games handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::model::{Game, GameNameStatistics, NewGame, SeedReport, StatisticsQuery};
use crate::response::{created, ok};
use crate::service::GamesService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    responses((status = 200, description = "All games", body = [Game]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(GamesService::list(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = i32, Path, description = "Game id")),
    responses(
        (status = 200, description = "The game", body = Game),
        (status = 404, description = "No such game", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(GamesService::get(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = NewGame,
    responses(
        (status = 201, description = "Game created", body = Game),
        (status = 400, description = "Invalid body or unknown publisher", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_game(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewGame>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(GamesService::create(state.store(), &body).await?))
}

#[utoipa::path(
    get,
    path = "/games/statistics",
    tag = "games",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Aggregate over game name lengths", body = GameNameStatistics),
        (status = 400, description = "Missing or unknown operation", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn game_statistics(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatisticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(GamesService::statistics(state.store(), query.operation.as_deref()).await?))
}

#[utoipa::path(
    post,
    path = "/games/create-random-tables",
    tag = "games",
    responses(
        (status = 201, description = "Random publishers and games inserted", body = SeedReport),
        (status = 500, description = "Seeding failed, nothing was written", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_random_tables(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(created(GamesService::create_random_tables(state.store()).await?))
}
