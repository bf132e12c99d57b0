//! /ownerships handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{LinkRequest, NewOwnership, Ownership};
use crate::response::{created, deleted, ok};
use crate::service::OwnershipService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/ownerships",
    tag = "ownerships",
    responses((status = 200, description = "All ownership records", body = [Ownership]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_ownerships(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(OwnershipService::list(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/ownerships/{id}",
    tag = "ownerships",
    params(("id" = i32, Path, description = "Ownership id")),
    responses(
        (status = 200, description = "The ownership record", body = Ownership),
        (status = 404, description = "No such record", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_ownership(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(OwnershipService::get(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/ownerships",
    tag = "ownerships",
    request_body = NewOwnership,
    responses(
        (status = 201, description = "Ownership recorded", body = Ownership),
        (status = 400, description = "Invalid body or unknown user/game", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_ownership(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewOwnership>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(OwnershipService::create(state.store(), &body).await?))
}

#[utoipa::path(
    delete,
    path = "/ownerships/{id}",
    tag = "ownerships",
    params(("id" = i32, Path, description = "Ownership id")),
    responses(
        (status = 204, description = "Ownership removed"),
        (status = 404, description = "No such record", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_ownership(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    OwnershipService::delete(state.store(), id).await?;
    Ok(deleted())
}

/// Link a user to a game by their names.
#[utoipa::path(
    post,
    path = "/ownerships/link",
    tag = "ownerships",
    request_body = LinkRequest,
    responses(
        (status = 201, description = "Ownership recorded", body = Ownership),
        (status = 400, description = "Missing names or unknown user/game", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn link_user_to_game(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(OwnershipService::link_by_name(state.store(), &body).await?))
}
