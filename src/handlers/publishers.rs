//! /publishers handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiPath};
use crate::model::{Game, NonamePublishersReport, NonamePublishersRequest, Publisher, PublisherPayload};
use crate::response::{created, deleted, ok};
use crate::service::PublishersService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/publishers",
    tag = "publishers",
    responses((status = 200, description = "All publishers", body = [Publisher]))
)]
#[tracing::instrument(skip_all)]
pub async fn list_publishers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PublishersService::list(state.store()).await?))
}

#[utoipa::path(
    get,
    path = "/publishers/{id}",
    tag = "publishers",
    params(("id" = i32, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "The publisher", body = Publisher),
        (status = 404, description = "No such publisher", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_publisher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PublishersService::get(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/publishers",
    tag = "publishers",
    request_body = PublisherPayload,
    responses(
        (status = 201, description = "Publisher created", body = Publisher),
        (status = 400, description = "Invalid body", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_publisher(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PublisherPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(PublishersService::create(state.store(), &body.publisher_name).await?))
}

#[utoipa::path(
    put,
    path = "/publishers/{id}",
    tag = "publishers",
    params(("id" = i32, Path, description = "Publisher id")),
    request_body = PublisherPayload,
    responses(
        (status = 200, description = "Publisher renamed", body = Publisher),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 404, description = "No such publisher", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state, body))]
pub async fn update_publisher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<PublisherPayload>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PublishersService::update(state.store(), id, &body.publisher_name).await?))
}

/// Games of the deleted publisher keep existing with a null `PublisherID`.
#[utoipa::path(
    delete,
    path = "/publishers/{id}",
    tag = "publishers",
    params(("id" = i32, Path, description = "Publisher id")),
    responses(
        (status = 204, description = "Publisher deleted"),
        (status = 404, description = "No such publisher", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_publisher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    PublishersService::delete(state.store(), id).await?;
    Ok(deleted())
}

#[utoipa::path(
    get,
    path = "/publishers/{id}/games",
    tag = "publishers",
    params(("id" = i32, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "Games of the publisher, possibly empty", body = [Game]),
        (status = 404, description = "No such publisher", body = ErrorBody)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn games_by_publisher(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(PublishersService::games_by_publisher(state.store(), id).await?))
}

#[utoipa::path(
    post,
    path = "/publishers/create-noname-publishers",
    tag = "publishers",
    request_body = NonamePublishersRequest,
    responses(
        (status = 201, description = "Placeholder publishers created", body = NonamePublishersReport),
        (status = 400, description = "Missing startNum or count out of range", body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_noname_publishers(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NonamePublishersRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(created(PublishersService::create_noname_publishers(state.store(), &body).await?))
}
