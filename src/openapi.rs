//! OpenAPI document generated from the handler annotations, plus the docs UI.

use crate::error::ErrorBody;
use crate::handlers::{games, ownerships, publishers, users};
use crate::model::{
    Game, GameNameStatistics, LinkRequest, NewGame, NewOwnership, NewUser, NonamePublishersReport,
    NonamePublishersRequest, Ownership, Publisher, PublisherPayload, SeedReport, StatisticValue, User,
};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "Game Catalog API", description = "Games, publishers, users and who owns what."),
    paths(
        games::list_games,
        games::get_game,
        games::create_game,
        games::game_statistics,
        games::create_random_tables,
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        publishers::games_by_publisher,
        publishers::create_noname_publishers,
        users::list_users,
        users::get_user,
        users::create_user,
        ownerships::list_ownerships,
        ownerships::get_ownership,
        ownerships::create_ownership,
        ownerships::delete_ownership,
        ownerships::link_user_to_game,
    ),
    components(schemas(
        Game,
        NewGame,
        GameNameStatistics,
        StatisticValue,
        SeedReport,
        Publisher,
        PublisherPayload,
        NonamePublishersRequest,
        NonamePublishersReport,
        User,
        NewUser,
        Ownership,
        NewOwnership,
        LinkRequest,
        ErrorBody,
    )),
    tags(
        (name = "games", description = "Game catalog and statistics"),
        (name = "publishers", description = "Publishers and their games"),
        (name = "users", description = "User accounts"),
        (name = "ownerships", description = "Which user owns which game"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /apidocs (Scalar UI) and GET /apidocs/openapi.json.
pub fn docs_routes() -> Router {
    Router::new()
        .route("/apidocs/openapi.json", get(openapi_json))
        .merge(Scalar::with_url("/apidocs", ApiDoc::openapi()))
}
