//! JSON remote-procedure endpoints used by other GameHub services.
//!
//! Each procedure is a `POST /rpc/UsersService/<Method>` with a JSON body and
//! shares its error mapping with the REST endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::users::{
    CreateUserRequest, LeaderboardResponse, UserResponse, DEFAULT_LIMIT, DEFAULT_PAGE,
};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GetUserByUsernameRequest {
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GetUsersByGameAndRankRequest {
    #[serde(default)]
    pub game: String,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Create remote-procedure routes
pub fn create_rpc_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/rpc/UsersService/CreateUser", post(rpc_create_user))
        .route("/rpc/UsersService/GetUserByUsername", post(rpc_get_user_by_username))
        .route(
            "/rpc/UsersService/GetUsersByGameAndRank",
            post(rpc_get_users_by_game_and_rank),
        )
}

#[utoipa::path(
    post,
    path = "/rpc/UsersService/CreateUser",
    tag = "Rpc",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    )
)]
pub async fn rpc_create_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateUserRequest>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/rpc/UsersService/GetUserByUsername",
    tag = "Rpc",
    request_body = GetUserByUsernameRequest,
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn rpc_get_user_by_username(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<GetUserByUsernameRequest>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_username(&payload.username).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/rpc/UsersService/GetUsersByGameAndRank",
    tag = "Rpc",
    request_body = GetUsersByGameAndRankRequest,
    responses(
        (status = 200, description = "Ranked players for the game", body = LeaderboardResponse),
        (status = 400, description = "Missing game or invalid page/limit", body = ErrorResponse),
        (status = 503, description = "Scores service unavailable", body = ErrorResponse)
    )
)]
pub async fn rpc_get_users_by_game_and_rank(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<GetUsersByGameAndRankRequest>,
) -> GatewayResult<Json<LeaderboardResponse>> {
    let page = state
        .leaderboard
        .compose(
            &payload.game,
            payload.page.unwrap_or(DEFAULT_PAGE),
            payload.limit.unwrap_or(DEFAULT_LIMIT),
        )
        .await?;

    Ok(Json(page.into()))
}
