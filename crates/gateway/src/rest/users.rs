//! User directory and leaderboard REST endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gamehub_users::{LeaderboardPage, LeaderboardRow, Paginated, UserDetails, UserRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub image: Option<String>,
    /// `PLAYER` or `ADMIN`
    pub role: String,
    pub is_blocked: bool,
}

impl From<UserDetails> for UserResponse {
    fn from(user: UserDetails) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            image: user.image,
            role: user.role.as_str().to_string(),
            is_blocked: user.is_blocked,
        }
    }
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserDetails::from(user).into()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayersResponse {
    pub data: Vec<UserResponse>,
    pub limit: u32,
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<Paginated<UserDetails>> for PlayersResponse {
    fn from(page: Paginated<UserDetails>) -> Self {
        Self {
            data: page.data.into_iter().map(UserResponse::from).collect(),
            limit: page.limit,
            page: page.page,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub name: String,
    pub username: String,
    pub image: Option<String>,
    pub email: String,
    pub game: String,
    pub highest_score: i64,
}

impl From<LeaderboardRow> for LeaderboardEntryResponse {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            name: row.name,
            username: row.username,
            image: row.image,
            email: row.email,
            game: row.game,
            highest_score: row.highest_score,
        }
    }
}

/// One leaderboard page. `totalCount` and `totalPages` describe the full ranking,
/// so `data` may hold fewer rows than `limit`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntryResponse>,
    pub limit: u32,
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<LeaderboardPage> for LeaderboardResponse {
    fn from(page: LeaderboardPage) -> Self {
        Self {
            data: page.data.into_iter().map(LeaderboardEntryResponse::from).collect(),
            limit: page.limit,
            page: page.page,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
}

impl From<CreateUserRequest> for gamehub_users::CreateUserRequest {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            username: request.username,
            name: request.name,
            email: request.email,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub is_blocked: bool,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListPlayersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    pub game: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Create user routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/admin", get(list_players))
        .route("/users/leaderboard", get(get_leaderboard))
        .route(
            "/users/:id",
            get(get_user_details)
                .put(update_user)
                .patch(block_user)
                .delete(delete_user),
        )
}

#[utoipa::path(
    get,
    path = "/users/admin",
    tag = "Users",
    params(ListPlayersQuery),
    responses(
        (status = 200, description = "Active players ordered by username", body = PlayersResponse),
        (status = 400, description = "Invalid page or limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_players(
    Query(params): Query<ListPlayersQuery>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<PlayersResponse>> {
    let page = state
        .user_service
        .list_players(
            params.page.unwrap_or(DEFAULT_PAGE),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
        .await?;

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/users/leaderboard",
    tag = "Leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked players for the game", body = LeaderboardResponse),
        (status = 400, description = "Missing game or invalid page/limit", body = ErrorResponse),
        (status = 503, description = "Scores service unavailable", body = ErrorResponse)
    )
)]
pub async fn get_leaderboard(
    Query(params): Query<LeaderboardQuery>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<LeaderboardResponse>> {
    let page = state
        .leaderboard
        .compose(
            params.game.as_deref().unwrap_or_default(),
            params.page.unwrap_or(DEFAULT_PAGE),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
        .await?;

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Username to look up. PUT, PATCH and DELETE on this path take a user ID instead")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user_details(
    Path(username): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<UserResponse>> {
    let user = state.user_service.get_user_by_username(&username).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateUserRequest>,
) -> GatewayResult<impl IntoResponse> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username taken", body = ErrorResponse)
    )
)]
pub async fn update_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<UpdateUserRequest>,
) -> GatewayResult<Json<UserResponse>> {
    let request = gamehub_users::UpdateProfileRequest {
        username: payload.username,
        image: payload.image,
    };

    let user = state.user_service.update_profile(&user_id, request).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = BlockUserRequest,
    responses(
        (status = 204, description = "Block state changed"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn block_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<BlockUserRequest>,
) -> GatewayResult<StatusCode> {
    state
        .user_service
        .set_blocked(&user_id, payload.is_blocked)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<StatusCode> {
    state.user_service.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
