//! # GameHub Gateway Crate
//!
//! HTTP surface of the user directory: REST endpoints for clients and JSON
//! remote-procedure endpoints for sibling services, both routed to the
//! services in `gamehub-users`.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **State**: Shared services handed to every handler
//! - **Middleware**: CORS, tracing, and request logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gamehub_gateway::{GatewayState, create_router};
//!
//! let state = GatewayState::from_pool(pool, ranking_client, 8);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

pub use create_router as build_router;

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::health::health_check,
        rest::users::list_players,
        rest::users::get_leaderboard,
        rest::users::get_user_details,
        rest::users::create_user,
        rest::users::update_user,
        rest::users::block_user,
        rest::users::delete_user,
        rest::rpc::rpc_create_user,
        rest::rpc::rpc_get_user_by_username,
        rest::rpc::rpc_get_users_by_game_and_rank,
    ),
    components(
        schemas(
            rest::health::HealthResponse,
            rest::users::UserResponse,
            rest::users::PlayersResponse,
            rest::users::LeaderboardEntryResponse,
            rest::users::LeaderboardResponse,
            rest::users::CreateUserRequest,
            rest::users::UpdateUserRequest,
            rest::users::BlockUserRequest,
            rest::users::ListPlayersQuery,
            rest::users::LeaderboardQuery,
            rest::rpc::GetUserByUsernameRequest,
            rest::rpc::GetUsersByGameAndRankRequest,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Player directory"),
        (name = "Leaderboard", description = "Per-game leaderboards"),
        (name = "Rpc", description = "Service-to-service procedures"),
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let mut router = Router::new()
        .merge(rest::create_rest_routes().with_state(Arc::new(state)))
        .layer(middleware::create_cors_middleware())
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    #[cfg(debug_assertions)]
    {
        use utoipa_swagger_ui::SwaggerUi;

        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_leaderboard_and_rpc_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/users/leaderboard"));
        assert!(paths.iter().any(|p| p.as_str() == "/rpc/UsersService/GetUsersByGameAndRank"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }

    #[test]
    fn openapi_documents_user_route_under_one_template() {
        use utoipa::openapi::path::PathItemType;

        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.contains_key("/users/{username}"));

        let item = doc.paths.paths.get("/users/{id}").expect("user route documented");
        for method in [
            PathItemType::Get,
            PathItemType::Put,
            PathItemType::Patch,
            PathItemType::Delete,
        ] {
            assert!(item.operations.contains_key(&method));
        }
    }
}
