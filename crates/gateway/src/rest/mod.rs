//! REST API endpoints for the gateway

pub mod health;
pub mod rpc;
pub mod users;

use axum::Router;
use crate::state::GatewayState;
use std::sync::Arc;

/// Create all HTTP routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(health::create_health_routes())
        .merge(users::create_user_routes())
        .merge(rpc::create_rpc_routes())
}
