//! Shared application state for the gateway

use std::sync::Arc;

use gamehub_users::{
    LeaderboardComposer, ScoreRankingClient, SqlitePool, UserDirectory, UserRepository,
    UserService,
};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Directory operations
    pub user_service: Arc<UserService>,
    /// Leaderboard composition
    pub leaderboard: Arc<LeaderboardComposer>,
}

impl GatewayState {
    /// Wire services over an explicit directory store and ranking client
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        ranking: Arc<dyn ScoreRankingClient>,
        lookup_concurrency: usize,
    ) -> Self {
        let user_service = Arc::new(UserService::new(Arc::clone(&directory)));
        let leaderboard = Arc::new(
            LeaderboardComposer::new(directory, ranking).with_lookup_concurrency(lookup_concurrency),
        );

        Self {
            user_service,
            leaderboard,
        }
    }

    /// Wire services over the SQLite directory store
    pub fn from_pool(
        pool: SqlitePool,
        ranking: Arc<dyn ScoreRankingClient>,
        lookup_concurrency: usize,
    ) -> Self {
        Self::new(Arc::new(UserRepository::new(pool)), ranking, lookup_concurrency)
    }

    pub fn user_service(&self) -> &UserService {
        &self.user_service
    }

    pub fn leaderboard(&self) -> &LeaderboardComposer {
        &self.leaderboard
    }
}
