//! Business logic services for the directory.
//!
//! Services own an `Arc<dyn UserDirectory>` and never touch SQL directly.

pub mod leaderboard_service;
pub mod user_service;

pub use leaderboard_service::{LeaderboardComposer, DEFAULT_LOOKUP_CONCURRENCY};
pub use user_service::UserService;
