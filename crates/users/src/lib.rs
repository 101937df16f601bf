//! # GameHub Users Crate
//!
//! User directory and leaderboard composition for GameHub.
//!
//! ## Architecture
//!
//! - **Repositories**: the [`UserDirectory`] store seam (SQLite or in-memory)
//! - **Scores**: the [`ScoreRankingClient`] seam to the Scores subsystem
//! - **Services**: [`UserService`] and [`LeaderboardComposer`]
//! - **Types**: errors and response shapes
//! - **Utils**: input validation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gamehub_users::{InMemoryUserDirectory, LeaderboardComposer};
//!
//! let composer = LeaderboardComposer::new(Arc::new(InMemoryUserDirectory::new()), ranking);
//! let page = composer.compose("chess", 1, 10).await?;
//! ```

pub mod pagination;
pub mod repositories;
pub mod scores;
pub mod services;
pub mod types;
pub mod utils;

pub use gamehub_database::{
    CreateUserRequest, SqlitePool, UpdateProfileRequest, UserRecord, UserRepository, UserRole,
};

pub use pagination::{compute_total_pages, to_offset, PageRequest};
pub use repositories::{InMemoryUserDirectory, UserDirectory};
pub use scores::{HttpScoreRankingClient, RankingPage, RankingRequest, ScoreEntry, ScoreRankingClient};
pub use services::{LeaderboardComposer, UserService, DEFAULT_LOOKUP_CONCURRENCY};
pub use types::{
    LeaderboardError, LeaderboardPage, LeaderboardResult, LeaderboardRow, Paginated,
    PaginationError, UserDetails, UserError, UserResult,
};
