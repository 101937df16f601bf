//! Error types for the directory and leaderboard services.

use thiserror::Error;

pub use gamehub_database::{UserError, UserResult};

/// Rejected page/limit values
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be a positive integer, got {0}")]
    InvalidPage(i64),

    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(i64),
}

/// Failures of a leaderboard composition or of the ranking call behind it.
///
/// A score entry whose user cannot be resolved is not an error: the row is
/// dropped from the page and the composition still succeeds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Malformed request, rejected before any remote call is attempted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The Scores subsystem could not produce a ranking page.
    #[error("Ranking service unavailable: {0}")]
    RankingUnavailable(String),
}

pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

impl From<PaginationError> for LeaderboardError {
    fn from(err: PaginationError) -> Self {
        LeaderboardError::InvalidArgument(err.to_string())
    }
}

impl From<PaginationError> for UserError {
    fn from(err: PaginationError) -> Self {
        UserError::ValidationFailed(err.to_string())
    }
}
