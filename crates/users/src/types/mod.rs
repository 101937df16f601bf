//! Shared types and error definitions for the directory crate.

pub mod errors;
pub mod responses;

pub use errors::{LeaderboardError, LeaderboardResult, PaginationError, UserError, UserResult};
pub use responses::{LeaderboardPage, LeaderboardRow, Paginated, UserDetails};
