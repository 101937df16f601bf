//! Contract with the Scores subsystem.
//!
//! The directory never ranks anything itself. It asks the Scores subsystem for
//! one page of best scores per game and trusts the order and counters it gets
//! back. [`ScoreRankingClient`] is the only seam between the two services.

pub mod http_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pagination::PageRequest;
use crate::types::{LeaderboardError, LeaderboardResult};

pub use http_client::HttpScoreRankingClient;

/// A validated ranking query.
///
/// Construction is the only place a game, page, or limit is checked, so an
/// invalid request can never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingRequest {
    game: String,
    page: u32,
    limit: u32,
}

impl RankingRequest {
    pub fn new(game: &str, page: i64, limit: i64) -> LeaderboardResult<Self> {
        let game = game.trim();
        if game.is_empty() {
            return Err(LeaderboardError::InvalidArgument(
                "game must not be empty".to_string(),
            ));
        }

        let window = PageRequest::new(page, limit)?;

        Ok(Self {
            game: game.to_string(),
            page: window.page(),
            limit: window.limit(),
        })
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// One user's best score for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub user_id: String,
    pub score: i64,
}

/// One page of the ranking, in the order the Scores subsystem decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPage {
    #[serde(rename = "data", default)]
    pub entries: Vec<ScoreEntry>,
    pub limit: u32,
    pub page: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

/// Remote access to the Scores subsystem's per-game ranking.
///
/// Implementations must return entries exactly as received: no reordering,
/// deduplication, or truncation. They do not retry. Any failure to obtain a
/// page surfaces as [`LeaderboardError::RankingUnavailable`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRankingClient: Send + Sync {
    async fn fetch_ranking(&self, request: &RankingRequest) -> LeaderboardResult<RankingPage>;
}
