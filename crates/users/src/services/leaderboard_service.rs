//! Cross-service leaderboard composition.
//!
//! A leaderboard page is the Scores subsystem's ranking for one game with each
//! entry replaced by the player's public profile. Entries whose player cannot
//! be resolved to an active record are dropped; the ranking's counters are
//! passed through untouched.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use gamehub_database::UserRecord;
use tracing::{debug, warn};

use crate::pagination::compute_total_pages;
use crate::repositories::UserDirectory;
use crate::scores::{RankingRequest, ScoreEntry, ScoreRankingClient};
use crate::types::{LeaderboardPage, LeaderboardResult, LeaderboardRow};

pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;

#[derive(Clone)]
pub struct LeaderboardComposer {
    directory: Arc<dyn UserDirectory>,
    ranking: Arc<dyn ScoreRankingClient>,
    lookup_concurrency: usize,
}

impl LeaderboardComposer {
    pub fn new(directory: Arc<dyn UserDirectory>, ranking: Arc<dyn ScoreRankingClient>) -> Self {
        Self {
            directory,
            ranking,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }

    /// Bound the number of directory lookups in flight for one page. Zero is treated as one.
    pub fn with_lookup_concurrency(mut self, lookup_concurrency: usize) -> Self {
        self.lookup_concurrency = lookup_concurrency.max(1);
        self
    }

    pub fn lookup_concurrency(&self) -> usize {
        self.lookup_concurrency
    }

    /// Build one leaderboard page for `game`.
    ///
    /// Arguments are checked before either remote is contacted. A ranking
    /// failure aborts the call before any directory lookup. Rows keep the
    /// ranking order; unresolved players leave gaps, so a page may hold fewer
    /// rows than `limit` while `total_count` still reflects the ranking.
    ///
    /// Dropping the returned future cancels all in-flight lookups.
    pub async fn compose(&self, game: &str, page: i64, limit: i64) -> LeaderboardResult<LeaderboardPage> {
        let request = RankingRequest::new(game, page, limit)?;
        let ranking = self.ranking.fetch_ranking(&request).await?;

        let expected_pages = compute_total_pages(ranking.total_count, ranking.limit);
        if ranking.limit > 0 && ranking.total_pages != expected_pages {
            warn!(
                game = request.game(),
                total_count = ranking.total_count,
                limit = ranking.limit,
                total_pages = ranking.total_pages,
                expected_pages,
                "ranking page counters disagree"
            );
        }

        let requested = ranking.entries.len();
        let data: Vec<LeaderboardRow> = stream::iter(ranking.entries)
            .map(|entry| self.resolve(request.game(), entry))
            .buffered(self.lookup_concurrency)
            .filter_map(|row| async move { row })
            .collect()
            .await;

        debug!(
            game = request.game(),
            page = ranking.page,
            limit = ranking.limit,
            rows = data.len(),
            dropped = requested - data.len(),
            "composed leaderboard page"
        );

        Ok(LeaderboardPage {
            data,
            limit: ranking.limit,
            page: ranking.page,
            total_count: ranking.total_count,
            total_pages: ranking.total_pages,
        })
    }

    async fn resolve(&self, game: &str, entry: ScoreEntry) -> Option<LeaderboardRow> {
        match self.directory.find_by_id(&entry.user_id).await {
            Ok(Some(user)) if user.is_active => Some(row(game, user, entry.score)),
            Ok(Some(_)) => {
                debug!(game, user_id = %entry.user_id, "skipping inactive player");
                None
            }
            Ok(None) => {
                debug!(game, user_id = %entry.user_id, "skipping unknown player");
                None
            }
            Err(error) => {
                warn!(game, user_id = %entry.user_id, %error, "player lookup failed");
                None
            }
        }
    }
}

fn row(game: &str, user: UserRecord, highest_score: i64) -> LeaderboardRow {
    LeaderboardRow {
        name: user.name,
        username: user.username,
        image: user.image,
        email: user.email,
        game: game.to_string(),
        highest_score,
    }
}
