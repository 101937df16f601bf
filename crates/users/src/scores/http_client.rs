//! JSON-over-HTTP adapter for the Scores subsystem's ranking call.

use std::time::Duration;

use async_trait::async_trait;
use gamehub_config::ScoresConfig;
use reqwest::Client;
use tracing::{debug, warn};

use super::{RankingPage, RankingRequest, ScoreRankingClient};
use crate::types::{LeaderboardError, LeaderboardResult};

const RANKING_PATH: &str = "/rpc/ScoresService/GetUsersRankingByGame";
const MIN_TIMEOUT_SECONDS: u64 = 1;

#[derive(Debug, Clone)]
pub struct HttpScoreRankingClient {
    client: Client,
    endpoint: String,
}

impl HttpScoreRankingClient {
    /// A zero timeout would fail every call, so it is raised to one second.
    pub fn new(config: &ScoresConfig) -> Result<Self, reqwest::Error> {
        let timeout = config.request_timeout_seconds.max(MIN_TIMEOUT_SECONDS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), RANKING_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate raw arguments, then fetch. Invalid input never leaves the process.
    pub async fn fetch(&self, game: &str, page: i64, limit: i64) -> LeaderboardResult<RankingPage> {
        let request = RankingRequest::new(game, page, limit)?;
        self.fetch_ranking(&request).await
    }
}

#[async_trait]
impl ScoreRankingClient for HttpScoreRankingClient {
    async fn fetch_ranking(&self, request: &RankingRequest) -> LeaderboardResult<RankingPage> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| ranking_unavailable(request, error))?;

        let page: RankingPage = response
            .json()
            .await
            .map_err(|error| ranking_unavailable(request, error))?;

        debug!(
            game = request.game(),
            page = page.page,
            entries = page.entries.len(),
            total_count = page.total_count,
            "ranking page received"
        );

        Ok(page)
    }
}

fn ranking_unavailable(request: &RankingRequest, error: reqwest::Error) -> LeaderboardError {
    let reason = if error.is_timeout() {
        "ranking request timed out".to_string()
    } else if let Some(status) = error.status() {
        format!("scores service responded with {status}")
    } else if error.is_decode() {
        format!("malformed ranking response: {error}")
    } else {
        error.to_string()
    };

    warn!(game = request.game(), %reason, "ranking call failed");
    LeaderboardError::RankingUnavailable(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let config = ScoresConfig {
            base_url: "http://scores.internal:8080/".to_string(),
            request_timeout_seconds: 1,
        };
        let client = HttpScoreRankingClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://scores.internal:8080/rpc/ScoresService/GetUsersRankingByGame"
        );
    }

    #[tokio::test]
    async fn fetch_rejects_invalid_arguments_without_network() {
        // Nothing listens on port 9; a request attempt would fail as unavailable.
        let config = ScoresConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_seconds: 1,
        };
        let client = HttpScoreRankingClient::new(&config).unwrap();

        for (game, page, limit) in [("", 1, 10), ("chess", 0, 10), ("chess", 1, 0)] {
            let err = client.fetch(game, page, limit).await.unwrap_err();
            assert!(matches!(err, LeaderboardError::InvalidArgument(_)), "{game}/{page}/{limit}");
        }
    }
}
