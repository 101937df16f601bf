use std::sync::Arc;

use anyhow::{Context, Result};
use gamehub_config::AppConfig;
use gamehub_database::initialize_database;
use gamehub_users::{HttpScoreRankingClient, ScoreRankingClient};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_target(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub ranking_client: Arc<dyn ScoreRankingClient>,
    pub lookup_concurrency: usize,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let ranking_client = HttpScoreRankingClient::new(&config.scores)
            .context("failed to build scores client")?;
        info!(endpoint = ranking_client.endpoint(), "scores client ready");

        Ok(Self {
            db_pool,
            ranking_client: Arc::new(ranking_client),
            lookup_concurrency: config.leaderboard.lookup_concurrency.max(1),
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
