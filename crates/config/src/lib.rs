use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "gamehub.toml",
    "config/gamehub.toml",
    "crates/config/gamehub.toml",
    "../gamehub.toml",
    "../config/gamehub.toml",
    "../crates/config/gamehub.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scores: ScoresConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://gamehub.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Location of the Scores subsystem and how long a ranking call may take.
///
/// ```
/// use gamehub_config::ScoresConfig;
///
/// let scores = ScoresConfig::default();
/// assert_eq!(scores.base_url, "http://127.0.0.1:50051");
/// assert_eq!(scores.request_timeout_seconds, 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresConfig {
    #[serde(default = "ScoresConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ScoresConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ScoresConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:50051".to_string()
    }

    const fn default_request_timeout() -> u64 {
        5
    }
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Upper bound on directory lookups in flight for a single leaderboard page.
    #[serde(default = "LeaderboardConfig::default_lookup_concurrency")]
    pub lookup_concurrency: usize,
}

impl LeaderboardConfig {
    const fn default_lookup_concurrency() -> usize {
        8
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            lookup_concurrency: Self::default_lookup_concurrency(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use gamehub_config::load;
///
/// std::env::remove_var("GAMEHUB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let lookup_concurrency =
        i64::try_from(defaults.leaderboard.lookup_concurrency).unwrap_or(i64::MAX);
    let scores_timeout =
        i64::try_from(defaults.scores.request_timeout_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("scores.base_url", defaults.scores.base_url.clone())?
        .set_default("scores.request_timeout_seconds", scores_timeout)?
        .set_default("leaderboard.lookup_concurrency", lookup_concurrency)?;

    let environment_overrides = config::Environment::with_prefix("GAMEHUB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("GAMEHUB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via GAMEHUB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.leaderboard.lookup_concurrency == 0 {
        config.leaderboard.lookup_concurrency = 1;
    }
    if config.scores.request_timeout_seconds == 0 {
        config.scores.request_timeout_seconds = 1;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
