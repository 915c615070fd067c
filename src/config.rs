use serde::Deserialize;
use std::time::Duration;

/// Placeholder key shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Credits dataset: an http(s) URL (share links accepted) or a local path
    #[serde(default = "default_credits_source")]
    pub credits_source: String,

    /// Movies dataset: an http(s) URL (share links accepted) or a local path
    #[serde(default = "default_movies_source")]
    pub movies_source: String,

    /// TMDB API key; live poster lookups are disabled without one
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix for every poster image URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Redis connection URL for poster memoization
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dataset_timeout_secs")]
    pub dataset_timeout_secs: u64,

    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,
}

fn default_credits_source() -> String {
    "data/tmdb_5000_credits.csv".to_string()
}

fn default_movies_source() -> String {
    "data/tmdb_5000_movies.csv".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_dataset_timeout_secs() -> u64 {
    30
}

fn default_poster_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key to use for live poster lookups, if one is usable
    pub fn poster_api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn dataset_timeout(&self) -> Duration {
        Duration::from_secs(self.dataset_timeout_secs)
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }
}
