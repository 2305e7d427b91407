use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

impl Config {
    /// Check everything an indexing run needs before it starts.
    pub fn validate_for_index(&self) -> anyhow::Result<()> {
        if self.omdb.api_key.trim().is_empty() {
            anyhow::bail!(
                "No OMDb API key configured; set omdb.api_key in the config file or OMDB_API_KEY"
            );
        }
        if self.index.concurrency == 0 {
            anyhow::bail!("index.concurrency must be at least 1");
        }
        if self.omdb.requests_per_second == 0 {
            anyhow::bail!("omdb.requests_per_second must be at least 1");
        }
        Ok(())
    }
}

/// OMDb metadata service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Retries after an HTTP 429; other failures are never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    2
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Catalog JSON file.
    #[serde(default = "default_location")]
    pub location: PathBuf,

    /// Maximum in-flight metadata requests.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_location() -> PathBuf {
    PathBuf::from("~/.config/movielst/movies.json")
}

fn default_concurrency() -> usize {
    8
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            concurrency: default_concurrency(),
        }
    }
}
