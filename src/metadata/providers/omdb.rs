//! OMDb (Open Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] with one title query per lookup.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - Retry on HTTP 429 with `Retry-After` header support. Both the retry
//!   count and each wait are capped by config.
//! - Per-request timeout.
//! - `"N/A"` and missing fields normalized to the catalog's `"-"` sentinel.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use movielst_common::{FetchError, MetadataRecord, Rating, NOT_AVAILABLE};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::OmdbConfig;
use crate::metadata::provider::MetadataProvider;

/// How the service spells an unknown value.
const SERVICE_UNKNOWN: &str = "N/A";

// ---------------------------------------------------------------------------
// OMDb API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: Option<String>,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    awards: Option<String>,
    ratings: Option<Vec<OmdbRating>>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbRating {
    source: Option<String>,
    value: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// OMDb metadata provider.
///
/// # Examples
///
/// ```no_run
/// use movielst::config::OmdbConfig;
/// use movielst::metadata::OmdbProvider;
///
/// let config = OmdbConfig {
///     api_key: "your-api-key".into(),
///     ..OmdbConfig::default()
/// };
/// let provider = OmdbProvider::new(&config).unwrap();
/// ```
pub struct OmdbProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    /// Longest honoured `Retry-After`; never more than the request timeout.
    max_backoff: Duration,
    rate_limiter: DefaultDirectRateLimiter,
}

impl OmdbProvider {
    pub fn new(config: &OmdbConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
            max_backoff: timeout,
            rate_limiter,
        })
    }

    /// Execute the title query with rate limiting and 429-retry logic.
    async fn get(&self, query: &[(&str, &str)]) -> Result<reqwest::Response, FetchError> {
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            let resp = self
                .client
                .get(&self.base_url)
                .query(query)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS && retries < self.max_retries {
                retries += 1;
                let wait = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(Duration::from_secs(1))
                    .min(self.max_backoff);
                warn!(
                    retry = retries,
                    wait_secs = wait.as_secs(),
                    "OMDb returned 429, backing off"
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                });
            }

            return Ok(resp);
        }
    }
}

/// Map a raw service value to the catalog's sentinel when unknown.
fn normalize(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() && v != SERVICE_UNKNOWN => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Turn a decoded body into a record, or the reason there is none.
fn into_record(body: OmdbResponse, query_title: &str) -> Result<MetadataRecord, FetchError> {
    match body.response.as_deref() {
        Some(flag) if flag.eq_ignore_ascii_case("true") => {}
        Some(_) => {
            let message = body.error.unwrap_or_default();
            return if message.to_ascii_lowercase().contains("not found") {
                Err(FetchError::not_found(query_title))
            } else {
                Err(FetchError::Rejected(message))
            };
        }
        None => {
            return Err(FetchError::Malformed(
                "response has no Response flag".to_string(),
            ))
        }
    }

    let ratings = body
        .ratings
        .unwrap_or_default()
        .into_iter()
        .map(|r| Rating {
            source: normalize(r.source),
            value: normalize(r.value),
        })
        .collect();

    Ok(MetadataRecord {
        title: normalize(body.title),
        year: normalize(body.year),
        released: normalize(body.released),
        runtime: normalize(body.runtime),
        genre: normalize(body.genre),
        director: normalize(body.director),
        actors: normalize(body.actors),
        awards: normalize(body.awards),
        ratings,
        imdb_rating: normalize(body.imdb_rating),
        imdb_id: normalize(body.imdb_id),
        response: true,
    })
}

#[async_trait]
impl MetadataProvider for OmdbProvider {
    fn name(&self) -> &'static str {
        "omdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn fetch_movie(
        &self,
        title: &str,
        year: Option<u32>,
    ) -> Result<MetadataRecord, FetchError> {
        let year_str = year.map(|y| y.to_string());
        let mut query = vec![("t", title), ("type", "movie"), ("r", "json")];
        if let Some(ref y) = year_str {
            query.push(("y", y.as_str()));
        }
        query.push(("apikey", self.api_key.as_str()));

        debug!(title, year = ?year, "OMDb title lookup");

        let bytes = self
            .get(&query)
            .await?
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let body: OmdbResponse =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Malformed(e.to_string()))?;

        into_record(body, title)
    }
}
