//! Trait definition for metadata providers.
//!
//! A [`MetadataProvider`] turns a title guess into a full
//! [`MetadataRecord`]. The catalog builder only ever talks to this trait,
//! so tests can substitute a canned provider and the OMDb backend can be
//! swapped for another service.

use async_trait::async_trait;
use movielst_common::{FetchError, MetadataRecord};

/// Async trait that all metadata providers must implement.
///
/// Providers are shared across fetch tasks behind an `Arc`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"omdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has credentials and is ready to
    /// serve requests.
    fn is_available(&self) -> bool;

    /// Look up one movie by title, optionally narrowed by release year.
    ///
    /// Exactly one logical lookup per call. A clean "no such movie" answer
    /// is [`FetchError::NotFound`]; every other variant is a service
    /// failure.
    async fn fetch_movie(&self, title: &str, year: Option<u32>)
        -> Result<MetadataRecord, FetchError>;
}
