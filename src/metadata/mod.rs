//! Metadata lookup for identified movies.
//!
//! - [`provider`] -- the [`MetadataProvider`] trait.
//! - [`providers`] -- concrete backends (OMDb).

pub mod provider;
pub mod providers;

pub use provider::MetadataProvider;
pub use providers::OmdbProvider;
