//! movielst-common: shared types, path rules, and errors.
//!
//! - **Catalog types**: metadata records, the catalog, classification guesses
//! - **Path rules**: which files are large enough and video enough to index
//! - **Errors**: metadata fetch and catalog store failures

pub mod error;
pub mod paths;
pub mod types;

pub use error::{FetchError, StoreError};
pub use types::{
    Catalog, ClassificationGuess, IndexReport, MediaFile, MediaKind, MetadataRecord, Rating,
    NOT_AVAILABLE,
};
