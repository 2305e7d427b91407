//! Core catalog types shared by the indexer, the store and the reports.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder stored for any attribute the metadata service could not
/// supply.
pub const NOT_AVAILABLE: &str = "-";

/// Rating source name used by the metadata service for IMDb scores.
pub const IMDB_SOURCE: &str = "Internet Movie Database";

/// Rating source name used by the metadata service for Rotten Tomatoes.
pub const ROTTEN_TOMATOES_SOURCE: &str = "Rotten Tomatoes";

// ---------------------------------------------------------------------------
// Discovery and classification
// ---------------------------------------------------------------------------

/// A file found during a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub extension: String,
}

/// Classifier judgment of what a filename denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Other,
}

/// Title, year and kind inferred from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationGuess {
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<u32>,
}

impl ClassificationGuess {
    /// A movie guess.
    pub fn movie(title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            kind: MediaKind::Movie,
            title: title.into(),
            year,
        }
    }

    /// A non-movie guess; the title is kept for diagnostics only.
    pub fn other(title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Other,
            title: title.into(),
            year: None,
        }
    }

    pub fn is_movie(&self) -> bool {
        self.kind == MediaKind::Movie
    }
}

// ---------------------------------------------------------------------------
// Metadata records
// ---------------------------------------------------------------------------

/// One score from one rating source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Metadata for one resolved movie, as persisted in the catalog file.
///
/// Every attribute is always present; anything the service did not know is
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Released", default = "not_available")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbID", default = "not_available")]
    pub imdb_id: String,
    #[serde(rename = "Response", with = "response_flag")]
    pub response: bool,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

impl MetadataRecord {
    /// A record with only the title known.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: not_available(),
            released: not_available(),
            runtime: not_available(),
            genre: not_available(),
            director: not_available(),
            actors: not_available(),
            awards: not_available(),
            ratings: Vec::new(),
            imdb_rating: not_available(),
            imdb_id: not_available(),
            response: true,
        }
    }

    /// Value reported by the named rating source.
    pub fn rating(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.value.as_str())
    }

    /// IMDb score such as `"8.8"`.
    ///
    /// Prefers the dedicated `imdbRating` field and falls back to the
    /// "Internet Movie Database" rating entry with its `/10` suffix removed.
    pub fn imdb_rating(&self) -> &str {
        if self.imdb_rating != NOT_AVAILABLE {
            return &self.imdb_rating;
        }
        self.rating(IMDB_SOURCE)
            .map(|v| v.split('/').next().unwrap_or(v))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Rotten Tomatoes score such as `"87%"`.
    pub fn rotten_tomatoes(&self) -> &str {
        self.rating(ROTTEN_TOMATOES_SOURCE).unwrap_or(NOT_AVAILABLE)
    }
}

/// Serializes the fetch-status flag the way the metadata service spells
/// it (`"True"` / `"False"`), and accepts either that or a JSON bool.
mod response_flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Text(String),
        }

        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The persisted collection of resolved movies, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub records: Vec<MetadataRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MetadataRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataRecord> {
        self.records.iter()
    }
}

impl FromIterator<MetadataRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = MetadataRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Everything one indexing run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Records for every movie whose metadata was resolved.
    pub catalog: Catalog,
    /// Qualifying files the classifier did not take for movies.
    pub non_movies: Vec<String>,
    /// Movie files whose metadata lookup failed, for whatever reason.
    pub not_found: Vec<String>,
    /// How many entries of `not_found` were service failures rather than
    /// a clean "no match".
    pub service_errors: usize,
    /// Number of qualifying files seen by the walk.
    pub qualifying: usize,
}

impl IndexReport {
    /// No qualifying files were found at all.
    pub fn found_nothing(&self) -> bool {
        self.qualifying == 0
    }
}
