//! Output types for the release name parser.

use serde::{Deserialize, Serialize};

/// Structured metadata extracted from a movie filename.
///
/// Fields are populated on a best-effort basis. `title` may be empty when
/// the name carries nothing but markers; everything else is `None` or
/// `false` when the corresponding token is not found in the input.
///
/// # Examples
///
/// ```
/// use movielst_parser::parse;
///
/// let r = parse("Inception.2010.1080p.BluRay.x264-GROUP");
/// assert_eq!(r.title, "Inception");
/// assert_eq!(r.year, Some(2010));
/// assert_eq!(r.resolution.as_deref(), Some("1080p"));
/// assert_eq!(r.group.as_deref(), Some("GROUP"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRelease {
    /// The cleaned title (separators replaced with spaces, trimmed).
    pub title: String,

    /// Release year (1900--2099).
    pub year: Option<u32>,

    /// Season number (from S01E01 or 1x01 tags).
    pub season: Option<u32>,

    /// Episode number (from S01E01 or 1x01 tags).
    pub episode: Option<u32>,

    /// Video resolution, e.g. `"1080p"`, `"2160p"`.
    pub resolution: Option<String>,

    /// Media source, e.g. `"BluRay"`, `"WEB-DL"`, `"DVD"`.
    pub source: Option<String>,

    /// Video codec, e.g. `"x264"`, `"H.265"`, `"XviD"`.
    pub video_codec: Option<String>,

    /// Audio codec, e.g. `"DTS-HD"`, `"AAC"`.
    pub audio_codec: Option<String>,

    /// Edition, e.g. `"Director's Cut"`, `"Extended"`.
    pub edition: Option<String>,

    /// Release group (the text after the final hyphen).
    pub group: Option<String>,

    /// The name marks a sample clip.
    pub sample: bool,

    /// The name marks a trailer or teaser.
    pub trailer: bool,

    /// The name carries at least one quality, source, codec or edition
    /// marker.
    pub has_release_markers: bool,
}

impl ParsedRelease {
    /// Create a new `ParsedRelease` with only the title populated.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether the name looks like a TV episode.
    pub fn is_episode(&self) -> bool {
        self.season.is_some() || self.episode.is_some()
    }
}
