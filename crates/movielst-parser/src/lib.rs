//! movielst-parser: release-name parser for movie filenames.
//!
//! Extracts a title, a release year and the release markers that say what
//! kind of file a name describes (resolution, source, codec, episode tags,
//! sample/trailer markers).
//!
//! # Quick start
//!
//! ```
//! use movielst_parser::parse;
//!
//! let r = parse("The.Matrix.1999.1080p.BluRay.x264-GROUP");
//! assert_eq!(r.title, "The Matrix");
//! assert_eq!(r.year, Some(1999));
//! assert_eq!(r.source.as_deref(), Some("BluRay"));
//! assert!(r.has_release_markers);
//! ```

pub mod tokenizer;
pub mod types;
mod parser;

pub use types::ParsedRelease;

/// Parse a release name (without its file extension) into structured
/// metadata.
///
/// Never fails: unparseable input yields a release whose title is the
/// cleaned input and whose markers are all empty.
///
/// # Examples
///
/// ```
/// let r = movielst_parser::parse("Blade.Runner.2049.2017.2160p.UHD.BluRay.x265");
/// assert_eq!(r.title, "Blade Runner 2049");
/// assert_eq!(r.year, Some(2017));
/// ```
pub fn parse(input: &str) -> ParsedRelease {
    parser::parse(input)
}
