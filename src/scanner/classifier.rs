//! Filename classification.
//!
//! Decides from a bare filename whether a file is a movie worth looking
//! up, and if so under which title and year. No filesystem or network
//! access happens here.
//!
//! ## Policy
//!
//! A name is **not** a movie when it carries an episode marker (`S01E02`,
//! `1x02`), a sample/trailer marker after the title, no usable title, or
//! no release evidence at all (neither a year nor any
//! quality/source/codec/edition marker). Everything else is a movie.

use movielst_common::{paths::extension_of, ClassificationGuess};
use movielst_parser::ParsedRelease;
use std::path::Path;

/// Turns a filename into a movie/other guess.
pub trait Classifier: Send + Sync {
    /// Never fails; the worst case is a guess of kind `Other`.
    fn classify(&self, file_name: &str) -> ClassificationGuess;
}

/// Classifier backed by the release-name parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReleaseClassifier;

impl ReleaseClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for ReleaseClassifier {
    fn classify(&self, file_name: &str) -> ClassificationGuess {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);
        let stem = match extension_of(base) {
            Some(ext) => &base[..base.len() - ext.len()],
            None => base,
        };

        let parsed = movielst_parser::parse(stem);
        judge(parsed)
    }
}

fn judge(parsed: ParsedRelease) -> ClassificationGuess {
    let not_a_feature = parsed.is_episode() || parsed.sample || parsed.trailer;
    let no_evidence = !parsed.has_release_markers && parsed.year.is_none();

    if not_a_feature || no_evidence || parsed.title.trim().is_empty() {
        return ClassificationGuess::other(parsed.title);
    }

    ClassificationGuess::movie(parsed.title, parsed.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use movielst_common::MediaKind;

    fn classify(name: &str) -> ClassificationGuess {
        ReleaseClassifier::new().classify(name)
    }

    #[test]
    fn test_scene_release_is_movie() {
        let guess = classify("Inception.2010.1080p.BluRay.x264.mkv");
        assert_eq!(guess.kind, MediaKind::Movie);
        assert_eq!(guess.title, "Inception");
        assert_eq!(guess.year, Some(2010));
    }

    #[test]
    fn test_title_and_year_only_is_movie() {
        let guess = classify("UnknownFilmXYZ.2099.mkv");
        assert!(guess.is_movie());
        assert_eq!(guess.title, "UnknownFilmXYZ");
        assert_eq!(guess.year, Some(2099));
    }

    #[test]
    fn test_quality_marker_without_year_is_movie() {
        let guess = classify("Heat.1080p.BluRay.mkv");
        assert!(guess.is_movie());
        assert_eq!(guess.title, "Heat");
        assert_eq!(guess.year, None);
    }

    #[test]
    fn test_home_video_is_other() {
        assert_eq!(classify("RandomHomeVideo.mov").kind, MediaKind::Other);
    }

    #[test]
    fn test_episode_is_other() {
        assert!(!classify("Breaking.Bad.S01E01.720p.HDTV.x264-DEMAND.mkv").is_movie());
        assert!(!classify("Some.Show.1x02.HDTV.avi").is_movie());
    }

    #[test]
    fn test_sample_and_trailer_are_other() {
        assert!(!classify("Inception.2010.1080p.sample.mkv").is_movie());
        assert!(!classify("Inception.2010.Trailer.mp4").is_movie());
    }

    #[test]
    fn test_marker_word_inside_title_is_movie() {
        let guess = classify("The.Trailer.Park.Boys.Movie.2006.1080p.mkv");
        assert!(guess.is_movie());
        assert_eq!(guess.title, "The Trailer Park Boys Movie");
        assert_eq!(guess.year, Some(2006));
    }

    #[test]
    fn test_accented_titles_survive() {
        let guess = classify("Amélie.2001.1080p.BluRay.x264.mkv");
        assert!(guess.is_movie());
        assert_eq!(guess.title, "Amélie");
        assert_eq!(guess.year, Some(2001));

        assert_eq!(classify("Léon.1994.1080p.mkv").title, "Léon");
    }

    #[test]
    fn test_extension_only_name_is_other() {
        let guess = classify(".mkv");
        assert!(!guess.is_movie());
        assert!(!classify("1080p.mkv").is_movie());
    }

    #[test]
    fn test_sequel_year_stays_in_title() {
        let guess = classify("Blade.Runner.2049.2017.2160p.UHD.BluRay.x265.mkv");
        assert_eq!(guess.title, "Blade Runner 2049");
        assert_eq!(guess.year, Some(2017));
    }

    #[test]
    fn test_directory_component_tolerated() {
        let guess = classify("/movies/Heat (1995)/Heat (1995).mkv");
        assert!(guess.is_movie());
        assert_eq!(guess.title, "Heat");
        assert_eq!(guess.year, Some(1995));
    }
}
