//! Path utilities for deciding which files are worth indexing.
//!
//! A file qualifies when it is larger than [`MIN_MOVIE_SIZE`] and its
//! extension is one of the recognized video extensions. Extension matching
//! is exact and case-sensitive.

use std::path::Path;

/// Files at or below this size (25 MiB) are never considered movies.
pub const MIN_MOVIE_SIZE: u64 = 25 * 1024 * 1024;

/// Recognized video container and codec extensions, leading dot included.
const VIDEO_EXTENSIONS: &[&str] = &[
    ".3g2", ".3gp", ".3gp2", ".3gpp", ".60d", ".ajp", ".asf", ".asx", ".avchd", ".avi", ".bik",
    ".bix", ".box", ".cam", ".dat", ".divx", ".dmf", ".dv", ".dvr-ms", ".evo", ".flc", ".fli",
    ".flic", ".flv", ".flx", ".gvi", ".gvp", ".h264", ".m1v", ".m2p", ".m2ts", ".m2v", ".m4e",
    ".m4v", ".mjp", ".mjpeg", ".mjpg", ".mkv", ".moov", ".mov", ".movhd", ".movie", ".movx",
    ".mp4", ".mpe", ".mpeg", ".mpg", ".mpv", ".mpv2", ".mxf", ".nsv", ".nut", ".ogg", ".ogm",
    ".omf", ".ps", ".qt", ".ram", ".rm", ".rmvb", ".swf", ".ts", ".vfw", ".vid", ".video",
    ".viv", ".vivo", ".vob", ".vro", ".wm", ".wmv", ".wmx", ".wrap", ".wvx", ".wx", ".x264",
    ".xvid",
];

/// Extension of a base file name, leading dot included.
///
/// The extension is the text from the last dot onwards. A name without a
/// dot, or whose only dot is the leading one (`.hidden`), has none.
///
/// # Examples
///
/// ```
/// use movielst_common::paths::extension_of;
///
/// assert_eq!(extension_of("Inception.2010.mkv"), Some(".mkv"));
/// assert_eq!(extension_of(".hidden"), None);
/// assert_eq!(extension_of("README"), None);
/// ```
pub fn extension_of(file_name: &str) -> Option<&str> {
    let trimmed = file_name.trim_start_matches('.');
    let leading = file_name.len() - trimmed.len();
    trimmed.rfind('.').map(|idx| &file_name[leading + idx..])
}

/// Check if an extension (with its leading dot) is a recognized video
/// extension.
pub fn is_video_extension(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext)
}

/// Check if a path has a recognized video extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use movielst_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("/movies/Heat.1995.mkv")));
/// assert!(!is_video_file(Path::new("Heat.1995.MKV")));
/// assert!(!is_video_file(Path::new("readme.txt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(extension_of)
        .map(is_video_extension)
        .unwrap_or(false)
}

/// Whether a file of `size` bytes at `path` should be indexed.
pub fn is_qualifying(path: &Path, size: u64) -> bool {
    size > MIN_MOVIE_SIZE && is_video_file(path)
}

/// Get the list of recognized video extensions.
#[must_use]
pub fn video_extensions() -> &'static [&'static str] {
    VIDEO_EXTENSIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("movie.mkv"), Some(".mkv"));
        assert_eq!(extension_of("movie.1080p.mkv"), Some(".mkv"));
        assert_eq!(extension_of("show.dvr-ms"), Some(".dvr-ms"));
        assert_eq!(extension_of(".hidden.mkv"), Some(".mkv"));
        assert_eq!(extension_of("..mkv"), None);
        assert_eq!(extension_of("no_extension"), None);
        assert_eq!(extension_of(""), None);
    }

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("movie.mkv")));
        assert!(is_video_file(Path::new("movie.mp4")));
        assert!(is_video_file(Path::new("movie.avi")));
        assert!(is_video_file(Path::new("movie.m4v")));
        assert!(is_video_file(Path::new("movie.flv")));
        assert!(is_video_file(Path::new("movie.rmvb")));
        assert!(is_video_file(Path::new("/path/to/movie.mov")));

        // Case sensitive
        assert!(!is_video_file(Path::new("movie.MKV")));
        assert!(!is_video_file(Path::new("movie.Mp4")));

        // Not video files
        assert!(!is_video_file(Path::new("subtitle.srt")));
        assert!(!is_video_file(Path::new("readme.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
        assert!(!is_video_file(Path::new("")));
    }

    #[test]
    fn test_is_qualifying() {
        let path = Path::new("Inception.2010.mkv");
        assert!(is_qualifying(path, MIN_MOVIE_SIZE + 1));
        assert!(is_qualifying(path, 2 * 1024 * 1024 * 1024));
        assert!(!is_qualifying(path, MIN_MOVIE_SIZE));
        assert!(!is_qualifying(Path::new("readme.txt"), 2 * 1024 * 1024 * 1024));
    }

    #[test]
    fn test_video_extensions() {
        let exts = video_extensions();
        assert_eq!(exts.len(), 77);
        assert!(exts.iter().all(|e| e.starts_with('.')));
        assert!(exts.contains(&".mkv"));
        assert!(exts.contains(&".dvr-ms"));
    }
}
