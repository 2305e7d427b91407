//! Core parsing logic for movie filenames.
//!
//! The parser operates in three phases:
//! 1. Tokenize the input using the Logos lexer, turning sample/trailer
//!    keywords inside the title back into words.
//! 2. Scan tokens to identify the release group and all known markers.
//! 3. Extract the title and year from the leading text.

use crate::tokenizer::{tokenize, SpannedToken, Token};
use crate::types::ParsedRelease;

/// Parse a release name string into a [`ParsedRelease`].
pub fn parse(input: &str) -> ParsedRelease {
    let mut tokens = tokenize(input);

    if tokens.is_empty() {
        return ParsedRelease::new(clean_title(input));
    }

    let mut release = ParsedRelease::default();

    demote_title_keywords(&mut tokens);
    let group_idx = extract_group(&tokens, &mut release);
    extract_markers(&tokens, &mut release);
    extract_title_and_year(&tokens, group_idx, &mut release);

    release
}

// -------------------------------------------------------------------------
// Title keywords
// -------------------------------------------------------------------------

/// Treat `sample`/`trailer` as title words when more title words follow
/// them and no year or marker came first ("The.Trailer.Park.Boys.2006").
fn demote_title_keywords(tokens: &mut [SpannedToken<'_>]) {
    for i in 0..tokens.len() {
        let text = match tokens[i].token {
            Token::Sample(text) | Token::Trailer(text) => text,
            Token::Year(_) => return,
            ref token if token.is_marker() => return,
            _ => continue,
        };

        let followed_by_word = tokens[i + 1..]
            .iter()
            .find(|t| !t.token.is_separator())
            .is_some_and(|t| matches!(t.token, Token::Word(_)));
        if !followed_by_word {
            return;
        }
        tokens[i].token = Token::Word(text);
    }
}

// -------------------------------------------------------------------------
// Release group extraction
// -------------------------------------------------------------------------

/// Find the release group -- the word after the last hyphen, provided
/// nothing significant follows it. Returns the group's token index.
fn extract_group(tokens: &[SpannedToken<'_>], release: &mut ParsedRelease) -> Option<usize> {
    let hyphen = tokens.iter().rposition(|t| t.token == Token::Hyphen)?;
    let candidate = tokens.get(hyphen + 1)?;

    if !matches!(candidate.token, Token::Word(_)) {
        return None;
    }

    // A group only counts when something before the hyphen is a release
    // marker; otherwise "Spider-Man" would lose half its title.
    let marked = tokens[..hyphen]
        .iter()
        .any(|t| t.token.is_marker() || matches!(t.token, Token::Year(_)));
    let trailing = tokens[hyphen + 2..]
        .iter()
        .any(|t| !(t.token.is_separator() || matches!(t.token, Token::BracketTag(_))));

    if !marked || trailing {
        return None;
    }

    release.group = candidate.token.text().map(str::to_string);
    Some(hyphen + 1)
}

// -------------------------------------------------------------------------
// Marker extraction
// -------------------------------------------------------------------------

/// Scan all tokens and populate the marker fields of `release`.
fn extract_markers(tokens: &[SpannedToken<'_>], release: &mut ParsedRelease) {
    for st in tokens {
        if st.token.is_release_evidence() {
            release.has_release_markers = true;
        }

        match &st.token {
            Token::SeasonEpisode(text) => {
                if release.season.is_none() {
                    parse_season_episode(text, release);
                }
            }
            Token::CrossEpisode(text) => {
                if release.season.is_none() {
                    parse_cross_episode(text, release);
                }
            }

            Token::Resolution(text) => {
                if release.resolution.is_none() {
                    release.resolution = Some(text.to_lowercase());
                }
            }
            Token::Uhd(_) => set_if_none(&mut release.resolution, "2160p"),

            Token::SourceBluRay(_) => set_if_none(&mut release.source, "BluRay"),
            Token::SourceWebDL(_) => set_if_none(&mut release.source, "WEB-DL"),
            Token::SourceWebRip(_) => set_if_none(&mut release.source, "WEBRip"),
            Token::SourceHDTV(_) => set_if_none(&mut release.source, "HDTV"),
            Token::SourceDVD(_) => set_if_none(&mut release.source, "DVD"),
            Token::SourceCam(_) => set_if_none(&mut release.source, "CAM"),
            Token::SourceRemux(_) => set_if_none(&mut release.source, "Remux"),

            Token::CodecX264(_) => set_if_none(&mut release.video_codec, "x264"),
            Token::CodecX265(_) => set_if_none(&mut release.video_codec, "x265"),
            Token::CodecH264(_) => set_if_none(&mut release.video_codec, "H.264"),
            Token::CodecH265(_) => set_if_none(&mut release.video_codec, "H.265"),
            Token::CodecMpeg4(text) => {
                let name = if text.eq_ignore_ascii_case("divx") {
                    "DivX"
                } else {
                    "XviD"
                };
                set_if_none(&mut release.video_codec, name);
            }

            Token::AudioDTSHD(_) => set_if_none(&mut release.audio_codec, "DTS-HD"),
            Token::AudioTrueHD(_) => set_if_none(&mut release.audio_codec, "TrueHD"),
            Token::AudioEAC3(_) => set_if_none(&mut release.audio_codec, "EAC3"),
            Token::AudioAC3(_) => set_if_none(&mut release.audio_codec, "AC3"),
            Token::AudioDTS(_) => set_if_none(&mut release.audio_codec, "DTS"),
            Token::AudioAAC(_) => set_if_none(&mut release.audio_codec, "AAC"),

            Token::EditionDirectorsCut(_) => {
                set_if_none(&mut release.edition, "Director's Cut");
            }
            Token::Edition(text) => {
                if release.edition.is_none() {
                    release.edition = Some(capitalize(text));
                }
            }

            Token::Sample(_) => release.sample = true,
            Token::Trailer(_) => release.trailer = true,

            _ => {}
        }
    }
}

// -------------------------------------------------------------------------
// Title and year extraction
// -------------------------------------------------------------------------

/// Build the title from the words preceding the first release marker and
/// pick the release year.
///
/// A run of year tokens right before the first marker ends the title; the
/// last year of that run is the release year and earlier ones belong to
/// the title ("Blade Runner 2049 2017"). A lone year with no title words
/// in front of it is the title itself ("1917").
fn extract_title_and_year(
    tokens: &[SpannedToken<'_>],
    group_idx: Option<usize>,
    release: &mut ParsedRelease,
) {
    let significant: Vec<&Token<'_>> = tokens
        .iter()
        .enumerate()
        .filter(|(i, st)| {
            Some(*i) != group_idx
                && !st.token.is_separator()
                && !matches!(st.token, Token::BracketTag(_))
        })
        .map(|(_, st)| &st.token)
        .collect();

    let marker_idx = significant
        .iter()
        .position(|t| t.is_marker())
        .unwrap_or(significant.len());
    let head = &significant[..marker_idx];

    let mut year_start = head.len();
    while year_start > 0 && matches!(head[year_start - 1], Token::Year(_)) {
        year_start -= 1;
    }
    let (title_part, years) = head.split_at(year_start);

    let mut parts: Vec<&str> = title_part.iter().filter_map(|t| t.text()).collect();

    match years.split_last() {
        Some((last, _)) if parts.is_empty() && years.len() == 1 => {
            if let Some(text) = last.text() {
                parts.push(text);
            }
        }
        Some((last, rest)) => {
            parts.extend(rest.iter().filter_map(|t| t.text()));
            release.year = last.text().and_then(|y| y.parse().ok());
        }
        None => {}
    }

    // A year after the first marker still counts when the head had none.
    if release.year.is_none() {
        release.year = significant[marker_idx..]
            .iter()
            .find_map(|t| match t {
                Token::Year(y) => y.parse().ok(),
                _ => None,
            });
    }

    release.title = parts.join(" ");
}

// -------------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------------

/// Parse a SeasonEpisode token like "S01E01" or "S02E03E04".
fn parse_season_episode(text: &str, release: &mut ParsedRelease) {
    let upper = text.to_uppercase();
    let after_s = &upper[1..];
    if let Some(e_pos) = after_s.find('E') {
        release.season = after_s[..e_pos].parse().ok();
        release.episode = after_s[e_pos..]
            .split('E')
            .find(|s| !s.is_empty())
            .and_then(|s| s.parse().ok());
    }
}

/// Parse a CrossEpisode token like "1x02".
fn parse_cross_episode(text: &str, release: &mut ParsedRelease) {
    let lower = text.to_lowercase();
    if let Some((season, episode)) = lower.split_once('x') {
        release.season = season.parse().ok();
        release.episode = episode.parse().ok();
    }
}

/// Replace dots, underscores with spaces and trim.
fn clean_title(raw: &str) -> String {
    raw.replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// "EXTENDED" -> "Extended".
fn capitalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Set an `Option<String>` only if it is currently `None`.
fn set_if_none(field: &mut Option<String>, value: &str) {
    if field.is_none() {
        *field = Some(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_episode_parsing() {
        let mut r = ParsedRelease::default();
        parse_season_episode("s02e03e04", &mut r);
        assert_eq!(r.season, Some(2));
        assert_eq!(r.episode, Some(3));
    }

    #[test]
    fn cross_episode_parsing() {
        let mut r = ParsedRelease::default();
        parse_cross_episode("10X11", &mut r);
        assert_eq!(r.season, Some(10));
        assert_eq!(r.episode, Some(11));
    }

    #[test]
    fn keyword_inside_title_becomes_word() {
        let mut tokens = tokenize("The.Trailer.Park.Boys.2006");
        demote_title_keywords(&mut tokens);
        assert!(tokens.iter().any(|t| t.token == Token::Word("Trailer")));

        let mut tokens = tokenize("Movie.2020.Sample.Reel");
        demote_title_keywords(&mut tokens);
        assert!(tokens.iter().any(|t| t.token == Token::Sample("Sample")));
    }

    #[test]
    fn capitalize_edition() {
        assert_eq!(capitalize("EXTENDED"), "Extended");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn clean_title_collapses_separators() {
        assert_eq!(clean_title("..Some_Movie.."), "Some Movie");
    }
}
