//! Logos-based tokenizer for movie filenames.
//!
//! Each variant of [`Token`] is either a release marker (something that
//! ends the title portion of a name) or a structural piece of text. The
//! lexer is case-insensitive for all keyword patterns. Characters that no
//! pattern accepts (parentheses, commas, ...) are dropped.

use logos::Logos;

/// Token types emitted by the Logos lexer.
///
/// More specific patterns receive higher priorities so they win when
/// several regexes match the same span. Logos always prefers the longest
/// match, so `Word` only wins when no keyword covers the whole word.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum Token<'src> {
    // -----------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------
    /// Video resolution: 2160p, 1080p, 720p, 576p, 480p.
    #[regex(r"(?i)(2160|1080|720|576|480)[pi]", priority = 10)]
    Resolution(&'src str),

    /// 4K / UHD marker.
    #[regex(r"(?i)(4K|UHD)", priority = 8)]
    Uhd(&'src str),

    // -----------------------------------------------------------------
    // Source
    // -----------------------------------------------------------------
    /// BluRay / Blu-Ray / BRRip / BDRip source.
    #[regex(r"(?i)(Blu-?Ray|BRRip|BDRip)", priority = 8)]
    SourceBluRay(&'src str),

    /// WEB-DL / WEBDL source.
    #[regex(r"(?i)(WEB-?DL|WEBDL)", priority = 8)]
    SourceWebDL(&'src str),

    /// WEBRip source.
    #[regex(r"(?i)WEB-?Rip", priority = 8)]
    SourceWebRip(&'src str),

    /// HDTV source.
    #[regex(r"(?i)HDTV", priority = 8)]
    SourceHDTV(&'src str),

    /// DVDRip / DVDScr / DVD source.
    #[regex(r"(?i)(DVDRip|DVDScr|DVD)", priority = 8)]
    SourceDVD(&'src str),

    /// Camera / telesync sources.
    #[regex(r"(?i)(CAMRip|HDCAM|HDTS|TELESYNC)", priority = 8)]
    SourceCam(&'src str),

    /// Remux quality/source indicator.
    #[regex(r"(?i)Remux", priority = 8)]
    SourceRemux(&'src str),

    // -----------------------------------------------------------------
    // Video codecs
    // -----------------------------------------------------------------
    /// x264 encoder.
    #[regex(r"(?i)x264", priority = 9)]
    CodecX264(&'src str),

    /// x265 encoder.
    #[regex(r"(?i)x265", priority = 9)]
    CodecX265(&'src str),

    /// H.264 / H264 / AVC.
    #[regex(r"(?i)(H\.?264|AVC)", priority = 8)]
    CodecH264(&'src str),

    /// H.265 / H265 / HEVC.
    #[regex(r"(?i)(H\.?265|HEVC)", priority = 8)]
    CodecH265(&'src str),

    /// XviD / DivX codecs.
    #[regex(r"(?i)(XviD|DivX)", priority = 8)]
    CodecMpeg4(&'src str),

    // -----------------------------------------------------------------
    // Audio codecs
    // -----------------------------------------------------------------
    /// DTS-HD.MA / DTS-HD audio (must be higher priority than plain DTS).
    #[regex(r"(?i)DTS-?HD(\.?MA)?", priority = 10)]
    AudioDTSHD(&'src str),

    /// TrueHD audio.
    #[regex(r"(?i)TrueHD", priority = 9)]
    AudioTrueHD(&'src str),

    /// E-AC-3 / EAC3 / DD+ / DDP.
    #[regex(r"(?i)(E-?AC-?3|EAC3|DD\+|DDP)", priority = 9)]
    AudioEAC3(&'src str),

    /// AC3 (lower priority than EAC3).
    #[regex(r"(?i)AC-?3", priority = 7)]
    AudioAC3(&'src str),

    /// Plain DTS audio.
    #[regex(r"(?i)DTS", priority = 6)]
    AudioDTS(&'src str),

    /// AAC audio.
    #[regex(r"(?i)AAC", priority = 8)]
    AudioAAC(&'src str),

    // -----------------------------------------------------------------
    // HDR formats
    // -----------------------------------------------------------------
    /// HDR10+ / HDR10 / HDR.
    #[regex(r"(?i)HDR(10\+?)?", priority = 8)]
    Hdr(&'src str),

    // -----------------------------------------------------------------
    // Edition
    // -----------------------------------------------------------------
    /// Director's Cut (handles dots/spaces).
    #[regex(r"(?i)Directors?[.\s'-]*Cut", priority = 8)]
    EditionDirectorsCut(&'src str),

    /// Extended / Unrated / Remastered / IMAX / Theatrical editions.
    #[regex(r"(?i)(Extended|Unrated|Remastered|IMAX|Theatrical)", priority = 7)]
    Edition(&'src str),

    // -----------------------------------------------------------------
    // Revision
    // -----------------------------------------------------------------
    /// PROPER / REPACK release.
    #[regex(r"(?i)(PROPER|REPACK)", priority = 7)]
    Revision(&'src str),

    // -----------------------------------------------------------------
    // Non-feature content
    // -----------------------------------------------------------------
    /// Sample clip marker.
    #[regex(r"(?i)sample", priority = 7)]
    Sample(&'src str),

    /// Trailer / teaser marker.
    #[regex(r"(?i)(trailer|teaser)", priority = 7)]
    Trailer(&'src str),

    // -----------------------------------------------------------------
    // Season / Episode
    // -----------------------------------------------------------------
    /// Season+episode tag, e.g. S01E01, S01E01E02 (multi-episode).
    #[regex(r"(?i)S\d{1,2}E\d{1,3}(E\d{1,3})*", priority = 12)]
    SeasonEpisode(&'src str),

    /// Cross-style episode tag, e.g. 1x02, 10x11.
    #[regex(r"(?i)\d{1,2}x\d{2,3}", priority = 12)]
    CrossEpisode(&'src str),

    // -----------------------------------------------------------------
    // Year
    // -----------------------------------------------------------------
    /// Four-digit year 1900--2099.
    #[regex(r"(19|20)\d{2}", priority = 5)]
    Year(&'src str),

    // -----------------------------------------------------------------
    // Structural / separators
    // -----------------------------------------------------------------
    /// Bracketed tag such as `[YTS.MX]` or `[1080p]`; never part of a title.
    #[regex(r"\[[^\]]*\]", priority = 3)]
    BracketTag(&'src str),

    /// Dot separator.
    #[token(".")]
    Dot,

    /// Hyphen separator.
    #[token("-")]
    Hyphen,

    /// Underscore separator.
    #[token("_")]
    Underscore,

    /// Generic word token (lowest priority -- anything not matched above).
    #[regex(r"\p{L}[\p{L}\p{N}']*", priority = 1)]
    Word(&'src str),

    /// Numeric token.
    #[regex(r"\d+", priority = 2)]
    Number(&'src str),
}

impl<'src> Token<'src> {
    /// Whether this token is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Dot | Token::Hyphen | Token::Underscore)
    }

    /// Whether this token is a release marker that ends the title.
    ///
    /// Years are handled separately because they may belong to a title.
    pub fn is_marker(&self) -> bool {
        !matches!(
            self,
            Token::Word(_)
                | Token::Number(_)
                | Token::Year(_)
                | Token::Dot
                | Token::Hyphen
                | Token::Underscore
                | Token::BracketTag(_)
        )
    }

    /// Whether this marker says the file is an actual release of a feature
    /// (quality, source, codec, edition).
    pub fn is_release_evidence(&self) -> bool {
        self.is_marker()
            && !matches!(
                self,
                Token::Sample(_)
                    | Token::Trailer(_)
                    | Token::SeasonEpisode(_)
                    | Token::CrossEpisode(_)
            )
    }

    /// The matched text of a payload-carrying token.
    pub fn text(&self) -> Option<&'src str> {
        match self {
            Token::Dot | Token::Hyphen | Token::Underscore => None,
            Token::Resolution(s)
            | Token::Uhd(s)
            | Token::SourceBluRay(s)
            | Token::SourceWebDL(s)
            | Token::SourceWebRip(s)
            | Token::SourceHDTV(s)
            | Token::SourceDVD(s)
            | Token::SourceCam(s)
            | Token::SourceRemux(s)
            | Token::CodecX264(s)
            | Token::CodecX265(s)
            | Token::CodecH264(s)
            | Token::CodecH265(s)
            | Token::CodecMpeg4(s)
            | Token::AudioDTSHD(s)
            | Token::AudioTrueHD(s)
            | Token::AudioEAC3(s)
            | Token::AudioAC3(s)
            | Token::AudioDTS(s)
            | Token::AudioAAC(s)
            | Token::Hdr(s)
            | Token::EditionDirectorsCut(s)
            | Token::Edition(s)
            | Token::Revision(s)
            | Token::Sample(s)
            | Token::Trailer(s)
            | Token::SeasonEpisode(s)
            | Token::CrossEpisode(s)
            | Token::Year(s)
            | Token::BracketTag(s)
            | Token::Word(s)
            | Token::Number(s) => Some(*s),
        }
    }
}

/// A token together with the byte span it occupies in the original input.
#[derive(Debug, Clone)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: std::ops::Range<usize>,
}

/// Tokenize an input string into a `Vec` of spanned tokens.
pub fn tokenize(input: &str) -> Vec<SpannedToken<'_>> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| SpannedToken { token, span }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn tokenize_basic_movie() {
        let tokens = kinds("Inception.2010.1080p.BluRay.x264");
        assert!(tokens.contains(&Token::Word("Inception")));
        assert!(tokens.contains(&Token::Year("2010")));
        assert!(tokens.contains(&Token::Resolution("1080p")));
        assert!(tokens.contains(&Token::SourceBluRay("BluRay")));
        assert!(tokens.contains(&Token::CodecX264("x264")));
    }

    #[test]
    fn words_containing_keywords_stay_words() {
        // Longest match wins, so "Dvorak" is not a DVD source.
        let tokens = kinds("Dvorak.Sampler");
        assert_eq!(tokens[0], Token::Word("Dvorak"));
        assert_eq!(tokens[2], Token::Word("Sampler"));
    }

    #[test]
    fn accented_letters_stay_in_words() {
        let tokens = kinds("Amélie.2001.1080p");
        assert_eq!(tokens[0], Token::Word("Amélie"));
        assert_eq!(tokens[2], Token::Year("2001"));
    }

    #[test]
    fn tokenize_webdl() {
        let tokens = tokenize("Movie.2020.WEB-DL.720p");
        assert!(tokens.iter().any(|t| matches!(t.token, Token::SourceWebDL(_))));
    }

    #[test]
    fn tokenize_episode_markers() {
        assert!(kinds("Show.S01E01.720p")
            .iter()
            .any(|t| matches!(t, Token::SeasonEpisode("S01E01"))));
        assert!(kinds("Show.1x02.HDTV")
            .iter()
            .any(|t| matches!(t, Token::CrossEpisode("1x02"))));
    }

    #[test]
    fn tokenize_bracket_tag() {
        let tokens = kinds("[YTS.MX] Movie 2019");
        assert_eq!(tokens[0], Token::BracketTag("[YTS.MX]"));
        assert_eq!(tokens[1], Token::Word("Movie"));
        assert_eq!(tokens[2], Token::Year("2019"));
    }

    #[test]
    fn parentheses_are_dropped() {
        let tokens = kinds("Heat (1995)");
        assert_eq!(tokens, vec![Token::Word("Heat"), Token::Year("1995")]);
    }

    #[test]
    fn release_evidence_excludes_non_feature_markers() {
        assert!(Token::Resolution("1080p").is_release_evidence());
        assert!(!Token::Sample("sample").is_release_evidence());
        assert!(!Token::SeasonEpisode("S01E01").is_release_evidence());
        assert!(!Token::Year("1999").is_release_evidence());
    }
}
