//! Release-name guessing.
//!
//! Folder names such as `The.Matrix.1999.1080p.BluRay.x264-GROUP` are turned into a
//! [`ParsedName`] holding the movie title and an optional resolution tag. The guess is
//! best effort: anything that does not look like a title yields `None`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_TAGS: Regex =
        Regex::new(r"^\s*(?:\[[^\]]*\]\s*)+").expect("leading tag regex");
    static ref RESOLUTION: Regex =
        Regex::new(r"(?i)\b(\d{3,4})([pi])\b").expect("resolution regex");
    static ref ULTRA_HD: Regex = Regex::new(r"(?i)\b(?:4k|uhd)\b").expect("uhd regex");
    static ref YEAR: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex");
    static ref RELEASE_MARKER: Regex = Regex::new(
        r"(?i)[\(\[\{]|\b(?:\d{3,4}[pi]|4k|uhd|blu-?ray|bdrip|brrip|bdremux|remux|web-?dl|web-?rip|hdtv|hdrip|dvdrip|dvdscr|dvd|hdcam|x264|x265|h264|h265|hevc|xvid|divx|10bit|hdr10|hdr|aac|ac3|dts|proper|repack|extended|unrated)\b"
    )
    .expect("release marker regex");
}

/// Best-effort guess extracted from a folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub title: String,
    /// Release year that ended the title, kept so a renamed folder parses back the same.
    pub year: Option<String>,
    pub quality: Option<String>,
}

/// Turns a raw folder name into a [`ParsedName`]. `None` means the name could not be guessed.
pub trait NameParser {
    fn parse(&self, name: &str) -> Option<ParsedName>;
}

impl<T: NameParser + ?Sized> NameParser for &T {
    fn parse(&self, name: &str) -> Option<ParsedName> {
        (**self).parse(name)
    }
}

/// Regex-driven parser for scene/P2P style release names.
#[derive(Debug, Clone, Default)]
pub struct ReleaseNameParser;

impl ReleaseNameParser {
    pub fn new() -> Self {
        Self
    }

    /// Resolution tag, lowercased (`1080p`). `4K`/`UHD` are reported as `2160p`.
    pub fn extract_quality(&self, name: &str) -> Option<String> {
        let normalized = normalize_separators(name);
        if let Some(captures) = RESOLUTION.captures(&normalized) {
            return Some(format!(
                "{}{}",
                &captures[1],
                captures[2].to_ascii_lowercase()
            ));
        }
        if ULTRA_HD.is_match(&normalized) {
            return Some("2160p".to_string());
        }
        None
    }

    pub fn extract_title(&self, name: &str) -> Option<String> {
        self.extract_title_and_year(name).map(|(title, _)| title)
    }

    /// Title plus the release year that cut it, if any.
    pub fn extract_title_and_year(&self, name: &str) -> Option<(String, Option<String>)> {
        let without_tags = LEADING_TAGS.replace(name, "");
        let normalized = normalize_separators(&without_tags);
        let normalized = normalized.trim_start();

        let hard_cut = RELEASE_MARKER
            .find(normalized)
            .map(|m| m.start())
            .unwrap_or(normalized.len());

        // A leading year is part of the title ("2001 A Space Odyssey"); otherwise the
        // last year before the first release marker ends it.
        let year = YEAR
            .find_iter(&normalized[..hard_cut])
            .filter(|m| m.start() > 0)
            .last();
        let cut = year.map(|m| m.start()).unwrap_or(hard_cut);

        // Sanitized up front so the renamed folder holds exactly this title.
        let title = sanitize_filename(&normalized[..cut])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let title = title.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == '.');

        if title.chars().any(char::is_alphanumeric) {
            Some((title.to_string(), year.map(|m| m.as_str().to_string())))
        } else {
            None
        }
    }
}

impl NameParser for ReleaseNameParser {
    fn parse(&self, name: &str) -> Option<ParsedName> {
        let (title, year) = self.extract_title_and_year(name)?;
        Some(ParsedName {
            title,
            year,
            quality: self.extract_quality(name),
        })
    }
}

fn normalize_separators(name: &str) -> String {
    name.replace(['.', '_'], " ")
}

/// Display form of a folder name used by the rename pass: dashes read as spaces.
pub fn display_name(name: &str) -> String {
    name.replace('-', " ")
}

/// Keep only alphanumerics, spaces, `.`, `_` and `-`, then trim.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalized folder name for a parsed movie: `Title (Year) (1080p)` before sanitizing,
/// which drops the parentheses. Parsing the result yields the same [`ParsedName`].
pub fn normalized_folder_name(parsed: &ParsedName) -> String {
    let mut name = parsed.title.clone();
    for part in [&parsed.year, &parsed.quality].into_iter().flatten() {
        name.push_str(&format!(" ({})", part));
    }
    sanitize_filename(&name)
}
