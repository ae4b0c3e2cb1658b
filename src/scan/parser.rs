//! Title and year extraction from noisy folder and file names.
//!
//! Names like `The.Matrix.1999.1080p.BluRay.x264-GRP` carry the title up
//! front followed by release metadata. The parser truncates at the first
//! quality/source/codec token or standalone year and cleans up the rest.
//! Canonical `Title (YYYY)` names skip the heuristic entirely.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical movie folder name: title followed by a year in parentheses.
static RE_GOOD_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<title>.+?)\s*\((?P<year>\d{4})\)").expect("Invalid title regex"));

/// Quality, source, codec, audio, and language tokens that end the title part.
static RE_RELEASE_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"480p|576p|720p|1024p|1080p|1440p|2160p|4k|uhd|hdr|hdr10|dolby\s+vision",
        r"|x264|x265|xvid|divx|h\.?26[45]|avc|hevc",
        r"|dvdrip|brrip|bdrip|bluray|web[- ]?dl|web[- ]?rip|hdrip|tvrip|pdtv|r5|cams?|ts|tc|telesync|telecine",
        r"|proper|repack|extended|limited|uncut",
        r"|dts(?:-?hd)?|truehd|atmos|aac|ac-3|eac3|mp3",
        r"|multi|subs?|subtitles|dubbed|nl|eng|ita|spa|fre|fr|ger|deu|hin|rus",
        r")\b",
    ))
    .expect("Invalid release token regex")
});

/// Standalone release year.
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("Invalid year regex"));

/// Bracketed, parenthesized, and braced spans.
static RE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^\)]*\)|\{[^\}]*\}").expect("Invalid bracket regex"));

/// File size leftovers such as `700MB` or `1.4 GiB`.
static RE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:MB|MiB|GB|GiB)\b").expect("Invalid size regex"));

/// Trailing release group suffix, for example `-GRP`.
static RE_TRAILING_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s]*[-–—][\s]*[A-Za-z0-9][A-Za-z0-9._-]{1,}$").expect("Invalid group regex"));

/// Dot and underscore separator runs.
static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[._]+").expect("Invalid separator regex"));

static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid space regex"));

const TRIM_CHARS: [char; 7] = [' ', '-', '_', '.', '\t', '\n', '\r'];

/// Check if a name matches the canonical `Title (YYYY)` pattern.
#[must_use]
pub fn is_canonical_title(name: &str) -> bool {
    RE_GOOD_TITLE.is_match(name)
}

/// Parse a movie title and year from a single folder or file name.
///
/// Canonical `Title (YYYY)` names are returned as-is. Other names go through
/// the heuristic cleanup, falling back to the trimmed raw name when the
/// heuristic strips everything away.
#[must_use]
pub fn parse_title_year(name: &str) -> (String, Option<u16>) {
    if let Some((title, year)) = canonical_title_year(name) {
        return (title, Some(year));
    }
    let (title, year) = clean_title_and_year(name);
    if title.is_empty() {
        (name.trim().to_string(), year)
    } else {
        (title, year)
    }
}

/// Parse a title and year for a movie folder, using the video file stem as a
/// year fallback when the folder name does not carry one.
#[must_use]
pub fn parse_folder_title_year(folder_name: &str, video_stem: &str) -> (String, Option<u16>) {
    if let Some((title, year)) = canonical_title_year(folder_name) {
        return (title, Some(year));
    }
    let (mut title, mut year) = clean_title_and_year(folder_name);
    if year.is_none() {
        year = if let Some((_, stem_year)) = canonical_title_year(video_stem) {
            Some(stem_year)
        } else {
            clean_title_and_year(video_stem).1
        };
    }
    if title.is_empty() {
        title = folder_name.trim().to_string();
    }
    (title, year)
}

fn canonical_title_year(name: &str) -> Option<(String, u16)> {
    let caps = RE_GOOD_TITLE.captures(name)?;
    let title = caps.name("title")?.as_str().trim().to_string();
    let year = caps.name("year")?.as_str().parse().ok()?;
    Some((title, year))
}

/// Heuristic cleanup: truncate at the first release token or standalone year,
/// then strip residue from the remainder.
///
/// A year match at offset zero is treated as part of the title, not a year,
/// so titles like "1984" survive intact and the scan moves on to the next
/// standalone year.
fn clean_title_and_year(name: &str) -> (String, Option<u16>) {
    let mut text = RE_SEPARATORS.replace_all(name, " ").into_owned();
    text = RE_BRACKETS.replace_all(&text, " ").into_owned();

    let mut cut = text.len();
    if let Some(token) = RE_RELEASE_TOKENS.find(&text) {
        cut = cut.min(token.start());
    }
    let mut year = None;
    if let Some(candidate) = RE_YEAR.find_iter(&text).find(|m| m.start() > 0) {
        year = candidate.as_str().parse::<u16>().ok();
        cut = cut.min(candidate.start());
    }
    text.truncate(cut);

    let text = RE_RELEASE_TOKENS.replace_all(&text, " ");
    let text = RE_SIZE.replace_all(&text, " ");
    let text = RE_TRAILING_GROUP.replace_all(&text, " ");
    let text = RE_MULTI_SPACE.replace_all(&text, " ");
    let title = text.trim_matches(TRIM_CHARS).to_string();
    (title, year)
}
