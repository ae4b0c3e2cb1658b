//! Scan configuration with built-in defaults.
//!
//! All token lists, extension sets, and the ignored-directory set can be
//! overridden wholesale from CLI arguments or the user config file.

use std::collections::HashSet;

const MIB: u64 = 1024 * 1024;

/// Videos smaller than this many MiB are considered tiny.
pub const DEFAULT_TINY_MIB: u64 = 700;

/// Name tokens that mark a release as acceptable quality.
pub const DEFAULT_GOOD_TOKENS: [&str; 8] = ["720p", "1024p", "1080p", "1440p", "2160p", "4K", "UHD", "REMUX"];

/// Name tokens that mark a release as a known poor-quality source or encode.
pub const DEFAULT_LOW_QUALITY_TOKENS: [&str; 13] = [
    "DivX", "XviD", "CAM", "TS", "TC", "DVDScr", "DVDRip", "R5", "360p", "480p", "HDCAM", "SDTV", "PDTV",
];

/// File extensions treated as video files.
pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 12] = [
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "mpg", "mpeg", "ts", "m2ts", "vob", "iso",
];

/// File extensions treated as subtitle files.
pub const DEFAULT_SUBTITLE_EXTENSIONS: [&str; 6] = ["srt", "sub", "idx", "ass", "ssa", "vtt"];

/// Directory names that are skipped during the walk (case-insensitive).
/// Names starting with a dot are always skipped.
pub const DEFAULT_IGNORE_DIRS: [&str; 21] = [
    ".appledouble",
    ".ds_store",
    "@eadir",
    "recycle.bin",
    "lost+found",
    ".git",
    "subs",
    "subtitles",
    "extras",
    "featurettes",
    "trailers",
    "art",
    "artwork",
    "posters",
    "covers",
    "metadata",
    "plex versions",
    ".actors",
    "other",
    "sample",
    "samples",
];

/// Settings for one library scan.
///
/// Extensions are lowercase without a leading dot.
/// Ignored directory names are lowercase.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub tiny_mib: u64,
    pub good_tokens: Vec<String>,
    pub low_quality_tokens: Vec<String>,
    pub video_extensions: Vec<String>,
    pub subtitle_extensions: Vec<String>,
    pub ignore_dirs: HashSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            tiny_mib: DEFAULT_TINY_MIB,
            good_tokens: DEFAULT_GOOD_TOKENS.iter().map(|&s| s.to_string()).collect(),
            low_quality_tokens: DEFAULT_LOW_QUALITY_TOKENS.iter().map(|&s| s.to_string()).collect(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|&s| s.to_string()).collect(),
            subtitle_extensions: DEFAULT_SUBTITLE_EXTENSIONS.iter().map(|&s| s.to_string()).collect(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|&s| s.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    /// Tiny-video threshold in bytes.
    #[must_use]
    pub const fn tiny_bytes(&self) -> u64 {
        self.tiny_mib.saturating_mul(MIB)
    }

    /// Check if a directory name should be skipped during the walk.
    #[must_use]
    pub fn is_ignored_dir_name(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_dirs.contains(&name.to_lowercase())
    }

    /// Check if a lowercase file extension belongs to the video set.
    #[must_use]
    pub fn is_video_extension(&self, extension: &str) -> bool {
        self.video_extensions.iter().any(|e| e == extension)
    }

    /// Check if a lowercase file extension belongs to the subtitle set.
    #[must_use]
    pub fn is_subtitle_extension(&self, extension: &str) -> bool {
        self.subtitle_extensions.iter().any(|e| e == extension)
    }
}
