//! Movie library scanning engine.
//!
//! One walk over the library tree classifies every directory and feeds
//! three evaluators: low-quality releases, lost folders without usable
//! video, and duplicate copies of the same movie across folders.

mod classify;
mod dupes;
mod lost;
mod options;
mod parser;
mod quality;
mod scanner;
mod walker;

pub use dupes::DuplicateFinding;
pub use lost::{LostFinding, LostReason};
pub use options::{
    DEFAULT_GOOD_TOKENS, DEFAULT_IGNORE_DIRS, DEFAULT_LOW_QUALITY_TOKENS, DEFAULT_SUBTITLE_EXTENSIONS,
    DEFAULT_TINY_MIB, DEFAULT_VIDEO_EXTENSIONS, ScanOptions,
};
pub use parser::{is_canonical_title, parse_folder_title_year, parse_title_year};
pub use quality::LowQualityFinding;
pub use scanner::{LibraryScanner, ScanOutcome};
