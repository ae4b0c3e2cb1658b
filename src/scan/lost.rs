//! Lost-folder detection for leaf directories without a usable video.

use std::fmt;
use std::path::PathBuf;

use crate::scan::classify::DirFlags;
use crate::scan::parser;
use crate::scan::walker::DirListing;

/// Why a leaf folder counts as lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LostReason {
    /// The folder holds no video-extension files at all.
    NoVideos,
    /// Video files exist but every one of them is zero bytes.
    ZeroByteVideosOnly,
}

impl fmt::Display for LostReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVideos => write!(f, "no_videos"),
            Self::ZeroByteVideosOnly => write!(f, "zero_byte_videos_only"),
        }
    }
}

/// A leaf folder with no usable video content.
#[derive(Debug, Clone)]
pub struct LostFinding {
    pub title: String,
    pub year: Option<u16>,
    pub folder_path: PathBuf,
    pub reason: LostReason,
    pub file_count: usize,
    pub video_count: usize,
}

/// Evaluate one leaf directory.
///
/// Accessory folders under a resolved movie folder are not lost: any
/// ancestor with a usable video suppresses the finding.
pub(crate) fn evaluate(listing: &DirListing, flags: DirFlags) -> Option<LostFinding> {
    if !listing.is_leaf() || flags.has_nonzero_video || flags.ancestor_has_video {
        return None;
    }

    let video_count = listing.video_count();
    let reason = if video_count == 0 {
        LostReason::NoVideos
    } else {
        LostReason::ZeroByteVideosOnly
    };
    let (title, year) = parser::parse_title_year(&listing.name);

    Some(LostFinding {
        title,
        year,
        folder_path: listing.path.clone(),
        reason,
        file_count: listing.files.len(),
        video_count,
    })
}

#[cfg(test)]
mod lost_tests {
    use super::*;

    use crate::scan::walker::{FileEntry, FileKind};

    fn entry(name: &str, size: u64, kind: FileKind) -> FileEntry {
        FileEntry {
            path: PathBuf::from(format!("/library/folder/{name}")),
            name: name.to_string(),
            size,
            kind,
        }
    }

    fn leaf(name: &str, files: Vec<FileEntry>) -> DirListing {
        DirListing {
            path: PathBuf::from(format!("/library/{name}")),
            name: name.to_string(),
            files,
            subdir_names: Vec::new(),
        }
    }

    #[test]
    fn empty_leaf_is_lost_with_no_videos() {
        let finding = evaluate(&leaf("Placeholder", vec![]), DirFlags::default()).expect("empty leaf is lost");
        assert_eq!(finding.reason, LostReason::NoVideos);
        assert_eq!(finding.file_count, 0);
        assert_eq!(finding.video_count, 0);
        assert_eq!(finding.title, "Placeholder");
        assert_eq!(finding.year, None);
    }

    #[test]
    fn leaf_with_only_zero_byte_videos_is_lost() {
        let listing = leaf("Broken", vec![entry("movie.mkv", 0, FileKind::Video)]);
        let finding = evaluate(&listing, DirFlags::default()).expect("zero-byte video folder is lost");
        assert_eq!(finding.reason, LostReason::ZeroByteVideosOnly);
        assert_eq!(finding.file_count, 1);
        assert_eq!(finding.video_count, 1);
    }

    #[test]
    fn leaf_with_non_video_files_only_is_lost() {
        let listing = leaf(
            "Artless (2005)",
            vec![
                entry("cover.jpg", 10, FileKind::Other),
                entry("movie.srt", 10, FileKind::Subtitle),
            ],
        );
        let finding = evaluate(&listing, DirFlags::default()).expect("subtitle-only folder is lost");
        assert_eq!(finding.reason, LostReason::NoVideos);
        assert_eq!(finding.file_count, 2);
        assert_eq!(finding.video_count, 0);
        assert_eq!(finding.title, "Artless");
        assert_eq!(finding.year, Some(2005));
    }

    #[test]
    fn usable_video_prevents_lost() {
        let listing = leaf("Fine", vec![entry("movie.mkv", 100, FileKind::Video)]);
        let flags = DirFlags {
            is_collection_container: false,
            has_nonzero_video: true,
            ancestor_has_video: false,
        };
        assert!(evaluate(&listing, flags).is_none());
    }

    #[test]
    fn ancestor_video_suppresses_lost() {
        let listing = leaf("Behind The Scenes", vec![]);
        let flags = DirFlags {
            is_collection_container: false,
            has_nonzero_video: false,
            ancestor_has_video: true,
        };
        assert!(evaluate(&listing, flags).is_none());
    }

    #[test]
    fn non_leaf_is_never_lost() {
        let listing = DirListing {
            path: PathBuf::from("/library/Parent"),
            name: "Parent".to_string(),
            files: Vec::new(),
            subdir_names: vec!["child".to_string()],
        };
        assert!(evaluate(&listing, DirFlags::default()).is_none());
    }

    #[test]
    fn reason_labels_match_report_values() {
        assert_eq!(LostReason::NoVideos.to_string(), "no_videos");
        assert_eq!(LostReason::ZeroByteVideosOnly.to_string(), "zero_byte_videos_only");
    }
}
