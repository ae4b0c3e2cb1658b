//! Per-directory classification with ancestor state inheritance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scan::parser;
use crate::scan::walker::DirListing;

/// Classification flags for one visited directory.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DirFlags {
    /// A direct child directory is named `Title (YYYY)`, so this directory
    /// aggregates movie folders instead of being one.
    pub is_collection_container: bool,
    /// Holds at least one non-zero-length video file directly, and is not a
    /// collection container.
    pub has_nonzero_video: bool,
    /// Some strict ancestor already resolved to a valid movie folder.
    pub ancestor_has_video: bool,
}

/// Flags for every directory visited so far, keyed by path.
///
/// The walk visits parents before children, so a child can always look up
/// its parent here.
#[derive(Debug, Default)]
pub(crate) struct StateTable {
    flags: HashMap<PathBuf, DirFlags>,
}

impl StateTable {
    /// Flags of the parent directory, or defaults for the scan root.
    pub fn parent_flags(&self, path: &Path) -> DirFlags {
        path.parent()
            .and_then(|parent| self.flags.get(parent))
            .copied()
            .unwrap_or_default()
    }

    pub fn insert(&mut self, path: PathBuf, flags: DirFlags) {
        self.flags.insert(path, flags);
    }
}

/// Classify one directory from its pruned listing and its parent's flags.
pub(crate) fn classify(listing: &DirListing, parent: DirFlags) -> DirFlags {
    let is_collection_container = listing.subdir_names.iter().any(|name| parser::is_canonical_title(name));
    let has_nonzero_video = !is_collection_container && listing.video_files().any(|file| file.size > 0);
    let ancestor_has_video = parent.has_nonzero_video || parent.ancestor_has_video;
    DirFlags {
        is_collection_container,
        has_nonzero_video,
        ancestor_has_video,
    }
}
