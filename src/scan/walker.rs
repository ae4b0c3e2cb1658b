//! Deterministic directory traversal with junk-directory pruning.
//!
//! Directories are visited depth-first in name order, parents before
//! children. Ignored and dot-prefixed directories are pruned before their
//! parent listing is emitted, so downstream classification never sees them.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::print_warning;
use crate::scan::options::ScanOptions;

/// File category by extension set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileKind {
    Video,
    Subtitle,
    Other,
}

/// One direct file inside a visited directory.
#[derive(Debug, Clone)]
pub(crate) struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: FileKind,
}

/// Pruned and sorted direct contents of one visited directory.
#[derive(Debug, Clone)]
pub(crate) struct DirListing {
    pub path: PathBuf,
    pub name: String,
    pub files: Vec<FileEntry>,
    pub subdir_names: Vec<String>,
}

impl DirListing {
    pub fn video_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(|file| file.kind == FileKind::Video)
    }

    pub fn video_count(&self) -> usize {
        self.video_files().count()
    }

    pub fn is_leaf(&self) -> bool {
        self.subdir_names.is_empty()
    }
}

/// Walk all non-pruned directories under `root` in a deterministic
/// depth-first pre-order. The root itself is never pruned.
pub(crate) fn walk<'a>(root: &'a Path, options: &'a ScanOptions) -> impl Iterator<Item = DirListing> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !should_skip_dir(entry, options)
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(move |entry| read_listing(entry.into_path(), options))
}

fn should_skip_dir(entry: &walkdir::DirEntry, options: &ScanOptions) -> bool {
    crate::is_hidden(entry) || options.ignore_dirs.contains(&crate::os_str_to_string(entry.file_name()).to_lowercase())
}

/// Read the direct contents of one directory.
///
/// Entries that disappear or fail to stat are skipped. A directory that
/// cannot be listed at all yields an empty listing.
fn read_listing(path: PathBuf, options: &ScanOptions) -> DirListing {
    let name = crate::get_normalized_name(&path);
    let mut files = Vec::new();
    let mut subdir_names = Vec::new();

    match fs::read_dir(&path) {
        Ok(entries) => {
            for entry in entries.filter_map(Result::ok) {
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                if file_type.is_dir() {
                    let dir_name = crate::get_normalized_name(&entry.path());
                    if !options.is_ignored_dir_name(&dir_name) {
                        subdir_names.push(dir_name);
                    }
                } else if file_type.is_file() {
                    let Ok(metadata) = entry.metadata() else {
                        continue;
                    };
                    let file_path = entry.path();
                    let extension = crate::path_to_file_extension_string(&file_path);
                    let kind = if options.is_video_extension(&extension) {
                        FileKind::Video
                    } else if options.is_subtitle_extension(&extension) {
                        FileKind::Subtitle
                    } else {
                        FileKind::Other
                    };
                    files.push(FileEntry {
                        name: crate::get_normalized_name(&file_path),
                        path: file_path,
                        size: metadata.len(),
                        kind,
                    });
                }
            }
        }
        Err(error) => {
            print_warning!("Failed to read directory {}: {error}", path.display());
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    subdir_names.sort();

    DirListing {
        path,
        name,
        files,
        subdir_names,
    }
}
