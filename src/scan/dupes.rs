//! Duplicate movie detection across folders.
//!
//! Every movie folder contributes one representative (its largest video).
//! Representatives are grouped by a cheap normalized title key first;
//! groups that stay ambiguous are re-keyed through the injected title
//! normalizer so cosmetically different names can converge. Within each
//! final group the largest member wins and every strictly smaller member
//! is reported as a duplicate of it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use itertools::Itertools;

use crate::normalize::TitleNormalizer;
use crate::scan::classify::DirFlags;
use crate::scan::parser;
use crate::scan::walker::{DirListing, FileEntry};

/// One movie folder entered into duplicate grouping.
#[derive(Debug, Clone)]
pub(crate) struct FolderMovie {
    pub folder_path: PathBuf,
    pub video_path: PathBuf,
    pub size_bytes: u64,
    pub title: String,
    pub year: Option<u16>,
}

/// A movie folder that has a larger copy of the same title elsewhere.
#[derive(Debug, Clone)]
pub struct DuplicateFinding {
    pub title: String,
    pub year: Option<u16>,
    pub folder_path: PathBuf,
    pub video_path: PathBuf,
    pub size_bytes: u64,
    pub best_folder: PathBuf,
    pub best_size_bytes: u64,
    pub group_key: String,
}

/// Build the grouping input for one folder, if it holds any videos.
/// The representative is the largest video, first seen wins ties.
pub(crate) fn collect(listing: &DirListing, flags: DirFlags) -> Option<FolderMovie> {
    if flags.is_collection_container {
        return None;
    }
    let mut largest: Option<&FileEntry> = None;
    for file in listing.video_files() {
        if largest.is_none_or(|current| file.size > current.size) {
            largest = Some(file);
        }
    }
    let largest = largest?;
    let stem = crate::path_to_file_stem_string(&largest.path);
    let (title, year) = parser::parse_folder_title_year(&listing.name, &stem);
    Some(FolderMovie {
        folder_path: listing.path.clone(),
        video_path: largest.path.clone(),
        size_bytes: largest.size,
        title,
        year,
    })
}

/// Normalized grouping key: lowercased, punctuation-stripped,
/// whitespace-collapsed title plus the year when known.
fn group_key(title: &str, year: Option<u16>) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let cleaned = cleaned.split_whitespace().join(" ");
    match year {
        Some(year) => format!("{cleaned} ({year})"),
        None => cleaned,
    }
}

/// Group folder movies and flag every member with a strictly larger copy.
pub(crate) fn group(movies: Vec<FolderMovie>, normalizer: &dyn TitleNormalizer) -> Vec<DuplicateFinding> {
    let mut initial: BTreeMap<String, Vec<FolderMovie>> = BTreeMap::new();
    for movie in movies {
        initial.entry(group_key(&movie.title, movie.year)).or_default().push(movie);
    }

    // Single-member groups are already resolved. Ambiguous groups are
    // re-keyed through the normalizer, which may merge them with others.
    let mut groups: BTreeMap<String, Vec<FolderMovie>> = BTreeMap::new();
    for (key, members) in initial {
        if members.len() < 2 {
            groups.entry(key).or_default().extend(members);
        } else {
            for movie in members {
                let (title, year) = normalizer.normalize(&movie.title, movie.year);
                groups.entry(group_key(&title, year)).or_default().push(movie);
            }
        }
    }

    let mut findings = Vec::new();
    for (key, members) in groups {
        if members.len() < 2 {
            continue;
        }
        // Largest member is the best copy, first seen wins ties
        let mut best = 0;
        for (index, movie) in members.iter().enumerate().skip(1) {
            if movie.size_bytes > members[best].size_bytes {
                best = index;
            }
        }
        let best_folder = members[best].folder_path.clone();
        let best_size_bytes = members[best].size_bytes;
        for movie in members {
            // Exact size ties with the best copy stay unflagged
            if movie.size_bytes >= best_size_bytes {
                continue;
            }
            findings.push(DuplicateFinding {
                title: movie.title,
                year: movie.year,
                folder_path: movie.folder_path,
                video_path: movie.video_path,
                size_bytes: movie.size_bytes,
                best_folder: best_folder.clone(),
                best_size_bytes,
                group_key: key.clone(),
            });
        }
    }
    findings
}
