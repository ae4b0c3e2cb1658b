//! Low-quality release detection.
//!
//! A folder is only scanned file-by-file when it does not already look good
//! (good token in the folder or a video name, or a large enough video), or
//! when an explicit low-quality token is present. Token signals always win
//! over the size signal, in both directions.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::scan::classify::DirFlags;
use crate::scan::options::ScanOptions;
use crate::scan::parser;
use crate::scan::walker::DirListing;

/// One folder flagged for low-quality video releases.
///
/// The representative video is the smallest flagged one, `tokens` is the
/// union of matched low-quality tokens across all flagged videos in the
/// folder, and `flagged_count` is how many videos were flagged.
#[derive(Debug, Clone)]
pub struct LowQualityFinding {
    pub title: String,
    pub year: Option<u16>,
    pub folder_path: PathBuf,
    pub video_path: PathBuf,
    pub size_bytes: u64,
    pub reason: String,
    pub tokens: Vec<String>,
    pub flagged_count: usize,
}

struct FlaggedVideo {
    path: PathBuf,
    size: u64,
    tiny: bool,
    tokens: Vec<String>,
}

/// Case-insensitive substring matching of configured tokens against a name.
/// Matched tokens are returned in their configured casing.
pub(crate) fn match_tokens(name: &str, tokens: &[String]) -> Vec<String> {
    let name_lower = name.to_lowercase();
    tokens
        .iter()
        .filter(|token| name_lower.contains(&token.to_lowercase()))
        .cloned()
        .collect()
}

/// Evaluate one folder, aggregating all flagged videos into a single finding.
pub(crate) fn evaluate(listing: &DirListing, flags: DirFlags, options: &ScanOptions) -> Option<LowQualityFinding> {
    if flags.is_collection_container {
        return None;
    }

    let tiny_bytes = options.tiny_bytes();
    let folder_good = !match_tokens(&listing.name, &options.good_tokens).is_empty();
    let folder_low_quality = match_tokens(&listing.name, &options.low_quality_tokens);
    let name_good = listing
        .video_files()
        .any(|file| !match_tokens(&file.name, &options.good_tokens).is_empty());
    let name_low_quality = listing
        .video_files()
        .any(|file| !match_tokens(&file.name, &options.low_quality_tokens).is_empty());
    let has_large_video = listing.video_files().any(|file| file.size >= tiny_bytes);

    let allow_scan =
        !(folder_good || name_good || has_large_video) || !folder_low_quality.is_empty() || name_low_quality;
    if !allow_scan {
        return None;
    }

    let mut flagged: Vec<FlaggedVideo> = Vec::new();
    for file in listing.video_files() {
        // A good token on the file or its folder is an absolute override
        if folder_good || !match_tokens(&file.name, &options.good_tokens).is_empty() {
            continue;
        }
        let tiny = file.size < tiny_bytes;
        let mut tokens = folder_low_quality.clone();
        tokens.extend(match_tokens(&file.name, &options.low_quality_tokens));
        if tiny || !tokens.is_empty() {
            flagged.push(FlaggedVideo {
                path: file.path.clone(),
                size: file.size,
                tiny,
                tokens,
            });
        }
    }
    if flagged.is_empty() {
        return None;
    }

    // Representative is the smallest flagged video, first seen wins ties
    let mut smallest = 0;
    for (index, video) in flagged.iter().enumerate().skip(1) {
        if video.size < flagged[smallest].size {
            smallest = index;
        }
    }

    let mut token_union: BTreeSet<String> = BTreeSet::new();
    for video in &flagged {
        token_union.extend(video.tokens.iter().cloned());
    }

    let representative = &flagged[smallest];
    let mut reasons = Vec::new();
    if representative.tiny {
        reasons.push(format!("tiny<{}MiB", options.tiny_mib));
    }
    if !representative.tokens.is_empty() {
        reasons.push("tokens".to_string());
    }

    let (title, year) =
        parser::parse_folder_title_year(&listing.name, &crate::path_to_file_stem_string(&representative.path));

    Some(LowQualityFinding {
        title,
        year,
        folder_path: listing.path.clone(),
        video_path: representative.path.clone(),
        size_bytes: representative.size,
        reason: reasons.join(";"),
        tokens: token_union.into_iter().collect(),
        flagged_count: flagged.len(),
    })
}
