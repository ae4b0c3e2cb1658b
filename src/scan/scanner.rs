//! Single-pass scan over a movie library tree.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::normalize::{NoopNormalizer, TitleNormalizer};
use crate::path_to_string;
use crate::scan::classify::{self, StateTable};
use crate::scan::dupes::{self, DuplicateFinding};
use crate::scan::lost::{self, LostFinding};
use crate::scan::options::ScanOptions;
use crate::scan::quality::{self, LowQualityFinding};
use crate::scan::walker;

/// Everything one scan found, each list sorted by folder path.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub low_quality: Vec<LowQualityFinding>,
    pub lost: Vec<LostFinding>,
    pub duplicates: Vec<DuplicateFinding>,
}

impl ScanOutcome {
    #[must_use]
    pub fn total_findings(&self) -> usize {
        self.low_quality.len() + self.lost.len() + self.duplicates.len()
    }
}

/// Walks a library root once and evaluates every directory for
/// low-quality, lost, and duplicate movies.
pub struct LibraryScanner {
    root: PathBuf,
    options: ScanOptions,
    normalizer: Box<dyn TitleNormalizer>,
}

impl LibraryScanner {
    #[must_use]
    pub fn new(root: PathBuf, options: ScanOptions) -> Self {
        Self {
            root,
            options,
            normalizer: Box::new(NoopNormalizer),
        }
    }

    /// Replace the identity normalizer used for duplicate grouping.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Box<dyn TitleNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run the scan. Directories are visited parents first, so each
    /// directory can inherit state from its already-classified parent.
    pub fn scan(&self) -> Result<ScanOutcome> {
        if !self.root.is_dir() {
            bail!("Scan root is not a directory: '{}'", path_to_string(&self.root));
        }

        let mut table = StateTable::default();
        let mut low_quality = Vec::new();
        let mut lost = Vec::new();
        let mut movies = Vec::new();

        for listing in walker::walk(&self.root, &self.options) {
            let parent = table.parent_flags(&listing.path);
            let flags = classify::classify(&listing, parent);
            if let Some(finding) = quality::evaluate(&listing, flags, &self.options) {
                low_quality.push(finding);
            }
            if let Some(finding) = lost::evaluate(&listing, flags) {
                lost.push(finding);
            }
            if let Some(movie) = dupes::collect(&listing, flags) {
                movies.push(movie);
            }
            table.insert(listing.path, flags);
        }

        let mut duplicates = dupes::group(movies, self.normalizer.as_ref());

        low_quality.sort_by_key(|finding| path_to_string(&finding.folder_path).to_lowercase());
        lost.sort_by_key(|finding| path_to_string(&finding.folder_path).to_lowercase());
        duplicates.sort_by_key(|finding| path_to_string(&finding.folder_path).to_lowercase());

        Ok(ScanOutcome {
            low_quality,
            lost,
            duplicates,
        })
    }
}

#[cfg(test)]
mod scanner_tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    use crate::scan::lost::LostReason;

    fn write_file(dir: &Path, name: &str, size: usize) {
        fs::write(dir.join(name), vec![b'x'; size]).expect("should write test file");
    }

    fn movie_dir(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("should create test dir");
        dir
    }

    fn test_options() -> ScanOptions {
        ScanOptions {
            tiny_mib: 1,
            ..Default::default()
        }
    }

    #[test]
    fn scan_rejects_missing_root() {
        let scanner = LibraryScanner::new(PathBuf::from("/definitely/not/a/real/path"), ScanOptions::default());
        assert!(scanner.scan().is_err());
    }

    #[test]
    fn scan_rejects_file_root() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let file = dir.path().join("movie.mkv");
        fs::write(&file, b"x").expect("should write test file");
        let scanner = LibraryScanner::new(file, ScanOptions::default());
        assert!(scanner.scan().is_err());
    }

    #[test]
    fn scan_finds_all_three_categories() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let root = dir.path();

        let tiny = movie_dir(root, "Tiny Movie (2001)");
        write_file(&tiny, "tiny.mkv", 5);

        let lost_dir = movie_dir(root, "Lost Folder");
        write_file(&lost_dir, "notes.txt", 5);

        let alien_best = movie_dir(root, "Alien (1979)");
        write_file(&alien_best, "Alien.1979.1080p.mkv", 10);
        let alien_small = movie_dir(root, "Alien 1979 REMUX");
        write_file(&alien_small, "alien-b.mkv", 4);

        let outcome = LibraryScanner::new(root.to_path_buf(), test_options())
            .scan()
            .expect("scan should succeed");

        assert_eq!(outcome.low_quality.len(), 1);
        assert_eq!(outcome.low_quality[0].title, "Tiny Movie");
        assert_eq!(outcome.low_quality[0].reason, "tiny<1MiB");

        assert_eq!(outcome.lost.len(), 1);
        assert_eq!(outcome.lost[0].title, "Lost Folder");
        assert_eq!(outcome.lost[0].reason, LostReason::NoVideos);

        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].folder_path, alien_small);
        assert_eq!(outcome.duplicates[0].best_folder, alien_best);

        assert_eq!(outcome.total_findings(), 3);
    }

    #[test]
    fn findings_are_sorted_case_insensitively_by_path() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let root = dir.path();

        let zebra = movie_dir(root, "Zebra (2001)");
        write_file(&zebra, "zebra.mkv", 5);
        let apple = movie_dir(root, "apple (2002)");
        write_file(&apple, "apple.mkv", 5);

        let outcome = LibraryScanner::new(root.to_path_buf(), test_options())
            .scan()
            .expect("scan should succeed");

        assert_eq!(outcome.low_quality.len(), 2);
        assert_eq!(outcome.low_quality[0].folder_path, apple);
        assert_eq!(outcome.low_quality[1].folder_path, zebra);
    }

    #[test]
    fn good_token_folders_produce_no_findings() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let root = dir.path();

        let good = movie_dir(root, "Good Movie (2005) 1080p");
        write_file(&good, "good.mkv", 5);

        let outcome = LibraryScanner::new(root.to_path_buf(), test_options())
            .scan()
            .expect("scan should succeed");

        assert_eq!(outcome.total_findings(), 0);
    }
}
