//! CSV report writing and terminal output for scan results.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::scan::{DuplicateFinding, LostFinding, LowQualityFinding, ScanOutcome};
use crate::{format_size, path_to_string, path_to_string_relative};

pub const LOW_QUALITY_CSV: &str = "low_quality_movies.csv";
pub const LOST_CSV: &str = "lost_movies.csv";
pub const DUPLICATES_CSV: &str = "duplicate_movies.csv";

/// Write the three report files into the output directory,
/// creating the directory if needed.
pub fn write_reports(outcome: &ScanOutcome, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: '{}'", path_to_string(output_dir)))?;

    write_low_quality(&outcome.low_quality, &output_dir.join(LOW_QUALITY_CSV))?;
    write_lost(&outcome.lost, &output_dir.join(LOST_CSV))?;
    write_duplicates(&outcome.duplicates, &output_dir.join(DUPLICATES_CSV))?;
    Ok(())
}

fn write_low_quality(findings: &[LowQualityFinding], output_file: &Path) -> Result<()> {
    println!(
        "{}",
        format!("Writing report: {}", path_to_string_relative(output_file)).green()
    );
    let mut file = File::create(output_file)?;
    writeln!(
        file,
        "title,size_mib,year,folder_path,rep_video_path,size_bytes,reason,tokens,flagged_count"
    )?;
    for finding in findings {
        let row = [
            csv_field(&finding.title),
            size_mib(finding.size_bytes),
            year_field(finding.year),
            csv_field(&path_to_string(&finding.folder_path)),
            csv_field(&path_to_string(&finding.video_path)),
            finding.size_bytes.to_string(),
            csv_field(&finding.reason),
            csv_field(&finding.tokens.join("|")),
            finding.flagged_count.to_string(),
        ];
        writeln!(file, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_lost(findings: &[LostFinding], output_file: &Path) -> Result<()> {
    println!(
        "{}",
        format!("Writing report: {}", path_to_string_relative(output_file)).green()
    );
    let mut file = File::create(output_file)?;
    writeln!(file, "title,size_mib,year,folder_path,reason,file_count,video_count")?;
    for finding in findings {
        let row = [
            csv_field(&finding.title),
            "0.00".to_string(),
            year_field(finding.year),
            csv_field(&path_to_string(&finding.folder_path)),
            finding.reason.to_string(),
            finding.file_count.to_string(),
            finding.video_count.to_string(),
        ];
        writeln!(file, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_duplicates(findings: &[DuplicateFinding], output_file: &Path) -> Result<()> {
    println!(
        "{}",
        format!("Writing report: {}", path_to_string_relative(output_file)).green()
    );
    let mut file = File::create(output_file)?;
    writeln!(
        file,
        "title,size_mib,year,folder_path,rep_video_path,size_bytes,best_folder,best_size_mib,group_key"
    )?;
    for finding in findings {
        let row = [
            csv_field(&finding.title),
            size_mib(finding.size_bytes),
            year_field(finding.year),
            csv_field(&path_to_string(&finding.folder_path)),
            csv_field(&path_to_string(&finding.video_path)),
            finding.size_bytes.to_string(),
            csv_field(&path_to_string(&finding.best_folder)),
            size_mib(finding.best_size_bytes),
            csv_field(&finding.group_key),
        ];
        writeln!(file, "{}", row.join(","))?;
    }
    Ok(())
}

/// Print scan findings to the terminal.
pub fn print_summary(outcome: &ScanOutcome) {
    if outcome.total_findings() == 0 {
        println!("{}", "No issues found".green());
        return;
    }

    if !outcome.low_quality.is_empty() {
        println!(
            "{}",
            format!("Found {} low quality movies:", outcome.low_quality.len())
                .yellow()
                .bold()
        );
        for finding in &outcome.low_quality {
            println!(
                "  {} [{}] {}",
                path_to_string_relative(&finding.folder_path),
                finding.reason,
                format_size(finding.size_bytes)
            );
        }
    }

    if !outcome.lost.is_empty() {
        println!(
            "{}",
            format!("Found {} lost movie folders:", outcome.lost.len()).yellow().bold()
        );
        for finding in &outcome.lost {
            println!(
                "  {} [{}]",
                path_to_string_relative(&finding.folder_path),
                finding.reason
            );
        }
    }

    if !outcome.duplicates.is_empty() {
        println!(
            "{}",
            format!("Found {} duplicate movies:", outcome.duplicates.len())
                .yellow()
                .bold()
        );
        for finding in &outcome.duplicates {
            println!(
                "  {} {}  best: {} {}",
                path_to_string_relative(&finding.folder_path),
                format_size(finding.size_bytes),
                path_to_string_relative(&finding.best_folder).cyan(),
                format_size(finding.best_size_bytes)
            );
        }
    }
}

/// Size in MiB with two decimals, matching the report format.
fn size_mib(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / (1024.0 * 1024.0))
}

fn year_field(year: Option<u16>) -> String {
    year.map_or_else(String::new, |year| year.to_string())
}

/// Quote a field when it contains a comma, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    use std::path::PathBuf;

    use crate::scan::LostReason;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("Alien"), "Alien");
        assert_eq!(csv_field("Crouching Tiger, Hidden Dragon"), "\"Crouching Tiger, Hidden Dragon\"");
        assert_eq!(csv_field("He said \"hi\""), "\"He said \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn size_mib_has_two_decimals() {
        assert_eq!(size_mib(0), "0.00");
        assert_eq!(size_mib(1024 * 1024), "1.00");
        assert_eq!(size_mib(734_003_200), "700.00");
        assert_eq!(size_mib(1_572_864), "1.50");
    }

    #[test]
    fn year_field_is_empty_when_unknown() {
        assert_eq!(year_field(Some(1979)), "1979");
        assert_eq!(year_field(None), "");
    }

    #[test]
    fn reports_always_contain_headers() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let outcome = ScanOutcome::default();
        write_reports(&outcome, dir.path()).expect("should write reports");

        let low_quality = fs::read_to_string(dir.path().join(LOW_QUALITY_CSV)).expect("should read report");
        assert_eq!(
            low_quality,
            "title,size_mib,year,folder_path,rep_video_path,size_bytes,reason,tokens,flagged_count\n"
        );
        let lost = fs::read_to_string(dir.path().join(LOST_CSV)).expect("should read report");
        assert_eq!(lost, "title,size_mib,year,folder_path,reason,file_count,video_count\n");
        let duplicates = fs::read_to_string(dir.path().join(DUPLICATES_CSV)).expect("should read report");
        assert_eq!(
            duplicates,
            "title,size_mib,year,folder_path,rep_video_path,size_bytes,best_folder,best_size_mib,group_key\n"
        );
    }

    #[test]
    fn write_reports_creates_missing_output_dir() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let output_dir = dir.path().join("reports").join("nested");
        write_reports(&ScanOutcome::default(), &output_dir).expect("should write reports");
        assert!(output_dir.join(LOW_QUALITY_CSV).is_file());
    }

    #[test]
    fn rows_follow_the_header_schema() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let outcome = ScanOutcome {
            low_quality: vec![LowQualityFinding {
                title: "Old Movie".to_string(),
                year: Some(1995),
                folder_path: PathBuf::from("/library/Old.Movie.1995.DVDRip"),
                video_path: PathBuf::from("/library/Old.Movie.1995.DVDRip/movie.avi"),
                size_bytes: 629_145_600,
                reason: "tiny<700MiB;tokens".to_string(),
                tokens: vec!["DVDRip".to_string(), "XviD".to_string()],
                flagged_count: 2,
            }],
            lost: vec![LostFinding {
                title: "Empty".to_string(),
                year: None,
                folder_path: PathBuf::from("/library/Empty"),
                reason: LostReason::NoVideos,
                file_count: 0,
                video_count: 0,
            }],
            duplicates: Vec::new(),
        };
        write_reports(&outcome, dir.path()).expect("should write reports");

        let low_quality = fs::read_to_string(dir.path().join(LOW_QUALITY_CSV)).expect("should read report");
        let row = low_quality.lines().nth(1).expect("should have a data row");
        assert_eq!(
            row,
            "Old Movie,600.00,1995,/library/Old.Movie.1995.DVDRip,/library/Old.Movie.1995.DVDRip/movie.avi,\
             629145600,tiny<700MiB;tokens,DVDRip|XviD,2"
        );

        let lost = fs::read_to_string(dir.path().join(LOST_CSV)).expect("should read report");
        let row = lost.lines().nth(1).expect("should have a data row");
        assert_eq!(row, "Empty,0.00,,/library/Empty,no_videos,0,0");
    }
}