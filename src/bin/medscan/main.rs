//! medscan - Scan a movie library for low-quality, lost, and duplicate movies.
//!
//! This CLI tool walks a movie library tree once, evaluates every folder,
//! and writes CSV reports for anything worth reviewing or replacing.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;

use media_audit::report;
use media_audit::scan::LibraryScanner;
use media_audit::yts::YtsNormalizer;

pub use crate::config::Config;

/// Command line arguments for medscan.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Scan a movie library for low-quality, lost, and duplicate movies"
)]
pub struct Args {
    /// Optional library root directory to scan
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Optional output directory for CSV reports
    #[arg(short, long, name = "OUTPUT_DIR", value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Flag videos smaller than this size in MiB
    #[arg(short, long, name = "MIB")]
    pub tiny_mib: Option<u64>,

    /// Comma-separated tokens that mark a release as good quality
    #[arg(long, name = "GOOD_TOKENS")]
    pub good_tokens: Option<String>,

    /// Comma-separated tokens that mark a release as low quality
    #[arg(long = "lowq-tokens", name = "LOWQ_TOKENS")]
    pub low_quality_tokens: Option<String>,

    /// Comma-separated video file extensions
    #[arg(long = "video-exts", name = "VIDEO_EXTS")]
    pub video_extensions: Option<String>,

    /// Comma-separated subtitle file extensions
    #[arg(long = "subtitle-exts", name = "SUB_EXTS")]
    pub subtitle_extensions: Option<String>,

    /// Comma-separated directory names to skip while scanning
    #[arg(short, long, name = "IGNORE_DIRS")]
    pub ignore_dirs: Option<String>,

    /// Normalize titles through the YTS catalogue when grouping duplicates
    #[arg(short, long)]
    pub normalize: bool,

    /// Timeout in seconds for catalogue lookups
    #[arg(long, name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Only print findings without writing report files
    #[arg(short, long)]
    pub print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    pub completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn run(config: Config) -> Result<()> {
    if config.verbose {
        println!("Scanning: {}", media_audit::path_to_string(&config.root).magenta());
        println!("Output directory: {}", media_audit::path_to_string(&config.output_dir));
        println!("Tiny threshold: {} MiB", config.options.tiny_mib);
        println!("Video extensions: {:?}", config.options.video_extensions);
        println!("Normalize titles: {}", media_audit::colorize_bool(config.normalize));
    }

    let mut scanner = LibraryScanner::new(config.root, config.options);
    if config.normalize {
        scanner = scanner.with_normalizer(Box::new(YtsNormalizer::new(config.timeout)));
    }

    let outcome = scanner.scan()?;
    report::print_summary(&outcome);

    if !config.print {
        report::write_reports(&outcome, &config.output_dir)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        media_audit::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        run(Config::from_args(args)?)
    }
}
