//! Configuration for the library scan.
//!
//! Handles reading configuration from CLI arguments and the user config file.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use itertools::Itertools;
use serde::Deserialize;

use media_audit::scan::{
    DEFAULT_GOOD_TOKENS, DEFAULT_IGNORE_DIRS, DEFAULT_LOW_QUALITY_TOKENS, DEFAULT_SUBTITLE_EXTENSIONS,
    DEFAULT_TINY_MIB, DEFAULT_VIDEO_EXTENSIONS, ScanOptions,
};

use crate::Args;

/// Default timeout in seconds for catalogue lookups.
pub const DEFAULT_LOOKUP_TIMEOUT: u64 = 10;

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct MedscanConfig {
    #[serde(default)]
    good_tokens: Vec<String>,
    #[serde(default)]
    ignore_dirs: Vec<String>,
    #[serde(default)]
    low_quality_tokens: Vec<String>,
    #[serde(default)]
    normalize: bool,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    print: bool,
    #[serde(default)]
    subtitle_extensions: Vec<String>,
    #[serde(default)]
    timeout: Option<u64>,
    #[serde(default)]
    tiny_mib: Option<u64>,
    #[serde(default)]
    verbose: bool,
    #[serde(default)]
    video_extensions: Vec<String>,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    medscan: MedscanConfig,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) root: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) options: ScanOptions,
    pub(crate) normalize: bool,
    pub(crate) timeout: Duration,
    pub(crate) print: bool,
    pub(crate) verbose: bool,
}

impl MedscanConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub(crate) fn get_user_config() -> Result<Self> {
        let Some(path) = media_audit::config::CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.medscan)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed,
    /// or if the input path is not a directory.
    pub fn from_args(args: Args) -> Result<Self> {
        let user_config = MedscanConfig::get_user_config()?;

        let root = media_audit::resolve_input_path(args.path.as_deref())?;
        if !root.is_dir() {
            bail!("Input path is not a directory: '{}'", media_audit::path_to_string(&root));
        }

        let good_tokens = pick_list(args.good_tokens, user_config.good_tokens, &DEFAULT_GOOD_TOKENS);
        let low_quality_tokens = pick_list(
            args.low_quality_tokens,
            user_config.low_quality_tokens,
            &DEFAULT_LOW_QUALITY_TOKENS,
        );
        let video_extensions = pick_list(
            args.video_extensions,
            user_config.video_extensions,
            &DEFAULT_VIDEO_EXTENSIONS,
        )
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .unique()
        .collect();
        let subtitle_extensions = pick_list(
            args.subtitle_extensions,
            user_config.subtitle_extensions,
            &DEFAULT_SUBTITLE_EXTENSIONS,
        )
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .unique()
        .collect();
        let ignore_dirs: HashSet<String> = pick_list(args.ignore_dirs, user_config.ignore_dirs, &DEFAULT_IGNORE_DIRS)
            .into_iter()
            .map(|dir| dir.to_lowercase())
            .collect();

        let options = ScanOptions {
            tiny_mib: args.tiny_mib.or(user_config.tiny_mib).unwrap_or(DEFAULT_TINY_MIB),
            good_tokens,
            low_quality_tokens,
            video_extensions,
            subtitle_extensions,
            ignore_dirs,
        };

        let timeout = args.timeout.or(user_config.timeout).unwrap_or(DEFAULT_LOOKUP_TIMEOUT);

        Ok(Self {
            root,
            output_dir: args
                .output
                .or(user_config.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            options,
            normalize: args.normalize || user_config.normalize,
            timeout: Duration::from_secs(timeout),
            print: args.print || user_config.print,
            verbose: args.verbose || user_config.verbose,
        })
    }
}

/// Split a comma-separated CLI list into trimmed, non-empty parts.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// A list given on the CLI wins, then the config file, then the defaults.
fn pick_list(cli: Option<String>, config: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if let Some(value) = cli {
        split_list(&value)
    } else if config.is_empty() {
        defaults.iter().map(|&token| token.to_string()).collect()
    } else {
        config
    }
}

#[cfg(test)]
mod medscan_config_tests {
    use super::*;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let toml = "";
        let config = MedscanConfig::from_toml_str(toml).expect("should parse empty config");
        assert!(!config.normalize);
        assert!(!config.print);
        assert!(!config.verbose);
        assert!(config.tiny_mib.is_none());
        assert!(config.timeout.is_none());
        assert!(config.output_dir.is_none());
        assert!(config.good_tokens.is_empty());
        assert!(config.low_quality_tokens.is_empty());
        assert!(config.video_extensions.is_empty());
        assert!(config.subtitle_extensions.is_empty());
        assert!(config.ignore_dirs.is_empty());
    }

    #[test]
    fn from_toml_str_parses_medscan_section() {
        let toml = r"
[medscan]
normalize = true
print = true
verbose = true
tiny_mib = 500
timeout = 30
";
        let config = MedscanConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.normalize);
        assert!(config.print);
        assert!(config.verbose);
        assert_eq!(config.tiny_mib, Some(500));
        assert_eq!(config.timeout, Some(30));
    }

    #[test]
    fn from_toml_str_parses_token_lists() {
        let toml = r#"
[medscan]
good_tokens = ["1080p", "REMUX"]
low_quality_tokens = ["CAM"]
video_extensions = ["mkv", "mp4"]
ignore_dirs = ["Extras", "Samples"]
"#;
        let config = MedscanConfig::from_toml_str(toml).expect("should parse config");
        assert_eq!(config.good_tokens, vec!["1080p", "REMUX"]);
        assert_eq!(config.low_quality_tokens, vec!["CAM"]);
        assert_eq!(config.video_extensions, vec!["mkv", "mp4"]);
        assert_eq!(config.ignore_dirs, vec!["Extras", "Samples"]);
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        let toml = "this is not valid toml {{{";
        assert!(MedscanConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r"
[other_section]
some_value = true

[medscan]
verbose = true
";
        let config = MedscanConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.verbose);
        assert!(!config.normalize);
    }

    #[test]
    fn split_list_trims_and_drops_empty_parts() {
        assert_eq!(split_list("720p, 1080p ,,4K"), vec!["720p", "1080p", "4K"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn pick_list_prefers_cli_over_config_over_defaults() {
        let defaults = ["a", "b"];
        assert_eq!(
            pick_list(Some("x,y".to_string()), vec!["c".to_string()], &defaults),
            vec!["x", "y"]
        );
        assert_eq!(pick_list(None, vec!["c".to_string()], &defaults), vec!["c"]);
        assert_eq!(pick_list(None, Vec::new(), &defaults), vec!["a", "b"]);
    }
}
