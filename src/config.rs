//! Application configuration management.
//!
//! Settings are layered with `figment`, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file: `--config <FILE>`, else `config.toml` in the platform
//!    config directory when it exists
//! 3. `DUPEFINDER_*` environment variables (e.g. `DUPEFINDER_WORKERS=4`)
//! 4. Command-line flags ([`Config::apply_cli`])
//!
//! # Example
//!
//! ```toml
//! min_size = 1024
//! max_size = 0          # no limit
//! skip_dirs = [".git", "node_modules"]
//! workers = 4
//! algorithm = "xxhash"
//! hash_bytes = 65536    # hash only the first 64 KiB
//! print_size = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::duplicates::HashConfig;
use crate::scanner::{HashAlgorithm, ScanConfig};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DUPEFINDER_";

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer holds a malformed or mistyped value.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// The ignore file could not be read.
    #[error("Failed to read ignore file {path}: {source}")]
    IgnoreFile {
        /// Path to the ignore file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Invalid(Box::new(err))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum file size in bytes (inclusive).
    pub min_size: u64,
    /// Maximum file size in bytes (inclusive); 0 means no limit.
    pub max_size: u64,
    /// Directory names or paths whose subtrees are not walked.
    pub skip_dirs: Vec<String>,
    /// Number of concurrent hashing workers.
    pub workers: usize,
    /// Digest algorithm.
    pub algorithm: HashAlgorithm,
    /// Hash only this many leading bytes of each file; 0 hashes whole files.
    pub hash_bytes: u64,
    /// Include the size column in text output.
    pub print_size: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_size: 0,
            max_size: 0,
            skip_dirs: Vec::new(),
            workers: 1,
            algorithm: HashAlgorithm::Md5,
            hash_bytes: 0,
            print_size: false,
        }
    }
}

impl Config {
    /// Load defaults, the config file and environment overrides.
    ///
    /// `explicit` replaces the default config file location and must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// holds an invalid value, such as an unknown algorithm name.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        match &file {
            Some(path) => log::debug!("Loading config file {}", path.display()),
            None => log::debug!("No config file, using defaults"),
        }

        let config: Self = Self::figment(file.as_deref()).extract()?;
        Ok(config)
    }

    /// The layered figment for an optional config file, without CLI flags.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupefinder").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top of the loaded layers.
    ///
    /// Skip lists are merged rather than replaced: `--skip-dir` entries and
    /// the ignore file are added to `skip_dirs`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IgnoreFile`] if the ignore file cannot be read.
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(min) = cli.min_size {
            self.min_size = min;
        }
        if let Some(max) = cli.max_size {
            self.max_size = max;
        }
        if let Some(workers) = cli.parallel {
            self.workers = workers;
        }
        if let Some(algorithm) = cli.algo {
            self.algorithm = algorithm;
        }
        if let Some(bytes) = cli.hash_bytes {
            self.hash_bytes = bytes;
        }
        if cli.print_size {
            self.print_size = true;
        }

        self.skip_dirs.extend(cli.skip_dirs.iter().cloned());
        if let Some(path) = &cli.ignore_file {
            self.skip_dirs.extend(read_ignore_file(path)?);
        }
        Ok(self)
    }

    /// Walk configuration for these settings.
    #[must_use]
    pub fn scan_config(&self, verbose: bool) -> ScanConfig {
        let max_size = (self.max_size > 0).then_some(self.max_size);
        ScanConfig::new(self.min_size, max_size, self.skip_dirs.iter().cloned())
            .with_verbose(verbose)
    }

    /// Hashing configuration for these settings.
    #[must_use]
    pub fn hash_config(&self, verbose: bool) -> HashConfig {
        let config = HashConfig::default()
            .with_worker_count(self.workers)
            .with_algorithm(self.algorithm)
            .with_verbose(verbose);
        if self.hash_bytes > 0 {
            config.with_partial(self.hash_bytes)
        } else {
            config
        }
    }
}

/// Read skip entries from an ignore file.
///
/// One directory name or path per line; surrounding whitespace is trimmed,
/// blank lines and lines starting with `#` are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::IgnoreFile`] if the file cannot be read.
pub fn read_ignore_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IgnoreFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_ignore_list(&content))
}

fn parse_ignore_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
