//! Configuration management for sprout
//!
//! Supports feature-specific configuration sections:
//! - [diff] - Which changes to summarize and how to render them
//! - [log] - Log level and optional log file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: &str = "1";

/// Supported configuration versions
pub const SUPPORTED_CONFIG_VERSIONS: &[&str] = &["1"];

/// File name of the per-repository configuration
pub const REPO_CONFIG_FILE: &str = ".sprout.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version for tracking schema changes
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Diff summary configuration
    #[serde(default)]
    pub diff: Option<DiffConfig>,

    /// Logging configuration
    #[serde(default)]
    pub log: Option<LogConfig>,

    /// Problems met while loading, to be logged once logging is set up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            diff: None,
            log: None,
            warnings: Vec::new(),
        }
    }
}

/// Which side of the working tree a diff is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffScope {
    /// HEAD vs index (`git diff --cached`)
    Staged,
    /// Index vs working tree (`git diff`)
    Unstaged,
    /// Staged followed by unstaged
    #[default]
    All,
}

impl DiffScope {
    pub fn as_str(&self) -> &str {
        match self {
            DiffScope::Staged => "staged",
            DiffScope::Unstaged => "unstaged",
            DiffScope::All => "all",
        }
    }
}

/// Configuration for diff summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Default scope when no flag is given on the command line
    #[serde(default)]
    pub scope: DiffScope,

    /// Context lines around each hunk
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,

    /// List every added and deleted line under its file
    #[serde(default)]
    pub show_lines: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            scope: DiffScope::default(),
            context_lines: default_context_lines(),
            show_lines: false,
        }
    }
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_config_version() -> String {
    CURRENT_CONFIG_VERSION.to_string()
}

fn default_context_lines() -> u32 {
    3
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Check if the configuration version is supported
    pub fn is_version_supported(&self) -> bool {
        SUPPORTED_CONFIG_VERSIONS.contains(&self.version.as_str())
    }

    /// Get a warning message for unsupported versions
    pub fn version_warning(&self) -> Option<String> {
        if !self.is_version_supported() {
            Some(format!(
                "Configuration version '{}' is not supported. Supported versions: {}. Using defaults where needed.",
                self.version,
                SUPPORTED_CONFIG_VERSIONS.join(", ")
            ))
        } else {
            None
        }
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(warning) = config.version_warning() {
            config
                .warnings
                .push(format!("{}: {}", path.display(), warning));
        }

        if config.version.is_empty() {
            config.version = CURRENT_CONFIG_VERSION.to_string();
        }

        Ok(config)
    }

    /// Get the default config directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("sprout"))
    }

    /// Load configuration with priority:
    /// 1. Defaults
    /// 2. Global config (~/.config/sprout/config.toml)
    /// 3. Repo config (.sprout.toml)
    /// 4. Explicit config file, if given
    ///
    /// Broken global or repo files are skipped and recorded in `warnings`;
    /// an explicit file that cannot be loaded is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_dir) = Self::get_config_dir() {
            config = config.merge_optional(&config_dir.join("config.toml"));
        }

        config = config.merge_optional(Path::new(REPO_CONFIG_FILE));

        if let Some(path) = explicit {
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    fn merge_optional(self, path: &Path) -> Self {
        if !path.exists() {
            return self;
        }
        match Self::load_from_file(path) {
            Ok(loaded) => self.merge(loaded),
            Err(e) => {
                let mut config = self;
                config.warnings.push(format!("Ignoring config: {}", e));
                config
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(mut self, other: Config) -> Self {
        if !other.version.is_empty() {
            self.version = other.version;
        }
        if other.diff.is_some() {
            self.diff = other.diff;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
        self.warnings.extend(other.warnings);
        self
    }

    /// Diff section, or its defaults when absent
    pub fn diff_config(&self) -> DiffConfig {
        self.diff.clone().unwrap_or_default()
    }

    /// Log section, or its defaults when absent
    pub fn log_config(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }
}
