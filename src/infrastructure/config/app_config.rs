//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::services::DEFAULT_NOTICE_TEMPLATE;
use crate::infrastructure::staging::DEFAULT_PREFIX;

const APP_NAME: &str = "md-image-relay";
const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "md-image-relay";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Image download settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Staging area settings.
    #[serde(default)]
    pub staging: StagingConfig,

    /// Text rewriting settings.
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

/// Image download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds, body included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum fetches of one message in flight. 1 fetches sequentially.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Custom User-Agent header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            user_agent: None,
        }
    }
}

/// Staging area configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Directory name prefix.
    #[serde(default = "default_staging_prefix")]
    pub prefix: String,

    /// Parent directory. Defaults to the system temp directory.
    #[serde(default)]
    pub parent_dir: Option<PathBuf>,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            prefix: default_staging_prefix(),
            parent_dir: None,
        }
    }
}

/// Text rewriting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Notice appended after the text; `{count}` becomes the image count.
    #[serde(default = "default_notice_template")]
    pub notice_template: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            notice_template: default_notice_template(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_max_concurrent_fetches() -> usize {
    1
}

fn default_staging_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_notice_template() -> String {
    DEFAULT_NOTICE_TEMPLATE.to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.fetch.timeout_secs = timeout_secs;
        }
        if let Some(max_concurrent) = args.max_concurrent_fetches {
            self.fetch.max_concurrent_fetches = max_concurrent;
        }
        if let Some(staging_dir) = &args.staging_dir {
            self.staging.parent_dir = Some(staging_dir.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }
}
