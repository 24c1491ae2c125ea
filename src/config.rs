//! User configuration.
//!
//! Read from `config.json` in the platform config directory (for example
//! `~/.config/entry-column/config.json` on Linux). Every key is optional:
//!
//! ```json
//! {
//!   "feeds": [{ "url": "https://feeds.bbci.co.uk/news/rss.xml", "label": "BBC" }],
//!   "unread_only": false,
//!   "group_by_date": true,
//!   "overscan": 4,
//!   "poll_interval_secs": 60,
//!   "mark_read_on_select": true,
//!   "view": "articles"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::list::widget::DEFAULT_OVERSCAN;
use crate::view::FeedView;

pub const DEFAULT_FEED_URL: &str = "https://feeds.bbci.co.uk/news/rss.xml";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "entry-column.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("poll interval must be at least one second")]
    ZeroPollInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl FeedConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
        }
    }

    /// The configured label, or the URL's host, or the URL itself.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.url
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .filter(|host| !host.is_empty())
            .unwrap_or(&self.url)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feeds: Vec<FeedConfig>,
    /// Hide read entries.
    pub unread_only: bool,
    /// Insert a date header above the first entry of each day.
    pub group_by_date: bool,
    /// Rows built beyond each edge of the viewport.
    pub overscan: usize,
    pub poll_interval_secs: u64,
    pub mark_read_on_select: bool,
    pub view: FeedView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: vec![FeedConfig::new(DEFAULT_FEED_URL)],
            unread_only: false,
            group_by_date: true,
            overscan: DEFAULT_OVERSCAN,
            poll_interval_secs: 60,
            mark_read_on_select: true,
            view: FeedView::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "entry-column")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join(CONFIG_FILE))
}

pub fn default_log_path() -> PathBuf {
    project_dirs()
        .map(|d| d.data_local_dir().join(LOG_FILE))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
}

impl Config {
    /// Load the config.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// tried and a missing file there yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), feeds = config.feeds.len(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
