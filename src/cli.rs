//! Command-line arguments. Flags override the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, FeedConfig};
use crate::view::FeedView;

#[derive(Debug, Parser)]
#[command(name = "entry-column", version, about)]
pub struct Cli {
    /// RSS feed URLs; replace the configured feeds when given.
    pub feeds: Vec<String>,

    /// Config file (defaults to the platform config directory).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only show unread entries.
    #[arg(short, long)]
    pub unread_only: bool,

    /// Do not group entries by day.
    #[arg(long)]
    pub no_group: bool,

    /// Column view.
    #[arg(long, value_enum)]
    pub view: Option<FeedView>,

    /// Log file (defaults to the platform data directory).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if !self.feeds.is_empty() {
            config.feeds = self.feeds.iter().map(FeedConfig::new).collect();
        }
        if self.unread_only {
            config.unread_only = true;
        }
        if self.no_group {
            config.group_by_date = false;
        }
        if let Some(view) = self.view {
            config.view = view;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_leave_config_alone() {
        let mut config = Config::default();
        Cli::parse_from(["entry-column"]).apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        Cli::parse_from([
            "entry-column",
            "--unread-only",
            "--no-group",
            "--view",
            "social",
            "https://a.example/rss",
            "https://b.example/rss",
        ])
        .apply(&mut config);

        assert!(config.unread_only);
        assert!(!config.group_by_date);
        assert_eq!(config.view, FeedView::Social);
        let urls: Vec<_> = config.feeds.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, ["https://a.example/rss", "https://b.example/rss"]);
    }
}
