//! RSS 2.0 feed source.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{DataSource, Entry};

/// An RSS feed fetched over HTTP and parsed with the [`rss`] crate.
pub struct RssSource {
    /// The feed URL to poll.
    pub url: String,
    /// Label used when the channel has no title of its own.
    pub label: String,
}

impl RssSource {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Convert an already-fetched [`rss::Channel`] into [`Entry`] values.
    ///
    /// Pure, so tests can exercise the mapping without the network. The
    /// channel title wins over `label` when present.
    pub fn parse_channel(channel: &rss::Channel, label: &str) -> Vec<Entry> {
        let feed_title = if channel.title().trim().is_empty() {
            label
        } else {
            channel.title()
        };

        channel
            .items()
            .iter()
            .map(|item| {
                // Prefer <guid>, fall back to <link>, then empty string.
                let id = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(String::from))
                    .unwrap_or_default();

                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                Entry {
                    id,
                    title: item.title().unwrap_or("(untitled)").to_string(),
                    description: item.description().map(String::from),
                    link: item.link().map(String::from),
                    published,
                    feed_title: feed_title.to_string(),
                    read: false,
                }
            })
            .collect()
    }
}

impl DataSource for RssSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<Entry>> {
        debug!(url = %self.url, "fetching feed");
        let body = reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("requesting {}", self.url))?
            .bytes()?;
        let channel = rss::Channel::read_from(body.as_ref())
            .with_context(|| format!("parsing {}", self.url))?;
        let entries = Self::parse_channel(&channel, &self.label);
        debug!(url = %self.url, count = entries.len(), "feed parsed");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(xml: &str) -> rss::Channel {
        rss::Channel::read_from(xml.as_bytes()).unwrap()
    }

    #[test]
    fn parse_channel_extracts_entries() {
        let ch = channel(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <item>
      <title>First Post</title>
      <link>https://example.com/1</link>
      <guid>guid-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 +0000</pubDate>
      <description>First description</description>
    </item>
    <item>
      <title>Second Post</title>
      <link>https://example.com/2</link>
      <guid>guid-2</guid>
      <pubDate>Tue, 02 Jan 2024 12:00:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#,
        );
        let entries = RssSource::parse_channel(&ch, "fallback");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "guid-1");
        assert_eq!(entries[0].title, "First Post");
        assert_eq!(entries[0].link.as_deref(), Some("https://example.com/1"));
        assert_eq!(entries[0].description.as_deref(), Some("First description"));
        assert_eq!(entries[0].feed_title, "Test Feed");
        assert!(entries[0].published.is_some());
        assert!(!entries[0].read);

        assert_eq!(entries[1].id, "guid-2");
        assert!(entries[1].description.is_none());
    }

    #[test]
    fn falls_back_to_link_when_no_guid() {
        let ch = channel(
            r#"<rss version="2.0"><channel><title>T</title>
<item><title>No GUID</title><link>https://example.com/no-guid</link></item>
</channel></rss>"#,
        );
        let entries = RssSource::parse_channel(&ch, "t");
        assert_eq!(entries[0].id, "https://example.com/no-guid");
    }

    #[test]
    fn missing_title_and_bad_date_degrade_gracefully() {
        let ch = channel(
            r#"<rss version="2.0"><channel><title>T</title>
<item><guid>g1</guid><pubDate>not-a-real-date</pubDate></item>
</channel></rss>"#,
        );
        let entries = RssSource::parse_channel(&ch, "t");
        assert_eq!(entries[0].title, "(untitled)");
        assert!(entries[0].published.is_none());
    }

    #[test]
    fn untitled_channel_uses_label() {
        let ch = channel(
            r#"<rss version="2.0"><channel><title></title>
<item><guid>g1</guid></item>
</channel></rss>"#,
        );
        let entries = RssSource::parse_channel(&ch, "My Feed");
        assert_eq!(entries[0].feed_title, "My Feed");
    }

    #[test]
    fn name_returns_label() {
        let src = RssSource::new("http://example.com/feed", "My Feed");
        assert_eq!(src.name(), "My Feed");
    }
}
