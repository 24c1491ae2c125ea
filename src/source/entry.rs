//! The entry type shared by every feed source and by the entry column.
//!
//! Sources convert their native format into [`Entry`] values; the store keeps
//! them by id and the list only ever handles ids, resolving them back through
//! the store when a row is drawn.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A single feed entry, normalised from any data source.
///
/// ## Sorting
///
/// `Entry` implements [`Ord`] for **reverse-chronological** ordering: newer
/// entries sort before older ones, and entries without a date sort last.
/// Entries published at the same instant fall back to their id so the order
/// is total and stable across polls.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry {
    /// Unique identifier used as the list key.
    ///
    /// For RSS this is the `<guid>` element (falling back to `<link>`).
    pub id: String,

    /// Human-readable headline.
    pub title: String,

    /// Optional summary text.
    pub description: Option<String>,

    /// URL to the full content.
    pub link: Option<String>,

    /// Publication timestamp. Drives both sorting and date grouping.
    pub published: Option<DateTime<Utc>>,

    /// Title of the feed this entry came from (e.g. "BBC News").
    pub feed_title: String,

    /// Whether the user has seen this entry.
    pub read: bool,
}

impl Entry {
    /// A fresh, unread entry with no optional metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        published: Option<DateTime<Utc>>,
        feed_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            link: None,
            published,
            feed_title: feed_title.into(),
            read: false,
        }
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None` < `Some(_)`, so comparing `other` first sinks undated entries.
        other
            .published
            .cmp(&self.published)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
