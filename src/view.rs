//! The column's "view" route parameter.
//!
//! A reader column can present the same entries as an article list, a social
//! timeline, or one of the media galleries. The view only affects styling of
//! rows and date headers; the list logic is identical across views.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedView {
    #[default]
    Articles,
    Social,
    Pictures,
    Videos,
    Audios,
    Notifications,
}

impl FeedView {
    pub const ALL: [FeedView; 6] = [
        FeedView::Articles,
        FeedView::Social,
        FeedView::Pictures,
        FeedView::Videos,
        FeedView::Audios,
        FeedView::Notifications,
    ];

    /// The next view in tab order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedView::Articles => "Articles",
            FeedView::Social => "Social Media",
            FeedView::Pictures => "Pictures",
            FeedView::Videos => "Videos",
            FeedView::Audios => "Audios",
            FeedView::Notifications => "Notifications",
        }
    }

    /// Media views lay entries out as cards rather than text rows.
    pub fn is_media(self) -> bool {
        matches!(self, FeedView::Pictures | FeedView::Videos | FeedView::Audios)
    }
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_every_view() {
        let mut v = FeedView::Articles;
        for _ in 0..FeedView::ALL.len() {
            v = v.next();
        }
        assert_eq!(v, FeedView::Articles);
        assert_eq!(FeedView::Notifications.next(), FeedView::Articles);
    }

    #[test]
    fn deserializes_lowercase_names() {
        let v: FeedView = serde_json::from_str("\"pictures\"").unwrap();
        assert_eq!(v, FeedView::Pictures);
        assert!(v.is_media());
        assert!(!FeedView::Social.is_media());
    }
}
