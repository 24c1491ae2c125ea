//! Date separator headers.

use chrono::{DateTime, TimeZone, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::source::Entry;
use crate::view::FeedView;

/// Shown on the header of a group whose first entry has no date.
pub const UNDATED_LABEL: &str = "No date";

/// Shown in place of a header whose entry is not in the store yet.
pub const PLACEHOLDER: &str = "…";

/// Day label in the style of `Date.prototype.toDateString`, e.g.
/// `Mon Jan 01 2024`.
pub fn date_label<Tz: TimeZone>(published: Option<DateTime<Utc>>, tz: &Tz) -> String {
    match published {
        Some(ts) => ts.with_timezone(tz).date_naive().format("%a %b %d %Y").to_string(),
        None => UNDATED_LABEL.to_string(),
    }
}

/// One date header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateItem {
    pub date: String,
    pub view: FeedView,
    /// Header sits at the very top of the column (first group or pinned).
    pub is_first: bool,
}

impl DateItem {
    pub fn line(&self, width: u16) -> Line<'static> {
        let mut style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        if self.is_first {
            style = style.fg(Color::White);
        }

        if self.view.is_media() {
            return Line::from(Span::styled(format!(" {} ", self.date), style)).centered();
        }

        // `── Mon Jan 01 2024 ─────────`
        let label = format!(" {} ", self.date);
        let used = 2 + label.chars().count();
        let rule = "─".repeat(usize::from(width).saturating_sub(used));
        Line::from(vec![
            Span::styled("──", Style::default().fg(Color::DarkGray)),
            Span::styled(label, style),
            Span::styled(rule, Style::default().fg(Color::DarkGray)),
        ])
    }
}

/// Header for a group, resolved from the group's first entry.
pub struct EntryHeadDateItem<'a, Tz: TimeZone> {
    pub entry: Option<&'a Entry>,
    pub view: FeedView,
    pub is_first: bool,
    pub tz: &'a Tz,
}

impl<Tz: TimeZone> EntryHeadDateItem<'_, Tz> {
    pub fn line(&self, width: u16) -> Line<'static> {
        match self.entry {
            Some(entry) => DateItem {
                date: date_label(entry.published, self.tz),
                view: self.view,
                is_first: self.is_first,
            }
            .line(width),
            None => Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn label_matches_to_date_string() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(date_label(Some(ts), &Utc), "Mon Jan 01 2024");
        assert_eq!(date_label(None, &Utc), UNDATED_LABEL);
    }

    #[test]
    fn label_uses_local_day() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap();
        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(date_label(Some(ts), &east), "Tue Jan 02 2024");
    }

    #[test]
    fn text_views_draw_a_rule_to_width() {
        let item = DateItem {
            date: "Mon Jan 01 2024".into(),
            view: FeedView::Articles,
            is_first: true,
        };
        let text = line_text(&item.line(30));
        assert!(text.starts_with("── Mon Jan 01 2024 "));
        assert_eq!(text.chars().count(), 30);
    }

    #[test]
    fn media_views_center_the_date() {
        let item = DateItem {
            date: "Mon Jan 01 2024".into(),
            view: FeedView::Pictures,
            is_first: false,
        };
        let line = item.line(30);
        assert_eq!(line.alignment, Some(ratatui::layout::Alignment::Center));
        assert_eq!(line_text(&line), " Mon Jan 01 2024 ");
    }

    #[test]
    fn missing_entry_renders_placeholder() {
        let head = EntryHeadDateItem {
            entry: None,
            view: FeedView::Articles,
            is_first: true,
            tz: &Utc,
        };
        assert_eq!(line_text(&head.line(20)), PLACEHOLDER);
    }
}
