//! Placeholder shown when the column has no entries.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};

pub const ZERO_UNREAD: &str = "Zero Unread";
pub const ZERO_ITEMS: &str = "Zero Items";

const CELEBRATE_ICON: &str = "🎉";
const EMPTY_ICON: &str = "∅";

/// With unread-only on, an empty list means everything has been read, which
/// gets a celebration instead of the plain empty icon.
#[derive(Debug, Clone, Copy)]
pub struct EntryEmptyList {
    pub unread_only: bool,
}

impl EntryEmptyList {
    pub fn text(&self) -> Text<'static> {
        let (icon, label) = if self.unread_only {
            (CELEBRATE_ICON, ZERO_UNREAD)
        } else {
            (EMPTY_ICON, ZERO_ITEMS)
        };
        Text::from(vec![Line::from(icon), Line::from(label)])
    }
}

impl Widget for EntryEmptyList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [center] = Layout::vertical([Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(area);
        Paragraph::new(self.text())
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .render(center, buf);
    }
}
