//! Terminal UI rendering.
//!
//! All drawing lives here, separated from application state ([`App`]) and
//! input handling ([`crate::input`]). The layout is a two-row split: the
//! entry column on top and a one-line status bar at the bottom.

use chrono::TimeZone;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::list::EntryList;
use crate::source::Entry;
use crate::view::FeedView;

/// Draw the complete UI for one frame.
pub fn draw<Tz: TimeZone>(app: &mut App<Tz>, frame: &mut Frame) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    draw_entry_column(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_entry_column<Tz: TimeZone>(app: &mut App<Tz>, frame: &mut Frame, area: Rect) {
    let title = format!(" {} · {} unread ", app.view, app.store.unread_count());
    let view = app.view;
    let tz = app.tz().clone();
    let row_tz = tz.clone();
    let item_content =
        move |_: usize, id: &str, entry: Option<&Entry>| entry_line(view, &row_tz, id, entry);

    let list = EntryList::new(&app.data, &app.store, &tz, &item_content)
        .group_counts(app.group_counts.as_deref())
        .view(app.view)
        .unread_only(app.settings.unread_only)
        .overscan(app.settings.overscan)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// One item row, styled for the column's view.
pub fn entry_line<Tz: TimeZone>(view: FeedView, tz: &Tz, id: &str, entry: Option<&Entry>) -> Line<'static> {
    let Some(entry) = entry else {
        return Line::from(Span::styled(
            format!("… {id}"),
            Style::default().fg(Color::DarkGray),
        ));
    };

    let title_style = if entry.read {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let marker = if entry.read { "  " } else { "● " };
    let time = entry
        .published
        .map(|p| p.with_timezone(tz).naive_local().format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".into());

    let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Cyan))];
    match view {
        FeedView::Articles => {
            spans.push(Span::styled(format!("{time}  "), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(entry.title.clone(), title_style));
            spans.push(Span::styled(
                format!("  [{}]", entry.feed_title),
                Style::default().fg(Color::Cyan),
            ));
        }
        FeedView::Social => {
            spans.push(Span::styled(
                format!("@{} ", entry.feed_title),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled(format!("{time}  "), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(entry.title.clone(), title_style));
        }
        FeedView::Pictures | FeedView::Videos | FeedView::Audios => {
            let icon = match view {
                FeedView::Pictures => "▣",
                FeedView::Videos => "▶",
                _ => "♪",
            };
            spans.push(Span::styled(format!("{icon} "), Style::default().fg(Color::Magenta)));
            spans.push(Span::styled(entry.title.clone(), title_style));
        }
        FeedView::Notifications => {
            spans.push(Span::styled(format!("{time}  "), Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("{}: ", entry.feed_title),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(entry.title.clone(), title_style));
        }
    }
    Line::from(spans)
}

fn draw_status_bar<Tz: TimeZone>(app: &App<Tz>, frame: &mut Frame, area: Rect) {
    let mut flags = Vec::new();
    if app.settings.unread_only {
        flags.push("unread");
    }
    if app.settings.group_by_date {
        flags.push("by day");
    }

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status.as_str(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} entries", app.data.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(flags.join(", "), Style::default().fg(Color::Cyan)),
        Span::raw("  q: quit  j/k: move  r: refresh  m: read  u: unread  d: group  v: view"),
    ]));
    frame.render_widget(status, area);
}
