//! The entry list widget.
//!
//! [`EntryList`] draws a slice of entry ids, flat or grouped by `group_counts`,
//! building only the rows inside the viewport plus an overscan margin. When
//! grouped, the header of the group at the top of the viewport stays pinned on
//! the first line while its items scroll underneath.
//!
//! Navigation is not the list's business: [`on_key_down`] refuses
//! the arrow keys so that [`crate::shortcuts`] can own them, and only maps the
//! paging keys to plain viewport scrolling.

use chrono::TimeZone;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use super::date_item::{EntryHeadDateItem, PLACEHOLDER};
use super::empty::EntryEmptyList;
use super::groups::{group_data, Row, RowMap};
use super::window::{visible_window, Align, ScrollState, Window};
use crate::source::Entry;
use crate::store::EntryStore;
use crate::view::FeedView;

/// Default number of rows built above and below the viewport.
pub const DEFAULT_OVERSCAN: usize = 4;

const HIGHLIGHT_SYMBOL: &str = "▸ ";
const GUTTER: &str = "  ";

/// Renders one item row: `(index, entry_id, entry)`. `entry` is `None` when
/// the id is not in the store.
pub type ItemContent<'a> = dyn Fn(usize, &str, Option<&Entry>) -> Line<'static> + 'a;

/// What the list wants to do with a key before anyone else sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The list must not act on this key; navigation handles it.
    PreventDefault,
    /// The list's own scrolling, applied if no shortcut claims the key.
    Default(ListScroll),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScroll {
    Lines(isize),
    Pages(isize),
}

/// Keys the list reacts to on its own.
///
/// Up and Down are taken over by the column shortcuts, so the list must not
/// scroll on them.
pub fn on_key_down(key: &KeyEvent) -> KeyDisposition {
    match key.code {
        KeyCode::Up | KeyCode::Down => KeyDisposition::PreventDefault,
        KeyCode::PageDown => KeyDisposition::Default(ListScroll::Pages(1)),
        KeyCode::PageUp => KeyDisposition::Default(ListScroll::Pages(-1)),
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyDisposition::Default(ListScroll::Lines(1))
        }
        KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyDisposition::Default(ListScroll::Lines(-1))
        }
        _ => KeyDisposition::Ignored,
    }
}

/// Selection and scroll position, kept across frames.
///
/// Acts as the list's imperative handle: [`scroll_to_item`] queues a request
/// that the next render resolves against the row layout it is drawing.
///
/// [`scroll_to_item`]: EntryListState::scroll_to_item
#[derive(Debug, Clone, Default)]
pub struct EntryListState {
    selected: Option<usize>,
    pub scroll: ScrollState,
    pending: Option<(usize, Align)>,
    rows: usize,
    window: Window,
}

impl EntryListState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn scroll_to_item(&mut self, index: usize, align: Align) {
        self.pending = Some((index, align));
    }

    /// Scroll the viewport without touching the selection.
    pub fn scroll(&mut self, scroll: ListScroll) {
        let delta = match scroll {
            ListScroll::Lines(n) => n,
            ListScroll::Pages(n) => n.saturating_mul(self.scroll.viewport.max(1) as isize),
        };
        self.scroll.scroll_by(delta, self.rows);
    }

    /// Row range built by the last render.
    pub fn last_window(&self) -> Window {
        self.window
    }

    /// Total rows, headers included, at the last render.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

pub struct EntryList<'a, Tz: TimeZone> {
    data: &'a [String],
    group_counts: Option<&'a [usize]>,
    store: &'a EntryStore,
    tz: &'a Tz,
    item_content: &'a ItemContent<'a>,
    view: FeedView,
    unread_only: bool,
    overscan: usize,
    block: Option<Block<'a>>,
    highlight_style: Style,
}

impl<'a, Tz: TimeZone> EntryList<'a, Tz> {
    pub fn new(
        data: &'a [String],
        store: &'a EntryStore,
        tz: &'a Tz,
        item_content: &'a ItemContent<'a>,
    ) -> Self {
        Self {
            data,
            group_counts: None,
            store,
            tz,
            item_content,
            view: FeedView::default(),
            unread_only: false,
            overscan: DEFAULT_OVERSCAN,
            block: None,
            highlight_style: Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray),
        }
    }

    /// Group the list; `None` draws a flat list.
    pub fn group_counts(mut self, group_counts: Option<&'a [usize]>) -> Self {
        self.group_counts = group_counts;
        self
    }

    pub fn view(mut self, view: FeedView) -> Self {
        self.view = view;
        self
    }

    /// Picks the empty-state text.
    pub fn unread_only(mut self, unread_only: bool) -> Self {
        self.unread_only = unread_only;
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_map(&self) -> RowMap {
        match self.group_counts {
            Some(counts) if !counts.is_empty() => RowMap::grouped(counts),
            _ => RowMap::flat(self.data.len()),
        }
    }

    fn header_line(&self, group: usize, is_first: bool, width: u16) -> Line<'static> {
        let counts = self.group_counts.unwrap_or_default();
        EntryHeadDateItem {
            entry: group_data(counts, group, self.data).and_then(|id| self.store.get(id)),
            view: self.view,
            is_first,
            tz: self.tz,
        }
        .line(width)
    }

    fn item_line(&self, index: usize) -> Line<'static> {
        match self.data.get(index) {
            Some(id) => (self.item_content)(index, id, self.store.get(id)),
            None => Line::from(PLACEHOLDER),
        }
    }

    fn build_row(&self, row: Row, width: u16) -> BuiltRow {
        match row {
            Row::Header(group) => BuiltRow::Header(self.header_line(group, group == 0, width)),
            Row::Item { index, .. } => BuiltRow::Item(index, self.item_line(index)),
        }
    }
}

enum BuiltRow {
    Header(Line<'static>),
    Item(usize, Line<'static>),
}

impl<Tz: TimeZone> StatefulWidget for EntryList<'_, Tz> {
    type State = EntryListState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        state.scroll.viewport = usize::from(area.height);

        if self.data.is_empty() {
            state.rows = 0;
            state.scroll.offset = 0;
            state.pending = None;
            state.window = Window::default();
            EntryEmptyList {
                unread_only: self.unread_only,
            }
            .render(area, buf);
            return;
        }

        let rows = self.row_map();
        let total = rows.len();
        let inset = usize::from(rows.is_grouped());
        state.rows = total;

        if let Some((index, align)) = state.pending.take() {
            if let Some(row) = rows.row_of_item(index) {
                state.scroll.scroll_to(row, total, align, inset);
            }
        }
        state.scroll.clamp(total);

        let offset = state.scroll.offset;
        let window = visible_window(total, state.scroll.viewport, offset, self.overscan);
        state.window = window;

        let built: Vec<BuiltRow> = window
            .range()
            .filter_map(|r| rows.row(r))
            .map(|row| self.build_row(row, area.width))
            .collect();

        for line_no in 0..area.height {
            let row = offset + usize::from(line_no);
            if row >= window.end {
                break;
            }
            let line_area = Rect::new(area.x, area.y + line_no, area.width, 1);

            // Pin the current group's header over the first line.
            if line_no == 0 && inset == 1 {
                if let Some(Row::Item { group, .. }) = rows.row(row) {
                    self.header_line(group, true, area.width).render(line_area, buf);
                    continue;
                }
            }

            match &built[row - window.start] {
                BuiltRow::Header(line) => line.clone().render(line_area, buf),
                BuiltRow::Item(index, line) => {
                    let selected = state.selected == Some(*index);
                    let gutter = if selected { HIGHLIGHT_SYMBOL } else { GUTTER };
                    buf.set_span(line_area.x, line_area.y, &Span::raw(gutter), line_area.width);
                    let content = Rect {
                        x: line_area.x.saturating_add(2),
                        width: line_area.width.saturating_sub(2),
                        ..line_area
                    };
                    line.clone().render(content, buf);
                    if selected {
                        buf.set_style(line_area, self.highlight_style);
                    }
                }
            }
        }
    }
}
