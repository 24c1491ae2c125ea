use chrono::{Local, TimeZone};
use tracing::{debug, info};

use crate::config::Config;
use crate::list::{group_counts_by_day, Align, EntryListState};
use crate::poll::PollMsg;
use crate::shortcuts::ColumnCommand;
use crate::source::Entry;
use crate::store::EntryStore;
use crate::view::FeedView;

/// Column settings that can be flipped at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSettings {
    pub unread_only: bool,
    pub group_by_date: bool,
    pub mark_read_on_select: bool,
    pub overscan: usize,
}

impl From<&Config> for ColumnSettings {
    fn from(config: &Config) -> Self {
        Self {
            unread_only: config.unread_only,
            group_by_date: config.group_by_date,
            mark_read_on_select: config.mark_read_on_select,
            overscan: config.overscan,
        }
    }
}

/// All application state. Days for grouping are computed in `Tz`.
pub struct App<Tz: TimeZone = Local> {
    pub store: EntryStore,
    /// Ids the column shows, in display order.
    pub data: Vec<String>,
    /// Entries per day, parallel to `data`; `None` when grouping is off.
    pub group_counts: Option<Vec<usize>>,
    pub list_state: EntryListState,
    pub settings: ColumnSettings,
    pub view: FeedView,
    pub quit: bool,
    /// Last poll status message.
    pub status: String,
    tz: Tz,
}

impl App<Local> {
    pub fn new(config: &Config) -> Self {
        Self::with_timezone(config, Local)
    }
}

impl<Tz: TimeZone> App<Tz> {
    pub fn with_timezone(config: &Config, tz: Tz) -> Self {
        Self {
            store: EntryStore::new(),
            data: Vec::new(),
            group_counts: config.group_by_date.then(Vec::new),
            list_state: EntryListState::default(),
            settings: ColumnSettings::from(config),
            view: config.view,
            quit: false,
            status: "Starting…".into(),
            tz,
        }
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    /// Merge freshly polled entries and rebuild the column.
    pub fn merge_entries(&mut self, entries: Vec<Entry>) -> usize {
        let added = self.store.upsert_many(entries);
        if added > 0 {
            self.refresh_list();
        }
        added
    }

    /// Recompute `data` and `group_counts` from the store.
    ///
    /// The selection follows its entry id. If that entry is no longer shown,
    /// the selection stays at the same position, clamped to the new length.
    pub fn refresh_list(&mut self) {
        let selected_id = self.selected_entry_id().map(str::to_owned);
        let previous_index = self.list_state.selected();

        self.data = self.store.ids(self.settings.unread_only);
        self.group_counts = self
            .settings
            .group_by_date
            .then(|| group_counts_by_day(&self.data, &self.store, &self.tz));

        let selected = match (selected_id, previous_index) {
            (Some(id), _) if self.data.contains(&id) => self.data.iter().position(|d| *d == id),
            (_, Some(i)) if !self.data.is_empty() => Some(i.min(self.data.len() - 1)),
            _ => None,
        };
        self.list_state.select(selected);
        // Only a moved selection pulls the viewport; paging away survives merges.
        if let Some(i) = selected.filter(|_| selected != previous_index) {
            self.list_state.scroll_to_item(i, Align::Nearest);
        }
        debug!(
            shown = self.data.len(),
            groups = self.group_counts.as_ref().map_or(0, Vec::len),
            "column rebuilt"
        );
    }

    /// Apply one message from the poller. Rounds that add nothing leave the
    /// status line alone.
    pub fn handle_poll(&mut self, msg: PollMsg) {
        match msg {
            PollMsg::Entries { source, entries } => {
                let added = self.merge_entries(entries);
                if added > 0 {
                    self.status = format!("{source}: {added} new");
                }
            }
            PollMsg::Error(e) => self.status = format!("Error: {e}"),
        }
    }

    pub fn selected_entry_id(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|i| self.data.get(i))
            .map(String::as_str)
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected_entry_id().and_then(|id| self.store.get(id))
    }

    /// Called after navigation moved the selection.
    ///
    /// Read entries stay in the list until the next rebuild even with
    /// unread-only on, so the cursor does not jump away from under the user.
    /// `m` on the selected entry behaves the same way.
    pub fn on_selection_changed(&mut self) {
        if !self.settings.mark_read_on_select {
            return;
        }
        if let Some(id) = self.selected_entry_id().map(str::to_owned) {
            self.store.mark_read(&id);
        }
    }

    pub fn apply(&mut self, command: ColumnCommand) {
        info!(?command, "column command");
        match command {
            ColumnCommand::ToggleRead(id) => {
                if let Some(read) = self.store.toggle_read(&id) {
                    self.status = if read { "Marked read" } else { "Marked unread" }.into();
                }
            }
            ColumnCommand::MarkAllRead => {
                let n = self.store.mark_all_read();
                self.status = format!("Marked {n} entries read");
                if self.settings.unread_only && n > 0 {
                    self.refresh_list();
                }
            }
            ColumnCommand::ToggleUnreadOnly => {
                self.settings.unread_only = !self.settings.unread_only;
                self.refresh_list();
            }
            ColumnCommand::ToggleGrouping => {
                self.settings.group_by_date = !self.settings.group_by_date;
                self.refresh_list();
                // Rows shift under an unchanged selection.
                if let Some(i) = self.list_state.selected() {
                    self.list_state.scroll_to_item(i, Align::Nearest);
                }
            }
            ColumnCommand::CycleView => self.view = self.view.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::widget::ListScroll;
    use chrono::{DateTime, Utc};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn ts(s: &str) -> Option<DateTime<Utc>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("1", "Old", ts("2024-01-01T12:00:00Z"), "t"),
            Entry::new("2", "Mid", ts("2025-06-01T12:00:00Z"), "t"),
            Entry::new("3", "New", ts("2026-01-01T12:00:00Z"), "t"),
            Entry::new("4", "New too", ts("2026-01-01T08:00:00Z"), "t"),
        ]
    }

    fn app() -> App<Utc> {
        let mut app = App::with_timezone(&Config::default(), Utc);
        app.merge_entries(sample());
        app
    }

    #[test]
    fn new_app_starts_empty() {
        let app = App::with_timezone(&Config::default(), Utc);
        assert!(app.data.is_empty());
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
        assert_eq!(app.group_counts, Some(vec![]));
    }

    #[test]
    fn merge_builds_data_and_groups() {
        let app = app();
        assert_eq!(app.data, ["3", "4", "2", "1"]);
        assert_eq!(app.group_counts, Some(vec![2, 1, 1]));
    }

    #[test]
    fn merge_of_known_entries_is_a_noop() {
        let mut app = app();
        assert_eq!(app.merge_entries(sample()), 0);
        assert_eq!(app.data.len(), 4);
    }

    #[test]
    fn toggling_grouping_drops_counts() {
        let mut app = app();
        app.apply(ColumnCommand::ToggleGrouping);
        assert!(app.group_counts.is_none());
        app.apply(ColumnCommand::ToggleGrouping);
        assert_eq!(app.group_counts, Some(vec![2, 1, 1]));
    }

    #[test]
    fn selection_follows_entry_across_merges() {
        let mut app = app();
        app.list_state.select(Some(2)); // "2"
        app.merge_entries(vec![Entry::new("5", "Newest", ts("2027-01-01T12:00:00Z"), "t")]);
        assert_eq!(app.selected_entry_id(), Some("2"));
        assert_eq!(app.list_state.selected(), Some(3));
    }

    #[test]
    fn selecting_marks_read_but_keeps_row_until_rebuild() {
        let mut app = app();
        app.apply(ColumnCommand::ToggleUnreadOnly);
        app.list_state.select(Some(0));
        app.on_selection_changed();

        assert!(app.store.get("3").unwrap().read);
        assert_eq!(app.data.len(), 4, "row stays while the cursor is on it");

        app.refresh_list();
        assert_eq!(app.data, ["4", "2", "1"]);
        assert_eq!(app.list_state.selected(), Some(0), "clamped to the same position");
    }

    #[test]
    fn mark_read_on_select_can_be_disabled() {
        let config = Config {
            mark_read_on_select: false,
            ..Config::default()
        };
        let mut app = App::with_timezone(&config, Utc);
        app.merge_entries(sample());
        app.list_state.select(Some(0));
        app.on_selection_changed();
        assert!(!app.store.get("3").unwrap().read);
    }

    #[test]
    fn unread_only_with_everything_read_empties_the_column() {
        let mut app = app();
        app.apply(ColumnCommand::MarkAllRead);
        assert_eq!(app.status, "Marked 4 entries read");
        app.apply(ColumnCommand::ToggleUnreadOnly);
        assert!(app.data.is_empty());
        assert_eq!(app.group_counts, Some(vec![]));
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn mark_all_read_in_unread_only_shows_zero_unread() {
        let config = Config {
            unread_only: true,
            ..Config::default()
        };
        let mut app = App::with_timezone(&config, Utc);
        app.merge_entries(sample());
        app.list_state.select(Some(1));

        app.apply(ColumnCommand::MarkAllRead);
        assert_eq!(app.store.unread_count(), 0);
        assert!(app.data.is_empty());
        assert_eq!(app.group_counts, Some(vec![]));
        assert_eq!(app.list_state.selected(), None);

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| crate::ui::draw(&mut app, f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Zero Unread"));
    }

    #[test]
    fn toggle_read_in_unread_only_keeps_the_row() {
        let config = Config {
            unread_only: true,
            ..Config::default()
        };
        let mut app = App::with_timezone(&config, Utc);
        app.merge_entries(sample());
        app.apply(ColumnCommand::ToggleRead("3".into()));
        assert_eq!(app.data.len(), 4);

        app.apply(ColumnCommand::ToggleRead("3".into()));
        assert!(!app.store.get("3").unwrap().read);
    }

    #[test]
    fn merge_does_not_pull_a_paged_viewport_back() {
        let config = Config {
            group_by_date: false,
            ..Config::default()
        };
        let mut app = App::with_timezone(&config, Utc);
        app.merge_entries(
            (0..40)
                .map(|i| Entry::new(format!("{i:03}"), format!("E{i}"), None, "t"))
                .collect(),
        );
        app.list_state.select(Some(0));

        // 12 lines minus the status bar and the column border leaves 9 rows.
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| crate::ui::draw(&mut app, f)).unwrap();
        app.list_state.scroll(ListScroll::Pages(1));
        terminal.draw(|f| crate::ui::draw(&mut app, f)).unwrap();
        assert_eq!(app.list_state.scroll.offset, 9);

        app.merge_entries(vec![Entry::new("999", "Late", None, "t")]);
        terminal.draw(|f| crate::ui::draw(&mut app, f)).unwrap();
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.list_state.scroll.offset, 9);
    }

    #[test]
    fn empty_poll_round_keeps_the_status() {
        let mut app = app();
        app.apply(ColumnCommand::ToggleRead("1".into()));
        app.handle_poll(PollMsg::Entries {
            source: "feed".into(),
            entries: sample(),
        });
        assert_eq!(app.status, "Marked read");

        app.handle_poll(PollMsg::Entries {
            source: "feed".into(),
            entries: vec![Entry::new("9", "Fresh", ts("2027-01-01T12:00:00Z"), "t")],
        });
        assert_eq!(app.status, "feed: 1 new");

        app.handle_poll(PollMsg::Error("timed out".into()));
        assert_eq!(app.status, "Error: timed out");
    }

    #[test]
    fn toggle_read_and_cycle_view() {
        let mut app = app();
        app.apply(ColumnCommand::ToggleRead("1".into()));
        assert!(app.store.get("1").unwrap().read);
        assert_eq!(app.status, "Marked read");

        app.apply(ColumnCommand::CycleView);
        assert_eq!(app.view, FeedView::Social);
    }
}
