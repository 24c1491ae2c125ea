//! Keyboard shortcuts for the entry column.
//!
//! The list itself refuses the arrow keys (see [`crate::list::on_key_down`]);
//! this handler owns moving the selection through `data` and keeping it in
//! view through the list's handle. Actions that change the store or the
//! column settings are returned as [`ColumnCommand`]s for the app to apply.
//!
//! | Key            | Action                      |
//! |----------------|-----------------------------|
//! | `j` / Down     | next entry                  |
//! | `k` / Up       | previous entry              |
//! | `g` / Home     | first entry                 |
//! | `G` / End      | last entry                  |
//! | `r`            | refetch feeds               |
//! | `m`            | toggle read on selection    |
//! | `M`            | mark all read               |
//! | `u`            | toggle unread-only          |
//! | `d`            | toggle date grouping        |
//! | `v`            | next view                   |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::list::{Align, EntryListState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCommand {
    ToggleRead(String),
    MarkAllRead,
    ToggleUnreadOnly,
    ToggleGrouping,
    CycleView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handling {
    /// The key was consumed here.
    Handled,
    /// The key was consumed and the app must apply this command.
    Command(ColumnCommand),
    Unhandled,
}

pub struct EntryColumnShortcutHandler<'a, R: FnMut()> {
    refetch: R,
    data: &'a [String],
    list: &'a mut EntryListState,
}

impl<'a, R: FnMut()> EntryColumnShortcutHandler<'a, R> {
    pub fn new(refetch: R, data: &'a [String], list: &'a mut EntryListState) -> Self {
        Self {
            refetch,
            data,
            list,
        }
    }

    pub fn handle(&mut self, key: &KeyEvent) -> Handling {
        // Leave chorded keys (Ctrl-e, Ctrl-y, ...) to the list.
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Handling::Unhandled;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Char('r') => {
                debug!("refetch requested");
                (self.refetch)();
            }
            KeyCode::Char('m') => {
                return match self.selected_id() {
                    Some(id) => Handling::Command(ColumnCommand::ToggleRead(id.to_string())),
                    None => Handling::Handled,
                };
            }
            KeyCode::Char('M') => return Handling::Command(ColumnCommand::MarkAllRead),
            KeyCode::Char('u') => return Handling::Command(ColumnCommand::ToggleUnreadOnly),
            KeyCode::Char('d') => return Handling::Command(ColumnCommand::ToggleGrouping),
            KeyCode::Char('v') => return Handling::Command(ColumnCommand::CycleView),
            _ => return Handling::Unhandled,
        }
        Handling::Handled
    }

    fn selected_id(&self) -> Option<&'a str> {
        let data = self.data;
        self.list.selected().and_then(|i| data.get(i)).map(String::as_str)
    }

    fn move_by(&mut self, delta: isize) {
        if self.data.is_empty() {
            return;
        }
        let last = self.data.len() - 1;
        let next = match self.list.selected() {
            Some(i) => i.saturating_add_signed(delta).min(last),
            None => 0,
        };
        self.select(next);
    }

    fn select_first(&mut self) {
        if !self.data.is_empty() {
            self.select(0);
        }
    }

    fn select_last(&mut self) {
        if !self.data.is_empty() {
            self.select(self.data.len() - 1);
        }
    }

    fn select(&mut self, index: usize) {
        self.list.select(Some(index));
        self.list.scroll_to_item(index, Align::Nearest);
    }
}
