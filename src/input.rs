//! Keyboard input handling.
//!
//! A key press goes through three stages:
//!
//! 1. the list's own key filter ([`list::on_key_down`]), which refuses the
//!    arrow keys and maps paging keys to viewport scrolling;
//! 2. the column shortcuts ([`EntryColumnShortcutHandler`]), which own
//!    navigation and column commands;
//! 3. the list's default scrolling, only for keys no shortcut claimed.

use chrono::TimeZone;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::list::{self, KeyDisposition};
use crate::shortcuts::{EntryColumnShortcutHandler, Handling};

/// Process a single key event.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action. `refetch` asks the poller
/// for an immediate round.
pub fn handle_key_event<Tz: TimeZone>(app: &mut App<Tz>, key: KeyEvent, mut refetch: impl FnMut()) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        app.quit = true;
        return;
    }

    let disposition = list::on_key_down(&key);
    let before = app.list_state.selected();
    let mut refetched = false;

    let handling = EntryColumnShortcutHandler::new(
        || {
            refetch();
            refetched = true;
        },
        &app.data,
        &mut app.list_state,
    )
    .handle(&key);

    if refetched {
        app.status = "Refreshing…".into();
    }

    match handling {
        Handling::Handled => {
            if app.list_state.selected() != before {
                app.on_selection_changed();
            }
        }
        Handling::Command(command) => app.apply(command),
        Handling::Unhandled => {
            if let KeyDisposition::Default(scroll) = disposition {
                app.list_state.scroll(scroll);
            }
        }
    }
}
