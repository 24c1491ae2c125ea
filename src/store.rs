//! In-memory entry store.
//!
//! The entry column never owns entries: it is handed a slice of ids and looks
//! each one up here when it draws a row or a date header. Ids that are not
//! (or no longer) in the store resolve to `None` and render as placeholders.

use std::collections::HashMap;

use tracing::debug;

use crate::source::Entry;

#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<String, Entry>,
    /// Ids in reverse-chronological order.
    order: Vec<String>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge freshly fetched entries.
    ///
    /// Unknown ids are inserted. Known ids are left untouched so that a later
    /// poll never resets the read flag or rewrites a headline under the
    /// cursor. Entries with an empty id are dropped. Returns how many entries
    /// were new.
    pub fn upsert_many(&mut self, incoming: Vec<Entry>) -> usize {
        let mut added = 0;
        for entry in incoming {
            if entry.id.is_empty() || self.entries.contains_key(&entry.id) {
                continue;
            }
            self.entries.insert(entry.id.clone(), entry);
            added += 1;
        }

        if added > 0 {
            let entries = &self.entries;
            self.order = entries.keys().cloned().collect();
            self.order.sort_by(|a, b| entries[a].cmp(&entries[b]));
            debug!(added, total = self.order.len(), "entry store updated");
        }
        added
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// The ids the entry column should display, newest first.
    pub fn ids(&self, unread_only: bool) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| !unread_only || self.entries.get(*id).is_some_and(|e| !e.read))
            .cloned()
            .collect()
    }

    /// Returns `true` if the entry existed and was unread.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) if !entry.read => {
                entry.read = true;
                true
            }
            _ => false,
        }
    }

    /// Flip the read flag. Returns the new state, or `None` for unknown ids.
    pub fn toggle_read(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.get_mut(id)?;
        entry.read = !entry.read;
        Some(entry.read)
    }

    /// Returns how many entries changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.entries.values_mut().filter(|e| !e.read) {
            entry.read = true;
            changed += 1;
        }
        changed
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.values().filter(|e| !e.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2025, 3, d, 9, 0, 0).unwrap())
    }

    fn sample() -> EntryStore {
        let mut store = EntryStore::new();
        store.upsert_many(vec![
            Entry::new("old", "Old", at(1), "f"),
            Entry::new("new", "New", at(3), "f"),
            Entry::new("mid", "Mid", at(2), "f"),
        ]);
        store
    }

    #[test]
    fn ids_are_newest_first() {
        assert_eq!(sample().ids(false), ["new", "mid", "old"]);
    }

    #[test]
    fn upsert_keeps_existing_entry_and_read_state() {
        let mut store = sample();
        store.mark_read("mid");

        let added = store.upsert_many(vec![
            Entry::new("mid", "Rewritten", at(2), "f"),
            Entry::new("newest", "Newest", at(4), "f"),
        ]);

        assert_eq!(added, 1);
        let mid = store.get("mid").unwrap();
        assert_eq!(mid.title, "Mid");
        assert!(mid.read);
        assert_eq!(store.ids(false)[0], "newest");
    }

    #[test]
    fn empty_ids_are_dropped() {
        let mut store = EntryStore::new();
        assert_eq!(store.upsert_many(vec![Entry::new("", "No id", None, "f")]), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn unread_only_filters_read_entries() {
        let mut store = sample();
        assert!(store.mark_read("new"));
        assert!(!store.mark_read("new"), "second mark is a no-op");
        assert_eq!(store.ids(true), ["mid", "old"]);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn toggle_read_flips_and_reports_unknown() {
        let mut store = sample();
        assert_eq!(store.toggle_read("old"), Some(true));
        assert_eq!(store.toggle_read("old"), Some(false));
        assert_eq!(store.toggle_read("missing"), None);
    }

    #[test]
    fn mark_all_read_counts_changes() {
        let mut store = sample();
        store.mark_read("old");
        assert_eq!(store.mark_all_read(), 2);
        assert_eq!(store.unread_count(), 0);
        assert!(store.ids(true).is_empty());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn get_missing_is_none() {
        assert!(sample().get("nope").is_none());
    }
}
