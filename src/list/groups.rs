//! Date grouping for the entry column.
//!
//! A grouped list is described by `group_counts`: an ordered sequence of
//! non-negative counts whose sum is the number of entries in `data`. Group
//! `g` owns the items `[sum(counts[..g]), sum(counts[..=g]))`, and each group
//! is drawn as a one-row header followed by its items.

use chrono::TimeZone;

use crate::store::EntryStore;

/// Index of the first item of group `group_index`.
///
/// This is the prefix sum of the counts before it. An index past the end sums
/// the whole sequence, i.e. points one past the last item.
pub fn group_data_index(group_counts: &[usize], group_index: usize) -> usize {
    group_counts.iter().take(group_index).sum()
}

/// The item that opens group `group_index`, if there is one.
pub fn group_data<'a, T>(group_counts: &[usize], group_index: usize, data: &'a [T]) -> Option<&'a T> {
    data.get(group_data_index(group_counts, group_index))
}

/// Count runs of consecutive entries published on the same calendar day in
/// `tz`.
///
/// `ids` is expected in display order. Undated entries form their own run.
/// An id missing from the store cannot be dated, so it joins whatever run is
/// open; a leading missing id opens an undated run.
pub fn group_counts_by_day<Tz: TimeZone>(ids: &[String], store: &EntryStore, tz: &Tz) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::new();
    let mut current = None;

    for id in ids {
        let day = match store.get(id) {
            Some(entry) => entry.published.map(|p| p.with_timezone(tz).date_naive()),
            None if !counts.is_empty() => {
                if let Some(last) = counts.last_mut() {
                    *last += 1;
                }
                continue;
            }
            None => None,
        };

        match counts.last_mut() {
            Some(last) if current == Some(day) => *last += 1,
            _ => {
                counts.push(1);
                current = Some(day);
            }
        }
    }

    counts
}

/// One visual row of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Header(usize),
    Item { group: usize, index: usize },
}

/// Maps visual rows to headers and items.
///
/// Without groups the map is the identity: row `i` is item `i`.
#[derive(Debug, Clone, Default)]
pub struct RowMap {
    items: usize,
    /// First item index of each group.
    starts: Vec<usize>,
    /// Row of each group's header. Strictly increasing, even across empty
    /// groups.
    headers: Vec<usize>,
    counts: Vec<usize>,
}

impl RowMap {
    pub fn flat(items: usize) -> Self {
        Self {
            items,
            starts: Vec::new(),
            headers: Vec::new(),
            counts: Vec::new(),
        }
    }

    pub fn grouped(group_counts: &[usize]) -> Self {
        let mut starts = Vec::with_capacity(group_counts.len());
        let mut headers = Vec::with_capacity(group_counts.len());
        let mut sum = 0;
        for (group, &count) in group_counts.iter().enumerate() {
            starts.push(sum);
            headers.push(sum + group);
            sum += count;
        }
        Self {
            items: sum,
            starts,
            headers,
            counts: group_counts.to_vec(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        !self.counts.is_empty()
    }

    /// Total number of rows, headers included.
    pub fn len(&self) -> usize {
        self.items + self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, row: usize) -> Option<Row> {
        if row >= self.len() {
            return None;
        }
        if !self.is_grouped() {
            return Some(Row::Item { group: 0, index: row });
        }
        let group = self.headers.partition_point(|&h| h <= row) - 1;
        let header = self.headers[group];
        if row == header {
            Some(Row::Header(group))
        } else {
            Some(Row::Item {
                group,
                index: self.starts[group] + (row - header - 1),
            })
        }
    }

    /// Group owning `row`; for a header row that is the header's own group.
    pub fn group_of_row(&self, row: usize) -> Option<usize> {
        match self.row(row)? {
            Row::Header(g) | Row::Item { group: g, .. } => Some(g),
        }
    }

    pub fn group_of_item(&self, index: usize) -> Option<usize> {
        if index >= self.items {
            return None;
        }
        if !self.is_grouped() {
            return Some(0);
        }
        // Empty groups share a start with their successor; the last one with
        // `start <= index` is the non-empty owner.
        Some(self.starts.partition_point(|&s| s <= index) - 1)
    }

    pub fn header_row_of_group(&self, group: usize) -> Option<usize> {
        self.headers.get(group).copied()
    }

    pub fn row_of_item(&self, index: usize) -> Option<usize> {
        let group = self.group_of_item(index)?;
        if !self.is_grouped() {
            return Some(index);
        }
        Some(index + group + 1)
    }
}
