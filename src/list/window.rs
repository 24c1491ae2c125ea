//! Windowed rendering.
//!
//! The list never builds more than `viewport + 2 * overscan` rows per frame,
//! however many entries it holds. Rows are one terminal line each, so offsets
//! and sizes are all counted in rows.

use std::ops::Range;

/// Half-open range of rows to build for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Rows to build when the viewport shows `viewport` rows starting at
/// `offset`, widened by `overscan` on both sides and clamped to `total`.
pub fn visible_window(total: usize, viewport: usize, offset: usize, overscan: usize) -> Window {
    if total == 0 || viewport == 0 {
        return Window::default();
    }
    let offset = offset.min(total.saturating_sub(viewport));
    Window {
        start: offset.saturating_sub(overscan),
        end: offset.saturating_add(viewport).saturating_add(overscan).min(total),
    }
}

/// Where a scrolled-to row should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    Center,
    End,
    /// Move as little as possible; no-op if the row is already visible.
    #[default]
    Nearest,
}

/// Scroll position of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// First row shown at the top of the viewport.
    pub offset: usize,
    /// Rows that fit in the viewport; updated on every render.
    pub viewport: usize,
}

impl ScrollState {
    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.viewport)
    }

    pub fn clamp(&mut self, total: usize) {
        self.offset = self.offset.min(self.max_offset(total));
    }

    pub fn scroll_by(&mut self, delta: isize, total: usize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp(total);
    }

    /// Bring `row` into view.
    ///
    /// `inset` rows at the top of the viewport are covered (by a pinned
    /// header) and do not count as visible.
    pub fn scroll_to(&mut self, row: usize, total: usize, align: Align, inset: usize) {
        let viewport = self.viewport.max(1);
        let inset = inset.min(viewport - 1);
        let top = row.saturating_sub(inset);
        let bottom = (row + 1).saturating_sub(viewport);

        self.offset = match align {
            Align::Start => top,
            Align::End => bottom,
            Align::Center => row.saturating_sub(viewport / 2),
            Align::Nearest if row < self.offset + inset => top,
            Align::Nearest if row >= self.offset + viewport => bottom,
            Align::Nearest => self.offset,
        };
        self.clamp(total);
    }
}
