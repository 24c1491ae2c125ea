//! Data source abstraction layer.
//!
//! This module defines the [`DataSource`] trait and the common [`Entry`]
//! type. Concrete source implementations live in sub-modules (currently only
//! [`rss`]).
//!
//! ## Adding a new source
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct (e.g. `AtomSource`) and implement [`DataSource`] for it.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Construct it in `main.rs` from the configured feeds.

mod entry;
mod rss;

pub use entry::Entry;
pub use rss::RssSource;

use anyhow::Result;

/// Trait that every data source must implement.
///
/// The poller calls [`fetch()`](DataSource::fetch) on a background thread, so
/// implementations must be [`Send`].
pub trait DataSource: Send {
    /// Human-readable label, used in error messages and as the fallback feed
    /// title.
    fn name(&self) -> &str;

    /// Fetch the latest batch of entries.
    ///
    /// Errors are reported to the UI as status messages; the poller keeps
    /// going with the remaining sources.
    fn fetch(&self) -> Result<Vec<Entry>>;
}
