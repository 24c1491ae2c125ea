//! The entry column's list: windowed rendering, date grouping, the empty
//! state, and the key filter that leaves navigation to [`crate::shortcuts`].

pub mod date_item;
pub mod empty;
pub mod groups;
pub mod widget;
pub mod window;

pub use groups::group_counts_by_day;
pub use widget::{on_key_down, EntryList, EntryListState, KeyDisposition};
pub use window::Align;
