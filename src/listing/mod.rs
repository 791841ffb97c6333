//! Deriving the displayed list from the cached collection.
//!
//! raw collection -> filter predicate -> sort comparator -> displayed list

pub mod derive;
pub mod filter;
pub mod sort;
pub mod view;

pub use derive::derive;
pub use filter::{FilterCriteria, FilterField, FilterInput};
pub use sort::SortKey;
pub use view::ListView;
