//! Interactive widgets.

pub mod select_list;

pub use select_list::{SelectError, SelectList, Selection, SelectionState};
