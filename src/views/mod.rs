//! URL-synchronized view state built on the param stores.

pub mod policies;
pub mod sort;

pub use policies::{PolicyListView, RoutingPolicy};
pub use sort::{SortOrder, SortState, SortableTable};
