//! Leptos Sortable
//!
//! Pointer-driven reorderable list for Leptos.
//!
//! - `controller`: the drag/reorder state machine, DOM-free
//! - `geometry`: points, boxes and the `Layout` measuring seam
//! - `view`: the `<SortableList>` component wiring pointer events to it

mod controller;
mod error;
mod geometry;
mod listener;
mod options;
mod view;

#[cfg(test)]
mod tests;

pub use controller::{DeleteEvent, Direction, Neighbor, ReorderEvent, Slot, SortableController};
pub use error::{SortableError, SortableResult};
pub use geometry::{Layout, Point, Rect, StackLayout};
pub use listener::ListenerGuard;
pub use options::SortableOptions;
pub use view::SortableList;
