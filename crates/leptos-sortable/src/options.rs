//! Sortable Options
//!
//! Class names and behavior switches for `<SortableList>`. Missing fields
//! fall back to their defaults when deserialized.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortableOptions {
    /// Class of the root `<ul>`
    pub list_class: String,
    /// Class of every row, placeholder included
    pub item_class: String,
    /// Extra class of the placeholder row
    pub placeholder_class: String,
    /// Extra class of the row being dragged
    pub dragging_class: String,
    /// Render grab/delete handles around rows that lack their own.
    /// Rows are asked through the list's `has_own_handles` prop; turning
    /// this off skips the built-in handles for every row.
    pub render_handles: bool,
    /// Escape aborts an active drag
    pub cancel_on_escape: bool,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            list_class: "sortable-list".to_string(),
            item_class: "sortable-list__item".to_string(),
            placeholder_class: "sortable-list__placeholder".to_string(),
            dragging_class: "sortable-list__item_dragging".to_string(),
            render_handles: true,
            cancel_on_escape: true,
        }
    }
}

impl SortableOptions {
    pub fn row_class(&self, dragging: bool) -> String {
        if dragging {
            format!("{} {}", self.item_class, self.dragging_class)
        } else {
            self.item_class.clone()
        }
    }

    /// Whether a row gets the built-in grab/delete handles
    pub fn wants_handles(&self, row_has_own: bool) -> bool {
        self.render_handles && !row_has_own
    }

    pub fn placeholder_row_class(&self) -> String {
        format!("{} {}", self.item_class, self.placeholder_class)
    }
}
