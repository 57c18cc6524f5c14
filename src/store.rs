//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use leptos_sortable::{DeleteEvent, ReorderEvent};
use reactive_stores::Store;

use crate::models::Entry;

/// Demo page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Every entry, in load order
    pub entries: Vec<Entry>,
    /// Entry ids as currently shown in the list
    pub order: Vec<u32>,
    /// Human readable description of the last list change
    pub last_change: Option<String>,
}

impl AppState {
    pub fn new(entries: Vec<Entry>) -> Self {
        let order = entries.iter().map(|e| e.id).collect();
        Self {
            entries,
            order,
            last_change: None,
        }
    }

    pub fn title_of(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.title.as_str())
    }

    /// Mirror a committed drag into `order`
    pub fn apply_reorder(&mut self, event: ReorderEvent<u32>) {
        if self.order.get(event.from) != Some(&event.key) || event.to >= self.order.len() {
            return;
        }
        let id = self.order.remove(event.from);
        self.order.insert(event.to, id);
        self.last_change = Some(format!(
            "Moved \"{}\" from {} to {}",
            self.title_of(id).unwrap_or("?"),
            event.from + 1,
            event.to + 1
        ));
    }

    /// Mirror a deleted row
    pub fn apply_delete(&mut self, event: DeleteEvent<u32>) {
        let title = self.title_of(event.key).unwrap_or("?").to_string();
        self.order.retain(|id| *id != event.key);
        self.entries.retain(|e| e.id != event.key);
        self.last_change = Some(format!("Deleted \"{}\"", title));
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
