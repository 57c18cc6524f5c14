//! Sortable List Demo App
//!
//! Mounts one sortable list over the bundled entries and mirrors its
//! reorder/delete events into the store.

use leptos::prelude::*;
use leptos_sortable::{DeleteEvent, ReorderEvent, SortableList};
use log::{error, info};
use reactive_stores::Store;

use crate::models::starter_entries;
use crate::store::{use_app_store, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let entries = match starter_entries() {
        Ok(entries) => entries,
        Err(err) => {
            error!("[APP] failed to parse bundled entries: {}", err);
            Vec::new()
        }
    };
    info!("[APP] loaded {} entries", entries.len());
    provide_context(Store::new(AppState::new(entries)));

    view! {
        <main class="main-content">
            <h1>"Sortable List"</h1>
            <EntryList />
            <StatusLine />
        </main>
    }
}

/// The sortable list itself
#[component]
fn EntryList() -> impl IntoView {
    let store = use_app_store();
    let items = store.order().get_untracked();

    let render_item = move |id: u32| {
        let (title, note) = store
            .entries()
            .read_untracked()
            .iter()
            .find(|e| e.id == id)
            .map(|e| (e.title.clone(), e.note.clone()))
            .unwrap_or_default();
        view! {
            <span class="entry-title">{title}</span>
            {note.map(|note| view! { <span class="entry-note">{note}</span> })}
        }
    };

    let on_reorder = move |event: ReorderEvent<u32>| {
        info!("[APP] reorder: item={} {} -> {}", event.key, event.from, event.to);
        store.update(|state| state.apply_reorder(event));
    };
    let on_delete = move |event: DeleteEvent<u32>| {
        info!("[APP] delete: item={} at {}", event.key, event.index);
        store.update(|state| state.apply_delete(event));
    };

    view! {
        <SortableList
            items=items
            render_item=render_item
            on_reorder=on_reorder
            on_delete=on_delete
        />
    }
}

/// Current order and the last change, below the list
#[component]
fn StatusLine() -> impl IntoView {
    let store = use_app_store();

    let order = move || {
        store
            .order()
            .get()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    view! {
        <p class="item-count">{move || format!("{} items: {}", store.order().read().len(), order())}</p>
        <p class="last-change">{move || store.last_change().get().unwrap_or_default()}</p>
    }
}
