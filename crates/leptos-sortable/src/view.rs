//! Sortable List Component
//!
//! Renders a `SortableController` as `<ul>`/`<li>` rows and feeds it
//! pointer input. Rows are keyed by slot, so the dragged row keeps its DOM
//! node while it moves to the end of the list and floats under the pointer.

use leptos::html;
use leptos::prelude::*;
use log::{debug, trace};
use wasm_bindgen::JsCast;

use crate::controller::{DeleteEvent, ReorderEvent, Slot, SortableController};
use crate::geometry::{Point, StackLayout};
use crate::listener::ListenerGuard;
use crate::options::SortableOptions;

const ROW_ID_ATTR: &str = "data-sortable-id";
const HANDLE_SELECTOR: &str = "[data-grab-handle], [data-delete-handle]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Handle {
    Grab,
    Delete,
}

/// Per-instance state, shared by every handler of one list
#[derive(Clone, Copy)]
struct SortableState {
    controller: RwSignal<SortableController<u32>>,
    /// Row geometry sampled when the current drag started
    layout: StoredValue<Option<StackLayout<u32>>>,
    /// Document listeners alive for the current drag only
    guards: StoredValue<Vec<ListenerGuard>, LocalStorage>,
    options: StoredValue<SortableOptions>,
    list_ref: NodeRef<html::Ul>,
    on_reorder: Option<Callback<ReorderEvent<u32>>>,
    on_delete: Option<Callback<DeleteEvent<u32>>>,
    has_own_handles: Option<Callback<u32, bool>>,
}

impl SortableState {
    fn on_pointerdown(self, ev: web_sys::PointerEvent) {
        if ev.button() != 0 {
            return;
        }
        let Some((handle, id)) = handle_under(ev.target()) else {
            return;
        };
        match handle {
            Handle::Grab => {
                ev.prevent_default();
                self.begin_drag(id, client_point(&ev));
            }
            Handle::Delete => self.delete(id),
        }
    }

    fn begin_drag(self, id: u32, pointer: Point) {
        let Some(list) = self.list_ref.get_untracked() else {
            return;
        };
        let Some(layout) = snapshot_layout(&list, id) else {
            debug!("[SORT] grab on {} ignored: list has no rows", id);
            return;
        };
        match self.controller.try_update(|c| c.start_drag(id, pointer, &layout)) {
            Some(Ok(())) => {
                self.layout.set_value(Some(layout));
                self.listen();
            }
            Some(Err(err)) => debug!("[SORT] grab on {} ignored: {}", id, err),
            None => {}
        }
    }

    fn listen(self) {
        let mut guards = Vec::with_capacity(4);
        guards.extend(ListenerGuard::on_document("pointermove", move |ev: web_sys::PointerEvent| {
            self.pointer_move(client_point(&ev));
        }));
        guards.extend(ListenerGuard::on_document("pointerup", move |_: web_sys::PointerEvent| {
            self.finish();
        }));
        guards.extend(ListenerGuard::on_document("pointercancel", move |_: web_sys::PointerEvent| {
            self.cancel();
        }));
        if self.options.with_value(|o| o.cancel_on_escape) {
            guards.extend(ListenerGuard::on_document("keydown", move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Escape" {
                    self.cancel();
                }
            }));
        }
        self.guards.set_value(guards);
    }

    fn release(self) {
        self.guards.set_value(Vec::new());
        self.layout.set_value(None);
    }

    fn pointer_move(self, pointer: Point) {
        self.layout.with_value(|layout| {
            let Some(layout) = layout else { return };
            self.controller.update(|c| {
                if let Err(err) = c.drag_move(pointer, layout) {
                    trace!("[SORT] move ignored: {}", err);
                }
            });
        });
    }

    fn finish(self) {
        self.release();
        match self.controller.try_update(|c| c.end_drag()) {
            Some(Ok(event)) => {
                if event.from != event.to {
                    if let Some(on_reorder) = self.on_reorder {
                        on_reorder.run(event);
                    }
                }
            }
            Some(Err(err)) => trace!("[SORT] release ignored: {}", err),
            None => {}
        }
    }

    fn cancel(self) {
        self.release();
        if let Some(Err(err)) = self.controller.try_update(|c| c.cancel_drag()) {
            trace!("[SORT] cancel ignored: {}", err);
        }
    }

    fn delete(self, id: u32) {
        if self.controller.with_untracked(|c| c.dragged() == Some(id)) {
            self.release();
        }
        match self.controller.try_update(|c| c.delete_item(id)) {
            Some(Ok(event)) => {
                if let Some(on_delete) = self.on_delete {
                    on_delete.run(event);
                }
            }
            Some(Err(err)) => debug!("[SORT] delete of {} ignored: {}", id, err),
            None => {}
        }
    }

    fn teardown(self) {
        self.guards.try_update_value(|guards| guards.clear());
        self.controller.try_update_untracked(|c| c.destroy());
    }
}

/// Pointer-reorderable list.
///
/// Rows are rendered by `render_item`. Each row gets a grab handle and a
/// delete handle unless it reports its own through `has_own_handles` or
/// `options.render_handles` is off.
#[component]
pub fn SortableList<F, V>(
    /// Initial item keys, top to bottom
    items: Vec<u32>,
    /// Row content for a key
    render_item: F,
    #[prop(optional)] options: SortableOptions,
    /// Called after a drag that changed the order
    #[prop(optional, into)]
    on_reorder: Option<Callback<ReorderEvent<u32>>>,
    /// Called after a row was removed through its delete handle
    #[prop(optional, into)]
    on_delete: Option<Callback<DeleteEvent<u32>>>,
    /// True for rows whose `render_item` output already carries
    /// `data-grab-handle` and `data-delete-handle`
    #[prop(optional, into)]
    has_own_handles: Option<Callback<u32, bool>>,
) -> impl IntoView
where
    F: Fn(u32) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let list_class = options.list_class.clone();
    let state = SortableState {
        controller: RwSignal::new(SortableController::new(items)),
        layout: StoredValue::new(None),
        guards: StoredValue::new_local(Vec::new()),
        options: StoredValue::new(options),
        list_ref: NodeRef::new(),
        on_reorder,
        on_delete,
        has_own_handles,
    };

    on_cleanup(move || state.teardown());

    // In-flow slots first, the floating dragged row last
    let rows = move || {
        state.controller.with(|c| {
            let mut rows = c.slots().to_vec();
            if let Some(key) = c.dragged() {
                rows.push(Slot::Item(key));
            }
            rows
        })
    };

    view! {
        <ul
            class=list_class
            node_ref=state.list_ref
            on:pointerdown=move |ev| state.on_pointerdown(ev)
            on:dragstart=move |ev: web_sys::DragEvent| {
                if matches!(handle_under(ev.target()), Some((Handle::Grab, _))) {
                    ev.prevent_default();
                }
            }
        >
            <For
                each=rows
                key=|slot| *slot
                children=move |slot| match slot {
                    Slot::Item(id) => sortable_row(state, id, render_item(id)).into_any(),
                    Slot::Placeholder => placeholder_row(state).into_any(),
                }
            />
        </ul>
    }
}

fn sortable_row<V: IntoView + 'static>(state: SortableState, id: u32, content: V) -> impl IntoView {
    let class = move || {
        let dragging = state.controller.with(|c| c.dragged() == Some(id));
        state.options.with_value(|o| o.row_class(dragging))
    };
    let style = move || state.controller.with(|c| drag_style(c, id)).unwrap_or_default();
    let row_has_own = state.has_own_handles.map(|cb| cb.run(id)).unwrap_or(false);
    let handles = state.options.with_value(|o| o.wants_handles(row_has_own));

    view! {
        <li class=class style=style data-sortable-id=id.to_string()>
            {handles.then(|| view! { <span class="sortable-list__grab" data-grab-handle=""></span> })}
            {content}
            {handles.then(|| view! { <span class="sortable-list__delete" data-delete-handle="">"×"</span> })}
        </li>
    }
}

fn placeholder_row(state: SortableState) -> impl IntoView {
    let class = state.options.with_value(|o| o.placeholder_row_class());
    let style = move || state.controller.with(|c| placeholder_style(c)).unwrap_or_default();

    view! { <li class=class style=style></li> }
}

/// Inline style pinning the dragged row under the pointer
fn drag_style(controller: &SortableController<u32>, id: u32) -> Option<String> {
    if controller.dragged() != Some(id) {
        return None;
    }
    let position = controller.dragged_position()?;
    let (width, height) = controller.dragged_size()?;
    Some(format!(
        "position: fixed; z-index: 1000; left: {}px; top: {}px; width: {}px; height: {}px;",
        position.x, position.y, width, height
    ))
}

fn placeholder_style(controller: &SortableController<u32>) -> Option<String> {
    let (width, height) = controller.dragged_size()?;
    Some(format!("width: {}px; height: {}px;", width, height))
}

fn client_point(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Resolve an event target to the handle it sits in and that row's key
fn handle_under(target: Option<web_sys::EventTarget>) -> Option<(Handle, u32)> {
    let element = target?.dyn_into::<web_sys::Element>().ok()?;
    let handle = element.closest(HANDLE_SELECTOR).ok()??;
    let row = handle.closest(&format!("[{}]", ROW_ID_ATTR)).ok()??;
    let id = row.get_attribute(ROW_ID_ATTR)?.parse().ok()?;
    let kind = if handle.has_attribute("data-grab-handle") {
        Handle::Grab
    } else {
        Handle::Delete
    };
    Some((kind, id))
}

/// Sample every keyed row of `list` into a stack layout.
///
/// Taken once per drag; later moves are resolved against the model order
/// so they do not depend on when the DOM catches up.
fn snapshot_layout(list: &web_sys::Element, dragged: u32) -> Option<StackLayout<u32>> {
    let rows = list.children();
    let mut sampled = Vec::new();
    for i in 0..rows.length() {
        let Some(row) = rows.item(i) else { continue };
        let Some(id) = row.get_attribute(ROW_ID_ATTR).and_then(|v| v.parse::<u32>().ok()) else {
            continue;
        };
        sampled.push((id, row.get_bounding_client_rect()));
    }

    let (_, first) = sampled.first()?;
    let mut layout = StackLayout::new(Point::new(first.x(), first.y()), first.width());
    for (id, rect) in &sampled {
        layout.set_height(*id, rect.height());
        if *id == dragged {
            layout.set_placeholder_height(rect.height());
        }
    }
    Some(layout)
}
