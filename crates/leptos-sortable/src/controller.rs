//! Reorderable List Controller
//!
//! Pure state machine behind the sortable list. Holds the slot order and
//! the active drag session; knows nothing about the DOM. Geometry comes in
//! through [`Layout`] so the same logic runs in the browser and in tests.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{SortableError, SortableResult};
use crate::geometry::{Layout, Point};

/// One rendered row of the list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot<K> {
    Item(K),
    /// Stand-in for the dragged item's pending slot
    Placeholder,
}

/// Which side of the placeholder a neighbor sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Previous = 0,
    Next = 1,
}

/// Cached neighbor of the placeholder with its sampled vertical band
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor<K> {
    pub key: K,
    pub top: f64,
    pub bottom: f64,
    pub direction: Direction,
}

impl<K> Neighbor<K> {
    /// Open band test: a pointer resting on a row edge matches neither row
    pub fn contains_y(&self, y: f64) -> bool {
        self.top < y && y < self.bottom
    }
}

/// Emitted when a drag session commits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEvent<K> {
    pub key: K,
    pub from: usize,
    pub to: usize,
}

/// Emitted when an item is removed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEvent<K> {
    pub key: K,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct DragSession<K> {
    key: K,
    origin: usize,
    offset: Point,
    position: Point,
    width: f64,
    height: f64,
    neighbors: Vec<Neighbor<K>>,
    /// Set when the rows around the placeholder changed outside a move
    stale: bool,
}

/// Ordered items plus the optional drag session.
///
/// While a session is active the dragged item is out of `slots`; its slot
/// is held by a single `Slot::Placeholder`.
#[derive(Clone, Debug, PartialEq)]
pub struct SortableController<K> {
    slots: Vec<Slot<K>>,
    session: Option<DragSession<K>>,
}

impl<K> Default for SortableController<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            session: None,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> SortableController<K> {
    /// Build the list from an initial item set, keeping input order.
    /// Repeated keys are dropped after their first occurrence.
    pub fn new(items: impl IntoIterator<Item = K>) -> Self {
        let mut seen = HashSet::new();
        let slots = items
            .into_iter()
            .filter(|key| seen.insert(*key))
            .map(Slot::Item)
            .collect();
        Self { slots, session: None }
    }

    /// Rendered rows, placeholder included, dragged item excluded
    pub fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    /// Logical order, with the dragged item standing where its placeholder is
    pub fn order(&self) -> Vec<K> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Item(key) => Some(*key),
                Slot::Placeholder => self.session.as_ref().map(|s| s.key),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.index_of(key).is_some()
    }

    /// Index of `key` in [`order`](Self::order)
    pub fn index_of(&self, key: K) -> Option<usize> {
        if self.dragged() == Some(key) {
            return self.placeholder_index();
        }
        self.slot_index(key)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged(&self) -> Option<K> {
        self.session.as_ref().map(|s| s.key)
    }

    /// Top-left corner the dragged item should be drawn at
    pub fn dragged_position(&self) -> Option<Point> {
        self.session.as_ref().map(|s| s.position)
    }

    /// Width and height frozen at grab time
    pub fn dragged_size(&self) -> Option<(f64, f64)> {
        self.session.as_ref().map(|s| (s.width, s.height))
    }

    pub fn neighbors(&self) -> &[Neighbor<K>] {
        self.session
            .as_ref()
            .map(|s| s.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Slot::Placeholder)
    }

    fn slot_index(&self, key: K) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Slot::Item(key))
    }

    /// Grab `key` at `pointer`.
    ///
    /// The item's slot becomes the placeholder and the pointer offset into
    /// the item is remembered for the rest of the gesture.
    pub fn start_drag<L: Layout<K>>(&mut self, key: K, pointer: Point, layout: &L) -> SortableResult<()> {
        if self.session.is_some() {
            trace!("[SORT] start_drag({:?}) ignored: busy", key);
            return Err(SortableError::Busy);
        }
        let index = self.slot_index(key).ok_or(SortableError::UnknownItem)?;
        let rect = layout.measure(&self.slots, index).ok_or(SortableError::Unmeasured)?;

        self.slots[index] = Slot::Placeholder;
        let neighbors = collect_neighbors(&self.slots, index, layout);
        self.session = Some(DragSession {
            key,
            origin: index,
            offset: pointer - rect.origin(),
            position: rect.origin(),
            width: rect.width,
            height: rect.height,
            neighbors,
            stale: false,
        });
        debug!("[SORT] drag started: item={:?} index={}", key, index);
        Ok(())
    }

    /// Follow the pointer. Returns `true` when the placeholder moved.
    pub fn drag_move<L: Layout<K>>(&mut self, pointer: Point, layout: &L) -> SortableResult<bool> {
        let session = self.session.as_mut().ok_or(SortableError::NoSession)?;
        session.position = pointer - session.offset;

        if session.stale {
            if let Some(index) = self.slots.iter().position(|slot| *slot == Slot::Placeholder) {
                session.neighbors = collect_neighbors(&self.slots, index, layout);
            }
            session.stale = false;
        }

        // Previous is cached first, so it wins when both bands match
        let hit = session
            .neighbors
            .iter()
            .find(|n| n.contains_y(pointer.y))
            .copied();
        let Some(hit) = hit else {
            return Ok(false);
        };

        let Some(current) = self.slots.iter().position(|slot| *slot == Slot::Placeholder) else {
            return Ok(false);
        };
        self.slots.remove(current);
        let Some(target) = self.slots.iter().position(|slot| *slot == Slot::Item(hit.key)) else {
            self.slots.insert(current, Slot::Placeholder);
            return Ok(false);
        };
        let index = match hit.direction {
            Direction::Previous => target,
            Direction::Next => target + 1,
        };
        self.slots.insert(index, Slot::Placeholder);
        session.neighbors = collect_neighbors(&self.slots, index, layout);
        trace!("[SORT] placeholder {} -> {} ({:?} of {:?})", current, index, hit.direction, hit.key);
        Ok(true)
    }

    /// Drop the dragged item into the placeholder's slot
    pub fn end_drag(&mut self) -> SortableResult<ReorderEvent<K>> {
        // A placeholder exists exactly while a session does
        let to = self.placeholder_index().ok_or(SortableError::NoSession)?;
        let session = self.session.take().ok_or(SortableError::NoSession)?;
        self.slots[to] = Slot::Item(session.key);
        debug!("[SORT] drag ended: item={:?} {} -> {}", session.key, session.origin, to);
        Ok(ReorderEvent {
            key: session.key,
            from: session.origin,
            to,
        })
    }

    /// Abort the gesture and put the item back where it was grabbed
    pub fn cancel_drag(&mut self) -> SortableResult<()> {
        let session = self.session.take().ok_or(SortableError::NoSession)?;
        self.slots.retain(|slot| *slot != Slot::Placeholder);
        let index = session.origin.min(self.slots.len());
        self.slots.insert(index, Slot::Item(session.key));
        debug!("[SORT] drag cancelled: item={:?} back to {}", session.key, index);
        Ok(())
    }

    /// Remove `key`. Removing the dragged item also ends its session.
    pub fn delete_item(&mut self, key: K) -> SortableResult<DeleteEvent<K>> {
        if self.dragged() == Some(key) {
            let index = self.placeholder_index().unwrap_or_default();
            self.slots.retain(|slot| *slot != Slot::Placeholder);
            self.session = None;
            debug!("[SORT] deleted dragged item {:?}", key);
            return Ok(DeleteEvent { key, index });
        }

        let index = self.index_of(key).ok_or(SortableError::UnknownItem)?;
        let slot = self.slot_index(key).ok_or(SortableError::UnknownItem)?;
        self.slots.remove(slot);
        if let Some(session) = self.session.as_mut() {
            session.neighbors.retain(|n| n.key != key);
            session.stale = true;
        }
        debug!("[SORT] deleted item {:?} at {}", key, index);
        Ok(DeleteEvent { key, index })
    }

    /// Drop every item and any session. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.slots.is_empty() && self.session.is_none() {
            return;
        }
        self.slots.clear();
        self.session = None;
        debug!("[SORT] controller destroyed");
    }
}

/// Sample the items directly above and below the placeholder at `index`
fn collect_neighbors<K, L>(slots: &[Slot<K>], index: usize, layout: &L) -> Vec<Neighbor<K>>
where
    K: Copy,
    L: Layout<K>,
{
    let mut neighbors = Vec::with_capacity(2);
    let candidates = [
        (index.checked_sub(1), Direction::Previous),
        (Some(index + 1), Direction::Next),
    ];
    for (candidate, direction) in candidates {
        let Some(i) = candidate else { continue };
        let Some(Slot::Item(key)) = slots.get(i) else { continue };
        if let Some(rect) = layout.measure(slots, i) {
            neighbors.push(Neighbor {
                key: *key,
                top: rect.top,
                bottom: rect.bottom(),
                direction,
            });
        }
    }
    neighbors
}
