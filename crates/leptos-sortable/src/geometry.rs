//! Geometry
//!
//! Pointer coordinates, item boxes and the `Layout` seam the controller
//! measures through.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::controller::Slot;

/// Pointer position in client coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Bounding box of a rendered slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Open vertical band test: `top < y < bottom`
    pub fn contains_y(&self, y: f64) -> bool {
        self.top < y && y < self.bottom()
    }
}

/// Source of slot geometry.
///
/// `measure` receives the full slot sequence so implementations can derive
/// positions from the current order instead of a live layout pass.
/// Returning `None` means the slot is detached or has no size.
pub trait Layout<K> {
    fn measure(&self, slots: &[Slot<K>], index: usize) -> Option<Rect>;
}

/// Vertical stack of rows starting at `origin`.
///
/// Heights are keyed by item; the placeholder uses `placeholder_height`.
/// Items without a recorded height measure as `None` and also stop the
/// stack below them from being measured.
#[derive(Clone, Debug)]
pub struct StackLayout<K> {
    origin: Point,
    width: f64,
    heights: HashMap<K, f64>,
    placeholder_height: f64,
}

impl<K: Copy + Eq + Hash> StackLayout<K> {
    pub fn new(origin: Point, width: f64) -> Self {
        Self {
            origin,
            width,
            heights: HashMap::new(),
            placeholder_height: 0.0,
        }
    }

    /// Uniform rows, handy for fixed-height lists
    pub fn uniform(origin: Point, width: f64, keys: &[K], height: f64) -> Self {
        let mut layout = Self::new(origin, width);
        for key in keys {
            layout.set_height(*key, height);
        }
        layout.placeholder_height = height;
        layout
    }

    pub fn set_height(&mut self, key: K, height: f64) {
        self.heights.insert(key, height);
    }

    pub fn set_placeholder_height(&mut self, height: f64) {
        self.placeholder_height = height;
    }

    pub fn placeholder_height(&self) -> f64 {
        self.placeholder_height
    }

    fn height_of(&self, slot: &Slot<K>) -> Option<f64> {
        match slot {
            Slot::Item(key) => self.heights.get(key).copied(),
            Slot::Placeholder => Some(self.placeholder_height),
        }
    }
}

impl<K: Copy + Eq + Hash> Layout<K> for StackLayout<K> {
    fn measure(&self, slots: &[Slot<K>], index: usize) -> Option<Rect> {
        let slot = slots.get(index)?;
        let mut top = self.origin.y;
        for above in &slots[..index] {
            top += self.height_of(above)?;
        }
        let height = self.height_of(slot)?;
        if height <= 0.0 {
            return None;
        }
        Some(Rect::new(top, self.origin.x, self.width, height))
    }
}
