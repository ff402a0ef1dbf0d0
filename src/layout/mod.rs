pub mod squarify;
pub mod stats;

use std::ops::Deref;

use crate::error::LayoutError;
use crate::tree::{organize, Item, ItemId};

pub use self::squarify::layout;
pub use self::stats::Stats;

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Id of the item this rect represents (opaque for the root area)
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(id: impl Into<ItemId>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Area at the origin, e.g. the viewport a whole treemap is laid out into.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(ItemId::ROOT, 0.0, 0.0, width, height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Wider than tall (square counts as wide).
    pub fn is_wide(&self) -> bool {
        self.width >= self.height
    }

    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Append-only rect output with a checked capacity set at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectBuffer {
    rects: Vec<Rect>,
    capacity: usize,
}

impl RectBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rects: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer pre-filled with `rects`; capacity never drops below their count.
    pub(crate) fn from_rects(rects: Vec<Rect>, capacity: usize) -> Self {
        let capacity = capacity.max(rects.len());
        Self { rects, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, rect: Rect) -> Result<(), LayoutError> {
        if self.rects.len() >= self.capacity {
            return Err(LayoutError::RectBufferFull {
                capacity: self.capacity,
            });
        }
        self.rects.push(rect);
        Ok(())
    }

    /// Raise the capacity to at least `capacity`; never shrinks.
    pub(crate) fn ensure_capacity(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity);
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// First rect emitted for `id` (linear scan).
    pub fn find(&self, id: ItemId) -> Option<Rect> {
        self.rects.iter().find(|r| r.id == id).copied()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }
}

impl Deref for RectBuffer {
    type Target = [Rect];

    fn deref(&self) -> &[Rect] {
        &self.rects
    }
}

/// Items, their computed rects and leaf statistics.
///
/// `items` is readable directly. Change it through [`Model::items_mut`] so the
/// next layout organizes again; writes that bypass it leave a sorted model
/// with stale child ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub items: Vec<Item>,
    pub rects: RectBuffer,
    pub stats: Stats,
    /// Bytes of opaque user data every item carries through the codec
    pub items_user_data_size: u32,
    sorted: bool,
    /// Set by `items_mut`; the next layout sizes the rect buffer to the items
    items_changed: bool,
}

impl Model {
    /// Model whose rect buffer holds exactly one rect per item.
    pub fn new(items: Vec<Item>) -> Self {
        let capacity = items.len();
        Self::with_rect_capacity(items, capacity)
    }

    pub fn with_rect_capacity(items: Vec<Item>, capacity: usize) -> Self {
        Self {
            items,
            rects: RectBuffer::with_capacity(capacity),
            stats: Stats::default(),
            items_user_data_size: 0,
            sorted: false,
            items_changed: false,
        }
    }

    pub fn with_user_data_size(mut self, size: u32) -> Self {
        self.items_user_data_size = size;
        self
    }

    /// Model restored from an encoded buffer; items are already organized.
    pub(crate) fn from_parts(
        items: Vec<Item>,
        rects: RectBuffer,
        stats: Stats,
        items_user_data_size: u32,
    ) -> Self {
        Self {
            items,
            rects,
            stats,
            items_user_data_size,
            sorted: true,
            items_changed: false,
        }
    }

    /// Whether the items are organized and will not be re-sorted by the next layout.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Mutable access to the items; the next layout organizes them again and
    /// grows the rect buffer if items were added.
    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        self.sorted = false;
        self.items_changed = true;
        &mut self.items
    }

    /// Resize the rect buffer and organize as needed before a layout.
    pub(crate) fn prepare(&mut self) {
        if self.items_changed {
            self.rects.ensure_capacity(self.items.len());
            self.items_changed = false;
        }
        if !self.sorted {
            organize(&mut self.items);
            self.sorted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_buffer_rejects_overflow() {
        let mut buf = RectBuffer::with_capacity(1);
        assert!(buf.push(Rect::from_size(1.0, 1.0)).is_ok());
        assert_eq!(
            buf.push(Rect::from_size(1.0, 1.0)),
            Err(LayoutError::RectBufferFull { capacity: 1 })
        );
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn rect_buffer_find_returns_first_match() {
        let mut buf = RectBuffer::with_capacity(3);
        buf.push(Rect::new(1, 0.0, 0.0, 1.0, 1.0)).unwrap();
        buf.push(Rect::new(2, 5.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(buf.find(ItemId(2)).map(|r| r.x), Some(5.0));
        assert!(buf.find(ItemId(3)).is_none());
    }

    #[test]
    fn items_mut_invalidates_sorting() {
        let mut model = Model::from_parts(vec![Item::root(1, 1.0)], RectBuffer::default(), Stats::default(), 0);
        assert!(model.is_sorted());
        model.items_mut().push(Item::root(2, 2.0));
        assert!(!model.is_sorted());
    }

    #[test]
    fn growing_items_grows_the_rect_buffer() {
        let mut model = Model::new(vec![Item::root(1, 1.0)]);
        crate::layout::layout(&mut model, Rect::from_size(10.0, 10.0)).unwrap();
        assert_eq!(model.rects.capacity(), 1);

        model.items_mut().push(Item::root(2, 3.0));
        crate::layout::layout(&mut model, Rect::from_size(10.0, 10.0)).unwrap();
        assert_eq!(model.rects.capacity(), 2);
        assert_eq!(model.rects.len(), 2);
        assert_eq!(model.rects[0].id, ItemId(2));
    }
}
