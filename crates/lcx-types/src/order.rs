//! Ordering capability for same-role objects.
//!
//! Interceptors and output consumers are invoked in a defined sequence:
//! highest [`Order::order`] first. Equal orders keep their registration
//! (or input) order.
//!
//! Two tools cover the two ways a set is built:
//!
//! - [`sort_by_order`] for a slice that already exists (stable sort, so
//!   input order is the tie-break)
//! - [`OrderedVec`] for a set grown by registration; each entry carries a
//!   sequence number so the tie-break survives re-prioritization

use std::cmp::Reverse;
use std::sync::Arc;

/// Order used when an object does not specify one.
pub const DEFAULT_ORDER: i32 = 0;

/// Priority capability. Larger value = invoked earlier.
pub trait Order {
    /// Returns the order of this object. Default: [`DEFAULT_ORDER`].
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }
}

impl<T: Order + ?Sized> Order for &T {
    fn order(&self) -> i32 {
        (**self).order()
    }
}

impl<T: Order + ?Sized> Order for &mut T {
    fn order(&self) -> i32 {
        (**self).order()
    }
}

impl<T: Order + ?Sized> Order for Box<T> {
    fn order(&self) -> i32 {
        (**self).order()
    }
}

impl<T: Order + ?Sized> Order for Arc<T> {
    fn order(&self) -> i32 {
        (**self).order()
    }
}

/// Sorts `items` by order, highest first.
///
/// The sort is stable: items with equal order keep their relative
/// position from the input slice.
pub fn sort_by_order<T: Order>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.order()));
}

/// One entry of an [`OrderedVec`].
#[derive(Debug, Clone)]
struct Slot<T> {
    order: i32,
    seq: u64,
    item: T,
}

/// A vector kept sorted by `(order desc, registration seq asc)`.
///
/// The order is captured when the item is pushed (or set explicitly), so
/// an item whose [`Order::order`] changes afterwards does not silently
/// move. Use [`OrderedVec::set_order`] to re-prioritize.
#[derive(Debug, Clone)]
pub struct OrderedVec<T> {
    slots: Vec<Slot<T>>,
    next_seq: u64,
}

impl<T> OrderedVec<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_seq: 0,
        }
    }

    /// Inserts `item` with an explicit order.
    ///
    /// The item lands after every existing entry with an order greater
    /// than or equal to `order` (FIFO for same order).
    pub fn push_with_order(&mut self, item: T, order: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let pos = self
            .slots
            .iter()
            .position(|s| s.order < order)
            .unwrap_or(self.slots.len());
        self.slots.insert(pos, Slot { order, seq, item });
    }

    /// Changes the order of the first item matching `pred`.
    ///
    /// The item keeps its registration sequence, so among equal orders it
    /// is placed where its original registration puts it.
    /// Returns `false` if nothing matched.
    pub fn set_order(&mut self, pred: impl Fn(&T) -> bool, order: i32) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| pred(&s.item)) else {
            return false;
        };
        slot.order = order;
        self.slots.sort_by_key(|s| (Reverse(s.order), s.seq));
        true
    }

    /// Removes and returns the first item matching `pred`.
    pub fn remove_first(&mut self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let pos = self.slots.iter().position(|s| pred(&s.item))?;
        Some(self.slots.remove(pos).item)
    }

    /// Keeps only the items for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.slots.retain(|s| keep(&s.item));
    }

    /// Iterates items in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().map(|s| &s.item)
    }

    /// Iterates items mutably in invocation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().map(|s| &mut s.item)
    }

    /// Iterates `(order, item)` pairs in invocation order.
    pub fn iter_with_order(&self) -> impl Iterator<Item = (i32, &T)> {
        self.slots.iter().map(|s| (s.order, &s.item))
    }

    /// Returns the captured orders in invocation order.
    #[must_use]
    pub fn orders(&self) -> Vec<i32> {
        self.slots.iter().map(|s| s.order).collect()
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consumes the vector, returning items in invocation order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.slots.into_iter().map(|s| s.item).collect()
    }
}

impl<T: Order> OrderedVec<T> {
    /// Inserts `item` using its own [`Order::order`].
    pub fn push(&mut self, item: T) {
        let order = item.order();
        self.push_with_order(item, order);
    }
}

impl<T> Default for OrderedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Order> FromIterator<T> for OrderedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        for item in iter {
            v.push(item);
        }
        v
    }
}
