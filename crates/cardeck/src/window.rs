#![forbid(unsafe_code)]

//! Sliding window of materialized visuals over the dataset.
//!
//! The window holds at most [`BUFFER_SIZE`] visuals for a contiguous run of
//! dataset indices. Slot 0 is the head and holds the highest index; the tail
//! holds the lowest. Relative to the visible slot `s`, the next item sits at
//! `s - 1` and the previous item at `s + 1`.
//!
//! ```text
//!   slot:    0        1        2
//!          [ i+1 ]  [ i ]    [ i-1 ]
//!           next    visible  previous
//! ```
//!
//! # Invariants
//!
//! 1. Indices are contiguous and decrease from head to tail.
//! 2. `len() <= min(BUFFER_SIZE, count)`.
//! 3. After a refill, `visible_slot` points at the slot holding
//!    `visible_index` whenever the dataset is non-empty.
//! 4. Visuals leave the window only through the pool.
//!
//! # Failure Modes
//!
//! - An out-of-range selection wraps to index 0.
//! - `advance` at the last item and `retreat` at the first are no-ops.

use std::collections::VecDeque;

use crate::Visual;
use crate::adapter::Adapter;
use crate::pool::ReleasedPool;

/// Maximum number of materialized visuals.
pub const BUFFER_SIZE: usize = 3;

/// Direction a refill grows the window in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increasing dataset index, added at the head.
    Forward,
    /// Decreasing dataset index, added at the tail.
    Backward,
}

/// A materialized visual and the dataset index it renders.
#[derive(Debug)]
pub struct Slot<V> {
    pub index: usize,
    pub visual: V,
}

/// Buffering and index bookkeeping for a deck.
#[derive(Debug)]
pub struct Window<V> {
    slots: VecDeque<Slot<V>>,
    pool: ReleasedPool<V>,
    count: usize,
    visible_index: usize,
    visible_slot: Option<usize>,
    next_load: Option<usize>,
    width: f32,
    /// Width earlier items were last pinned at.
    pinned_width: f32,
    zoom_in: f32,
    zoom_out: f32,
}

impl<V: Visual> Window<V> {
    /// Empty window with the given pool capacity and rest scales.
    #[must_use]
    pub fn new(pool_capacity: usize, zoom_out: f32, zoom_in: f32) -> Self {
        Self {
            slots: VecDeque::with_capacity(BUFFER_SIZE),
            pool: ReleasedPool::new(pool_capacity),
            count: 0,
            visible_index: 0,
            visible_slot: None,
            next_load: None,
            width: 0.0,
            pinned_width: 0.0,
            zoom_in,
            zoom_out,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Dataset index of the front-facing item. Meaningless when empty.
    #[inline]
    #[must_use]
    pub fn visible_index(&self) -> usize {
        self.visible_index
    }

    #[inline]
    #[must_use]
    pub fn visible_slot(&self) -> Option<usize> {
        self.visible_slot
    }

    #[inline]
    #[must_use]
    pub fn next_load(&self) -> Option<usize> {
        self.next_load
    }

    /// Item count as of the last selection or change notification.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn pool(&self) -> &ReleasedPool<V> {
        &self.pool
    }

    /// Materialized indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.slots.iter().rev().map(|s| s.index).collect()
    }

    /// Slots from head to tail.
    pub fn slots(&self) -> impl Iterator<Item = &Slot<V>> + '_ {
        self.slots.iter()
    }

    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot<V>> + '_ {
        self.slots.iter_mut()
    }

    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&Slot<V>> {
        self.slots.get(slot)
    }

    pub fn visual_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.slots.get_mut(slot).map(|s| &mut s.visual)
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    /// Slot of the displayed item.
    #[must_use]
    pub fn displayed_slot(&self) -> Option<usize> {
        self.visible_slot.filter(|&s| s < self.slots.len())
    }

    /// Slot of the item after the displayed one.
    #[must_use]
    pub fn next_slot(&self) -> Option<usize> {
        self.displayed_slot().and_then(|s| s.checked_sub(1))
    }

    /// Slot of the item before the displayed one.
    #[must_use]
    pub fn previous_slot(&self) -> Option<usize> {
        self.displayed_slot()
            .map(|s| s + 1)
            .filter(|&s| s < self.slots.len())
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_slot().is_some()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous_slot().is_some()
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Rebuild the window around `index`.
    ///
    /// Out-of-range indices wrap to 0. Returns the index actually selected,
    /// or `None` for an empty dataset.
    pub fn select<A>(&mut self, adapter: &mut A, index: usize) -> Option<usize>
    where
        A: Adapter<Visual = V>,
    {
        self.release_all();
        self.count = adapter.count();
        if self.count == 0 {
            self.visible_index = 0;
            return None;
        }
        let target = if index < self.count {
            index
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                requested = index,
                count = self.count,
                "selection out of range, wrapping to 0"
            );
            0
        };
        self.visible_index = target;
        self.init_buffer_indexes(target);
        self.ensure_full(adapter, Direction::Forward);
        Some(target)
    }

    /// Derive the first index to load and the visible slot for `target`.
    pub fn init_buffer_indexes(&mut self, target: usize) {
        let n = self.count;
        if n == 0 {
            self.next_load = None;
            self.visible_slot = None;
            return;
        }
        let b = BUFFER_SIZE;
        let (start, slot) = if n <= b || target == 0 {
            let last = if n <= b { n - 1 } else { b - 1 };
            (0, last.saturating_sub(target))
        } else if target + b - 1 <= n {
            (target - 1, 1)
        } else {
            (n - b, (n - 1).saturating_sub(target))
        };
        self.next_load = Some(start);
        self.visible_slot = Some(slot);
    }

    /// Grow the window in `direction` until it is full or the dataset ends.
    pub fn ensure_full<A>(&mut self, adapter: &mut A, direction: Direction)
    where
        A: Adapter<Visual = V>,
    {
        let limit = BUFFER_SIZE.min(self.count);
        match direction {
            Direction::Forward => {
                let Some(mut index) = self
                    .slots
                    .front()
                    .map(|s| s.index + 1)
                    .or(self.next_load)
                else {
                    return;
                };
                while self.slots.len() < limit && index < self.count {
                    let visual = self.materialize(adapter, index);
                    self.slots.push_front(Slot { index, visual });
                    index += 1;
                }
            }
            Direction::Backward => {
                let Some(mut index) = self.slots.back().and_then(|s| s.index.checked_sub(1))
                else {
                    return;
                };
                while self.slots.len() < limit {
                    let visual = self.materialize(adapter, index);
                    self.slots.push_back(Slot { index, visual });
                    match index.checked_sub(1) {
                        Some(i) => index = i,
                        None => break,
                    }
                }
            }
        }
        self.next_load = self.slots.front().map(|s| s.index + 1);
    }

    /// Step forward after a committed left transition.
    pub fn advance<A>(&mut self, adapter: &mut A)
    where
        A: Adapter<Visual = V>,
    {
        let Some(slot) = self.displayed_slot() else {
            return;
        };
        match slot {
            0 => {}
            1 if self.visible_index + 1 < self.count.saturating_sub(1) => {
                self.release_tail();
                self.visible_index += 1;
                self.ensure_full(adapter, Direction::Forward);
            }
            1 => {
                self.visible_slot = Some(0);
                self.visible_index += 1;
            }
            _ => {
                self.visible_slot = Some(slot - 1);
                self.visible_index += 1;
                self.ensure_full(adapter, Direction::Forward);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            visible_index = self.visible_index,
            visible_slot = ?self.visible_slot,
            "window advanced"
        );
    }

    /// Step backward after a committed right transition.
    pub fn retreat<A>(&mut self, adapter: &mut A)
    where
        A: Adapter<Visual = V>,
    {
        let Some(slot) = self.displayed_slot() else {
            return;
        };
        if slot + 1 >= self.slots.len() || self.visible_index == 0 {
            return;
        }
        let limit = BUFFER_SIZE.min(self.count);
        if Some(slot) == limit.checked_sub(2) && self.visible_index > 1 {
            self.release_head();
        } else {
            self.visible_slot = Some(slot + 1);
        }
        self.visible_index -= 1;
        self.ensure_full(adapter, Direction::Backward);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            visible_index = self.visible_index,
            visible_slot = ?self.visible_slot,
            "window retreated"
        );
    }

    /// Move every visual to the pool and clear the slot bookkeeping.
    pub fn release_all(&mut self) {
        while let Some(slot) = self.slots.pop_front() {
            self.release(slot);
        }
        self.next_load = None;
        self.visible_slot = None;
    }

    /// Rebuild after the dataset changed.
    pub fn on_data_set_changed<A>(&mut self, adapter: &mut A)
    where
        A: Adapter<Visual = V>,
    {
        let old_count = self.count;
        let new_count = adapter.count();
        self.release_all();
        if old_count == 0 && new_count > 0 {
            self.visible_index = 0;
        }
        if new_count <= self.visible_index {
            self.visible_index = new_count.saturating_sub(1);
        }
        self.count = new_count;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_count,
            new_count,
            visible_index = self.visible_index,
            "data set changed"
        );
        self.init_buffer_indexes(self.visible_index);
        self.ensure_full(adapter, Direction::Forward);
    }

    /// Drop everything after the dataset was invalidated. Does not refill.
    pub fn on_data_set_invalidated(&mut self) {
        self.visible_index = 0;
        self.release_all();
        #[cfg(feature = "tracing")]
        tracing::debug!("data set invalidated");
    }

    /// Record a new container width without touching any visual.
    ///
    /// Earlier items keep their old offset until [`Window::repin`].
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Record a new container width. Earlier items are re-pinned off-screen.
    pub fn reposition(&mut self, width: f32) {
        self.width = width;
        self.repin();
    }

    /// Pin earlier items at `-width` if they were last pinned at another
    /// width.
    pub fn repin(&mut self) {
        if self.pinned_width == self.width {
            return;
        }
        let (width, visible) = (self.width, self.visible_index);
        for slot in self.slots.iter_mut().filter(|s| s.index < visible) {
            slot.visual.set_offset_x(-width);
        }
        self.pinned_width = width;
        #[cfg(feature = "tracing")]
        tracing::trace!(width, "earlier items re-pinned");
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn materialize<A>(&mut self, adapter: &mut A, index: usize) -> V
    where
        A: Adapter<Visual = V>,
    {
        let reusable = self.pool.take();
        #[cfg(feature = "tracing")]
        tracing::trace!(index, recycled = reusable.is_some(), "materialize visual");
        let mut visual = adapter.visual_for(index, reusable);
        if index < self.visible_index {
            visual.set_offset_x(-self.width);
            visual.set_scale(self.zoom_in);
        } else if index > self.visible_index {
            visual.set_offset_x(0.0);
            visual.set_scale(self.zoom_out);
        } else {
            visual.set_offset_x(0.0);
            visual.set_scale(self.zoom_in);
        }
        visual
    }

    fn release_tail(&mut self) {
        if let Some(slot) = self.slots.pop_back() {
            self.release(slot);
        }
    }

    fn release_head(&mut self) {
        if let Some(slot) = self.slots.pop_front() {
            self.release(slot);
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn release(&mut self, slot: Slot<V>) {
        let pooled = self.pool.release(slot.visual);
        #[cfg(feature = "tracing")]
        tracing::trace!(index = slot.index, pooled, "release visual");
    }
}
