#![forbid(unsafe_code)]

//! Bounded holding area for visuals released from the window.

use std::collections::VecDeque;

/// FIFO of detached visuals awaiting reuse.
///
/// A release into a full pool drops the visual.
#[derive(Debug)]
pub struct ReleasedPool<V> {
    items: VecDeque<V>,
    capacity: usize,
}

impl<V> ReleasedPool<V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Hold `visual` for reuse. Returns `false` if it was dropped instead.
    pub fn release(&mut self, visual: V) -> bool {
        if self.items.len() < self.capacity {
            self.items.push_back(visual);
            true
        } else {
            false
        }
    }

    /// Oldest pooled visual, if any.
    pub fn take(&mut self) -> Option<V> {
        self.items.pop_front()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change capacity, dropping the newest visuals beyond it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.items.truncate(capacity);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
