#![forbid(unsafe_code)]

//! In-memory [`Visual`] and [`Adapter`] implementations.
//!
//! Used by the demo, tests, benches and fuzzing, and as a reference for hosts
//! wiring the deck to a real view system.

use cardeck_core::geometry::{MeasureSpec, Rect};

use crate::adapter::{Adapter, DataSetObservable, DataSetObserver, ObserverId};
use crate::{Transform, Visual};

// ---------------------------------------------------------------------------
// HeadlessVisual
// ---------------------------------------------------------------------------

/// A visual that records what the deck did to it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    id: u64,
    bound_index: Option<usize>,
    transform: Transform,
    measured: (f32, f32),
    bounds: Rect,
    binds: u32,
}

impl HeadlessVisual {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            bound_index: None,
            transform: Transform::IDENTITY,
            measured: (0.0, 0.0),
            bounds: Rect::default(),
            binds: 0,
        }
    }

    /// Identity assigned at construction. Survives recycling.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Dataset index this visual currently renders.
    #[inline]
    #[must_use]
    pub fn bound_index(&self) -> Option<usize> {
        self.bound_index
    }

    /// How many times it has been bound to an index.
    #[inline]
    #[must_use]
    pub fn binds(&self) -> u32 {
        self.binds
    }

    #[inline]
    #[must_use]
    pub fn measured_size(&self) -> (f32, f32) {
        self.measured
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn bind(&mut self, index: usize) {
        self.bound_index = Some(index);
        self.binds += 1;
    }
}

impl Visual for HeadlessVisual {
    fn offset_x(&self) -> f32 {
        self.transform.offset_x
    }

    fn set_offset_x(&mut self, offset_x: f32) {
        self.transform.offset_x = offset_x;
    }

    fn scale_x(&self) -> f32 {
        self.transform.scale_x
    }

    fn set_scale_x(&mut self, scale: f32) {
        self.transform.scale_x = scale;
    }

    fn scale_y(&self) -> f32 {
        self.transform.scale_y
    }

    fn set_scale_y(&mut self, scale: f32) {
        self.transform.scale_y = scale;
    }

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) {
        self.measured = (width.resolve(0.0), height.resolve(0.0));
    }

    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

// ---------------------------------------------------------------------------
// VecAdapter
// ---------------------------------------------------------------------------

/// Adapter over a `Vec`, with change notification and reuse counters.
#[derive(Debug)]
pub struct VecAdapter<T> {
    items: Vec<T>,
    observable: DataSetObservable,
    next_id: u64,
    created: usize,
    recycled: usize,
}

impl<T> VecAdapter<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            observable: DataSetObservable::new(),
            next_id: 0,
            created: 0,
            recycled: 0,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Replace every item and notify observers.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.observable.notify_changed();
    }

    /// Append an item and notify observers.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.observable.notify_changed();
    }

    /// Shorten to `len` items and notify observers.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
        self.observable.notify_changed();
    }

    pub fn notify_changed(&mut self) {
        self.observable.notify_changed();
    }

    pub fn notify_invalidated(&mut self) {
        self.observable.notify_invalidated();
    }

    /// Visuals constructed from scratch.
    #[inline]
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Visuals rebound from the deck's pool.
    #[inline]
    #[must_use]
    pub fn recycled(&self) -> usize {
        self.recycled
    }

    #[inline]
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observable.len()
    }
}

impl<T> Adapter for VecAdapter<T> {
    type Visual = HeadlessVisual;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn visual_for(&mut self, index: usize, reusable: Option<HeadlessVisual>) -> HeadlessVisual {
        let mut visual = match reusable {
            Some(visual) => {
                self.recycled += 1;
                visual
            }
            None => {
                self.created += 1;
                self.next_id += 1;
                HeadlessVisual::new(self.next_id)
            }
        };
        visual.bind(index);
        visual
    }

    fn register_observer(&mut self, observer: DataSetObserver) {
        self.observable.register(observer);
    }

    fn unregister_observer(&mut self, id: ObserverId) {
        self.observable.unregister(id);
    }
}
