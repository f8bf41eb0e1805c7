#![forbid(unsafe_code)]

//! Dataset adapter capability and change notification.
//!
//! The adapter owns the dataset. The deck only asks it for a count and for a
//! visual bound to an index. Change notifications travel over an
//! `mpsc` channel: the deck hands the adapter a [`DataSetObserver`] (the
//! sending half) and drains the receiving half at each of its entry points.
//!
//! # Invariants
//!
//! - An [`ObserverId`] is unique for the life of the process.
//! - [`DataSetObservable::notify_changed`] never blocks and never fails; an
//!   observer whose receiver is gone is pruned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use crate::Visual;

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A change to the adapter's dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSetEvent {
    /// Items were added, removed or changed. The count may differ.
    Changed,
    /// The data is no longer valid. Visuals must be dropped until reselected.
    Invalidated,
}

/// Identity of a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Sending half of a deck's data-set subscription.
#[derive(Debug, Clone)]
pub struct DataSetObserver {
    id: ObserverId,
    tx: mpsc::Sender<DataSetEvent>,
}

impl DataSetObserver {
    /// Create an observer and the receiver the subscriber drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<DataSetEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                id: ObserverId::next(),
                tx,
            },
            rx,
        )
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Deliver an event. Returns `false` when the subscriber is gone.
    pub fn notify(&self, event: DataSetEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Observer registry an adapter can embed.
#[derive(Debug, Default)]
pub struct DataSetObservable {
    observers: Vec<DataSetObserver>,
}

impl DataSetObservable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. Registering the same id twice replaces the first.
    pub fn register(&mut self, observer: DataSetObserver) {
        self.observers.retain(|o| o.id != observer.id);
        self.observers.push(observer);
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_changed(&mut self) {
        self.notify(DataSetEvent::Changed);
    }

    pub fn notify_invalidated(&mut self) {
        self.notify(DataSetEvent::Invalidated);
    }

    fn notify(&mut self, event: DataSetEvent) {
        self.observers.retain(|o| o.notify(event));
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Supplies the dataset behind a deck.
pub trait Adapter {
    /// Visual type produced for items.
    type Visual: Visual;

    /// Number of items.
    fn count(&self) -> usize;

    /// Produce a visual for `index`.
    ///
    /// When `reusable` is `Some`, the adapter may rebind and return it instead
    /// of constructing a new one. The returned visual must render `index`.
    fn visual_for(&mut self, index: usize, reusable: Option<Self::Visual>) -> Self::Visual;

    /// Start delivering change notifications to `observer`.
    fn register_observer(&mut self, observer: DataSetObserver);

    /// Stop delivering to the observer with `id`.
    fn unregister_observer(&mut self, id: ObserverId);
}
