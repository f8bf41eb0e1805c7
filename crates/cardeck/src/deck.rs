#![forbid(unsafe_code)]

//! The host-facing card deck.
//!
//! [`CardDeck`] ties the window, the drag state machine, fling recognition
//! and the transition animator together behind the entry points a host view
//! system calls: adapter and selection setters, measure and layout passes,
//! pointer events and frame ticks.
//!
//! # Lifecycle
//!
//! ```text
//! set_adapter ──> on_measure/on_layout ──> on_touch ... ──> tick ... ──> drain_events
//!                        ^                                   │
//!                        └──────── window refilled ──────────┘
//! ```
//!
//! # Invariants
//!
//! 1. While a transition runs every pointer event is ignored; at most one
//!    transition is active.
//! 2. The window is only restructured by a finished (or cancelled)
//!    transition, a selection, or a data-set notification.
//! 3. Data-set notifications are applied at the start of every entry point,
//!    before the event being handled. A transition interrupted by one ends
//!    without stepping the window.
//!
//! # Failure Modes
//!
//! - Without an adapter, [`set_selection`](CardDeck::set_selection) returns
//!   [`DeckError::MissingAdapter`] and other entry points do nothing.
//! - [`selected_visual`](CardDeck::selected_visual) always fails: the deck
//!   has no single selected visual, only a window around one.

use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use cardeck_core::event::{PointerEvent, PointerEventKind};
use cardeck_core::geometry::{MeasureSpec, Rect};
use cardeck_core::gesture::{FlingRecognizer, GestureClassifier};
use cardeck_core::semantic_event::SwipeDirection;
use web_time::Instant;

use crate::Visual;
use crate::adapter::{Adapter, DataSetEvent, DataSetObserver, ObserverId};
use crate::config::DeckConfig;
use crate::drag::{DragMachine, DragState, Settle};
use crate::error::DeckError;
use crate::transition::{Outcome, TransitionAnimator, TransitionKind};
use crate::window::Window;

/// Notifications queued for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    /// The front-facing item changed. `None` when the deck became empty.
    SelectionChanged { index: Option<usize> },
    TransitionStarted(TransitionKind),
    TransitionFinished(TransitionKind),
    /// The window was rebuilt after the dataset changed.
    DataSetChanged { count: usize },
    /// The window was emptied after the dataset was invalidated.
    DataSetInvalidated,
}

struct Subscription {
    id: ObserverId,
    rx: mpsc::Receiver<DataSetEvent>,
}

/// A swipeable deck over an [`Adapter`].
pub struct CardDeck<A: Adapter> {
    config: DeckConfig,
    adapter: Option<A>,
    subscription: Option<Subscription>,
    window: Window<A::Visual>,
    drag: DragMachine,
    animator: TransitionAnimator,
    classifier: Box<dyn GestureClassifier>,
    bounds: Rect,
    measure_specs: Option<(MeasureSpec, MeasureSpec)>,
    reported: Option<usize>,
    events: VecDeque<DeckEvent>,
}

impl<A: Adapter> CardDeck<A> {
    /// Create a deck. Fails if `config` does not validate.
    pub fn new(config: DeckConfig) -> Result<Self, DeckError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: DeckConfig) -> Self {
        Self {
            window: Window::new(
                config.pool_capacity,
                config.zoom_out_scale,
                config.zoom_in_scale,
            ),
            classifier: Box::new(FlingRecognizer::new(config.gesture.clone())),
            config,
            adapter: None,
            subscription: None,
            drag: DragMachine::new(),
            animator: TransitionAnimator::new(),
            bounds: Rect::default(),
            measure_specs: None,
            reported: None,
            events: VecDeque::new(),
        }
    }

    /// Replace the fling classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn GestureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    // -----------------------------------------------------------------------
    // Adapter and selection
    // -----------------------------------------------------------------------

    /// Attach `adapter` and show its first item.
    pub fn set_adapter(&mut self, adapter: A) -> Option<A> {
        self.set_adapter_at(adapter, 0)
    }

    /// Attach `adapter` and show `initial_index`.
    ///
    /// The previous adapter, if any, stops receiving this deck's observer
    /// and is returned.
    pub fn set_adapter_at(&mut self, mut adapter: A, initial_index: usize) -> Option<A> {
        if let Some(kind) = self.animator.cancel() {
            self.events.push_back(DeckEvent::TransitionFinished(kind));
        }
        self.drag.reset();
        self.classifier.reset();
        self.window.release_all();

        let mut previous = self.adapter.take();
        if let (Some(old), Some(sub)) = (previous.as_mut(), self.subscription.take()) {
            old.unregister_observer(sub.id);
        }
        let (observer, rx) = DataSetObserver::channel();
        let id = observer.id();
        adapter.register_observer(observer);
        self.subscription = Some(Subscription { id, rx });
        self.adapter = Some(adapter);
        #[cfg(feature = "tracing")]
        tracing::debug!(observer = id.get(), initial_index, "adapter attached");

        self.select(initial_index);
        previous
    }

    #[must_use]
    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Mutable adapter access. Changes must be announced through the
    /// adapter's observers for the deck to notice them.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Rebuild the window around `index`. Out-of-range indices wrap to 0.
    ///
    /// A running transition is cancelled first.
    pub fn set_selection(&mut self, index: usize) -> Result<(), DeckError> {
        if self.adapter.is_none() {
            return Err(DeckError::MissingAdapter);
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("card_deck.set_selection", index).entered();
        self.process_data_set_events();
        self.cancel_active();
        self.drag.reset();
        self.classifier.reset();
        self.select(index);
        Ok(())
    }

    /// Not representable: the deck keeps a window, not one selected visual.
    pub fn selected_visual(&self) -> Result<&A::Visual, DeckError> {
        Err(DeckError::Unsupported {
            operation: "selected_visual",
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Dataset index of the front-facing item.
    #[must_use]
    pub fn visible_index(&self) -> Option<usize> {
        self.window
            .displayed_slot()
            .map(|_| self.window.visible_index())
    }

    #[must_use]
    pub fn visible_slot(&self) -> Option<usize> {
        self.window.displayed_slot()
    }

    /// Materialized dataset indices, ascending.
    #[must_use]
    pub fn window_indices(&self) -> Vec<usize> {
        self.window.indices()
    }

    /// Materialized visuals in draw order: next first, previous last.
    pub fn visuals(&self) -> impl Iterator<Item = &A::Visual> + '_ {
        self.window.slots().map(|s| &s.visual)
    }

    /// Visual rendering `index`, if it is materialized.
    #[must_use]
    pub fn visual_at(&self, index: usize) -> Option<&A::Visual> {
        self.window
            .slots()
            .find(|s| s.index == index)
            .map(|s| &s.visual)
    }

    #[must_use]
    pub fn window(&self) -> &Window<A::Visual> {
        &self.window
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    #[inline]
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    // -----------------------------------------------------------------------
    // Measure and layout
    // -----------------------------------------------------------------------

    /// Measure every materialized visual against the container's specs.
    pub fn on_measure(&mut self, width: MeasureSpec, height: MeasureSpec) {
        self.process_data_set_events();
        self.measure_specs = Some((width, height));
        for slot in self.window.slots_mut() {
            slot.visual.measure(width, height);
        }
    }

    /// Lay every materialized visual out to fill `bounds`.
    pub fn on_layout(&mut self, bounds: Rect) {
        self.process_data_set_events();
        self.bounds = bounds;
        self.window.set_width(bounds.width);
        self.layout_visuals();
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Pointer event offered before children see it. Returns whether the
    /// deck claims the gesture.
    pub fn on_intercept_touch(&mut self, event: &PointerEvent, now: Instant) -> bool {
        self.handle_pointer(event, now, false)
    }

    /// Pointer event delivered to the deck. Returns whether it was consumed.
    pub fn on_touch(&mut self, event: &PointerEvent, now: Instant) -> bool {
        self.handle_pointer(event, now, true)
    }

    fn handle_pointer(&mut self, event: &PointerEvent, now: Instant, on_touch: bool) -> bool {
        self.process_data_set_events();
        if self.animator.is_active() || self.adapter.is_none() {
            return on_touch;
        }
        if let Some(fling) = self.classifier.on_pointer(event, now) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                direction = ?fling.direction,
                velocity = fling.velocity,
                distance = fling.distance,
                "fling"
            );
            if self.commit(fling.direction) {
                return true;
            }
        }
        match event.kind {
            PointerEventKind::Down => {
                self.drag.on_down(event.x);
                on_touch
            }
            PointerEventKind::Move => {
                self.drag.on_move(event.x, &mut self.window, &self.config);
                true
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let settle = self
                    .drag
                    .on_release(event.x, self.window.width(), &self.config);
                match settle {
                    Settle::None => self.layout_visuals(),
                    Settle::Restore => {
                        self.start_transition(TransitionKind::Restore);
                    }
                    Settle::Commit(direction) => {
                        self.start_transition(TransitionKind::commit(direction));
                    }
                    Settle::Reverse(direction) => {
                        self.start_transition(TransitionKind::revert(direction));
                    }
                }
                on_touch
            }
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Animate to the next item. Returns `false` while animating or at the
    /// last item.
    pub fn commit_left(&mut self) -> bool {
        self.process_data_set_events();
        self.commit(SwipeDirection::Left)
    }

    /// Animate to the previous item. Returns `false` while animating or at
    /// the first item.
    pub fn commit_right(&mut self) -> bool {
        self.process_data_set_events();
        self.commit(SwipeDirection::Right)
    }

    /// Advance the running transition by `dt`. Returns whether one is still
    /// running afterwards.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.process_data_set_events();
        if let Some(kind) = self.animator.tick(dt, &mut self.window) {
            self.finish_transition(kind);
        }
        self.animator.is_active()
    }

    /// Stop the running transition where it is and apply its outcome.
    /// Returns whether one was running.
    pub fn cancel_transition(&mut self) -> bool {
        self.process_data_set_events();
        self.cancel_active()
    }

    fn cancel_active(&mut self) -> bool {
        match self.animator.cancel() {
            Some(kind) => {
                self.finish_transition(kind);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, direction: SwipeDirection) -> bool {
        if self.animator.is_active() {
            return false;
        }
        let has_neighbor = match direction {
            SwipeDirection::Left => self.window.has_next(),
            SwipeDirection::Right => self.window.has_previous(),
        };
        if !has_neighbor {
            return false;
        }
        self.drag.reset();
        self.classifier.reset();
        self.start_transition(TransitionKind::commit(direction))
    }

    fn start_transition(&mut self, kind: TransitionKind) -> bool {
        let started = self.animator.start(kind, &self.window, &self.config);
        if started {
            self.events.push_back(DeckEvent::TransitionStarted(kind));
        }
        started
    }

    fn finish_transition(&mut self, kind: TransitionKind) {
        if let Some(adapter) = self.adapter.as_mut() {
            match kind.outcome() {
                Outcome::Advance => self.window.advance(adapter),
                Outcome::Retreat => self.window.retreat(adapter),
                Outcome::Stay => {}
            }
        }
        self.drag.reset();
        self.events.push_back(DeckEvent::TransitionFinished(kind));
        self.layout_visuals();
        self.report_selection();
    }

    // -----------------------------------------------------------------------
    // Data set notifications
    // -----------------------------------------------------------------------

    /// Apply pending data-set notifications. Returns how many were applied.
    ///
    /// Entry points call this themselves; hosts only need it to react to a
    /// notification between events.
    pub fn process_data_set_events(&mut self) -> usize {
        let pending: Vec<DataSetEvent> = match &self.subscription {
            Some(sub) => sub.rx.try_iter().collect(),
            None => return 0,
        };
        if pending.is_empty() {
            return 0;
        }
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("card_deck.data_set", pending = pending.len()).entered();
        // The window is rebuilt from the new data, so a cancelled transition
        // does not step it.
        if let Some(kind) = self.animator.cancel() {
            self.events.push_back(DeckEvent::TransitionFinished(kind));
        }
        self.drag.reset();
        self.classifier.reset();
        for event in &pending {
            let Some(adapter) = self.adapter.as_mut() else {
                break;
            };
            match event {
                DataSetEvent::Changed => {
                    self.window.on_data_set_changed(adapter);
                    self.events.push_back(DeckEvent::DataSetChanged {
                        count: self.window.count(),
                    });
                }
                DataSetEvent::Invalidated => {
                    self.window.on_data_set_invalidated();
                    self.events.push_back(DeckEvent::DataSetInvalidated);
                }
            }
        }
        self.layout_visuals();
        self.report_selection();
        pending.len()
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = DeckEvent> + '_ {
        self.events.drain(..)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn select(&mut self, index: usize) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        self.window.select(adapter, index);
        #[cfg(feature = "tracing")]
        tracing::info!(
            requested = index,
            visible_index = ?self.visible_index(),
            window = ?self.window.indices(),
            "selection set"
        );
        self.layout_visuals();
        self.report_selection();
    }

    /// Re-measure and lay out the window. Earlier items are re-pinned to
    /// the current width once no gesture or transition holds them.
    fn layout_visuals(&mut self) {
        if !self.animator.is_active() && self.drag.state() == DragState::Idle {
            self.window.repin();
        }
        let specs = self.measure_specs;
        let local = self.bounds.local();
        for slot in self.window.slots_mut() {
            if let Some((width, height)) = specs {
                slot.visual.measure(width, height);
            }
            if !local.is_empty() {
                slot.visual.layout(local);
            }
        }
    }

    fn report_selection(&mut self) {
        let current = self.visible_index();
        if current != self.reported {
            self.reported = current;
            self.events
                .push_back(DeckEvent::SelectionChanged { index: current });
        }
    }
}

impl<A: Adapter> Default for CardDeck<A> {
    fn default() -> Self {
        Self::with_config(DeckConfig::default())
    }
}

impl<A: Adapter> fmt::Debug for CardDeck<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDeck")
            .field("has_adapter", &self.adapter.is_some())
            .field("visible_index", &self.visible_index())
            .field("window", &self.window.indices())
            .field("drag", &self.drag.state())
            .field("transition", &self.animator.kind())
            .field("bounds", &self.bounds)
            .finish()
    }
}
