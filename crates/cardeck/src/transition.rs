#![forbid(unsafe_code)]

//! Settle transitions.
//!
//! A transition is an [`AnimationGroup`] of property tweens keyed by window
//! slot. Tweens start from whatever the visuals show when the transition
//! begins, so a settle picks up exactly where the drag left off.
//!
//! | Kind          | Tweens                                                       |
//! |---------------|--------------------------------------------------------------|
//! | `Restore`     | displayed: scale to rest, offset to 0                        |
//! | `CommitLeft`  | displayed: offset to -width; next: scale to rest, offset 0   |
//! | `CommitRight` | previous: offset to 0; displayed: scale to zoomed-out        |
//! | `RevertLeft`  | displayed: offset to 0; next: scale to zoomed-out            |
//! | `RevertRight` | previous: offset to -width; displayed: scale to rest, offset 0 |
//!
//! # Invariants
//!
//! - At most one transition is active. Starting another is a no-op.
//! - The window is not restructured while a transition is active, so slot
//!   keys stay valid until it ends.

use std::time::Duration;

use cardeck_core::animation::{Animation, AnimationGroup, Tween};
use cardeck_core::semantic_event::SwipeDirection;

use crate::Visual;
use crate::config::DeckConfig;
use crate::window::Window;

/// The settle animations a deck can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Restore,
    CommitLeft,
    CommitRight,
    RevertLeft,
    RevertRight,
}

/// Effect of a finished transition on the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stay,
    Advance,
    Retreat,
}

impl TransitionKind {
    #[must_use]
    pub const fn commit(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::CommitLeft,
            SwipeDirection::Right => Self::CommitRight,
        }
    }

    #[must_use]
    pub const fn revert(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::RevertLeft,
            SwipeDirection::Right => Self::RevertRight,
        }
    }

    #[must_use]
    pub const fn outcome(self) -> Outcome {
        match self {
            Self::CommitLeft => Outcome::Advance,
            Self::CommitRight => Outcome::Retreat,
            Self::Restore | Self::RevertLeft | Self::RevertRight => Outcome::Stay,
        }
    }
}

/// Animated visual property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    OffsetX,
    ScaleX,
    ScaleY,
}

type TrackKey = (usize, Property);

#[derive(Debug)]
struct Transition {
    kind: TransitionKind,
    group: AnimationGroup<TrackKey>,
}

/// Runs one settle transition at a time.
#[derive(Debug)]
pub struct TransitionAnimator {
    active: Option<Transition>,
}

impl Default for TransitionAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self { active: None }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Kind of the running transition.
    #[must_use]
    pub fn kind(&self) -> Option<TransitionKind> {
        self.active.as_ref().map(|t| t.kind)
    }

    /// Start a transition.
    ///
    /// Returns `false` when one is already running or a visual the kind
    /// needs is not in the window.
    pub fn start<V: Visual>(
        &mut self,
        kind: TransitionKind,
        window: &Window<V>,
        config: &DeckConfig,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(mut group) = build(kind, window, config) else {
            return false;
        };
        group.start();
        #[cfg(feature = "tracing")]
        tracing::debug!(?kind, tracks = group.len(), "transition started");
        self.active = Some(Transition { kind, group });
        true
    }

    /// Advance the running transition and write its values to the visuals.
    ///
    /// Returns the kind once it has finished.
    pub fn tick<V: Visual>(&mut self, dt: Duration, window: &mut Window<V>) -> Option<TransitionKind> {
        let transition = self.active.as_mut()?;
        transition.group.tick(dt);
        for (&(slot, property), value) in transition.group.values() {
            if let Some(visual) = window.visual_mut(slot) {
                apply(visual, property, value);
            }
        }
        if !transition.group.is_complete() {
            return None;
        }
        let kind = transition.kind;
        self.active = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(?kind, "transition finished");
        Some(kind)
    }

    /// Stop the running transition where it is. Returns its kind.
    pub fn cancel(&mut self) -> Option<TransitionKind> {
        let mut transition = self.active.take()?;
        transition.group.cancel();
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?transition.kind, "transition cancelled");
        Some(transition.kind)
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

fn build<V: Visual>(
    kind: TransitionKind,
    window: &Window<V>,
    config: &DeckConfig,
) -> Option<AnimationGroup<TrackKey>> {
    let mut tracks = Tracks {
        window,
        config,
        group: AnimationGroup::new(),
    };
    let displayed = window.displayed_slot()?;
    let width = window.width();
    match kind {
        TransitionKind::Restore => {
            tracks.scale(displayed, config.zoom_in_scale)?;
            tracks.offset(displayed, 0.0)?;
        }
        TransitionKind::CommitLeft => {
            let next = window.next_slot()?;
            tracks.offset(displayed, -width)?;
            tracks.scale(next, config.zoom_in_scale)?;
            tracks.offset(next, 0.0)?;
        }
        TransitionKind::CommitRight => {
            let previous = window.previous_slot()?;
            tracks.offset(previous, 0.0)?;
            tracks.scale(displayed, config.zoom_out_scale)?;
        }
        TransitionKind::RevertLeft => {
            let next = window.next_slot()?;
            tracks.offset(displayed, 0.0)?;
            tracks.scale(next, config.zoom_out_scale)?;
        }
        TransitionKind::RevertRight => {
            let previous = window.previous_slot()?;
            tracks.offset(previous, -width)?;
            tracks.scale(displayed, config.zoom_in_scale)?;
            tracks.offset(displayed, 0.0)?;
        }
    }
    Some(tracks.group)
}

struct Tracks<'a, V> {
    window: &'a Window<V>,
    config: &'a DeckConfig,
    group: AnimationGroup<TrackKey>,
}

impl<V: Visual> Tracks<'_, V> {
    fn offset(&mut self, slot: usize, to: f32) -> Option<()> {
        let from = self.window.slot(slot)?.visual.offset_x();
        self.push((slot, Property::OffsetX), from, to);
        Some(())
    }

    fn scale(&mut self, slot: usize, to: f32) -> Option<()> {
        let visual = &self.window.slot(slot)?.visual;
        let (sx, sy) = (visual.scale_x(), visual.scale_y());
        self.push((slot, Property::ScaleX), sx, to);
        self.push((slot, Property::ScaleY), sy, to);
        Some(())
    }

    fn push(&mut self, key: TrackKey, from: f32, to: f32) {
        let tween = Tween::new(from, to, self.config.transition_duration)
            .easing(self.config.easing());
        self.group.add_tween(key, tween);
    }
}

fn apply<V: Visual>(visual: &mut V, property: Property, value: f32) {
    match property {
        Property::OffsetX => visual.set_offset_x(value),
        Property::ScaleX => visual.set_scale_x(value),
        Property::ScaleY => visual.set_scale_y(value),
    }
}
