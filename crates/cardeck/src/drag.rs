#![forbid(unsafe_code)]

//! Drag state machine.
//!
//! Turns a pointer stream into continuous transforms on the window's visuals
//! and, on release, into a [`Settle`] decision for the transition animator.
//!
//! # State Machine
//!
//! ```text
//!            move left (next exists)
//!   Idle ------------------------------> DraggingLeft
//!    |  ^                                  |      ^
//!    |  +------ release / origin ----------+      | move left
//!    |                                            |
//!    +---- move right (previous exists) ---> DraggingRight
//! ```
//!
//! A move past the first or last item stays `Idle` and grows the displayed
//! visual slightly instead (edge resistance).
//!
//! # Invariants
//!
//! 1. At most one drag direction is active; the enum makes both impossible.
//! 2. Displacements are clamped to the container width before use.
//! 3. With a zero width the machine tracks state but leaves visuals alone.

use cardeck_core::semantic_event::SwipeDirection;

use crate::Visual;
use crate::config::DeckConfig;
use crate::window::Window;

/// Which drag, if any, is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Revealing the next item.
    DraggingLeft,
    /// Revealing the previous item.
    DraggingRight,
}

impl DragState {
    /// Direction of the active drag.
    #[must_use]
    pub const fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Idle => None,
            Self::DraggingLeft => Some(SwipeDirection::Left),
            Self::DraggingRight => Some(SwipeDirection::Right),
        }
    }
}

/// What to do after the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Nothing moved.
    None,
    /// Undo an edge-resistance effect.
    Restore,
    /// Finish the drag: the neighbor becomes the displayed item.
    Commit(SwipeDirection),
    /// Snap back to the layout from before the drag.
    Reverse(SwipeDirection),
}

/// Pointer-driven drag tracking.
#[derive(Debug, Default)]
pub struct DragMachine {
    state: DragState,
    origin_x: Option<f32>,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// X recorded at pointer-down, while a gesture is in progress.
    #[inline]
    #[must_use]
    pub fn origin_x(&self) -> Option<f32> {
        self.origin_x
    }

    pub fn on_down(&mut self, x: f32) {
        self.origin_x = Some(x);
    }

    /// Apply the transforms for the pointer now at `x`.
    pub fn on_move<V: Visual>(&mut self, x: f32, window: &mut Window<V>, config: &DeckConfig) {
        let Some(origin) = self.origin_x else {
            return;
        };
        let width = window.width();
        let delta = origin - x;
        if delta > 0.0 {
            if self.state == DragState::DraggingRight {
                reset_right(window, config);
            }
            if window.has_next() {
                self.state = DragState::DraggingLeft;
                if width > 0.0 {
                    drag_left(window, delta.min(width) / width, config);
                }
            } else {
                self.state = DragState::Idle;
                edge_resistance(window, delta, config);
            }
        } else if delta < 0.0 {
            if self.state == DragState::DraggingLeft {
                reset_left(window, config);
            }
            if window.has_previous() {
                self.state = DragState::DraggingRight;
                if width > 0.0 {
                    drag_right(window, (-delta).min(width) / width, config);
                }
            } else {
                self.state = DragState::Idle;
                edge_resistance(window, delta, config);
            }
        } else {
            match self.state {
                DragState::DraggingLeft => reset_left(window, config),
                DragState::DraggingRight => reset_right(window, config),
                DragState::Idle => edge_resistance(window, 0.0, config),
            }
            self.state = DragState::Idle;
        }
    }

    /// Decide how to settle a release at `x`. Always returns to idle.
    pub fn on_release(&mut self, x: f32, width: f32, config: &DeckConfig) -> Settle {
        let state = std::mem::take(&mut self.state);
        let Some(origin) = self.origin_x.take() else {
            return Settle::None;
        };
        let movement = (origin - x).abs();
        match state.direction() {
            None if movement > 0.0 => Settle::Restore,
            None => Settle::None,
            Some(direction) if movement >= width * config.commit_threshold => {
                Settle::Commit(direction)
            }
            Some(direction) => Settle::Reverse(direction),
        }
    }

    /// Forget the gesture in progress.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.origin_x = None;
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

fn drag_left<V: Visual>(window: &mut Window<V>, ratio: f32, config: &DeckConfig) {
    let width = window.width();
    if let Some(v) = window.displayed_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(-ratio * width);
    }
    let scale = config.zoom_out_scale + (config.zoom_in_scale - config.zoom_out_scale) * ratio;
    if let Some(v) = window.next_slot().and_then(|s| window.visual_mut(s)) {
        v.set_scale(scale);
    }
}

fn drag_right<V: Visual>(window: &mut Window<V>, ratio: f32, config: &DeckConfig) {
    let width = window.width();
    if let Some(v) = window.previous_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(-width + ratio * width);
    }
    let scale = config.zoom_in_scale - (config.zoom_in_scale - config.zoom_out_scale) * ratio;
    if let Some(v) = window.displayed_slot().and_then(|s| window.visual_mut(s)) {
        v.set_scale(scale);
    }
}

fn reset_left<V: Visual>(window: &mut Window<V>, config: &DeckConfig) {
    if let Some(v) = window.displayed_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(0.0);
    }
    if let Some(v) = window.next_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(0.0);
        v.set_scale(config.zoom_out_scale);
    }
}

fn reset_right<V: Visual>(window: &mut Window<V>, config: &DeckConfig) {
    if let Some(v) = window.displayed_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(0.0);
        v.set_scale(config.zoom_in_scale);
    }
    let width = window.width();
    if let Some(v) = window.previous_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(-width);
    }
}

/// Elastic over-scale for a drag past the first or last item.
fn edge_resistance<V: Visual>(window: &mut Window<V>, delta: f32, config: &DeckConfig) {
    let width = window.width();
    if width <= 0.0 {
        return;
    }
    let delta = delta.abs().min(width);
    let scale = config.zoom_in_scale + delta / (config.edge_resistance * width);
    #[cfg(feature = "tracing")]
    tracing::trace!(delta, scale, "edge resistance");
    if let Some(v) = window.displayed_slot().and_then(|s| window.visual_mut(s)) {
        v.set_offset_x(0.0);
        v.set_scale(scale);
    }
}
