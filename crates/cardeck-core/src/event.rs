#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The host translates its platform touch/mouse stream into [`PointerEvent`]s
//! and feeds them to the deck. Coordinates are in container-local pixels.
//!
//! # Design Notes
//!
//! - Only the horizontal axis drives the deck; `y` is carried for hosts that
//!   want to do their own hit testing.
//! - `Cancel` is a distinct kind so recognizers can drop fling candidates,
//!   while the deck treats it like a release.

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,

    /// Pointer moved while pressed.
    Move,

    /// Pointer released.
    Up,

    /// The platform took the gesture away (parent intercept, focus loss).
    Cancel,
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in container-local pixels.
    pub x: f32,

    /// Y coordinate in container-local pixels.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    /// Pointer-down at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    /// Pointer-move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Pointer-up at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// Gesture cancelled at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x, y)
    }

    /// Whether this event ends the gesture (`Up` or `Cancel`).
    #[inline]
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
