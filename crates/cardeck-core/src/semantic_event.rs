#![forbid(unsafe_code)]

//! High-level gesture events derived from raw pointer input.
//!
//! A [`GestureClassifier`](crate::gesture::GestureClassifier) turns a
//! [`PointerEvent`](crate::event::PointerEvent) stream into these.
//!
//! ## Invariants
//! 1. `Fling::velocity` is always non-negative; direction carries the sign.
//! 2. `Fling::distance` is always non-negative.

// ---------------------------------------------------------------------------
// SwipeDirection
// ---------------------------------------------------------------------------

/// Horizontal direction of a swipe, named after the way the content moves.
///
/// `Left` means the pointer travelled toward smaller X (revealing the next
/// item); `Right` means toward larger X (revealing the previous item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Classify a displacement measured as `origin_x - current_x`.
    ///
    /// Returns `None` for a zero displacement.
    #[must_use]
    pub fn from_displacement(displacement: f32) -> Option<Self> {
        if displacement > 0.0 {
            Some(Self::Left)
        } else if displacement < 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Fling
// ---------------------------------------------------------------------------

/// A recognised fling: a release whose horizontal velocity exceeded the
/// configured minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    /// Direction of travel.
    pub direction: SwipeDirection,
    /// Distance between pointer-down and release, in pixels (always >= 0.0).
    pub distance: f32,
    /// Horizontal release velocity in pixels per second (always >= 0.0).
    pub velocity: f32,
}

impl Fling {
    /// Build a fling from the down/up X positions and a signed velocity.
    ///
    /// Returns `None` when the pointer ended where it started.
    #[must_use]
    pub fn from_positions(start_x: f32, end_x: f32, velocity_x: f32) -> Option<Self> {
        let displacement = start_x - end_x;
        SwipeDirection::from_displacement(displacement).map(|direction| Self {
            direction,
            distance: displacement.abs(),
            velocity: velocity_x.abs(),
        })
    }
}
