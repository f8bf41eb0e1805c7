#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds.
///
/// Uses container pixel coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The same size, moved to the origin.
    #[inline]
    pub const fn local(&self) -> Rect {
        Self::from_size(self.width, self.height)
    }
}

/// A size constraint handed down by the host's measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasureSpec {
    /// The child must be exactly this size.
    Exactly(f32),
    /// The child may be at most this size.
    AtMost(f32),
    /// No constraint.
    #[default]
    Unspecified,
}

impl MeasureSpec {
    /// Resolve a desired size against this constraint.
    #[must_use]
    pub fn resolve(self, desired: f32) -> f32 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(max) => desired.min(max),
            Self::Unspecified => desired,
        }
    }
}
