#![forbid(unsafe_code)]

//! Time-based animation primitives.
//!
//! Everything here is driven by explicit `tick(dt)` calls from the host's
//! frame loop; nothing reads a clock. That keeps transitions deterministic
//! under test.
//!
//! - [`Animation`]: the common tick/complete/value contract.
//! - [`Tween`]: a single eased interpolation between two `f32` values.
//! - [`AnimationGroup`]: a keyed set of tweens played together with one shared
//!   completion.
//!
//! # Invariants
//!
//! 1. `value()` is always in [0.0, 1.0] (normalized progress after easing may
//!    overshoot only if the easing function does).
//! 2. `is_complete()` never reverts to `false` without `reset()`.
//! 3. Zero durations are clamped to 1ns to avoid division by zero.

pub mod group;

use std::time::Duration;

pub use group::{AnimationGroup, PlaybackState};

/// A time-driven animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current progress value, normally in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time ticked past the end, if complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// An easing curve mapping linear progress in [0, 1] to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// No easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic acceleration from zero velocity.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic deceleration to zero velocity.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cosine accelerate/decelerate curve.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (t * std::f32::consts::PI).cos()) / 2.0
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// An eased interpolation from `from` to `to` over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a linear tween.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    #[inline]
    #[must_use]
    pub fn start(&self) -> f32 {
        self.from
    }

    /// End value.
    #[inline]
    #[must_use]
    pub fn end(&self) -> f32 {
        self.to
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Interpolated value at the current time.
    #[must_use]
    pub fn current(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.value()
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing)((t as f32).clamp(0.0, 1.0))
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
