#![forbid(unsafe_code)]

//! Fling recognition: classifies a pointer stream's release as a fling.
//!
//! [`FlingRecognizer`] is the default [`GestureClassifier`]. It keeps a short
//! history of pointer samples and, on pointer-up, estimates the horizontal
//! release velocity over the trailing `velocity_window`.
//!
//! # State Machine
//!
//! ```text
//! Idle --Down--> Tracking --Move--> Tracking --Up--> Idle (maybe Fling)
//!                   |                              ^
//!                   +-----------Cancel-------------+
//! ```
//!
//! # Invariants
//!
//! 1. A fling is only reported on `Up`, never on `Cancel`.
//! 2. A release that travelled less than `touch_slop` from the down position
//!    is a tap, never a fling.
//! 3. Reported velocity is clamped to `max_fling_velocity`.
//! 4. After `reset()` (or any `Up`/`Cancel`) the recognizer is idle.
//!
//! # Failure Modes
//!
//! - `Move`/`Up` without a prior `Down` are ignored (no tracking state).
//! - Samples with identical timestamps yield zero velocity rather than a
//!   division by zero.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind};
use crate::semantic_event::Fling;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for fling recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Distance (px) the pointer must travel before a release can be a fling (default: 8.0).
    pub touch_slop: f32,
    /// Minimum horizontal release velocity (px/sec) for a fling (default: 50.0).
    pub min_fling_velocity: f32,
    /// Upper bound applied to the reported velocity (px/sec, default: 8000.0).
    pub max_fling_velocity: f32,
    /// Trailing window of samples used for the velocity estimate (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Classifies a pointer stream into flings.
///
/// Hosts with a native fling detector can implement this over it; the
/// default implementation is [`FlingRecognizer`].
pub trait GestureClassifier: std::fmt::Debug {
    /// Feed one pointer event. Returns a fling when this event completed one.
    fn on_pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Fling>;

    /// Drop any in-progress tracking state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// FlingRecognizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    time: Instant,
}

/// Velocity-based fling recognizer.
#[derive(Debug, Clone)]
pub struct FlingRecognizer {
    config: GestureConfig,
    down: Option<Sample>,
    samples: VecDeque<Sample>,
    beyond_slop: bool,
}

impl FlingRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            down: None,
            samples: VecDeque::with_capacity(16),
            beyond_slop: false,
        }
    }

    /// Whether a pointer is currently being tracked.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.down.is_some()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Horizontal velocity (px/sec) over the trailing window, signed.
    fn velocity(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = last.time.saturating_duration_since(first.time).as_secs_f32();
        if dt <= 0.0 {
            return 0.0;
        }
        let v = (last.x - first.x) / dt;
        v.clamp(-self.config.max_fling_velocity, self.config.max_fling_velocity)
    }

    fn push_sample(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while let Some(front) = self.samples.front() {
            if sample.time.saturating_duration_since(front.time) > self.config.velocity_window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for FlingRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureClassifier for FlingRecognizer {
    fn on_pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Fling> {
        let sample = Sample { x: event.x, time: now };
        match event.kind {
            PointerEventKind::Down => {
                self.samples.clear();
                self.down = Some(sample);
                self.beyond_slop = false;
                self.push_sample(sample);
                None
            }
            PointerEventKind::Move => {
                let down = self.down?;
                if (down.x - event.x).abs() >= self.config.touch_slop {
                    self.beyond_slop = true;
                }
                self.push_sample(sample);
                None
            }
            PointerEventKind::Up => {
                let down = self.down?;
                if (down.x - event.x).abs() >= self.config.touch_slop {
                    self.beyond_slop = true;
                }
                self.push_sample(sample);
                let velocity = self.velocity();
                let beyond_slop = self.beyond_slop;
                self.reset();

                if !beyond_slop || velocity.abs() < self.config.min_fling_velocity {
                    return None;
                }
                let fling = Fling::from_positions(down.x, event.x, velocity);
                #[cfg(feature = "tracing")]
                if let Some(fling) = &fling {
                    tracing::trace!(
                        direction = ?fling.direction,
                        velocity = fling.velocity,
                        distance = fling.distance,
                        "fling recognised"
                    );
                }
                fling
            }
            PointerEventKind::Cancel => {
                self.reset();
                None
            }
        }
    }

    fn reset(&mut self) {
        self.down = None;
        self.samples.clear();
        self.beyond_slop = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
