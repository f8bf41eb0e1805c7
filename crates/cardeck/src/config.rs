#![forbid(unsafe_code)]

//! Deck configuration.
//!
//! Every field defaults to the value the deck has always used, so
//! `DeckConfig::default()` reproduces the stock behavior. With the `serde`
//! feature the config can be loaded from JSON:
//!
//! ```json
//! { "pool_capacity": 2, "commit_threshold": 0.4 }
//! ```

use std::time::Duration;

use cardeck_core::animation::{EasingFn, ease_in_out};
use cardeck_core::gesture::GestureConfig;

use crate::error::DeckError;

/// Tunables for a [`CardDeck`](crate::deck::CardDeck).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckConfig {
    /// How many released visuals are kept for reuse (default: 1).
    pub pool_capacity: usize,
    /// Scale of a card waiting behind the displayed one (default: 0.8).
    pub zoom_out_scale: f32,
    /// Scale of the displayed card (default: 1.0).
    pub zoom_in_scale: f32,
    /// Fraction of the container width a drag must travel to commit (default: 0.5).
    pub commit_threshold: f32,
    /// Divisor for the elastic over-scale shown past the first/last item (default: 10.0).
    pub edge_resistance: f32,
    /// Length of every settle transition (default: 300ms).
    pub transition_duration: Duration,
    /// Fling recognition thresholds.
    pub gesture: GestureConfig,
    #[cfg_attr(feature = "serde", serde(skip, default = "default_easing"))]
    easing: EasingFn,
}

fn default_easing() -> EasingFn {
    ease_in_out
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 1,
            zoom_out_scale: 0.8,
            zoom_in_scale: 1.0,
            commit_threshold: 0.5,
            edge_resistance: 10.0,
            transition_duration: Duration::from_millis(300),
            gesture: GestureConfig::default(),
            easing: default_easing(),
        }
    }
}

impl DeckConfig {
    /// Set the reuse pool capacity.
    #[must_use]
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Set the zoomed-out and zoomed-in scales.
    #[must_use]
    pub fn with_scales(mut self, zoom_out: f32, zoom_in: f32) -> Self {
        self.zoom_out_scale = zoom_out;
        self.zoom_in_scale = zoom_in;
        self
    }

    /// Set the drag commit threshold (fraction of width).
    #[must_use]
    pub fn with_commit_threshold(mut self, threshold: f32) -> Self {
        self.commit_threshold = threshold;
        self
    }

    /// Set the settle transition duration.
    #[must_use]
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Set the settle transition easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set the fling recognition thresholds.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Easing curve used by settle transitions.
    #[inline]
    #[must_use]
    pub fn easing(&self) -> EasingFn {
        self.easing
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), DeckError> {
        if !(self.zoom_in_scale > 0.0 && self.zoom_in_scale.is_finite()) {
            return Err(invalid("zoom_in_scale", "must be positive and finite"));
        }
        if !(self.zoom_out_scale > 0.0 && self.zoom_out_scale <= self.zoom_in_scale) {
            return Err(invalid("zoom_out_scale", "must be in (0, zoom_in_scale]"));
        }
        if !(self.commit_threshold > 0.0 && self.commit_threshold <= 1.0) {
            return Err(invalid("commit_threshold", "must be in (0, 1]"));
        }
        if !(self.edge_resistance >= 1.0 && self.edge_resistance.is_finite()) {
            return Err(invalid("edge_resistance", "must be finite and >= 1"));
        }
        if self.gesture.min_fling_velocity < 0.0 {
            return Err(invalid("gesture.min_fling_velocity", "must be >= 0"));
        }
        if self.gesture.max_fling_velocity < self.gesture.min_fling_velocity {
            return Err(invalid(
                "gesture.max_fling_velocity",
                "must be >= min_fling_velocity",
            ));
        }
        if self.gesture.touch_slop < 0.0 {
            return Err(invalid("gesture.touch_slop", "must be >= 0"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, DeckError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DeckError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(field: &'static str, reason: &str) -> DeckError {
    DeckError::InvalidConfig {
        field,
        reason: reason.to_owned(),
    }
}
