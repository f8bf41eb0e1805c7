#![forbid(unsafe_code)]

//! Synchronized tween groups.
//!
//! An [`AnimationGroup`] plays a set of keyed [`Tween`]s together and
//! completes when every tween has completed. The key type is chosen by the
//! caller (for the deck it names a visual slot and a property).
//!
//! Completion is observed, not called back: callers tick the group and read
//! the [`PlaybackState`] it reports. This keeps ownership of whatever the
//! tweens drive with the caller.
//!
//! # Invariants
//!
//! 1. `tick()` only advances tweens in `Playing` state.
//! 2. `Finished` and `Cancelled` are terminal until `start()` is called again.
//! 3. An empty group finishes on its first tick.
//! 4. `values()` after `Finished` yields every tween's exact end value.

use std::time::Duration;

use super::{Animation, Tween};

/// Playback state of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Built but not started.
    Idle,
    /// Actively playing.
    Playing,
    /// Every tween reached its end.
    Finished,
    /// Stopped early; tweens hold the value they had when cancelled.
    Cancelled,
}

impl PlaybackState {
    /// Whether playback has stopped for good (finished or cancelled).
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// A keyed set of tweens played together.
#[derive(Debug, Clone)]
pub struct AnimationGroup<K> {
    tracks: Vec<(K, Tween)>,
    state: PlaybackState,
}

impl<K> Default for AnimationGroup<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AnimationGroup<K> {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            state: PlaybackState::Idle,
        }
    }

    /// Add a tween under `key` (builder pattern).
    #[must_use]
    pub fn with_tween(mut self, key: K, tween: Tween) -> Self {
        self.add_tween(key, tween);
        self
    }

    /// Add a tween under `key`.
    pub fn add_tween(&mut self, key: K, tween: Tween) {
        self.tracks.push((key, tween));
    }

    /// Start (or restart) playback from the beginning.
    pub fn start(&mut self) {
        for (_, tween) in &mut self.tracks {
            tween.reset();
        }
        self.state = PlaybackState::Playing;
    }

    /// Stop playback where it is. No-op unless playing.
    pub fn cancel(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Cancelled;
        }
    }

    /// Current playback state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of tweens in the group.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the group has no tweens.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current value of every tween, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (&K, f32)> + '_ {
        self.tracks.iter().map(|(key, tween)| (key, tween.current()))
    }

    /// Longest tween duration in the group.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.tracks
            .iter()
            .map(|(_, tween)| tween.duration())
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

impl<K> Animation for AnimationGroup<K> {
    fn tick(&mut self, dt: Duration) {
        if self.state != PlaybackState::Playing {
            return;
        }
        for (_, tween) in &mut self.tracks {
            tween.tick(dt);
        }
        if self.tracks.iter().all(|(_, tween)| tween.is_complete()) {
            self.state = PlaybackState::Finished;
        }
    }

    fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Progress of the slowest tween.
    fn value(&self) -> f32 {
        self.tracks
            .iter()
            .map(|(_, tween)| tween.value())
            .fold(1.0, f32::min)
    }

    fn reset(&mut self) {
        for (_, tween) in &mut self.tracks {
            tween.reset();
        }
        self.state = PlaybackState::Idle;
    }

    fn overshoot(&self) -> Duration {
        if self.state == PlaybackState::Finished {
            self.tracks
                .iter()
                .map(|(_, tween)| tween.overshoot())
                .min()
                .unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
