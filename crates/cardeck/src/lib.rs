#![forbid(unsafe_code)]

//! Swipeable card deck engine.
//!
//! A [`CardDeck`] shows one item of an adapter-backed dataset at a time and
//! lets the user drag or fling horizontally to the previous or next item. It
//! keeps at most [`BUFFER_SIZE`] visuals alive in a sliding [`Window`] and
//! recycles released visuals through a small pool.
//!
//! The host owns rendering. It implements [`Visual`] over its own view type,
//! implements [`Adapter`] over its dataset, then forwards pointer events,
//! layout passes and frame ticks to the deck.

pub mod adapter;
pub mod config;
pub mod deck;
pub mod drag;
pub mod error;
pub mod headless;
pub mod pool;
pub mod transition;
pub mod window;

pub use adapter::{Adapter, DataSetEvent, DataSetObservable, DataSetObserver, ObserverId};
pub use config::DeckConfig;
pub use deck::{CardDeck, DeckEvent};
pub use drag::DragState;
pub use error::DeckError;
pub use window::{BUFFER_SIZE, Window};

use cardeck_core::geometry::{MeasureSpec, Rect};

/// Horizontal offset and scale of a visual, relative to its laid-out bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset_x: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    /// No offset, unit scale.
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Offset only, unit scale.
    #[must_use]
    pub const fn offset(offset_x: f32) -> Self {
        Self {
            offset_x,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Uniform scale at the given offset.
    #[must_use]
    pub const fn scaled(offset_x: f32, scale: f32) -> Self {
        Self {
            offset_x,
            scale_x: scale,
            scale_y: scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A card the deck can position, scale and lay out.
///
/// Implemented by the host over its native view type.
pub trait Visual {
    fn offset_x(&self) -> f32;
    fn set_offset_x(&mut self, offset_x: f32);
    fn scale_x(&self) -> f32;
    fn set_scale_x(&mut self, scale: f32);
    fn scale_y(&self) -> f32;
    fn set_scale_y(&mut self, scale: f32);

    /// Measure against the container's constraints.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec);

    /// Place the visual within the container.
    fn layout(&mut self, bounds: Rect);

    /// Set both scale axes.
    fn set_scale(&mut self, scale: f32) {
        self.set_scale_x(scale);
        self.set_scale_y(scale);
    }

    /// Apply a whole transform.
    fn set_transform(&mut self, transform: Transform) {
        self.set_offset_x(transform.offset_x);
        self.set_scale_x(transform.scale_x);
        self.set_scale_y(transform.scale_y);
    }

    /// Current transform.
    fn transform(&self) -> Transform {
        Transform {
            offset_x: self.offset_x(),
            scale_x: self.scale_x(),
            scale_y: self.scale_y(),
        }
    }
}
