#![forbid(unsafe_code)]

//! Core: pointer events, fling recognition, and animation primitives.
//!
//! # Role in cardeck
//! `cardeck-core` is the input and motion layer. It owns the pointer event
//! types the host feeds in, the [`GestureClassifier`](gesture::GestureClassifier)
//! capability with its default velocity-based implementation, and the tween
//! primitives transitions are built from.
//!
//! # Primary responsibilities
//! - **PointerEvent**: normalized down/move/up/cancel input.
//! - **FlingRecognizer**: velocity-based fling detection with touch slop.
//! - **Tween / AnimationGroup**: tick-driven interpolation with shared completion.
//! - **Geometry**: layout rectangles and measure constraints.
//!
//! # How it fits in the system
//! The `cardeck` crate owns the buffering window and gesture state machine and
//! consumes these types. Nothing in this crate knows about datasets or visuals.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod semantic_event;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
