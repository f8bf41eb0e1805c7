//! Property-based invariant tests for the fling recognizer.
//!
//! 1. A fling is never reported for a release inside the touch slop
//! 2. Reported velocity never exceeds the configured maximum
//! 3. Fling direction always matches the sign of (down_x - up_x)
//! 4. Cancel never produces a fling and always leaves the recognizer idle
//! 5. No panics on arbitrary event sequences

use std::time::Duration;

use cardeck_core::event::PointerEvent;
use cardeck_core::gesture::{FlingRecognizer, GestureClassifier, GestureConfig};
use cardeck_core::semantic_event::SwipeDirection;
use proptest::prelude::*;
use web_time::Instant;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Down(f32),
    Move(f32),
    Up(f32),
    Cancel(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f32..1000.0).prop_map(Op::Down),
        (0.0f32..1000.0).prop_map(Op::Move),
        (0.0f32..1000.0).prop_map(Op::Up),
        (0.0f32..1000.0).prop_map(Op::Cancel),
    ]
}

fn event(op: &Op) -> PointerEvent {
    match *op {
        Op::Down(x) => PointerEvent::down(x, 0.0),
        Op::Move(x) => PointerEvent::moved(x, 0.0),
        Op::Up(x) => PointerEvent::up(x, 0.0),
        Op::Cancel(x) => PointerEvent::cancel(x, 0.0),
    }
}

proptest! {
    #[test]
    fn no_panics_and_bounded_velocity(
        ops in proptest::collection::vec(op_strategy(), 0..64),
        step_ms in 0u64..40,
    ) {
        let config = GestureConfig::default();
        let max = config.max_fling_velocity;
        let mut gr = FlingRecognizer::new(config);
        let start = Instant::now();
        for (i, op) in ops.iter().enumerate() {
            let now = start + Duration::from_millis(step_ms * i as u64);
            if let Some(fling) = gr.on_pointer(&event(op), now) {
                prop_assert!(fling.velocity >= 0.0);
                prop_assert!(fling.velocity <= max);
                prop_assert!(fling.distance >= 0.0);
            }
        }
    }

    #[test]
    fn release_inside_slop_is_never_fling(
        down_x in 0.0f32..1000.0,
        offset in -7.9f32..7.9,
    ) {
        let mut gr = FlingRecognizer::default();
        let t = Instant::now();
        gr.on_pointer(&PointerEvent::down(down_x, 0.0), t);
        let out = gr.on_pointer(
            &PointerEvent::up(down_x + offset, 0.0),
            t + Duration::from_millis(1),
        );
        prop_assert!(out.is_none());
    }

    #[test]
    fn direction_matches_displacement(
        down_x in 0.0f32..1000.0,
        travel in prop_oneof![-500.0f32..-20.0, 20.0f32..500.0],
    ) {
        let mut gr = FlingRecognizer::default();
        let t = Instant::now();
        gr.on_pointer(&PointerEvent::down(down_x, 0.0), t);
        let up_x = down_x - travel;
        let fling = gr
            .on_pointer(&PointerEvent::up(up_x, 0.0), t + Duration::from_millis(10))
            .expect("20px+ in 10ms is above the minimum fling velocity");
        let expected = if travel > 0.0 { SwipeDirection::Left } else { SwipeDirection::Right };
        prop_assert_eq!(fling.direction, expected);
    }

    #[test]
    fn cancel_leaves_recognizer_idle(
        down_x in 0.0f32..1000.0,
        moves in proptest::collection::vec(0.0f32..1000.0, 0..8),
        cancel_x in 0.0f32..1000.0,
    ) {
        let mut gr = FlingRecognizer::default();
        let t = Instant::now();
        gr.on_pointer(&PointerEvent::down(down_x, 0.0), t);
        for (i, x) in moves.iter().enumerate() {
            gr.on_pointer(&PointerEvent::moved(*x, 0.0), t + Duration::from_millis(i as u64 + 1));
        }
        let out = gr.on_pointer(&PointerEvent::cancel(cancel_x, 0.0), t + Duration::from_millis(20));
        prop_assert!(out.is_none());
        prop_assert!(!gr.is_tracking());
    }
}
