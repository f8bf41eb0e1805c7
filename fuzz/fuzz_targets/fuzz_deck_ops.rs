#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use cardeck::headless::VecAdapter;
use cardeck::{Adapter, CardDeck, DeckConfig, DragState};
use cardeck_core::event::{PointerEvent, PointerEventKind};
use cardeck_core::geometry::Rect;
use libfuzzer_sys::fuzz_target;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Op {
    Pointer { kind: u8, x: i16, dt_ms: u8 },
    Tick(u16),
    Select(u8),
    CommitLeft,
    CommitRight,
    Cancel,
    Layout(u16),
    Truncate(u8),
    Push,
    Invalidate,
}

#[derive(Debug, Arbitrary)]
struct Input {
    items: u8,
    initial: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let n = usize::from(input.items % 32);
    let mut deck = CardDeck::new(DeckConfig::default()).expect("default config validates");
    deck.set_adapter_at(VecAdapter::new((0..n).collect()), usize::from(input.initial));
    deck.on_layout(Rect::from_size(320.0, 480.0));
    let mut now = Instant::now();

    for op in input.ops.into_iter().take(512) {
        match op {
            Op::Pointer { kind, x, dt_ms } => {
                let kind = match kind % 4 {
                    0 => PointerEventKind::Down,
                    1 => PointerEventKind::Move,
                    2 => PointerEventKind::Up,
                    _ => PointerEventKind::Cancel,
                };
                now += Duration::from_millis(u64::from(dt_ms));
                let event = PointerEvent::new(kind, f32::from(x), 0.0);
                deck.on_touch(&event, now);
            }
            Op::Tick(ms) => {
                deck.tick(Duration::from_millis(u64::from(ms)));
            }
            Op::Select(i) => {
                deck.set_selection(usize::from(i)).expect("adapter is set");
            }
            Op::CommitLeft => {
                deck.commit_left();
            }
            Op::CommitRight => {
                deck.commit_right();
            }
            Op::Cancel => {
                deck.cancel_transition();
            }
            Op::Layout(w) => deck.on_layout(Rect::from_size(f32::from(w), 480.0)),
            Op::Truncate(len) => {
                if let Some(a) = deck.adapter_mut() {
                    a.truncate(usize::from(len));
                }
            }
            Op::Push => {
                if let Some(a) = deck.adapter_mut() {
                    let next = a.count();
                    a.push(next);
                }
            }
            Op::Invalidate => {
                if let Some(a) = deck.adapter_mut() {
                    a.notify_invalidated();
                }
            }
        }
        deck.process_data_set_events();

        let indices = deck.window_indices();
        let count = deck.window().count();
        assert!(indices.len() <= count.min(3), "window too large");
        assert!(
            indices.windows(2).all(|w| w[1] == w[0] + 1),
            "non-contiguous window {indices:?}"
        );
        if let Some(v) = deck.visible_index() {
            assert!(indices.contains(&v), "visible {v} outside {indices:?}");
            assert_eq!(indices.len(), count.min(3), "window not full");
        }
        if deck.is_animating() {
            assert_eq!(deck.drag_state(), DragState::Idle);
        }
    }
});
