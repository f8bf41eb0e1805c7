//! End-to-end scenarios driving a deck through pointer events and ticks.
//!
//! Covers:
//! 1. Window shape after selection for small and large datasets.
//! 2. Idempotent selection.
//! 3. Commit left then right returns to the starting index.
//! 4. Edge resistance at both ends of the dataset.
//! 5. Transition exclusivity while animating.
//! 6. Walking a 12-item deck from first to last item.
//! 7. Dataset shrink while deep in the deck.
//! 8. Short fast flings commit regardless of distance.
//! 9. Pointer cancel settles like a release.
//! 10. Measure specs and container resizes reach every materialized visual.
//! 11. Adapter replacement and custom fling classifiers.

use std::time::Duration;

use cardeck::headless::VecAdapter;
use cardeck::transition::TransitionKind;
use cardeck::{CardDeck, DeckConfig, DeckEvent, DragState, Visual};
use cardeck_core::event::{PointerEvent, PointerEventKind};
use cardeck_core::geometry::{MeasureSpec, Rect};
use cardeck_core::gesture::GestureClassifier;
use cardeck_core::semantic_event::{Fling, SwipeDirection};
use web_time::Instant;

const WIDTH: f32 = 300.0;
const FRAME: Duration = Duration::from_millis(16);

// ── Helpers ─────────────────────────────────────────────────────────────

struct Harness {
    deck: CardDeck<VecAdapter<String>>,
    now: Instant,
}

impl Harness {
    fn new(n: usize, index: usize) -> Self {
        let items = (1..=n).map(|i| format!("Item {i}")).collect();
        let mut deck = CardDeck::new(DeckConfig::default()).expect("default config");
        deck.set_adapter_at(VecAdapter::new(items), index);
        deck.on_layout(Rect::from_size(WIDTH, 480.0));
        Self {
            deck,
            now: Instant::now(),
        }
    }

    fn advance_clock(&mut self, dt: Duration) -> Instant {
        self.now += dt;
        self.now
    }

    fn send(&mut self, event: PointerEvent, dt: Duration) -> bool {
        let now = self.advance_clock(dt);
        self.deck.on_touch(&event, now)
    }

    /// Slow drag: too slow to be a fling.
    fn drag(&mut self, from: f32, to: f32) {
        let slow = Duration::from_secs(1);
        self.send(PointerEvent::down(from, 10.0), slow);
        self.send(PointerEvent::moved(to, 10.0), slow);
        self.send(PointerEvent::up(to, 10.0), slow);
    }

    /// Fast flick covering `from..to` in 20ms.
    fn fling(&mut self, from: f32, to: f32) -> bool {
        let step = Duration::from_millis(10);
        self.send(PointerEvent::down(from, 10.0), Duration::from_secs(1));
        self.send(PointerEvent::moved((from + to) / 2.0, 10.0), step);
        self.send(PointerEvent::up(to, 10.0), step)
    }

    fn settle(&mut self) {
        for _ in 0..100 {
            if !self.deck.tick(FRAME) {
                return;
            }
        }
        panic!("transition did not settle");
    }

    fn swipe_left(&mut self) {
        self.drag(250.0, 50.0);
        self.settle();
    }

    fn swipe_right(&mut self) {
        self.drag(50.0, 250.0);
        self.settle();
    }

    fn displayed_scale(&self) -> f32 {
        let index = self.deck.visible_index().expect("non-empty deck");
        self.deck.visual_at(index).expect("displayed").scale_x()
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Window shape
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn window_after_selection_covers_target() {
    for n in 0..8 {
        for t in 0..n {
            let h = Harness::new(n, t);
            let indices = h.deck.window_indices();
            assert_eq!(indices.len(), n.min(3), "n={n} t={t}");
            assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
            assert!(indices.contains(&t));
            assert_eq!(h.deck.visible_index(), Some(t));
        }
    }
}

#[test]
fn twelve_items_select_first() {
    let h = Harness::new(12, 0);
    assert_eq!(h.deck.window_indices(), vec![0, 1, 2]);
    assert_eq!(h.deck.visible_slot(), Some(2));
}

#[test]
fn two_items_select_first() {
    let h = Harness::new(2, 0);
    assert_eq!(h.deck.window_indices(), vec![0, 1]);
    assert_eq!(h.deck.visible_slot(), Some(1));
}

#[test]
fn empty_dataset_has_no_visible_item() {
    let mut h = Harness::new(0, 0);
    assert!(h.deck.window_indices().is_empty());
    assert_eq!(h.deck.visible_index(), None);
    h.drag(250.0, 50.0);
    assert!(!h.deck.is_animating());
}

#[test]
fn selection_past_end_wraps_to_first() {
    let mut h = Harness::new(5, 2);
    h.deck.set_selection(9).unwrap();
    assert_eq!(h.deck.visible_index(), Some(0));
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotence
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn selecting_twice_matches_selecting_once() {
    let mut h = Harness::new(12, 0);
    h.deck.set_selection(6).unwrap();
    let once = (
        h.deck.window_indices(),
        h.deck.visible_slot(),
        h.deck.window().next_load(),
    );
    h.deck.set_selection(6).unwrap();
    let twice = (
        h.deck.window_indices(),
        h.deck.visible_slot(),
        h.deck.window().next_load(),
    );
    assert_eq!(once, twice);
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Round trip
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn left_then_right_returns_to_start() {
    for start in 1..11 {
        let mut h = Harness::new(12, start);
        h.swipe_left();
        assert_eq!(h.deck.visible_index(), Some(start + 1));
        h.swipe_right();
        assert_eq!(h.deck.visible_index(), Some(start), "start={start}");
        assert_eq!(h.displayed_scale(), 1.0);
    }
}

#[test]
fn short_drag_reverses() {
    let mut h = Harness::new(12, 4);
    h.drag(200.0, 120.0);
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(4));
    let shown = h.deck.visual_at(4).unwrap();
    assert_eq!(shown.offset_x(), 0.0);
    assert_eq!(h.deck.visual_at(5).unwrap().scale_x(), 0.8);
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Boundaries
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn right_drag_at_first_item_is_edge_resistance() {
    let mut h = Harness::new(12, 0);
    let t = Duration::from_secs(1);
    h.send(PointerEvent::down(50.0, 0.0), t);
    assert!(h.send(PointerEvent::moved(200.0, 0.0), t));
    assert_eq!(h.deck.drag_state(), DragState::Idle);
    assert!(h.displayed_scale() > 1.0);
    h.send(PointerEvent::up(200.0, 0.0), t);
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(0));
    assert_eq!(h.displayed_scale(), 1.0);
}

#[test]
fn left_drag_at_last_item_is_edge_resistance() {
    let mut h = Harness::new(12, 11);
    let t = Duration::from_secs(1);
    h.send(PointerEvent::down(250.0, 0.0), t);
    h.send(PointerEvent::moved(30.0, 0.0), t);
    assert_eq!(h.deck.drag_state(), DragState::Idle);
    assert!(h.displayed_scale() > 1.0);
    h.send(PointerEvent::up(30.0, 0.0), t);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(11));
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Exclusivity
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn second_commit_while_animating_is_noop() {
    let mut h = Harness::new(12, 5);
    assert!(h.deck.commit_left());
    let window = h.deck.window_indices();
    assert!(!h.deck.commit_left());
    assert!(!h.deck.commit_right());
    assert_eq!(h.deck.window_indices(), window);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(6));
}

#[test]
fn pointer_input_ignored_while_animating() {
    let mut h = Harness::new(12, 5);
    h.deck.commit_left();
    let t = FRAME;
    assert!(h.send(PointerEvent::down(10.0, 0.0), t));
    let now = h.advance_clock(t);
    assert!(!h.deck.on_intercept_touch(&PointerEvent::moved(200.0, 0.0), now));
    assert_eq!(h.deck.drag_state(), DragState::Idle);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(6));
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Walking the deck
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn walk_twelve_items_to_the_end() {
    let mut h = Harness::new(12, 0);
    h.swipe_left();
    assert_eq!(h.deck.visible_index(), Some(1));
    assert_eq!(h.deck.window_indices(), vec![0, 1, 2]);
    assert_eq!(h.deck.visible_slot(), Some(1));
    for _ in 0..10 {
        h.swipe_left();
    }
    assert_eq!(h.deck.visible_index(), Some(11));
    assert!(!h.deck.window().has_next());

    h.drag(250.0, 50.0);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(11));
}

#[test]
fn walking_recycles_visuals() {
    let mut h = Harness::new(12, 0);
    for _ in 0..11 {
        h.swipe_left();
    }
    let adapter = h.deck.adapter().unwrap();
    assert!(adapter.recycled() >= 9);
    assert!(adapter.created() <= 4);
}

#[test]
fn events_report_each_step() {
    let mut h = Harness::new(12, 0);
    h.deck.drain_events().for_each(drop);
    h.swipe_left();
    let events: Vec<_> = h.deck.drain_events().collect();
    assert_eq!(
        events,
        vec![
            DeckEvent::TransitionStarted(TransitionKind::CommitLeft),
            DeckEvent::TransitionFinished(TransitionKind::CommitLeft),
            DeckEvent::SelectionChanged { index: Some(1) },
        ]
    );
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Data set changes
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn shrink_while_deep_clamps_to_last() {
    let mut h = Harness::new(12, 0);
    h.deck.set_selection(8).unwrap();
    h.deck.adapter_mut().unwrap().truncate(3);
    assert_eq!(h.deck.process_data_set_events(), 1);
    assert_eq!(h.deck.visible_index(), Some(2));
    assert_eq!(h.deck.window_indices(), vec![0, 1, 2]);
    let events: Vec<_> = h.deck.drain_events().collect();
    assert!(events.contains(&DeckEvent::DataSetChanged { count: 3 }));
}

#[test]
fn growth_from_empty_shows_first_item() {
    let mut h = Harness::new(0, 0);
    h.deck
        .adapter_mut()
        .unwrap()
        .set_items(vec!["a".into(), "b".into()]);
    h.deck.tick(FRAME);
    assert_eq!(h.deck.visible_index(), Some(0));
    assert_eq!(h.deck.window_indices(), vec![0, 1]);
}

#[test]
fn rebuilt_visuals_are_laid_out() {
    let mut h = Harness::new(12, 0);
    h.deck.adapter_mut().unwrap().push("Item 13".into());
    h.deck.process_data_set_events();
    for v in h.deck.visuals() {
        assert_eq!(v.bounds(), Rect::from_size(WIDTH, 480.0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Flings
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn short_fast_fling_commits() {
    let mut h = Harness::new(12, 3);
    assert!(h.fling(200.0, 160.0));
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(4));
}

#[test]
fn rightward_fling_retreats() {
    let mut h = Harness::new(12, 3);
    h.fling(100.0, 140.0);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(2));
}

#[test]
fn fling_without_neighbor_falls_back_to_restore() {
    let mut h = Harness::new(12, 0);
    h.fling(100.0, 140.0);
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(0));
    assert_eq!(h.displayed_scale(), 1.0);
}

#[test]
fn tap_inside_slop_is_not_a_fling() {
    let mut h = Harness::new(12, 3);
    let step = Duration::from_millis(5);
    h.send(PointerEvent::down(100.0, 0.0), step);
    h.send(PointerEvent::up(96.0, 0.0), step);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(3));
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Pointer cancel
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn cancel_past_half_width_commits() {
    let mut h = Harness::new(12, 4);
    let slow = Duration::from_secs(1);
    h.send(PointerEvent::down(250.0, 10.0), slow);
    h.send(PointerEvent::moved(40.0, 10.0), slow);
    assert_eq!(h.deck.drag_state(), DragState::DraggingLeft);
    h.send(PointerEvent::cancel(40.0, 10.0), slow);
    assert!(h.deck.is_animating());
    assert_eq!(h.deck.drag_state(), DragState::Idle);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(5));
}

#[test]
fn cancel_after_short_drag_reverses() {
    let mut h = Harness::new(12, 4);
    let slow = Duration::from_secs(1);
    h.send(PointerEvent::down(200.0, 10.0), slow);
    h.send(PointerEvent::moved(120.0, 10.0), slow);
    h.send(PointerEvent::cancel(120.0, 10.0), slow);
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(4));
    assert_eq!(h.deck.visual_at(4).unwrap().offset_x(), 0.0);
    assert_eq!(h.deck.visual_at(5).unwrap().scale_x(), 0.8);
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Measure and resize
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn measure_specs_reach_refilled_visuals() {
    let mut h = Harness::new(12, 0);
    h.deck
        .on_measure(MeasureSpec::Exactly(WIDTH), MeasureSpec::Exactly(480.0));
    for v in h.deck.visuals() {
        assert_eq!(v.measured_size(), (WIDTH, 480.0));
    }

    // Each step binds a created or recycled visual to a new index.
    for step in 1..6 {
        h.swipe_left();
        assert_eq!(h.deck.visible_index(), Some(step));
        for v in h.deck.visuals() {
            assert_eq!(v.measured_size(), (WIDTH, 480.0));
        }
    }
    assert!(h.deck.adapter().unwrap().recycled() > 0);

    h.deck
        .on_measure(MeasureSpec::Exactly(200.0), MeasureSpec::Exactly(100.0));
    for v in h.deck.visuals() {
        assert_eq!(v.measured_size(), (200.0, 100.0));
    }
}

#[test]
fn resize_during_transition_repins_previous_item() {
    let mut h = Harness::new(12, 4);
    assert!(h.deck.commit_left());
    h.deck.tick(FRAME);
    h.deck.on_layout(Rect::from_size(400.0, 480.0));
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(5));
    assert_eq!(h.deck.visual_at(4).unwrap().offset_x(), -400.0);

    h.deck.on_layout(Rect::from_size(400.0, 480.0));
    assert_eq!(h.deck.visual_at(4).unwrap().offset_x(), -400.0);
}

#[test]
fn resize_during_drag_repins_after_settle() {
    let mut h = Harness::new(12, 4);
    let slow = Duration::from_secs(1);
    h.send(PointerEvent::down(100.0, 10.0), slow);
    h.send(PointerEvent::moved(160.0, 10.0), slow);
    assert_eq!(h.deck.drag_state(), DragState::DraggingRight);
    h.deck.on_layout(Rect::from_size(400.0, 480.0));
    h.send(PointerEvent::up(160.0, 10.0), slow);
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(4));
    assert_eq!(h.deck.visual_at(3).unwrap().offset_x(), -400.0);
    assert_eq!(h.deck.visual_at(4).unwrap().offset_x(), 0.0);
}

// ═════════════════════════════════════════════════════════════════════════
// 11. Adapter replacement and classifiers
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn replacing_adapter_mid_transition_finishes_it() {
    let mut h = Harness::new(12, 4);
    h.deck.drain_events().for_each(drop);
    assert!(h.deck.commit_left());
    let items = (1..=3).map(|i| format!("Other {i}")).collect();
    let old = h.deck.set_adapter(VecAdapter::new(items));
    assert!(old.is_some());
    assert!(!h.deck.is_animating());
    let events: Vec<_> = h.deck.drain_events().collect();
    assert_eq!(
        events,
        vec![
            DeckEvent::TransitionStarted(TransitionKind::CommitLeft),
            DeckEvent::TransitionFinished(TransitionKind::CommitLeft),
            DeckEvent::SelectionChanged { index: Some(0) },
        ]
    );
}

/// Reports a leftward fling on every release.
#[derive(Debug)]
struct EveryReleaseFlings;

impl GestureClassifier for EveryReleaseFlings {
    fn on_pointer(&mut self, event: &PointerEvent, _now: Instant) -> Option<Fling> {
        match event.kind {
            PointerEventKind::Up => Some(Fling {
                direction: SwipeDirection::Left,
                distance: 0.0,
                velocity: 5_000.0,
            }),
            _ => None,
        }
    }

    fn reset(&mut self) {}
}

#[test]
fn custom_classifier_drives_commits() {
    let deck = CardDeck::new(DeckConfig::default())
        .expect("default config")
        .with_classifier(Box::new(EveryReleaseFlings));
    let items = (1..=12).map(|i| format!("Item {i}")).collect();
    let mut h = Harness {
        deck,
        now: Instant::now(),
    };
    h.deck.set_adapter_at(VecAdapter::new(items), 2);
    h.deck.on_layout(Rect::from_size(WIDTH, 480.0));

    let step = Duration::from_millis(5);
    h.send(PointerEvent::down(100.0, 0.0), step);
    assert!(h.send(PointerEvent::up(100.0, 0.0), step));
    assert!(h.deck.is_animating());
    h.settle();
    assert_eq!(h.deck.visible_index(), Some(3));
}
