#![forbid(unsafe_code)]

//! Card deck demo.
//!
//! Drives a headless deck over twelve items through a scripted session:
//! drags, flings, edge pulls and dataset changes. Every step prints the
//! window so the buffering is visible.
//!
//! # Running
//!
//! ```sh
//! cargo run -p cardeck-demo
//! RUST_LOG=cardeck=trace cargo run -p cardeck-demo -- --json
//! cargo run -p cardeck-demo -- --config deck.json
//! ```

use std::error::Error;
use std::time::Duration;

use cardeck::headless::VecAdapter;
use cardeck::{CardDeck, DeckConfig, DeckEvent, Visual};
use cardeck_core::event::PointerEvent;
use cardeck_core::geometry::{MeasureSpec, Rect};
use cardeck_core::logging::{LogFormat, init_subscriber};
use web_time::Instant;

const WIDTH: f32 = 360.0;
const HEIGHT: f32 = 640.0;
const FRAME: Duration = Duration::from_millis(16);

struct Session {
    deck: CardDeck<VecAdapter<String>>,
    now: Instant,
}

impl Session {
    fn new(config: DeckConfig) -> Result<Self, Box<dyn Error>> {
        let items = (1..=12).map(|i| format!("Item {i}")).collect();
        let mut deck = CardDeck::new(config)?;
        deck.set_adapter(VecAdapter::new(items));
        deck.on_measure(MeasureSpec::Exactly(WIDTH), MeasureSpec::Exactly(HEIGHT));
        deck.on_layout(Rect::from_size(WIDTH, HEIGHT));
        Ok(Self {
            deck,
            now: Instant::now(),
        })
    }

    fn pointer(&mut self, event: PointerEvent, dt: Duration) {
        self.now += dt;
        self.deck.on_touch(&event, self.now);
    }

    fn drag(&mut self, from: f32, to: f32) {
        let step = Duration::from_millis(200);
        self.pointer(PointerEvent::down(from, HEIGHT / 2.0), step);
        for i in 1..=8 {
            let x = from + (to - from) * i as f32 / 8.0;
            self.pointer(PointerEvent::moved(x, HEIGHT / 2.0), step);
        }
        self.pointer(PointerEvent::up(to, HEIGHT / 2.0), step);
    }

    fn fling(&mut self, from: f32, to: f32) {
        let step = Duration::from_millis(12);
        self.pointer(PointerEvent::down(from, HEIGHT / 2.0), Duration::from_secs(1));
        self.pointer(PointerEvent::moved((from + to) / 2.0, HEIGHT / 2.0), step);
        self.pointer(PointerEvent::up(to, HEIGHT / 2.0), step);
    }

    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.deck.tick(FRAME) {
            frames += 1;
        }
        frames
    }

    fn report(&mut self, step: &str) {
        let frames = self.settle();
        let label = self
            .deck
            .visible_index()
            .and_then(|i| self.deck.adapter().and_then(|a| a.get(i)))
            .cloned()
            .unwrap_or_else(|| "<empty>".into());
        println!(
            "{step:<28} showing {label:<8} window {:?} slot {:?} ({frames} frames)",
            self.deck.window_indices(),
            self.deck.visible_slot(),
        );
        for event in self.deck.drain_events() {
            match event {
                DeckEvent::SelectionChanged { .. }
                | DeckEvent::DataSetChanged { .. }
                | DeckEvent::DataSetInvalidated => println!("    {event:?}"),
                DeckEvent::TransitionStarted(_) | DeckEvent::TransitionFinished(_) => {
                    tracing::debug!(?event, "deck event");
                }
            }
        }
    }
}

fn load_config() -> Result<DeckConfig, Box<dyn Error>> {
    let path = std::env::args().skip_while(|a| a != "--config").nth(1);
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok(DeckConfig::from_json_str(&text)?)
        }
        None => Ok(DeckConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let format = if std::env::args().any(|a| a == "--json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_subscriber(format);

    let config = load_config()?;
    tracing::info!(?config, "starting card deck demo");
    let mut session = Session::new(config)?;
    session.report("initial");

    session.drag(WIDTH - 20.0, 40.0);
    session.report("drag left");
    session.drag(WIDTH - 20.0, 40.0);
    session.report("drag left");
    session.drag(WIDTH - 20.0, WIDTH - 100.0);
    session.report("short drag left (reverts)");
    session.fling(200.0, 150.0);
    session.report("fling left");
    session.fling(150.0, 200.0);
    session.report("fling right");

    session.deck.set_selection(0)?;
    session.report("select 0");
    session.drag(40.0, WIDTH - 20.0);
    session.report("pull past first item");
    if let Some(v) = session.deck.visual_at(0) {
        println!("    scale after restore {:.2}", v.scale_x());
    }

    session.deck.set_selection(11)?;
    session.report("select 11");
    session.drag(WIDTH - 20.0, 40.0);
    session.report("pull past last item");

    if let Some(adapter) = session.deck.adapter_mut() {
        adapter.push("Item 13".into());
    }
    session.deck.process_data_set_events();
    session.report("append item 13");

    session.deck.set_selection(8)?;
    session.report("select 8");
    if let Some(adapter) = session.deck.adapter_mut() {
        adapter.truncate(3);
    }
    session.report("shrink to 3 items");

    if let Some(adapter) = session.deck.adapter() {
        println!(
            "visuals created {}, recycled {}",
            adapter.created(),
            adapter.recycled()
        );
    }
    Ok(())
}
