#![forbid(unsafe_code)]

//! Demo: a scripted page scroll drives the carousel end to end.
//!
//! The script scrolls the section into view, lets the auto-advance
//! sequence run at a demo-friendly pace, then overrides it with user
//! navigation. Run with `RUST_LOG=showreel=debug` for the transition log.

use std::io;
use std::time::Duration;

use showreel_core::ShowcaseConfig;
use showreel_runtime::{Program, Script};
use showreel_showcase::{Msg, ScrollViewport, ShowcaseModel, sample::sample_deck};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = ShowcaseConfig::default()
        .with_tick_interval(Duration::from_millis(600))
        .with_start_delay(Duration::from_millis(300))
        .with_scroll_past(Duration::from_millis(400));

    // A 900px viewport over a page where the section spans 1200..2200.
    let viewport = ScrollViewport::new(900.0, 1200.0, 1000.0, &config);
    let model = ShowcaseModel::new(sample_deck(), config);

    let mut program = Program::new(model).with_poll_timeout(Duration::from_millis(25));
    program.subscribe(Box::new(Script::new(
        1,
        vec![
            // Page load, then the user scrolls the section into view.
            (Duration::ZERO, Msg::Visibility(viewport.is_intersecting(0.0))),
            (
                Duration::from_millis(400),
                Msg::Visibility(viewport.is_intersecting(800.0)),
            ),
            // Auto-advance runs: 300ms start delay + 4 steps at 600ms.
            // Afterwards the user takes over.
            (Duration::from_millis(3600), Msg::Previous),
            (Duration::from_millis(600), Msg::Next),
            (Duration::from_millis(600), Msg::Select(0)),
            (Duration::from_millis(600), Msg::Quit),
        ],
    )));
    program.run()?;

    if program.model_mut().take_scroll_request() {
        println!("host: smooth-scrolling past the showcase section");
    }
    Ok(())
}
