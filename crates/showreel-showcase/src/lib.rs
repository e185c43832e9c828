#![forbid(unsafe_code)]

//! showreel-showcase
//!
//! The feature carousel component: [`ShowcaseModel`] wires visibility
//! events, timer ticks, and user navigation into the core state machine;
//! [`view`] renders the derived payload as text; [`ScrollViewport`]
//! evaluates intersection geometry for scrolling hosts.

pub mod model;
pub mod sample;
pub mod view;
pub mod viewport;

pub use model::{Msg, ShowcaseModel};
pub use viewport::ScrollViewport;
