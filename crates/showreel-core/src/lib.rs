#![forbid(unsafe_code)]

//! showreel-core
//!
//! Domain types and the pure state machine for the showreel feature
//! carousel: the validated [`FeatureDeck`], the [`ShowcaseState`] machine
//! with its [`Effect`] outputs, construction-time [`ShowcaseConfig`], and
//! the derived [`RenderModel`].
//!
//! This crate performs no I/O and owns no timers. Transitions return
//! effects as values; `showreel-runtime` interprets them. That split keeps
//! every behavior here synchronous and unit-testable.

pub mod config;
pub mod feature;
pub mod render;
pub mod state;

pub use config::{ResetPolicy, ShowcaseConfig};
pub use feature::{DeckError, FeatureDeck, FeatureEntry};
pub use render::{RenderItem, RenderModel};
pub use state::{
    AdvancePhase, Effect, ShowcaseState, auto_advance_completed_total,
    auto_advance_interrupted_total, auto_advance_started_total,
};
