#![forbid(unsafe_code)]

//! showreel-runtime
//!
//! The runtime half of showreel: an Elm-style update/view loop with owned
//! timers and subscriptions.
//!
//! # Key components
//!
//! - [`Model`] / [`Cmd`] — application state and its side-effect vocabulary
//! - [`Program`] — the event loop; owns the timer slot and subscriptions,
//!   tears both down when it stops
//! - [`TimerSlot`] — at most one live cancellable timer, generation-stamped
//!   so stale ticks never reach a model
//! - [`Subscription`] / [`SubscriptionSet`] — continuous background sources
//! - [`Canceller`] / [`CancelToken`] — the single cancellation primitive
//! - [`TestDriver`] — virtual-time interpretation of the same commands

pub mod cancellation;
pub mod program;
pub mod subscription;
pub mod timer;
pub mod virtual_clock;

pub use cancellation::{CancelToken, Canceller};
pub use program::{Cmd, Model, Program};
pub use subscription::{Emitter, Envelope, Script, Stamp, SubId, Subscription, SubscriptionSet};
pub use timer::TimerSlot;
pub use virtual_clock::TestDriver;
