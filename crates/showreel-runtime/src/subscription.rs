#![forbid(unsafe_code)]

//! Subscriptions: continuous message sources owned by the program.
//!
//! A [`Subscription`] runs on a background thread and emits messages into
//! the program's channel through an [`Emitter`]. Every message carries a
//! [`Stamp`] identifying its source, which lets the program drop messages
//! that were already buffered when their source was stopped — nothing a
//! dead source produced ever reaches the model.
//!
//! [`SubscriptionSet`] owns the running sources and stops them all when
//! dropped, so teardown never leaks a callback.

use std::sync::mpsc;
use std::thread;

use web_time::Duration;

use crate::cancellation::{CancelToken, Canceller};

/// Identifier for a subscription, used for deduplication and filtering.
pub type SubId = u64;

/// Source tag attached to every message in the program channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// Emitted by the host through the program's own emitter; always
    /// delivered.
    Host,
    /// Emitted by the subscription with this id.
    Sub(SubId),
    /// Emitted by the timer generation with this number.
    Timer(u64),
}

/// A stamped message in flight to the program.
#[derive(Debug)]
pub struct Envelope<M> {
    /// Which source produced the message.
    pub stamp: Stamp,
    /// The message itself.
    pub msg: M,
}

/// Sending half handed to a running source; stamps everything it emits.
pub struct Emitter<M> {
    tx: mpsc::Sender<Envelope<M>>,
    stamp: Stamp,
}

impl<M> Emitter<M> {
    pub(crate) fn new(tx: mpsc::Sender<Envelope<M>>, stamp: Stamp) -> Self {
        Self { tx, stamp }
    }

    /// Send one message. Returns false once the receiving side is gone,
    /// which is the source's signal to stop.
    pub fn emit(&self, msg: M) -> bool {
        self.tx
            .send(Envelope {
                stamp: self.stamp,
                msg,
            })
            .is_ok()
    }
}

/// A background message source.
///
/// `run` is called once on a dedicated thread; implementations loop until
/// the token cancels or the channel disconnects.
pub trait Subscription<M: Send + 'static>: Send {
    /// Identifier for deduplication: spawning a second subscription with
    /// an active id is a no-op.
    fn id(&self) -> SubId;

    /// Produce messages until stopped.
    fn run(self: Box<Self>, emit: Emitter<M>, stop: CancelToken);
}

/// A scripted subscription: emits a fixed timeline of messages, each
/// after a relative delay. Used by demos and tests to simulate an event
/// source such as a scrolling viewport.
pub struct Script<M: Send + 'static> {
    id: SubId,
    steps: Vec<(Duration, M)>,
}

impl<M: Send + 'static> Script<M> {
    /// Create a script with `(delay, message)` steps; each delay is
    /// relative to the previous step.
    #[must_use]
    pub fn new(id: SubId, steps: Vec<(Duration, M)>) -> Self {
        Self { id, steps }
    }
}

impl<M: Send + 'static> Subscription<M> for Script<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(self: Box<Self>, emit: Emitter<M>, stop: CancelToken) {
        for (delay, msg) in self.steps {
            if stop.wait(delay) {
                return;
            }
            if !emit.emit(msg) {
                return;
            }
        }
    }
}

struct Running {
    id: SubId,
    canceller: Canceller,
    thread: Option<thread::JoinHandle<()>>,
}

impl Running {
    fn stop(mut self) {
        self.canceller.cancel();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Owner of the running subscriptions for one program.
pub struct SubscriptionSet<M: Send + 'static> {
    tx: mpsc::Sender<Envelope<M>>,
    running: Vec<Running>,
}

impl<M: Send + 'static> SubscriptionSet<M> {
    /// Create a set that emits into the given channel.
    #[must_use]
    pub fn new(tx: mpsc::Sender<Envelope<M>>) -> Self {
        Self {
            tx,
            running: Vec::new(),
        }
    }

    /// Start a subscription on its own thread. Ids already active are
    /// skipped.
    pub fn spawn(&mut self, sub: Box<dyn Subscription<M>>) {
        let id = sub.id();
        if self.is_active(id) {
            tracing::debug!(target: "showreel.runtime", sub_id = id, "subscription already active");
            return;
        }
        tracing::debug!(target: "showreel.runtime", sub_id = id, "starting subscription");
        let emitter = Emitter::new(self.tx.clone(), Stamp::Sub(id));
        let (canceller, token) = Canceller::new();
        let thread = thread::spawn(move || sub.run(emitter, token));
        self.running.push(Running {
            id,
            canceller,
            thread: Some(thread),
        });
    }

    /// Whether a subscription with this id is still owned by the set.
    /// The program drops buffered messages from ids that are not.
    #[must_use]
    pub fn is_active(&self, id: SubId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    /// Stop one subscription and join its thread. No-op for unknown ids.
    pub fn stop(&mut self, id: SubId) {
        if let Some(pos) = self.running.iter().position(|r| r.id == id) {
            tracing::debug!(target: "showreel.runtime", sub_id = id, "stopping subscription");
            self.running.swap_remove(pos).stop();
        }
    }

    /// Stop everything. Called unconditionally on program teardown.
    pub fn stop_all(&mut self) {
        for running in self.running.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Drop for SubscriptionSet<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}
