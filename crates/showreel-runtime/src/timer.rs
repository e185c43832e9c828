#![forbid(unsafe_code)]

//! The owned timer slot.
//!
//! [`TimerSlot`] holds at most one live timer at a time: starting a new
//! one first cancels the old one, cancelling is idempotent, and dropping
//! the slot cancels whatever is live. Every tick is stamped with the
//! generation that produced it; the program only delivers ticks whose
//! generation is still live, so a cancelled timer's buffered ticks can
//! never mutate state. Ticks within a generation are numbered from 1 and
//! delivered strictly in order.

use std::sync::mpsc;
use std::thread;

use web_time::Duration;

use crate::cancellation::{CancelToken, Canceller};
use crate::subscription::{Emitter, Envelope, Stamp};

struct LiveTimer {
    generation: u64,
    canceller: Canceller,
    thread: Option<thread::JoinHandle<()>>,
}

/// Arena-style owner of the single repeating or one-shot timer.
pub struct TimerSlot<M: Send + 'static> {
    tx: mpsc::Sender<Envelope<M>>,
    generation: u64,
    live: Option<LiveTimer>,
}

impl<M: Send + 'static> TimerSlot<M> {
    /// Create an empty slot emitting into the given channel.
    #[must_use]
    pub fn new(tx: mpsc::Sender<Envelope<M>>) -> Self {
        Self {
            tx,
            generation: 0,
            live: None,
        }
    }

    /// Start a repeating timer, cancelling any live one first. `tag`
    /// converts the 1-based tick number into a message.
    pub fn start_repeating(&mut self, period: Duration, tag: fn(u64) -> M) {
        let (emitter, token, generation) = self.replace();
        tracing::debug!(
            target: "showreel.runtime",
            generation,
            period_ms = period.as_millis() as u64,
            "repeating timer started"
        );
        let handle = thread::spawn(move || {
            let mut tick = 0u64;
            loop {
                if token.wait(period) {
                    break;
                }
                tick += 1;
                if !emitter.emit(tag(tick)) {
                    break;
                }
            }
        });
        self.attach(handle);
    }

    /// Start a one-shot timer, cancelling any live one first.
    pub fn start_once(&mut self, after: Duration, tag: fn() -> M) {
        let (emitter, token, generation) = self.replace();
        tracing::debug!(
            target: "showreel.runtime",
            generation,
            after_ms = after.as_millis() as u64,
            "one-shot timer started"
        );
        let handle = thread::spawn(move || {
            if !token.wait(after) {
                emitter.emit(tag());
            }
        });
        self.attach(handle);
    }

    /// Cancel the live timer, if any, and join its thread. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(mut live) = self.live.take() {
            tracing::debug!(
                target: "showreel.runtime",
                generation = live.generation,
                "timer cancelled"
            );
            live.canceller.cancel();
            if let Some(handle) = live.thread.take() {
                let _ = handle.join();
            }
        }
    }

    /// Whether a timer is currently owned by the slot.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Whether a tick stamped with `generation` should be delivered.
    /// False once the generation was cancelled or replaced.
    #[must_use]
    pub fn accepts(&self, generation: u64) -> bool {
        self.live.as_ref().is_some_and(|l| l.generation == generation)
    }

    /// Cancel-before-start: retire the old timer and hand out the next
    /// generation's plumbing.
    fn replace(&mut self) -> (Emitter<M>, CancelToken, u64) {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let emitter = Emitter::new(self.tx.clone(), Stamp::Timer(generation));
        let (canceller, token) = Canceller::new();
        self.live = Some(LiveTimer {
            generation,
            canceller,
            thread: None,
        });
        (emitter, token, generation)
    }

    fn attach(&mut self, handle: thread::JoinHandle<()>) {
        if let Some(live) = self.live.as_mut() {
            live.thread = Some(handle);
        }
    }
}

impl<M: Send + 'static> Drop for TimerSlot<M> {
    fn drop(&mut self) {
        self.cancel();
    }
}
