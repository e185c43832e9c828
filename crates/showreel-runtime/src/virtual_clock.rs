#![forbid(unsafe_code)]

//! Deterministic, virtual-time execution of a [`Model`].
//!
//! [`TestDriver`] interprets the same [`Cmd`] vocabulary as
//! [`Program`](crate::program::Program) but replaces the timer threads
//! with a virtual clock: `advance` moves time forward and fires whatever
//! the slot has due, in deadline order. Tests drive tick scenarios and
//! teardown guarantees without sleeping.

use web_time::Duration;

use crate::program::{Cmd, Model};

enum Scheduled<M> {
    Repeat {
        period: Duration,
        due: Duration,
        tick: u64,
        tag: fn(u64) -> M,
    },
    Once {
        due: Duration,
        tag: fn() -> M,
    },
}

impl<M> Scheduled<M> {
    fn due(&self) -> Duration {
        match self {
            Self::Repeat { due, .. } | Self::Once { due, .. } => *due,
        }
    }
}

/// Drives a model on virtual time.
pub struct TestDriver<D: Model> {
    model: D,
    now: Duration,
    slot: Option<Scheduled<D::Message>>,
    running: bool,
}

impl<D: Model> TestDriver<D> {
    /// Wrap a model, executing its `init` command.
    pub fn new(mut model: D) -> Self {
        let cmd = model.init();
        let mut driver = Self {
            model,
            now: Duration::ZERO,
            slot: None,
            running: true,
        };
        driver.exec(cmd);
        driver
    }

    /// Feed one message through `update`. Ignored after quit.
    pub fn send(&mut self, msg: D::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.exec(cmd);
    }

    /// Advance virtual time, firing every timer deadline that falls
    /// within the window, in order. A repeating timer may fire several
    /// times in one call.
    pub fn advance(&mut self, window: Duration) {
        let target = self.now + window;
        while self.running {
            let Some(due) = self.slot.as_ref().map(Scheduled::due) else {
                break;
            };
            if due > target {
                break;
            }
            self.now = due;
            self.fire();
        }
        self.now = target;
    }

    /// Simulate component teardown: the owned timer handle is cancelled,
    /// so nothing further fires no matter how far time advances.
    pub fn teardown(&mut self) {
        self.slot = None;
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether a timer is currently scheduled.
    #[must_use]
    pub fn timer_scheduled(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether the model has quit.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The model.
    #[must_use]
    pub fn model(&self) -> &D {
        &self.model
    }

    /// Mutable access to the model.
    pub fn model_mut(&mut self) -> &mut D {
        &mut self.model
    }

    fn fire(&mut self) {
        match self.slot.take() {
            Some(Scheduled::Repeat {
                period,
                due,
                tick,
                tag,
            }) => {
                let tick = tick + 1;
                // Reschedule first so an update that cancels or replaces
                // the timer wins over the pending reschedule.
                self.slot = Some(Scheduled::Repeat {
                    period,
                    due: due + period,
                    tick,
                    tag,
                });
                self.send(tag(tick));
            }
            Some(Scheduled::Once { tag, .. }) => self.send(tag()),
            None => {}
        }
    }

    fn exec(&mut self, cmd: Cmd<D::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.send(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.exec(c);
                }
            }
            Cmd::Repeat { period, tag } => {
                self.slot = Some(Scheduled::Repeat {
                    period,
                    due: self.now + period,
                    tick: 0,
                    tag,
                });
            }
            Cmd::Once { after, tag } => {
                self.slot = Some(Scheduled::Once {
                    due: self.now + after,
                    tag,
                });
            }
            Cmd::CancelTimer => self.slot = None,
        }
    }
}
