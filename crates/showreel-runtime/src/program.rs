#![forbid(unsafe_code)]

//! Elm-style update/view loop.
//!
//! A [`Model`] owns the application state: `update` consumes messages and
//! returns a [`Cmd`] describing side effects, `view` renders the current
//! state as lines of text. The [`Program`] interprets commands, owns the
//! timer slot and subscription set, and tears both down when the loop
//! ends — no timer or subscription outlives its program.
//!
//! Messages from stopped sources are discarded at delivery via their
//! [`Stamp`](crate::subscription::Stamp), which is what makes teardown
//! and cancellation airtight: a buffered tick from a cancelled timer is
//! dropped before the model ever sees it.

use std::io::{self, Stdout, Write};
use std::sync::mpsc;

use web_time::Duration;

use crate::subscription::{Emitter, Envelope, Stamp, Subscription, SubscriptionSet};
use crate::timer::TimerSlot;

/// Application state and behavior.
pub trait Model {
    /// Message type routed through [`update`](Self::update).
    type Message: Send + 'static;

    /// Startup commands. Called once before the loop runs.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state as display lines.
    fn view(&self) -> Vec<String>;
}

/// Side effects requested by the model and executed by the runtime.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Stop the program loop.
    Quit,
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Execute several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Start the repeating timer; `tag` maps the 1-based tick number to a
    /// message. Replaces any live timer.
    Repeat {
        /// Interval between ticks.
        period: Duration,
        /// Tick-number-to-message constructor.
        tag: fn(u64) -> M,
    },
    /// Start a one-shot timer. Replaces any live timer.
    Once {
        /// Delay before firing.
        after: Duration,
        /// Message constructor.
        tag: fn() -> M,
    },
    /// Cancel the live timer, if any.
    CancelTimer,
}

impl<M> Cmd<M> {
    /// No-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Stop the program.
    #[inline]
    #[must_use]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Route a message back into `update`.
    #[inline]
    #[must_use]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Combine commands, collapsing the empty and single cases.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Start the repeating timer.
    #[inline]
    #[must_use]
    pub fn repeat(period: Duration, tag: fn(u64) -> M) -> Self {
        Self::Repeat { period, tag }
    }

    /// Start a one-shot timer.
    #[inline]
    #[must_use]
    pub fn once(after: Duration, tag: fn() -> M) -> Self {
        Self::Once { after, tag }
    }

    /// Cancel the live timer.
    #[inline]
    #[must_use]
    pub fn cancel_timer() -> Self {
        Self::CancelTimer
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// The runtime loop: delivers messages, executes commands, renders.
pub struct Program<M: Model, W: Write = Stdout> {
    model: M,
    out: W,
    tx: mpsc::Sender<Envelope<M::Message>>,
    rx: mpsc::Receiver<Envelope<M::Message>>,
    subs: SubscriptionSet<M::Message>,
    timers: TimerSlot<M::Message>,
    running: bool,
    dirty: bool,
    poll_timeout: Duration,
}

impl<M: Model> Program<M, Stdout> {
    /// Create a program rendering to stdout.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self::with_writer(model, io::stdout())
    }
}

impl<M: Model, W: Write> Program<M, W> {
    /// Create a program rendering to the given writer.
    #[must_use]
    pub fn with_writer(model: M, out: W) -> Self {
        let (tx, rx) = mpsc::channel();
        let subs = SubscriptionSet::new(tx.clone());
        let timers = TimerSlot::new(tx.clone());
        Self {
            model,
            out,
            tx,
            rx,
            subs,
            timers,
            running: true,
            dirty: true,
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Override the idle poll timeout.
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Start a subscription owned by this program.
    pub fn subscribe(&mut self, sub: Box<dyn Subscription<M::Message>>) {
        self.subs.spawn(sub);
    }

    /// An emitter into the program's channel for host-driven events,
    /// such as navigation controls the embedding page forwards. Host
    /// messages are always delivered.
    #[must_use]
    pub fn host_emitter(&self) -> Emitter<M::Message> {
        Emitter::new(self.tx.clone(), Stamp::Host)
    }

    /// Run until the model quits. Tears down timers and subscriptions
    /// before returning, even on render errors.
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = self.model.init();
        self.exec(cmd);
        let result = self.run_loop();
        self.teardown();
        result
    }

    fn run_loop(&mut self) -> io::Result<()> {
        self.render()?;
        while self.running {
            match self.rx.recv_timeout(self.poll_timeout) {
                Ok(envelope) => self.deliver(envelope),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
            while self.running {
                match self.rx.try_recv() {
                    Ok(envelope) => self.deliver(envelope),
                    Err(_) => break,
                }
            }
            if self.dirty {
                self.render()?;
            }
        }
        Ok(())
    }

    /// Deliver one envelope, dropping it if its source is gone.
    fn deliver(&mut self, envelope: Envelope<M::Message>) {
        let accepted = match envelope.stamp {
            Stamp::Host => true,
            Stamp::Sub(id) => self.subs.is_active(id),
            Stamp::Timer(generation) => self.timers.accepts(generation),
        };
        if !accepted {
            tracing::trace!(
                target: "showreel.runtime",
                stamp = ?envelope.stamp,
                "dropping message from stopped source"
            );
            return;
        }
        self.dispatch(envelope.msg);
    }

    /// Feed one message through `update` and execute the resulting
    /// command.
    pub fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.exec(cmd);
    }

    fn exec(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.exec(c);
                }
            }
            Cmd::Repeat { period, tag } => self.timers.start_repeating(period, tag),
            Cmd::Once { after, tag } => self.timers.start_once(after, tag),
            Cmd::CancelTimer => self.timers.cancel(),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        for line in self.model.view() {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn teardown(&mut self) {
        self.timers.cancel();
        self.subs.stop_all();
    }

    /// The model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::Script;

    struct Counter {
        value: i32,
        limit: i32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Msg {
        Add(i32),
        Quit,
    }

    impl Model for Counter {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Add(n) => {
                    self.value += n;
                    if self.value >= self.limit {
                        Cmd::quit()
                    } else {
                        Cmd::none()
                    }
                }
                Msg::Quit => Cmd::quit(),
            }
        }

        fn view(&self) -> Vec<String> {
            vec![format!("value: {}", self.value)]
        }
    }

    #[test]
    fn batch_collapses_empty_and_single() {
        assert!(matches!(Cmd::<Msg>::batch(vec![]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::msg(Msg::Quit)]), Cmd::Msg(_)));
        assert!(matches!(
            Cmd::batch(vec![Cmd::<Msg>::none(), Cmd::quit()]),
            Cmd::Quit
        ));
        assert!(matches!(
            Cmd::batch(vec![Cmd::msg(Msg::Add(1)), Cmd::quit()]),
            Cmd::Batch(_)
        ));
    }

    #[test]
    fn dispatch_runs_update_and_marks_dirty() {
        let model = Counter { value: 0, limit: 10 };
        let mut program = Program::with_writer(model, Vec::new());
        program.dispatch(Msg::Add(3));
        assert_eq!(program.model().value, 3);
        assert!(program.is_running());
        program.dispatch(Msg::Quit);
        assert!(!program.is_running());
    }

    #[test]
    fn run_drains_a_script_until_quit() {
        let model = Counter { value: 0, limit: 100 };
        let mut program =
            Program::with_writer(model, Vec::new()).with_poll_timeout(Duration::from_millis(5));
        program.subscribe(Box::new(Script::new(
            1,
            vec![
                (Duration::ZERO, Msg::Add(1)),
                (Duration::ZERO, Msg::Add(2)),
                (Duration::from_millis(5), Msg::Quit),
            ],
        )));
        program.run().unwrap();
        assert_eq!(program.model().value, 3);
        assert!(!program.is_running());
    }

    #[test]
    fn timer_commands_drive_the_model() {
        let model = Counter { value: 0, limit: 3 };
        let mut program =
            Program::with_writer(model, Vec::new()).with_poll_timeout(Duration::from_millis(5));
        // Each tick adds 1; the model quits at 3.
        program.exec(Cmd::repeat(Duration::from_millis(5), |_tick| Msg::Add(1)));
        program.run_loop().unwrap();
        program.teardown();
        assert_eq!(program.model().value, 3);
    }

    #[test]
    fn render_writes_view_lines() {
        let model = Counter { value: 7, limit: 10 };
        let mut program = Program::with_writer(model, Vec::new());
        program.render().unwrap();
        assert_eq!(String::from_utf8(program.out.clone()).unwrap(), "value: 7\n");
    }
}
