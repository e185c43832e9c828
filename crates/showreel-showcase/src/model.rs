#![forbid(unsafe_code)]

//! The showcase component as a runtime model.
//!
//! [`ShowcaseModel`] owns the deck and the state machine and translates
//! between the runtime's message/command world and the core's
//! transition/effect world. All timer ownership lives in the runtime;
//! stale ticks from a cancelled timer are filtered before they reach
//! `update`, so the transitions here never see them.

use showreel_core::{Effect, FeatureDeck, RenderModel, ShowcaseConfig, ShowcaseState};
use showreel_runtime::{Cmd, Model};

use crate::view;

/// Messages the component reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Intersection change from the visibility watcher.
    Visibility(bool),
    /// The start delay elapsed; begin auto-advancing.
    Arm,
    /// One auto-advance step. Carries the runtime's tick number.
    Tick(u64),
    /// The post-completion scroll-past delay elapsed.
    ScrollPastDue,
    /// User pressed the next-feature control.
    Next,
    /// User pressed the previous-feature control.
    Previous,
    /// User selected an entry directly.
    Select(usize),
    /// Stop the program.
    Quit,
}

/// The feature carousel component.
pub struct ShowcaseModel {
    deck: FeatureDeck,
    state: ShowcaseState,
    scroll_requested: bool,
}

impl ShowcaseModel {
    /// Build the component from its deck and configuration.
    #[must_use]
    pub fn new(deck: FeatureDeck, config: ShowcaseConfig) -> Self {
        let state = ShowcaseState::new(&deck, config);
        Self {
            deck,
            state,
            scroll_requested: false,
        }
    }

    /// The state machine.
    #[must_use]
    pub fn state(&self) -> &ShowcaseState {
        &self.state
    }

    /// The deck.
    #[must_use]
    pub fn deck(&self) -> &FeatureDeck {
        &self.deck
    }

    /// Derive the current display payload.
    #[must_use]
    pub fn render(&self) -> RenderModel<'_> {
        RenderModel::derive(&self.state, &self.deck)
    }

    /// Whether the component has asked the host to scroll past the
    /// section. Latches until taken.
    #[must_use]
    pub fn scroll_requested(&self) -> bool {
        self.scroll_requested
    }

    /// Consume a pending scroll-past request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Cmd<Msg> {
        let cmds = effects
            .into_iter()
            .map(|effect| match effect {
                Effect::ArmAfter(delay) => Cmd::once(delay, || Msg::Arm),
                Effect::StartTimer(period) => Cmd::repeat(period, Msg::Tick),
                Effect::CancelTimer => Cmd::cancel_timer(),
                Effect::ScrollPast(delay) => Cmd::once(delay, || Msg::ScrollPastDue),
            })
            .collect();
        Cmd::batch(cmds)
    }
}

impl Model for ShowcaseModel {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        let effects = match msg {
            Msg::Visibility(in_view) => self.state.visibility_changed(in_view),
            Msg::Arm => self.state.arm(),
            Msg::Tick(_) => self.state.tick(),
            Msg::ScrollPastDue => {
                tracing::debug!(target: "showreel.showcase", "scroll-past requested");
                self.scroll_requested = true;
                Vec::new()
            }
            Msg::Next => self.state.next(),
            Msg::Previous => self.state.previous(),
            Msg::Select(index) => self.state.select(index),
            Msg::Quit => return Cmd::quit(),
        };
        self.run_effects(effects)
    }

    fn view(&self) -> Vec<String> {
        view::render_lines(&self.render())
    }
}
