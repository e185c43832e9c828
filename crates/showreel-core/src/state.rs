#![forbid(unsafe_code)]

//! The carousel state machine.
//!
//! [`ShowcaseState`] owns the mutable component state and exposes the
//! transitions the host wires to its event sources: visibility changes,
//! timer ticks, and user navigation. Transitions mutate state and return
//! [`Effect`] values describing the side effects the runtime should carry
//! out (start or cancel the repeating timer, request a scroll-past). The
//! state machine itself never touches a timer, which keeps every
//! transition synchronous and deterministic.
//!
//! Phases: `Idle` until first visibility, `Pending` while the start delay
//! runs, `Running` while the driver steps, then `Completed` (ran to the
//! last entry) or `Interrupted` (user navigation). Both terminal phases
//! are final with respect to auto-advance; the active index stays freely
//! navigable in either.

use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Duration;

use crate::config::{ResetPolicy, ShowcaseConfig};
use crate::feature::FeatureDeck;

static STARTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static COMPLETED_TOTAL: AtomicU64 = AtomicU64::new(0);
static INTERRUPTED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total auto-advance sequences started (monotonic counter).
#[must_use]
pub fn auto_advance_started_total() -> u64 {
    STARTED_TOTAL.load(Ordering::Relaxed)
}

/// Total auto-advance sequences that ran to completion (monotonic counter).
#[must_use]
pub fn auto_advance_completed_total() -> u64 {
    COMPLETED_TOTAL.load(Ordering::Relaxed)
}

/// Total auto-advance sequences interrupted by the user (monotonic counter).
#[must_use]
pub fn auto_advance_interrupted_total() -> u64 {
    INTERRUPTED_TOTAL.load(Ordering::Relaxed)
}

/// Lifecycle phase of the auto-advance driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancePhase {
    /// Not yet visible; nothing scheduled.
    Idle,
    /// First visibility seen; waiting out the start delay.
    Pending,
    /// The repeating timer is live. `step` is the index the last tick
    /// landed on; `step + 1 < count` holds while running.
    Running {
        /// Index reached by the most recent step.
        step: usize,
    },
    /// The driver walked to the last entry and stopped.
    Completed,
    /// User navigation cancelled the driver.
    Interrupted,
}

impl AdvancePhase {
    /// True for the two phases the driver never leaves.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Interrupted)
    }
}

/// A side effect requested by a state transition.
///
/// The runtime interprets these; the state machine only describes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Schedule a one-shot arm of the driver after the given delay.
    ArmAfter(Duration),
    /// Start the repeating step timer with the given interval. Starting
    /// replaces any live timer (cancel-before-start).
    StartTimer(Duration),
    /// Cancel the live timer, if any. Idempotent.
    CancelTimer,
    /// Ask the host to smooth-scroll past the section after the delay.
    ScrollPast(Duration),
}

/// Mutable state for one showcase component instance.
#[derive(Debug, Clone)]
pub struct ShowcaseState {
    count: usize,
    config: ShowcaseConfig,
    active_index: usize,
    is_in_view: bool,
    has_auto_advanced: bool,
    phase: AdvancePhase,
}

impl ShowcaseState {
    /// Create state for a deck. The deck's non-emptiness guarantees
    /// `count >= 1` here.
    #[must_use]
    pub fn new(deck: &FeatureDeck, config: ShowcaseConfig) -> Self {
        Self::with_initial_index(deck, config, 0)
    }

    /// Create state starting on a specific entry, clamped into range.
    /// With [`ResetPolicy::Continue`] the auto-advance sequence steps
    /// onward from here instead of rewinding.
    #[must_use]
    pub fn with_initial_index(deck: &FeatureDeck, config: ShowcaseConfig, index: usize) -> Self {
        Self {
            count: deck.len(),
            config,
            active_index: index.min(deck.len() - 1),
            is_in_view: false,
            has_auto_advanced: false,
            phase: AdvancePhase::Idle,
        }
    }

    /// Currently displayed entry index. Always in `[0, count)`.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Number of entries in the deck this state was built for.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Current intersection status.
    #[must_use]
    pub const fn is_in_view(&self) -> bool {
        self.is_in_view
    }

    /// Whether the auto-advance sequence has ever been triggered.
    /// Latches true for the component's lifetime.
    #[must_use]
    pub const fn has_auto_advanced(&self) -> bool {
        self.has_auto_advanced
    }

    /// Current driver phase.
    #[must_use]
    pub const fn phase(&self) -> AdvancePhase {
        self.phase
    }

    /// True while the driver is pending or stepping.
    #[must_use]
    pub const fn is_auto_advancing(&self) -> bool {
        matches!(
            self.phase,
            AdvancePhase::Pending | AdvancePhase::Running { .. }
        )
    }

    /// The configuration this state was built with.
    #[must_use]
    pub const fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Report an intersection change from the visibility watcher.
    ///
    /// The first transition to visible arms the driver, once per lifetime.
    /// Later visibility flips only track `is_in_view`; user interaction
    /// before first visibility also suppresses the trigger, because it
    /// leaves the phase terminal.
    pub fn visibility_changed(&mut self, in_view: bool) -> Vec<Effect> {
        self.is_in_view = in_view;
        if !in_view || self.has_auto_advanced || self.phase.is_terminal() {
            return Vec::new();
        }
        self.has_auto_advanced = true;
        self.phase = AdvancePhase::Pending;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "showreel.state",
            delay_ms = self.config.start_delay.as_millis() as u64,
            "first visibility, arming auto-advance"
        );
        if self.config.start_delay.is_zero() {
            return self.arm();
        }
        vec![Effect::ArmAfter(self.config.start_delay)]
    }

    /// Start the auto-advance sequence. Called when the start delay
    /// elapses; a no-op unless the driver is still pending (the user may
    /// have navigated during the delay).
    pub fn arm(&mut self) -> Vec<Effect> {
        if self.phase != AdvancePhase::Pending {
            return Vec::new();
        }
        if self.config.reset_policy == ResetPolicy::FromStart {
            self.active_index = 0;
        }
        if self.active_index + 1 >= self.count {
            // Already on the last entry; nothing to step through.
            self.phase = AdvancePhase::Completed;
            COMPLETED_TOTAL.fetch_add(1, Ordering::Relaxed);
            return self.completion_effects(false);
        }
        self.phase = AdvancePhase::Running {
            step: self.active_index,
        };
        STARTED_TOTAL.fetch_add(1, Ordering::Relaxed);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "showreel.state",
            from_index = self.active_index,
            interval_ms = self.config.tick_interval.as_millis() as u64,
            "auto-advance running"
        );
        vec![Effect::StartTimer(self.config.tick_interval)]
    }

    /// Advance one step. Called on each repeating-timer tick; a no-op
    /// unless the driver is running. Landing on the last entry completes
    /// the sequence and cancels the timer in the same transition.
    pub fn tick(&mut self) -> Vec<Effect> {
        let AdvancePhase::Running { step } = self.phase else {
            return Vec::new();
        };
        let next = step + 1;
        self.active_index = next;
        if next + 1 == self.count {
            self.phase = AdvancePhase::Completed;
            COMPLETED_TOTAL.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "showreel.state", "auto-advance completed");
            return self.completion_effects(true);
        }
        self.phase = AdvancePhase::Running { step: next };
        Vec::new()
    }

    /// Advance to the next entry, wrapping at the end. Cancels any
    /// in-flight auto-advance first.
    pub fn next(&mut self) -> Vec<Effect> {
        let effects = self.interrupt();
        self.active_index = (self.active_index + 1) % self.count;
        effects
    }

    /// Go back one entry, wrapping from the first to the last. Cancels
    /// any in-flight auto-advance first.
    pub fn previous(&mut self) -> Vec<Effect> {
        let effects = self.interrupt();
        self.active_index = if self.active_index == 0 {
            self.count - 1
        } else {
            self.active_index - 1
        };
        effects
    }

    /// Jump to a specific entry. Cancels any in-flight auto-advance.
    /// Out-of-range indices are ignored; the UI only offers valid ones.
    pub fn select(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.count {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "showreel.state",
                index,
                count = self.count,
                "ignoring out-of-range selection"
            );
            return Vec::new();
        }
        let effects = self.interrupt();
        self.active_index = index;
        effects
    }

    /// Force a terminal phase on user navigation. Interaction before the
    /// driver ever starts still lands in `Interrupted`, which permanently
    /// suppresses the visibility trigger.
    fn interrupt(&mut self) -> Vec<Effect> {
        match self.phase {
            AdvancePhase::Pending | AdvancePhase::Running { .. } => {
                self.phase = AdvancePhase::Interrupted;
                INTERRUPTED_TOTAL.fetch_add(1, Ordering::Relaxed);
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "showreel.state", "auto-advance interrupted");
                vec![Effect::CancelTimer]
            }
            AdvancePhase::Idle => {
                self.phase = AdvancePhase::Interrupted;
                Vec::new()
            }
            AdvancePhase::Completed | AdvancePhase::Interrupted => Vec::new(),
        }
    }

    fn completion_effects(&self, cancel_timer: bool) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if cancel_timer {
            effects.push(Effect::CancelTimer);
        }
        if let Some(delay) = self.config.scroll_past_delay {
            effects.push(Effect::ScrollPast(delay));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureEntry;

    fn deck(count: u32) -> FeatureDeck {
        let entries = (1..=count)
            .map(|id| FeatureEntry::new(id, format!("t{id}"), format!("H{id}")).bullet("p"))
            .collect();
        FeatureDeck::new(entries).unwrap()
    }

    fn state(count: u32) -> ShowcaseState {
        ShowcaseState::new(&deck(count), ShowcaseConfig::default())
    }

    fn armed(count: u32) -> ShowcaseState {
        let mut s = state(count);
        assert_eq!(
            s.visibility_changed(true),
            vec![Effect::ArmAfter(Duration::from_millis(500))]
        );
        assert_eq!(
            s.arm(),
            vec![Effect::StartTimer(Duration::from_millis(2000))]
        );
        s
    }

    #[test]
    fn starts_idle_at_index_zero() {
        let s = state(5);
        assert_eq!(s.active_index(), 0);
        assert_eq!(s.phase(), AdvancePhase::Idle);
        assert!(!s.is_in_view());
        assert!(!s.has_auto_advanced());
    }

    #[test]
    fn first_visibility_arms_once() {
        let mut s = state(5);
        assert_eq!(
            s.visibility_changed(true),
            vec![Effect::ArmAfter(Duration::from_millis(500))]
        );
        assert!(s.has_auto_advanced());
        assert_eq!(s.phase(), AdvancePhase::Pending);
        // Later flips only track is_in_view.
        assert!(s.visibility_changed(false).is_empty());
        assert!(!s.is_in_view());
        assert!(s.visibility_changed(true).is_empty());
        assert_eq!(s.phase(), AdvancePhase::Pending);
    }

    #[test]
    fn zero_start_delay_arms_immediately() {
        let config = ShowcaseConfig::default().with_start_delay(Duration::ZERO);
        let mut s = ShowcaseState::new(&deck(3), config);
        assert_eq!(
            s.visibility_changed(true),
            vec![Effect::StartTimer(Duration::from_millis(2000))]
        );
        assert!(matches!(s.phase(), AdvancePhase::Running { step: 0 }));
    }

    #[test]
    fn five_entry_run_completes_on_fourth_tick() {
        let mut s = armed(5);
        for expected in 1..4 {
            assert!(s.tick().is_empty());
            assert_eq!(s.active_index(), expected);
        }
        assert_eq!(s.tick(), vec![Effect::CancelTimer]);
        assert_eq!(s.active_index(), 4);
        assert_eq!(s.phase(), AdvancePhase::Completed);
        // Further ticks are no-ops.
        assert!(s.tick().is_empty());
        assert_eq!(s.active_index(), 4);
    }

    #[test]
    fn next_after_completion_wraps_to_start() {
        let mut s = armed(5);
        for _ in 0..4 {
            s.tick();
        }
        assert_eq!(s.phase(), AdvancePhase::Completed);
        assert!(s.next().is_empty());
        assert_eq!(s.active_index(), 0);
        assert_eq!(s.phase(), AdvancePhase::Completed);
    }

    #[test]
    fn previous_while_running_interrupts_and_cancels() {
        let mut s = armed(5);
        s.tick();
        s.tick();
        assert_eq!(s.active_index(), 2);
        assert_eq!(s.previous(), vec![Effect::CancelTimer]);
        assert_eq!(s.active_index(), 1);
        assert_eq!(s.phase(), AdvancePhase::Interrupted);
        assert!(s.tick().is_empty());
        assert_eq!(s.active_index(), 1);
    }

    #[test]
    fn select_while_pending_cancels_the_armed_start() {
        let mut s = state(5);
        s.visibility_changed(true);
        assert_eq!(s.select(3), vec![Effect::CancelTimer]);
        assert_eq!(s.active_index(), 3);
        assert_eq!(s.phase(), AdvancePhase::Interrupted);
        // The delayed arm now does nothing.
        assert!(s.arm().is_empty());
        assert_eq!(s.phase(), AdvancePhase::Interrupted);
    }

    #[test]
    fn interaction_before_visibility_suppresses_the_trigger() {
        let mut s = state(5);
        assert!(s.next().is_empty());
        assert_eq!(s.active_index(), 1);
        assert_eq!(s.phase(), AdvancePhase::Interrupted);
        assert!(s.visibility_changed(true).is_empty());
        assert!(!s.has_auto_advanced());
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut s = armed(5);
        s.tick();
        assert!(s.select(5).is_empty());
        assert_eq!(s.active_index(), 1);
        assert!(matches!(s.phase(), AdvancePhase::Running { .. }));
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut s = state(5);
        s.previous();
        assert_eq!(s.active_index(), 4);
    }

    #[test]
    fn next_cycles_back_to_start() {
        let mut s = state(5);
        for _ in 0..5 {
            s.next();
        }
        assert_eq!(s.active_index(), 0);
    }

    #[test]
    fn continue_policy_steps_onward_from_initial_index() {
        let config = ShowcaseConfig::default()
            .with_reset_policy(ResetPolicy::Continue)
            .with_start_delay(Duration::ZERO);
        let mut s = ShowcaseState::with_initial_index(&deck(5), config, 2);
        s.visibility_changed(true);
        assert!(matches!(s.phase(), AdvancePhase::Running { step: 2 }));
        assert!(s.tick().is_empty());
        assert_eq!(s.active_index(), 3);
        assert_eq!(s.tick(), vec![Effect::CancelTimer]);
        assert_eq!(s.active_index(), 4);
    }

    #[test]
    fn from_start_policy_rewinds_on_arm() {
        let config = ShowcaseConfig::default().with_start_delay(Duration::ZERO);
        let mut s = ShowcaseState::with_initial_index(&deck(5), config, 3);
        s.visibility_changed(true);
        assert_eq!(s.active_index(), 0);
        assert!(matches!(s.phase(), AdvancePhase::Running { step: 0 }));
    }

    #[test]
    fn single_entry_deck_completes_without_a_timer() {
        let mut s = ShowcaseState::new(&deck(1), ShowcaseConfig::default());
        s.visibility_changed(true);
        assert!(s.arm().is_empty());
        assert_eq!(s.phase(), AdvancePhase::Completed);
        assert_eq!(s.active_index(), 0);
    }

    #[test]
    fn completion_requests_scroll_past_when_configured() {
        let config = ShowcaseConfig::default()
            .with_start_delay(Duration::ZERO)
            .with_scroll_past(Duration::from_millis(800));
        let mut s = ShowcaseState::new(&deck(2), config);
        s.visibility_changed(true);
        assert_eq!(
            s.tick(),
            vec![
                Effect::CancelTimer,
                Effect::ScrollPast(Duration::from_millis(800))
            ]
        );
    }

    #[test]
    fn counters_are_monotonic() {
        let started = auto_advance_started_total();
        let completed = auto_advance_completed_total();
        let interrupted = auto_advance_interrupted_total();
        let mut s = armed(2);
        s.tick();
        let mut s2 = armed(3);
        s2.next();
        assert!(auto_advance_started_total() >= started + 2);
        assert!(auto_advance_completed_total() >= completed + 1);
        assert!(auto_advance_interrupted_total() >= interrupted + 1);
    }
}
