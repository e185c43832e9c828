#![forbid(unsafe_code)]

//! Pure derived display state.
//!
//! [`RenderModel`] is a function of the state machine and the deck; it
//! carries everything a view needs and nothing mutable. Hosts rebuild it
//! after every state transition.

use crate::feature::{FeatureDeck, FeatureEntry};
use crate::state::ShowcaseState;

/// One deck entry paired with its display flags.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    /// The entry itself.
    pub entry: &'a FeatureEntry,
    /// True for the entry at the active index.
    pub is_active: bool,
}

/// Display payload derived from `(ShowcaseState, FeatureDeck)`.
#[derive(Debug, Clone)]
pub struct RenderModel<'a> {
    /// The currently displayed entry.
    pub current: &'a FeatureEntry,
    /// 1-based position of the current entry, for "n of count" chrome.
    pub position: usize,
    /// Total entry count.
    pub count: usize,
    /// `position / count` in `(0, 1]`.
    pub progress: f64,
    /// Every entry with its active flag, in display order.
    pub items: Vec<RenderItem<'a>>,
    /// True while the auto-advance indicator should show.
    pub auto_advancing: bool,
    /// True while the section should stay pinned to the viewport:
    /// in view and the auto-advance sequence not yet finished.
    pub pinned: bool,
}

impl<'a> RenderModel<'a> {
    /// Derive the display payload. Pure; no state is mutated.
    ///
    /// # Panics
    /// Panics if `state` was built for a different deck size.
    #[must_use]
    pub fn derive(state: &ShowcaseState, deck: &'a FeatureDeck) -> Self {
        assert_eq!(
            state.count(),
            deck.len(),
            "state and deck disagree on entry count"
        );
        let active = state.active_index();
        let items = deck
            .iter()
            .enumerate()
            .map(|(index, entry)| RenderItem {
                entry,
                is_active: index == active,
            })
            .collect();
        let terminal = state.phase().is_terminal();
        Self {
            // Index validity is a state-machine invariant.
            current: deck.get(active).expect("active index in range"),
            position: active + 1,
            count: deck.len(),
            progress: (active + 1) as f64 / deck.len() as f64,
            items,
            auto_advancing: state.is_auto_advancing(),
            pinned: state.is_in_view() && !terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShowcaseConfig;
    use crate::feature::FeatureEntry;
    use web_time::Duration;

    fn deck() -> FeatureDeck {
        let entries = (1..=5)
            .map(|id| FeatureEntry::new(id, format!("t{id}"), format!("H{id}")).bullet("p"))
            .collect();
        FeatureDeck::new(entries).unwrap()
    }

    #[test]
    fn derive_reflects_active_index() {
        let deck = deck();
        let mut state = ShowcaseState::new(&deck, ShowcaseConfig::default());
        state.select(2);
        let model = RenderModel::derive(&state, &deck);
        assert_eq!(model.current.id(), 3);
        assert_eq!(model.position, 3);
        assert!((model.progress - 0.6).abs() < f64::EPSILON);
        let active: Vec<bool> = model.items.iter().map(|i| i.is_active).collect();
        assert_eq!(active, [false, false, true, false, false]);
    }

    #[test]
    fn progress_spans_the_deck() {
        let deck = deck();
        let mut state = ShowcaseState::new(&deck, ShowcaseConfig::default());
        assert!((RenderModel::derive(&state, &deck).progress - 0.2).abs() < f64::EPSILON);
        state.select(4);
        assert!((RenderModel::derive(&state, &deck).progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pinned_while_visible_and_unfinished() {
        let deck = deck();
        let config = ShowcaseConfig::default().with_start_delay(Duration::ZERO);
        let mut state = ShowcaseState::new(&deck, config);
        assert!(!RenderModel::derive(&state, &deck).pinned);
        state.visibility_changed(true);
        let model = RenderModel::derive(&state, &deck);
        assert!(model.pinned);
        assert!(model.auto_advancing);
        for _ in 0..4 {
            state.tick();
        }
        let model = RenderModel::derive(&state, &deck);
        assert!(!model.pinned, "completion releases the pin");
        assert!(!model.auto_advancing);
    }
}
