//! Property tests for navigation and driver invariants.

use proptest::prelude::*;

use showreel_core::{
    AdvancePhase, FeatureDeck, FeatureEntry, ShowcaseConfig, ShowcaseState,
};
use web_time::Duration;

fn deck(count: usize) -> FeatureDeck {
    let entries = (1..=count as u32)
        .map(|id| FeatureEntry::new(id, format!("t{id}"), format!("H{id}")).bullet("p"))
        .collect();
    FeatureDeck::new(entries).unwrap()
}

proptest! {
    #[test]
    fn next_count_times_is_the_identity(count in 1usize..12, start in 0usize..12) {
        let deck = deck(count);
        let mut state =
            ShowcaseState::with_initial_index(&deck, ShowcaseConfig::default(), start);
        let home = state.active_index();
        for _ in 0..count {
            state.next();
        }
        prop_assert_eq!(state.active_index(), home);
    }

    #[test]
    fn previous_undoes_next(count in 1usize..12, start in 0usize..12) {
        let deck = deck(count);
        let mut state =
            ShowcaseState::with_initial_index(&deck, ShowcaseConfig::default(), start);
        let home = state.active_index();
        state.next();
        state.previous();
        prop_assert_eq!(state.active_index(), home);
    }

    #[test]
    fn previous_from_zero_wraps_to_last(count in 1usize..12) {
        let deck = deck(count);
        let mut state = ShowcaseState::new(&deck, ShowcaseConfig::default());
        state.previous();
        prop_assert_eq!(state.active_index(), count - 1);
    }

    #[test]
    fn select_lands_exactly_where_asked(count in 1usize..12, index in 0usize..12) {
        let deck = deck(count);
        let mut state = ShowcaseState::new(&deck, ShowcaseConfig::default());
        let before = state.active_index();
        state.select(index);
        if index < count {
            prop_assert_eq!(state.active_index(), index);
        } else {
            prop_assert_eq!(state.active_index(), before);
        }
    }

    #[test]
    fn active_index_stays_in_bounds_under_any_operation_sequence(
        count in 1usize..10,
        ops in proptest::collection::vec(0u8..4, 0..40),
        args in proptest::collection::vec(0usize..16, 0..40),
    ) {
        let deck = deck(count);
        let config = ShowcaseConfig::default().with_start_delay(Duration::ZERO);
        let mut state = ShowcaseState::new(&deck, config);
        for (op, arg) in ops.iter().zip(args.iter()) {
            match op {
                0 => { state.next(); }
                1 => { state.previous(); }
                2 => { state.select(*arg); }
                _ => { state.visibility_changed(arg % 2 == 0); state.tick(); }
            }
            prop_assert!(state.active_index() < count);
        }
    }

    #[test]
    fn auto_advance_is_monotonic_and_terminates(count in 2usize..10) {
        let deck = deck(count);
        let config = ShowcaseConfig::default().with_start_delay(Duration::ZERO);
        let mut state = ShowcaseState::new(&deck, config);
        state.visibility_changed(true);
        let mut previous = state.active_index();
        for _ in 0..count {
            state.tick();
            prop_assert!(state.active_index() >= previous);
            previous = state.active_index();
        }
        prop_assert_eq!(state.phase(), AdvancePhase::Completed);
        prop_assert_eq!(state.active_index(), count - 1);
    }
}
