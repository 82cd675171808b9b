//! Property tests for evaluation cadence
//!
//! Invariants of the milestone table and trigger composed the way the hook
//! uses them:
//! - resolved intervals agree with a linear reference scan
//! - interval stays at the base value before the first milestone
//! - the trigger fires at most once per decision point and always at the end

use evaluar::{EvalTrigger, MilestoneTable};
use proptest::collection::vec;
use proptest::prelude::*;

/// Strictly increasing positive milestones with positive intervals
fn schedule() -> impl Strategy<Value = Vec<(u64, u64)>> {
    vec((1u64..200, 1u64..20), 0..8).prop_map(|mut entries| {
        entries.sort_by_key(|&(m, _)| m);
        entries.dedup_by_key(|&mut (m, _)| m);
        entries
    })
}

fn reference_interval(entries: &[(u64, u64)], start_interval: u64, progress: u64) -> u64 {
    entries
        .iter()
        .rev()
        .find(|&&(m, _)| m <= progress)
        .map_or(start_interval, |&(_, i)| i)
}

proptest! {
    #[test]
    fn prop_resolve_agrees_with_linear_scan(
        entries in schedule(),
        start_interval in 1u64..20,
        progress in 0u64..400,
    ) {
        let table = MilestoneTable::new(start_interval, &entries).unwrap();
        prop_assert_eq!(
            table.resolve(progress),
            reference_interval(&entries, start_interval, progress)
        );
    }

    #[test]
    fn prop_base_interval_before_first_milestone(
        entries in schedule(),
        start_interval in 1u64..20,
        progress in 0u64..400,
    ) {
        let table = MilestoneTable::new(start_interval, &entries).unwrap();
        let first = entries.first().map_or(u64::MAX, |&(m, _)| m);
        if progress < first {
            prop_assert_eq!(table.resolve(progress), start_interval);
        }
    }

    #[test]
    fn prop_resolved_milestone_is_monotone(
        entries in schedule(),
        start_interval in 1u64..20,
        progress in 0u64..400,
    ) {
        let table = MilestoneTable::new(start_interval, &entries).unwrap();
        // The milestone owning `progress` never moves backwards.
        let owner = |p: u64| entries.iter().rev().find(|&&(m, _)| m <= p).map_or(0, |&(m, _)| m);
        prop_assert!(owner(progress) <= owner(progress + 1));
        // And resolve reflects the owner's interval on both sides.
        prop_assert_eq!(table.resolve(progress), reference_interval(&entries, start_interval, progress));
        prop_assert_eq!(
            table.resolve(progress + 1),
            reference_interval(&entries, start_interval, progress + 1)
        );
    }

    #[test]
    fn prop_trigger_fires_on_interval_grid(
        interval in 1u64..20,
        total in 2u64..500,
    ) {
        let trigger = EvalTrigger::new(None, interval);
        let fired: Vec<u64> = (0..total).filter(|&p| trigger.should_evaluate(p, total)).collect();

        for &p in &fired {
            prop_assert!((p + 1) % interval == 0 || p + 1 == total);
        }
        // The run always ends with an evaluation.
        prop_assert_eq!(fired.last().copied(), Some(total - 1));
    }

    #[test]
    fn prop_trigger_respects_start(
        interval in 1u64..20,
        start in 1u64..100,
        total in 2u64..500,
    ) {
        let trigger = EvalTrigger::new(Some(start), interval);
        for p in 0..total {
            if p + 1 < start && p + 1 != total {
                prop_assert!(!trigger.should_evaluate(p, total));
            }
        }
    }

    #[test]
    fn prop_cadence_simulation_matches_reference(
        entries in schedule(),
        start_interval in 1u64..10,
        total in 2u64..200,
    ) {
        let table = MilestoneTable::new(start_interval, &entries).unwrap();
        let mut trigger = EvalTrigger::new(None, start_interval);

        let mut fired = Vec::new();
        for p in 0..total {
            trigger.set_interval(table.resolve(p));
            if trigger.should_evaluate(p, total) {
                fired.push(p);
            }
        }

        let reference: Vec<u64> = (0..total)
            .filter(|&p| {
                let interval = reference_interval(&entries, start_interval, p);
                (p + 1) % interval == 0 || p + 1 == total
            })
            .collect();
        prop_assert_eq!(fired, reference);
    }
}
