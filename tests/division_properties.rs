//! Property tests: any random roster run through the engine ends in a
//! consistent division.
//!
//! Capacity holds after every engine step. After a run, nobody attends a
//! workshop twice, every placement is allowed for the participant, both
//! sides of every placement agree, and each participant is either fully
//! scheduled or not scheduled at all.

use std::collections::HashSet;

use proptest::prelude::*;
use workshop_division::models::PreferenceVector;
use workshop_division::{AssignmentEngine, Roster};

const DATES: [&str; 3] = ["Sa", "Mi", "So"];
const AGES: [&str; 2] = ["GuSp", "CaEx"];
const MAX_WORKSHOPS: usize = 6;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Capacity, admitted age groups and offered dates of a workshop.
fn arb_workshop() -> impl Strategy<Value = (usize, [bool; 2], [bool; 3])> {
    (0usize..4, any::<[bool; 2]>(), any::<[bool; 3]>())
}

/// Age group index and raw points per workshop slot.
fn arb_participant() -> impl Strategy<Value = (usize, Vec<Option<u32>>)> {
    (
        0usize..AGES.len(),
        prop::collection::vec(prop::option::of(0u32..6), MAX_WORKSHOPS),
    )
}

fn build(
    date_count: usize,
    workshops: &[(usize, [bool; 2], [bool; 3])],
    participants: &[(usize, Vec<Option<u32>>)],
) -> Roster {
    let mut roster = Roster::new(DATES[..date_count].iter().copied());

    for (i, (capacity, ages, dates)) in workshops.iter().enumerate() {
        let ages: Vec<&str> = AGES
            .iter()
            .zip(ages)
            .filter(|(_, on)| **on)
            .map(|(a, _)| *a)
            .collect();
        let dates: Vec<&str> = DATES
            .iter()
            .zip(dates)
            .filter(|(_, on)| **on)
            .map(|(d, _)| *d)
            .collect();
        roster.add_workshop(format!("W{i}"), "", ages, *capacity, dates);
    }

    for (i, (age, points)) in participants.iter().enumerate() {
        let raw: Vec<(usize, u32)> = points
            .iter()
            .take(workshops.len())
            .enumerate()
            .filter_map(|(w, p)| p.map(|p| (w, p)))
            .collect();
        roster.add_participant(format!("P{i}"), AGES[*age], "T", raw);
    }
    roster
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every invariant of a finished division holds for random rosters.
    #[test]
    fn run_leaves_consistent_division(
        date_count in 1usize..=3,
        workshops in prop::collection::vec(arb_workshop(), 0..MAX_WORKSHOPS),
        participants in prop::collection::vec(arb_participant(), 0..16),
        seed in any::<u64>(),
    ) {
        use rand::SeedableRng;

        let mut roster = build(date_count, &workshops, &participants);
        roster.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));
        let places: usize = roster.workshops().iter().map(|w| w.max_participants()).sum();

        let outcome = AssignmentEngine::new().run(&mut roster);

        // termination: each commit fills a distinct slot
        prop_assert!(outcome.commits <= places);

        for w in roster.workshops() {
            for day in w.days() {
                prop_assert!(day.participants.len() <= w.max_per_day);
                for &pid in &day.participants {
                    let p = roster.participant(pid).unwrap();
                    prop_assert_eq!(p.workshop_on(&day.date), Some(w.id));
                }
            }
        }

        for p in roster.participants() {
            let held: Vec<_> = p.assignments().collect();
            let distinct: HashSet<_> = held.iter().map(|(_, w)| *w).collect();
            prop_assert_eq!(distinct.len(), held.len());

            for (date, wid) in &held {
                let w = roster.workshop(*wid).unwrap();
                prop_assert!(w.admits(&p.age_group));
                prop_assert!(w.offers(date));
                prop_assert!(w.participants_on(date).contains(&p.id));
                prop_assert!(p.preferences().get(*wid).unwrap_or(0.0) > 0.0);
            }

            prop_assert!(held.is_empty() || p.is_fully_assigned());
        }

        let incomplete: Vec<_> = roster
            .participants()
            .iter()
            .filter(|p| !p.is_fully_assigned())
            .map(|p| p.id)
            .collect();
        let mut leftovers = outcome.leftovers.clone();
        leftovers.sort();
        prop_assert_eq!(leftovers, incomplete);
    }

    /// Capacity and two-sided agreement hold after every single step.
    #[test]
    fn capacity_holds_after_each_step(
        date_count in 1usize..=3,
        workshops in prop::collection::vec(arb_workshop(), 1..MAX_WORKSHOPS),
        participants in prop::collection::vec(arb_participant(), 1..16),
    ) {
        let mut roster = build(date_count, &workshops, &participants);
        let places: usize = roster.workshops().iter().map(|w| w.max_participants()).sum();
        let engine = AssignmentEngine::new();

        let mut steps = 0;
        loop {
            let unassigned: Vec<_> = roster
                .processing_order()
                .iter()
                .copied()
                .filter(|&id| !roster.participant(id).unwrap().is_fully_assigned())
                .collect();
            if unassigned.is_empty() || !engine.step(&mut roster, &unassigned) {
                break;
            }
            steps += 1;
            prop_assert!(steps <= places);

            for w in roster.workshops() {
                for day in w.days() {
                    prop_assert!(day.participants.len() <= w.max_per_day);
                    for &pid in &day.participants {
                        let p = roster.participant(pid).unwrap();
                        prop_assert_eq!(p.workshop_on(&day.date), Some(w.id));
                    }
                }
            }
        }
    }

    /// Normalized scores of a willing participant add up to 100.
    #[test]
    fn normalized_scores_sum_to_total(
        raw in prop::collection::vec((0usize..20, 0u32..50), 0..10),
    ) {
        let prefs = PreferenceVector::from_raw(raw.clone());
        let raw_sum: u32 = {
            let mut seen = std::collections::BTreeMap::new();
            for (w, p) in &raw {
                seen.insert(*w, *p);
            }
            seen.values().sum()
        };

        if raw_sum == 0 {
            prop_assert!(prefs.is_unwilling());
        } else {
            prop_assert!((prefs.total() - PreferenceVector::TOTAL).abs() < 1e-6);
        }
    }
}
