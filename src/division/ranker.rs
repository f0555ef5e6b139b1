//! Demand ranker.
//!
//! Orders workshops by how strongly the still-unassigned participants want
//! them. The demand of a workshop is the sum of the normalized scores of
//! every unassigned participant that is currently available for it.
//! Handling the most contested workshop first keeps a popular workshop from
//! running out of good matches later in the run.

use std::cmp::Ordering;

use tracing::debug;

use super::eligibility::is_available;
use crate::models::{ParticipantId, Roster, WorkshopId};

/// Ranks workshops by aggregate unmet demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandRanker;

impl DemandRanker {
    /// Creates a ranker.
    pub fn new() -> Self {
        Self
    }

    /// Demand for one workshop among the given participants.
    ///
    /// A participant without a score for the workshop contributes nothing
    /// (missing scores are reported once, before the run).
    pub fn demand(
        &self,
        roster: &Roster,
        workshop: WorkshopId,
        unassigned: &[ParticipantId],
    ) -> f64 {
        let Some(w) = roster.workshop(workshop) else {
            return 0.0;
        };
        unassigned
            .iter()
            .filter_map(|&id| roster.participant(id))
            .filter(|p| is_available(p, w))
            .filter_map(|p| p.points(workshop))
            .sum()
    }

    /// Every workshop with its demand, highest first.
    ///
    /// The sort is stable, so equal demand keeps workshop id order.
    pub fn ranked_demand(
        &self,
        roster: &Roster,
        unassigned: &[ParticipantId],
    ) -> Vec<(WorkshopId, f64)> {
        let mut ranked: Vec<(WorkshopId, f64)> = roster
            .workshops()
            .iter()
            .map(|w| (w.id, self.demand(roster, w.id, unassigned)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        debug!("Workshop demand ranking: {:?}", ranked);
        ranked
    }

    /// Workshop ids, highest demand first.
    pub fn rank(&self, roster: &Roster, unassigned: &[ParticipantId]) -> Vec<WorkshopId> {
        self.ranked_demand(roster, unassigned)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new(["Sa", "Mi"]);
        roster.add_workshop("Kochen", "", ["GuSp"], 2, ["Sa", "Mi"]);
        roster.add_workshop("Klettern", "", ["GuSp"], 2, ["Sa", "Mi"]);
        roster.add_workshop("Funk", "", ["CaEx"], 2, ["Sa", "Mi"]);
        roster.add_participant("Lena", "GuSp", "", vec![(0, 1), (1, 3)]);
        roster.add_participant("Jonas", "GuSp", "", vec![(0, 1), (1, 1)]);
        roster
    }

    #[test]
    fn test_demand_sums_available_scores() {
        let roster = roster();
        let ranker = DemandRanker::new();
        // Kochen: 25 + 50, Klettern: 75 + 50
        assert!((ranker.demand(&roster, 0, &[0, 1]) - 75.0).abs() < 1e-9);
        assert!((ranker.demand(&roster, 1, &[0, 1]) - 125.0).abs() < 1e-9);
        // Funk: nobody eligible by age
        assert_eq!(ranker.demand(&roster, 2, &[0, 1]), 0.0);
        assert_eq!(ranker.demand(&roster, 9, &[0, 1]), 0.0);
    }

    #[test]
    fn test_rank_descending_zero_last() {
        let roster = roster();
        let ranking = DemandRanker::new().rank(&roster, &[0, 1]);
        assert_eq!(ranking, vec![1, 0, 2]);
    }

    #[test]
    fn test_only_unassigned_count() {
        let roster = roster();
        let ranking = DemandRanker::new().ranked_demand(&roster, &[1]);
        // Jonas alone: 50 / 50 tie keeps input order
        assert_eq!(ranking[0].0, 0);
        assert_eq!(ranking[1].0, 1);
        assert!((ranking[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_participant_drops_out() {
        let mut roster = roster();
        roster.assign(0, 1, "Sa").unwrap();
        let ranker = DemandRanker::new();
        // Lena already attends Klettern, only Jonas counts
        assert!((ranker.demand(&roster, 1, &[0, 1]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_unassigned() {
        let roster = roster();
        let ranked = DemandRanker::new().ranked_demand(&roster, &[]);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|(_, d)| *d == 0.0));
        assert_eq!(ranked.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
