//! Division quality metrics.
//!
//! Computed from the roster after a run.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total places | Σ max_per_day × offered dates |
//! | Scheduled rate | Fully scheduled / participants |
//! | Avg points | Mean normalized score over all placements |
//! | Fill rate | Placements / places, per workshop |
//! | Preference share | Workshop's share of all preference points |

use serde::Serialize;
use std::fmt;

use super::DivisionOutcome;
use crate::models::{Roster, WorkshopId};

/// Per-workshop figures.
#[derive(Debug, Clone, Serialize)]
pub struct WorkshopStats {
    /// Workshop id.
    pub id: WorkshopId,
    /// Display name.
    pub name: String,
    /// Places over all offered dates.
    pub places: usize,
    /// Placements over all offered dates.
    pub occupied: usize,
    /// `occupied / places` (0.0 when there are no places).
    pub fill_rate: f64,
    /// Share of all participants' preference points given to this
    /// workshop (0.0..1.0).
    pub preference_share: f64,
}

/// Summary of a finished division.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionReport {
    /// Number of workshops.
    pub workshop_count: usize,
    /// Places across all workshops and dates.
    pub total_places: usize,
    /// Number of participants.
    pub participant_count: usize,
    /// Participants with a workshop on every date.
    pub fully_scheduled: usize,
    /// Names of participants that need manual follow-up.
    pub unscheduled: Vec<String>,
    /// Mean normalized points per placement.
    pub avg_points: f64,
    /// Committed assignments during the run, including rolled back ones.
    pub commits: usize,
    /// Per-workshop figures, by id.
    pub workshops: Vec<WorkshopStats>,
}

impl DivisionReport {
    /// Computes the report for a roster after a run.
    pub fn calculate(roster: &Roster, outcome: &DivisionOutcome) -> Self {
        let total_points: f64 = roster
            .participants()
            .iter()
            .map(|p| p.preferences().total())
            .sum();

        let workshops: Vec<WorkshopStats> = roster
            .workshops()
            .iter()
            .map(|w| {
                let places = w.max_participants();
                let occupied = w.total_occupancy();
                let points: f64 = roster
                    .participants()
                    .iter()
                    .filter_map(|p| p.preferences().get(w.id))
                    .sum();
                WorkshopStats {
                    id: w.id,
                    name: w.name.clone(),
                    places,
                    occupied,
                    fill_rate: if places == 0 {
                        0.0
                    } else {
                        occupied as f64 / places as f64
                    },
                    preference_share: if total_points > 0.0 {
                        points / total_points
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        let rows = roster.assignments();
        let avg_points = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.points).sum::<f64>() / rows.len() as f64
        };

        let unscheduled = outcome
            .leftovers
            .iter()
            .filter_map(|&id| roster.participant(id))
            .map(|p| p.name.clone())
            .collect();

        Self {
            workshop_count: roster.workshops().len(),
            total_places: workshops.iter().map(|w| w.places).sum(),
            participant_count: roster.participants().len(),
            fully_scheduled: roster
                .participants()
                .iter()
                .filter(|p| p.is_fully_assigned())
                .count(),
            unscheduled,
            avg_points,
            commits: outcome.commits,
            workshops,
        }
    }

    /// Fraction of participants fully scheduled (1.0 for an empty roster).
    pub fn scheduled_rate(&self) -> f64 {
        if self.participant_count == 0 {
            1.0
        } else {
            self.fully_scheduled as f64 / self.participant_count as f64
        }
    }

    /// Whether the division meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_scheduled_rate: f64, min_avg_points: f64) -> bool {
        self.scheduled_rate() >= min_scheduled_rate && self.avg_points >= min_avg_points
    }
}

impl fmt::Display for DivisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} workshops with {} places, {}/{} participants fully scheduled, {:.1} avg points",
            self.workshop_count,
            self.total_places,
            self.fully_scheduled,
            self.participant_count,
            self.avg_points
        )?;
        for w in &self.workshops {
            writeln!(
                f,
                "  {}: {}/{} ({:.0}%), preference share {:.1}%",
                w.name,
                w.occupied,
                w.places,
                w.fill_rate * 100.0,
                w.preference_share * 100.0
            )?;
        }
        if !self.unscheduled.is_empty() {
            write!(f, "  unscheduled: {}", self.unscheduled.join(", "))?;
        }
        Ok(())
    }
}
