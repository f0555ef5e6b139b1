//! Preference-driven assignment engine.
//!
//! # Algorithm
//!
//! Starting from the roster's shuffled processing order, one step:
//!
//! 1. Rebuild the unassigned set without fully assigned participants.
//! 2. Stop if it is empty.
//! 3. Rank workshops by demand ([`DemandRanker`]).
//! 4. For the top workshop, pick the unassigned, available participant with
//!    the strictly highest score above the willingness threshold, and place
//!    them on their free date where the workshop has the fewest occupants
//!    (earliest date on ties).
//!
//! Ranking is redone after every single commit, since one placement can
//! change which workshop is most in demand.
//!
//! A step that finds no participant stalls the engine. A stalled engine
//! makes one pass over every workshop; if that commits anything the engine
//! runs on, otherwise it is done and every participant that is still
//! incomplete is rolled back.
//!
//! # Termination
//! Each commit fills one of finitely many slots, and a pass without a
//! commit ends the run.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::eligibility::is_available;
use super::ranker::DemandRanker;
use super::rollback;
use crate::config::{DivisionConfig, DEFAULT_MIN_SCORE};
use crate::models::{ParticipantId, Roster, WorkshopId};

/// Engine state over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Steps are committing assignments.
    Running,
    /// The last step found no participant for the top workshop.
    Stalled,
    /// Nothing left to do.
    Done,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionOutcome {
    /// Final state (always [`EngineState::Done`] after [`AssignmentEngine::run`]).
    pub state: EngineState,
    /// Number of committed assignments, including ones later rolled back.
    pub commits: usize,
    /// Number of full passes made after a stall.
    pub stalled_passes: usize,
    /// Participants that could not be fully scheduled and were cleared.
    pub leftovers: Vec<ParticipantId>,
    /// Placements removed by rollback.
    pub cleared_slots: usize,
}

impl DivisionOutcome {
    /// Whether every participant was fully scheduled.
    pub fn is_complete(&self) -> bool {
        self.leftovers.is_empty()
    }
}

/// Greedy, demand-ordered assignment engine.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    ranker: DemandRanker,
    min_score: f64,
}

impl AssignmentEngine {
    /// Creates an engine with the default willingness threshold.
    pub fn new() -> Self {
        Self {
            ranker: DemandRanker::new(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    /// Creates an engine from a config.
    pub fn from_config(config: &DivisionConfig) -> Self {
        Self::new().with_min_score(config.min_score)
    }

    /// Sets the willingness threshold: only scores strictly above it count.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score.max(0.0);
        self
    }

    /// The willingness threshold.
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Runs the division to completion.
    pub fn run(&self, roster: &mut Roster) -> DivisionOutcome {
        info!(
            "Starting division of {} participants into {} workshops",
            roster.participants().len(),
            roster.workshops().len()
        );

        let mut unassigned = roster.processing_order().to_vec();
        let mut state = EngineState::Running;
        let mut commits = 0;
        let mut stalled_passes = 0;

        let leftovers = loop {
            unassigned = remaining(roster, &unassigned);
            if unassigned.is_empty() {
                break Vec::new();
            }

            state = match state {
                EngineState::Running => {
                    if self.step(roster, &unassigned) {
                        commits += 1;
                        EngineState::Running
                    } else {
                        debug!("Engine stalled with {} unassigned", unassigned.len());
                        EngineState::Stalled
                    }
                }
                EngineState::Stalled => {
                    stalled_passes += 1;
                    let committed = self.stalled_pass(roster, &unassigned);
                    if committed == 0 {
                        break unassigned;
                    }
                    commits += committed;
                    EngineState::Running
                }
                EngineState::Done => break unassigned,
            };
        };

        let cleared_slots = if leftovers.is_empty() {
            info!("All {} participants fully scheduled", roster.participants().len());
            0
        } else {
            warn!(
                "{} participants could not be fully scheduled",
                leftovers.len()
            );
            rollback::clear_all(roster, &leftovers)
        };

        DivisionOutcome {
            state: EngineState::Done,
            commits,
            stalled_passes,
            leftovers,
            cleared_slots,
        }
    }

    /// One engine step: rank, then try the top workshop.
    ///
    /// Returns whether an assignment was committed.
    pub fn step(&self, roster: &mut Roster, unassigned: &[ParticipantId]) -> bool {
        let ranking = self.ranker.rank(roster, unassigned);
        match ranking.first() {
            Some(&top) => self.try_assign(roster, top, unassigned),
            None => false,
        }
    }

    /// The unassigned participant with the strictly highest score for the
    /// workshop among those available for it.
    ///
    /// Equal normalized scores are decided by the higher raw score; a full
    /// tie keeps the earlier participant.
    pub fn best_participant(
        &self,
        roster: &Roster,
        workshop: WorkshopId,
        unassigned: &[ParticipantId],
    ) -> Option<ParticipantId> {
        let w = roster.workshop(workshop)?;
        let mut best: Option<(ParticipantId, f64, u32)> = None;

        for &id in unassigned {
            let Some(p) = roster.participant(id) else {
                continue;
            };
            if !is_available(p, w) {
                continue;
            }
            let Some(points) = p.points(workshop) else {
                continue;
            };
            if points <= self.min_score {
                continue;
            }
            let raw = p.preferences().raw(workshop).unwrap_or(0);
            let better = match best {
                None => true,
                Some((_, b, b_raw)) => points > b || (points == b && raw > b_raw),
            };
            if better {
                best = Some((id, points, raw));
            }
        }

        if let Some((id, points, _)) = best {
            debug!(
                "Participant {} has a maximum of {:.1} points for {}",
                id, points, w.name
            );
        }
        best.map(|(id, _, _)| id)
    }

    /// One attempt per workshop, in current rank order.
    fn stalled_pass(&self, roster: &mut Roster, unassigned: &[ParticipantId]) -> usize {
        let ranking = self.ranker.rank(roster, unassigned);
        let committed = ranking
            .into_iter()
            .filter(|&w| self.try_assign(roster, w, unassigned))
            .count();
        debug!("Stalled pass committed {} assignment(s)", committed);
        committed
    }

    fn try_assign(
        &self,
        roster: &mut Roster,
        workshop: WorkshopId,
        unassigned: &[ParticipantId],
    ) -> bool {
        let Some(participant) = self.best_participant(roster, workshop, unassigned) else {
            return false;
        };

        let date = match (roster.participant(participant), roster.workshop(workshop)) {
            (Some(p), Some(w)) => w.least_occupied_date(p.free_dates()).map(str::to_string),
            _ => None,
        };
        let Some(date) = date else {
            warn!(
                "No free date for participant {} in workshop {}",
                participant, workshop
            );
            return false;
        };

        match roster.assign(participant, workshop, &date) {
            Ok(()) => true,
            Err(e) => {
                error!("Assignment refused: {}", e);
                false
            }
        }
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh copy of `unassigned` without fully assigned participants.
fn remaining(roster: &Roster, unassigned: &[ParticipantId]) -> Vec<ParticipantId> {
    unassigned
        .iter()
        .copied()
        .filter(|&id| match roster.participant(id) {
            Some(p) if p.is_fully_assigned() => {
                debug!("Participant {} is fully assigned", p);
                false
            }
            Some(_) => true,
            None => false,
        })
        .collect()
}
