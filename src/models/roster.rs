//! Roster: the owning collection of dates, workshops and participants.
//!
//! The roster hands out sequential ids, keeps the one-time shuffled
//! processing order, and is the only place where an assignment is created
//! or removed. Every mutation touches the participant's schedule slot and
//! the workshop's occupancy list together, so the two halves always agree.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use super::{AssignmentRecord, Participant, ParticipantId, PreferenceVector, Workshop, WorkshopId};
use crate::error::{DivisionError, Result};

/// Dates, workshops and participants of one division run.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    dates: Vec<String>,
    workshops: Vec<Workshop>,
    participants: Vec<Participant>,
    order: Vec<ParticipantId>,
}

impl Roster {
    /// Creates an empty roster over the given dates (in their fixed order).
    pub fn new<D, S>(dates: D) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for date in dates {
            let date = date.into();
            if !unique.contains(&date) {
                unique.push(date);
            }
        }
        Self {
            dates: unique,
            ..Default::default()
        }
    }

    /// The global dates in order.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Adds a workshop and returns its id.
    ///
    /// Offered dates are stored in the global date order; a date outside the
    /// global set is dropped with a warning.
    pub fn add_workshop<A, D>(
        &mut self,
        name: impl Into<String>,
        supervisor: impl Into<String>,
        age_groups: A,
        max_per_day: usize,
        dates: D,
    ) -> WorkshopId
    where
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        let id = self.workshops.len();
        let offered: Vec<String> = dates.into_iter().map(|d| d.as_ref().to_string()).collect();
        let name = name.into();

        for date in &offered {
            if !self.dates.contains(date) {
                warn!("Workshop {} offers unknown date {}, ignoring it", name, date);
            }
        }

        let mut workshop = Workshop::new(id, name)
            .with_supervisor(supervisor)
            .with_capacity(max_per_day);
        for age_group in age_groups {
            workshop = workshop.with_age_group(age_group);
        }
        for date in self.dates.iter().filter(|d| offered.contains(d)) {
            workshop = workshop.with_date(date.as_str());
        }

        self.workshops.push(workshop);
        id
    }

    /// Adds a participant with raw preference scores and returns its id.
    ///
    /// Scores are normalized here, once. The participant is appended to the
    /// processing order.
    pub fn add_participant<P>(
        &mut self,
        name: impl Into<String>,
        age_group: impl Into<String>,
        trupp: impl Into<String>,
        raw_points: P,
    ) -> ParticipantId
    where
        P: IntoIterator<Item = (WorkshopId, u32)>,
    {
        let id = self.participants.len();
        let participant = Participant::new(
            id,
            name,
            age_group,
            trupp,
            PreferenceVector::from_raw(raw_points),
            self.dates.iter().cloned(),
        );
        self.participants.push(participant);
        self.order.push(id);
        id
    }

    /// Shuffles the processing order. Called once after loading.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /// Participant ids in processing order.
    pub fn processing_order(&self) -> &[ParticipantId] {
        &self.order
    }

    /// All workshops, indexed by id.
    pub fn workshops(&self) -> &[Workshop] {
        &self.workshops
    }

    /// All participants, indexed by id.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Looks up a workshop.
    pub fn workshop(&self, id: WorkshopId) -> Option<&Workshop> {
        self.workshops.get(id)
    }

    /// Looks up a participant.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// First workshop with the given display name.
    pub fn workshop_by_name(&self, name: &str) -> Option<&Workshop> {
        self.workshops.iter().find(|w| w.name == name)
    }

    /// Places a participant into a workshop on a date.
    ///
    /// Both halves are checked before either is changed: the date must be
    /// free for the participant, the workshop must not already be in the
    /// participant's schedule, and the workshop must offer the date with
    /// room left.
    pub fn assign(
        &mut self,
        participant: ParticipantId,
        workshop: WorkshopId,
        date: &str,
    ) -> Result<()> {
        let p = self
            .participants
            .get(participant)
            .ok_or(DivisionError::UnknownParticipant(participant))?;
        if !p.schedule().iter().any(|s| s.date == date) {
            return Err(DivisionError::UnknownDate {
                participant,
                date: date.to_string(),
            });
        }
        if p.workshop_on(date).is_some() {
            return Err(DivisionError::SlotOccupied {
                participant,
                date: date.to_string(),
            });
        }
        if p.is_scheduled_for(workshop) {
            return Err(DivisionError::RepeatedWorkshop {
                participant,
                workshop,
            });
        }

        let w = self
            .workshops
            .get_mut(workshop)
            .ok_or(DivisionError::UnknownWorkshop(workshop))?;
        w.assign_participant(date, participant)?;

        let p = &mut self.participants[participant];
        p.set_slot(date, Some(workshop));
        info!(
            "{} assigned for {} on {} with {:.1} points",
            p.name,
            w.name,
            date,
            p.preferences().get(workshop).unwrap_or(0.0)
        );
        Ok(())
    }

    /// Removes whatever a participant holds on a date.
    ///
    /// Returns the workshop that was removed, `None` if the slot was
    /// already free.
    pub fn unassign(
        &mut self,
        participant: ParticipantId,
        date: &str,
    ) -> Result<Option<WorkshopId>> {
        let p = self
            .participants
            .get_mut(participant)
            .ok_or(DivisionError::UnknownParticipant(participant))?;
        let Some(workshop) = p.workshop_on(date) else {
            return Ok(None);
        };
        p.set_slot(date, None);

        if let Some(w) = self.workshops.get_mut(workshop) {
            w.remove_participant(date, participant);
            info!("{} removed from {} on {}", p.name, w.name, date);
        }
        Ok(Some(workshop))
    }

    /// Participants with no workshop on any date.
    pub fn unscheduled(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|p| p.assigned_count() == 0)
            .map(|p| p.id)
            .collect()
    }

    /// Every placement as an output row.
    ///
    /// Ordered by date (global order), then workshop id, then placement order.
    pub fn assignments(&self) -> Vec<AssignmentRecord> {
        let mut rows = Vec::new();
        for date in &self.dates {
            for workshop in &self.workshops {
                for &pid in workshop.participants_on(date) {
                    let p = &self.participants[pid];
                    rows.push(AssignmentRecord {
                        date: date.clone(),
                        workshop_id: workshop.id,
                        workshop: workshop.name.clone(),
                        participant_id: pid,
                        participant: p.name.clone(),
                        age_group: p.age_group.clone(),
                        trupp: p.trupp.clone(),
                        points: p.preferences().get(workshop.id).unwrap_or(0.0),
                    });
                }
            }
        }
        rows
    }
}
