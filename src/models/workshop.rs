//! Workshop model and per-date capacity tracking.
//!
//! A workshop is offered on a subset of the global dates, admits a set of
//! age groups, and holds at most `max_per_day` participants on each date it
//! offers. The occupancy lists are the workshop-side half of an assignment;
//! the participant's schedule is the other half. Both are only changed
//! together through [`Roster`](super::Roster).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ParticipantId;
use crate::error::{DivisionError, Result};

/// Stable workshop identifier, assigned sequentially by the roster.
pub type WorkshopId = usize;

/// Participants placed in a workshop on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRoster {
    /// Date tag.
    pub date: String,
    /// Placed participants, in placement order.
    pub participants: Vec<ParticipantId>,
}

/// A recurring workshop with per-date capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workshop {
    /// Identifier, also the key in preference maps.
    pub id: WorkshopId,
    /// Display name. Not unique, not a key.
    pub name: String,
    /// Supervisor label.
    pub supervisor: String,
    /// Age groups admitted to this workshop.
    pub age_groups: BTreeSet<String>,
    /// Maximum number of participants on each offered date.
    pub max_per_day: usize,
    /// Occupancy per offered date, in the global date order.
    days: Vec<DayRoster>,
}

impl Workshop {
    /// Creates a workshop that is offered on no date yet.
    pub fn new(id: WorkshopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            supervisor: String::new(),
            age_groups: BTreeSet::new(),
            max_per_day: 0,
            days: Vec::new(),
        }
    }

    /// Sets the supervisor label.
    pub fn with_supervisor(mut self, supervisor: impl Into<String>) -> Self {
        self.supervisor = supervisor.into();
        self
    }

    /// Admits an age group.
    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_groups.insert(age_group.into());
        self
    }

    /// Sets the per-date capacity.
    pub fn with_capacity(mut self, max_per_day: usize) -> Self {
        self.max_per_day = max_per_day;
        self
    }

    /// Offers the workshop on a date. Dates are kept in insertion order,
    /// which the roster makes equal to the global date order.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        if !self.offers(&date) {
            self.days.push(DayRoster {
                date,
                participants: Vec::new(),
            });
        }
        self
    }

    /// Whether the age group may attend.
    pub fn admits(&self, age_group: &str) -> bool {
        self.age_groups.contains(age_group)
    }

    /// Whether the workshop takes place on the date.
    pub fn offers(&self, date: &str) -> bool {
        self.day(date).is_some()
    }

    /// Offered dates in order.
    pub fn offered_dates(&self) -> impl Iterator<Item = &str> + '_ {
        self.days.iter().map(|d| d.date.as_str())
    }

    /// Number of offered dates.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Occupancy of every offered date.
    pub fn days(&self) -> &[DayRoster] {
        &self.days
    }

    /// Participants placed on a date (empty if not offered).
    pub fn participants_on(&self, date: &str) -> &[ParticipantId] {
        self.day(date)
            .map(|d| d.participants.as_slice())
            .unwrap_or(&[])
    }

    /// Number of participants placed on a date.
    pub fn occupancy(&self, date: &str) -> usize {
        self.participants_on(date).len()
    }

    /// Whether the date is offered and still below capacity.
    pub fn has_free_slot(&self, date: &str) -> bool {
        self.day(date)
            .is_some_and(|d| d.participants.len() < self.max_per_day)
    }

    /// Total places across all offered dates.
    pub fn max_participants(&self) -> usize {
        self.max_per_day * self.days.len()
    }

    /// Total placements across all offered dates.
    pub fn total_occupancy(&self) -> usize {
        self.days.iter().map(|d| d.participants.len()).sum()
    }

    /// Among `candidates`, the date with a free slot and the fewest
    /// occupants. Ties go to the earliest candidate.
    pub fn least_occupied_date<'a, I>(&self, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, usize)> = None;
        for date in candidates {
            if !self.has_free_slot(date) {
                continue;
            }
            let count = self.occupancy(date);
            if best.map_or(true, |(_, c)| count < c) {
                best = Some((date, count));
            }
        }
        best.map(|(date, _)| date)
    }

    /// Places a participant on a date.
    ///
    /// Refuses when the date is not offered or already full, so the
    /// capacity invariant cannot be broken from outside.
    pub(crate) fn assign_participant(
        &mut self,
        date: &str,
        participant: ParticipantId,
    ) -> Result<()> {
        let id = self.id;
        let max = self.max_per_day;
        let day = self
            .days
            .iter_mut()
            .find(|d| d.date == date)
            .ok_or_else(|| DivisionError::DateNotOffered {
                workshop: id,
                date: date.to_string(),
            })?;
        if day.participants.len() >= max {
            return Err(DivisionError::CapacityExceeded {
                workshop: id,
                date: date.to_string(),
            });
        }
        day.participants.push(participant);
        Ok(())
    }

    /// Removes a participant from a date. Returns whether it was placed there.
    pub(crate) fn remove_participant(&mut self, date: &str, participant: ParticipantId) -> bool {
        match self.days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                let before = day.participants.len();
                day.participants.retain(|&p| p != participant);
                day.participants.len() != before
            }
            None => false,
        }
    }

    fn day(&self, date: &str) -> Option<&DayRoster> {
        self.days.iter().find(|d| d.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Workshop {
        Workshop::new(0, "Pioneering")
            .with_supervisor("Anna")
            .with_age_group("GuSp")
            .with_capacity(2)
            .with_date("Sa")
            .with_date("Mi")
    }

    #[test]
    fn test_workshop_builder() {
        let w = sample();
        assert_eq!(w.name, "Pioneering");
        assert_eq!(w.supervisor, "Anna");
        assert!(w.admits("GuSp"));
        assert!(!w.admits("CaEx"));
        assert!(w.offers("Sa"));
        assert!(!w.offers("So"));
        assert_eq!(w.offered_dates().collect::<Vec<_>>(), vec!["Sa", "Mi"]);
        assert_eq!(w.max_participants(), 4);
    }

    #[test]
    fn test_duplicate_date_ignored() {
        let w = sample().with_date("Sa");
        assert_eq!(w.day_count(), 2);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut w = sample();
        w.assign_participant("Sa", 1).unwrap();
        w.assign_participant("Sa", 2).unwrap();
        assert!(!w.has_free_slot("Sa"));
        assert!(matches!(
            w.assign_participant("Sa", 3),
            Err(DivisionError::CapacityExceeded { .. })
        ));
        assert_eq!(w.occupancy("Sa"), 2);
    }

    #[test]
    fn test_not_offered_refused() {
        let mut w = sample();
        assert!(matches!(
            w.assign_participant("So", 1),
            Err(DivisionError::DateNotOffered { .. })
        ));
        assert!(!w.has_free_slot("So"));
        assert!(w.participants_on("So").is_empty());
    }

    #[test]
    fn test_least_occupied_date() {
        let mut w = sample();
        assert_eq!(w.least_occupied_date(["Sa", "Mi"]), Some("Sa"));
        w.assign_participant("Sa", 1).unwrap();
        assert_eq!(w.least_occupied_date(["Sa", "Mi"]), Some("Mi"));
        assert_eq!(w.least_occupied_date(["Sa"]), Some("Sa"));
        w.assign_participant("Sa", 2).unwrap();
        assert_eq!(w.least_occupied_date(["Sa"]), None);
        assert_eq!(w.least_occupied_date(["So"]), None);
    }

    #[test]
    fn test_remove_participant() {
        let mut w = sample();
        w.assign_participant("Mi", 4).unwrap();
        assert!(w.remove_participant("Mi", 4));
        assert!(!w.remove_participant("Mi", 4));
        assert_eq!(w.total_occupancy(), 0);
    }
}
