//! Participant model.
//!
//! A participant carries its normalized preferences and one schedule slot
//! per globally available date. The schedule is the participant-side half of
//! an assignment and is only changed through [`Roster`](super::Roster).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{PreferenceVector, WorkshopId};

/// Participant identifier, assigned sequentially by the roster.
pub type ParticipantId = usize;

/// One date of a participant's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Date tag.
    pub date: String,
    /// Workshop placed on this date, if any.
    pub workshop: Option<WorkshopId>,
}

/// A participant to be divided into workshops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier within the roster.
    pub id: ParticipantId,
    /// Display name. Not unique, not a key.
    pub name: String,
    /// Coarse age group (e.g. "GuSp", "CaEx").
    pub age_group: String,
    /// Fine-grained sub-group.
    pub trupp: String,
    preferences: PreferenceVector,
    schedule: Vec<ScheduleSlot>,
}

impl Participant {
    /// Creates a participant with an empty schedule over `dates`.
    pub fn new<D, S>(
        id: ParticipantId,
        name: impl Into<String>,
        age_group: impl Into<String>,
        trupp: impl Into<String>,
        preferences: PreferenceVector,
        dates: D,
    ) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if preferences.is_unwilling() {
            warn!("Participant {} has no positive preference for any workshop", name);
        }
        Self {
            id,
            name,
            age_group: age_group.into(),
            trupp: trupp.into(),
            preferences,
            schedule: dates
                .into_iter()
                .map(|d| ScheduleSlot {
                    date: d.into(),
                    workshop: None,
                })
                .collect(),
        }
    }

    /// The normalized preference vector.
    pub fn preferences(&self) -> &PreferenceVector {
        &self.preferences
    }

    /// Normalized points for a workshop.
    ///
    /// `None` for a workshop the participant gave no score for. This is
    /// looked up on every ranking step, so it only logs at debug level;
    /// missing scores are reported once by
    /// [`roster_warnings`](crate::validation::roster_warnings).
    pub fn points(&self, workshop: WorkshopId) -> Option<f64> {
        match self.preferences.get(workshop) {
            Some(points) => {
                debug!(
                    "Get {:.1} points of workshop {} from participant {}",
                    points, workshop, self.name
                );
                Some(points)
            }
            None => {
                debug!("Workshop {} is not inside participant {}", workshop, self.name);
                None
            }
        }
    }

    /// Schedule slots in the global date order.
    pub fn schedule(&self) -> &[ScheduleSlot] {
        &self.schedule
    }

    /// Workshop placed on a date.
    pub fn workshop_on(&self, date: &str) -> Option<WorkshopId> {
        self.slot(date).and_then(|s| s.workshop)
    }

    /// Whether every date holds a workshop.
    pub fn is_fully_assigned(&self) -> bool {
        self.schedule.iter().all(|s| s.workshop.is_some())
    }

    /// Whether at least one date is still unassigned.
    pub fn has_free_date(&self) -> bool {
        !self.is_fully_assigned()
    }

    /// Unassigned dates in the global date order.
    pub fn free_dates(&self) -> impl Iterator<Item = &str> + '_ {
        self.schedule
            .iter()
            .filter(|s| s.workshop.is_none())
            .map(|s| s.date.as_str())
    }

    /// Whether the workshop already occupies one of the slots.
    pub fn is_scheduled_for(&self, workshop: WorkshopId) -> bool {
        self.schedule.iter().any(|s| s.workshop == Some(workshop))
    }

    /// Number of filled slots.
    pub fn assigned_count(&self) -> usize {
        self.schedule.iter().filter(|s| s.workshop.is_some()).count()
    }

    /// Filled slots as `(date, workshop)`.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, WorkshopId)> + '_ {
        self.schedule
            .iter()
            .filter_map(|s| s.workshop.map(|w| (s.date.as_str(), w)))
    }

    pub(crate) fn set_slot(&mut self, date: &str, workshop: Option<WorkshopId>) -> bool {
        match self.schedule.iter_mut().find(|s| s.date == date) {
            Some(slot) => {
                slot.workshop = workshop;
                true
            }
            None => false,
        }
    }

    fn slot(&self, date: &str) -> Option<&ScheduleSlot> {
        self.schedule.iter().find(|s| s.date == date)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
