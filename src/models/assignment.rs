//! Assignment output rows.

use serde::{Deserialize, Serialize};

use super::{ParticipantId, WorkshopId};

/// One placement: a participant attends a workshop on a date.
///
/// This is the row shape handed to export. Ids are kept for lookups but
/// left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Date tag.
    pub date: String,
    #[serde(skip)]
    pub workshop_id: WorkshopId,
    /// Workshop display name.
    pub workshop: String,
    #[serde(skip)]
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub participant: String,
    /// Participant's age group.
    pub age_group: String,
    /// Participant's sub-group.
    pub trupp: String,
    /// Participant's normalized points for the workshop.
    pub points: f64,
}
