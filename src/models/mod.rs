//! Division domain models.
//!
//! Provides the data types of a workshop division: the workshops with
//! their per-date capacity, the participants with their normalized
//! preferences and schedules, and the roster that owns both and keeps
//! every assignment consistent on both sides.
//!
//! # Identity
//!
//! Workshops and participants are keyed by sequential integer ids handed
//! out by the [`Roster`]. Display names are never used as keys.

mod assignment;
mod participant;
mod preference;
mod roster;
mod workshop;

pub use assignment::AssignmentRecord;
pub use participant::{Participant, ParticipantId, ScheduleSlot};
pub use preference::PreferenceVector;
pub use roster::Roster;
pub use workshop::{DayRoster, Workshop, WorkshopId};
