//! Eligibility filter.
//!
//! A participant is available for a workshop iff
//! 1. the workshop admits the participant's age group,
//! 2. the workshop does not already occupy one of the participant's slots,
//! 3. some date is free for the participant and offered by the workshop
//!    with occupancy below capacity.
//!
//! Pure queries, no side effects.

use crate::models::{Participant, Workshop};

/// Whether the participant may be placed into the workshop on some date.
pub fn is_available(participant: &Participant, workshop: &Workshop) -> bool {
    if !workshop.admits(&participant.age_group) {
        return false;
    }

    let mut free = false;
    for slot in participant.schedule() {
        match slot.workshop {
            Some(w) if w == workshop.id => return false,
            Some(_) => {}
            None => {
                if workshop.has_free_slot(&slot.date) {
                    free = true;
                }
            }
        }
    }
    free
}

/// Dates on which the participant could be placed into the workshop, in
/// the global date order. Empty whenever [`is_available`] is false.
pub fn available_dates<'a>(participant: &'a Participant, workshop: &Workshop) -> Vec<&'a str> {
    if !is_available(participant, workshop) {
        return Vec::new();
    }
    participant
        .free_dates()
        .filter(|d| workshop.has_free_slot(d))
        .collect()
}
