//! Rollback of incomplete participants.
//!
//! A participant that cannot be completed is cleared entirely rather than
//! left half-scheduled: the export then shows the participant nowhere,
//! which is the signal for manual follow-up.

use tracing::{error, info};

use crate::models::{ParticipantId, Roster};

/// Clears every placement of a participant.
///
/// Returns the number of slots cleared. Clearing an already empty
/// schedule is a no-op and returns 0.
pub fn clear(roster: &mut Roster, participant: ParticipantId) -> usize {
    let dates: Vec<String> = match roster.participant(participant) {
        Some(p) => p.assignments().map(|(date, _)| date.to_string()).collect(),
        None => return 0,
    };

    let mut cleared = 0;
    for date in &dates {
        match roster.unassign(participant, date) {
            Ok(Some(_)) => cleared += 1,
            Ok(None) => {}
            Err(e) => error!("Could not clear participant {} on {}: {}", participant, date, e),
        }
    }
    cleared
}

/// Clears a set of participants. Returns the total number of slots cleared.
pub fn clear_all(roster: &mut Roster, participants: &[ParticipantId]) -> usize {
    let cleared: usize = participants.iter().map(|&p| clear(roster, p)).sum();
    if cleared > 0 {
        info!(
            "Rolled back {} placement(s) of {} participant(s)",
            cleared,
            participants.len()
        );
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new(["Sa", "Mi"]);
        roster.add_workshop("Kochen", "", ["GuSp"], 2, ["Sa", "Mi"]);
        roster.add_workshop("Klettern", "", ["GuSp"], 2, ["Sa", "Mi"]);
        roster.add_participant("Lena", "GuSp", "", vec![(0, 1), (1, 1)]);
        roster.add_participant("Jonas", "GuSp", "", vec![(0, 1), (1, 1)]);
        roster
    }

    #[test]
    fn test_clear_removes_both_sides() {
        let mut roster = roster();
        roster.assign(0, 0, "Sa").unwrap();
        roster.assign(0, 1, "Mi").unwrap();
        roster.assign(1, 0, "Sa").unwrap();

        assert_eq!(clear(&mut roster, 0), 2);
        assert_eq!(roster.participant(0).unwrap().assigned_count(), 0);
        assert_eq!(roster.workshop(0).unwrap().participants_on("Sa"), &[1]);
        assert_eq!(roster.workshop(1).unwrap().occupancy("Mi"), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut roster = roster();
        roster.assign(0, 0, "Sa").unwrap();
        clear(&mut roster, 0);

        let before: Vec<_> = roster.participant(0).unwrap().schedule().to_vec();
        let occupancy: Vec<_> = roster.workshops().iter().map(|w| w.total_occupancy()).collect();

        assert_eq!(clear(&mut roster, 0), 0);
        assert_eq!(roster.participant(0).unwrap().schedule(), before.as_slice());
        assert_eq!(
            roster.workshops().iter().map(|w| w.total_occupancy()).collect::<Vec<_>>(),
            occupancy
        );
    }

    #[test]
    fn test_clear_unknown_participant() {
        let mut roster = roster();
        assert_eq!(clear(&mut roster, 42), 0);
    }

    #[test]
    fn test_clear_all() {
        let mut roster = roster();
        roster.assign(0, 0, "Sa").unwrap();
        roster.assign(1, 1, "Mi").unwrap();
        assert_eq!(clear_all(&mut roster, &[0, 1]), 2);
        assert_eq!(roster.unscheduled(), vec![0, 1]);
    }
}
