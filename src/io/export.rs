//! CSV export of a finished division.
//!
//! Three views of the same rows, each with the header
//! `date, workshop, participant, age_group, trupp, points`:
//!
//! - by day: date order, then workshop, then placement order
//! - by workshop: workshop, then date order
//! - by trupp: trupp, then participant name, then date order

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{AssignmentRecord, Roster};

/// File name of the per-day export.
pub const DAYS_FILE: &str = "export_days.csv";
/// File name of the per-workshop export.
pub const WORKSHOPS_FILE: &str = "export_workshops.csv";
/// File name of the per-trupp export.
pub const TRUPPS_FILE: &str = "export_trupps.csv";

/// Rows sorted by day.
pub fn rows_by_day(roster: &Roster) -> Vec<AssignmentRecord> {
    roster.assignments()
}

/// Rows sorted by workshop.
pub fn rows_by_workshop(roster: &Roster) -> Vec<AssignmentRecord> {
    let mut rows = roster.assignments();
    // stable: date order and placement order survive inside a workshop
    rows.sort_by_key(|r| r.workshop_id);
    rows
}

/// Rows sorted by trupp, then participant name.
pub fn rows_by_trupp(roster: &Roster) -> Vec<AssignmentRecord> {
    let mut rows = roster.assignments();
    rows.sort_by(|a, b| {
        a.trupp
            .cmp(&b.trupp)
            .then_with(|| a.participant.cmp(&b.participant))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    rows
}

/// Writes rows as CSV with a header line.
pub fn write_rows<W: Write>(writer: W, rows: &[AssignmentRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record(["date", "workshop", "participant", "age_group", "trupp", "points"])?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the per-day view.
pub fn export_days<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    write_rows(writer, &rows_by_day(roster))
}

/// Writes the per-workshop view.
pub fn export_workshops<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    write_rows(writer, &rows_by_workshop(roster))
}

/// Writes the per-trupp view.
pub fn export_trupps<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    write_rows(writer, &rows_by_trupp(roster))
}

/// Writes all three views into a directory, creating it if needed.
pub fn export_all(roster: &Roster, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    export_days(roster, std::fs::File::create(dir.join(DAYS_FILE))?)?;
    export_workshops(roster, std::fs::File::create(dir.join(WORKSHOPS_FILE))?)?;
    export_trupps(roster, std::fs::File::create(dir.join(TRUPPS_FILE))?)?;
    tracing::info!("Exported {} placements to {}", roster.assignments().len(), dir.display());
    Ok(())
}
