//! CSV ingestion of workshops and participants.
//!
//! # Workshops
//!
//! Header row, then one workshop per row:
//!
//! | name | supervisor | age_groups | max_per_day | dates |
//! |------|------------|------------|-------------|-------|
//! | Kochen | Eva | GuSp / CaEx | 12 | Sa, Mi |
//!
//! Age-group and date cells are free text. Every configured tag that occurs
//! inside the cell counts, so `"GuSp / CaEx"` admits both groups.
//!
//! # Participants
//!
//! Header row `name, age_group, trupp`, followed by one column per workshop,
//! named like the workshop. The age-group cell must contain exactly one
//! configured tag. Cells hold raw interest points; an empty cell
//! means no preference. Workshops must be loaded first so the columns can
//! be resolved.
//!
//! The field delimiter is guessed from the header line.

use std::fs;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::DivisionConfig;
use crate::error::{DivisionError, Result};
use crate::models::{Roster, WorkshopId};

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Guesses the field delimiter from a header line.
///
/// The most frequent of `,` `;` tab `|` wins; ties go to the earlier one in
/// that list, and a line without any of them falls back to `,`.
pub fn sniff_delimiter(header: &str) -> u8 {
    let mut best = (b',', 0usize);
    for &d in &DELIMITERS {
        let count = header.bytes().filter(|&b| b == d).count();
        if count > best.1 {
            best = (d, count);
        }
    }
    best.0
}

/// Known tags that occur inside a free-text cell, in the order they are
/// known.
pub fn match_tags<'a>(cell: &str, known: &'a [String]) -> Vec<&'a str> {
    known
        .iter()
        .filter(|tag| !tag.is_empty() && cell.contains(tag.as_str()))
        .map(String::as_str)
        .collect()
}

/// Loads workshops from a CSV file into the roster.
pub fn load_workshops(
    path: impl AsRef<Path>,
    roster: &mut Roster,
    config: &DivisionConfig,
) -> Result<usize> {
    let file = fs::File::open(path.as_ref())?;
    read_workshops(file, roster, config)
}

/// Loads participants from a CSV file into the roster and shuffles the
/// processing order.
pub fn load_participants(
    path: impl AsRef<Path>,
    roster: &mut Roster,
    config: &DivisionConfig,
) -> Result<usize> {
    let file = fs::File::open(path.as_ref())?;
    read_participants(file, roster, config)
}

/// Reads workshops from any CSV source. Returns the number added.
pub fn read_workshops<R: Read>(
    input: R,
    roster: &mut Roster,
    config: &DivisionConfig,
) -> Result<usize> {
    let mut reader = csv_reader(input)?;
    let headers = normalized_headers(&mut reader)?;

    let name_col = column(&headers, "name", "workshops")?;
    let supervisor_col = column(&headers, "supervisor", "workshops")?;
    let age_col = column(&headers, "age_groups", "workshops")?;
    let capacity_col = column(&headers, "max_per_day", "workshops")?;
    let dates_col = column(&headers, "dates", "workshops")?;

    let mut added = 0;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;
        if is_blank(&record) {
            continue;
        }

        let name = field(&record, name_col);
        let capacity_cell = field(&record, capacity_col);
        let max_per_day: usize = capacity_cell.parse().map_err(|_| DivisionError::InvalidNumber {
            row,
            column: "max_per_day".into(),
            value: capacity_cell.clone(),
        })?;
        let age_cell = field(&record, age_col);
        let dates_cell = field(&record, dates_col);
        let age_groups = match_tags(&age_cell, &config.age_groups);
        let dates = match_tags(&dates_cell, &config.dates);

        debug!(
            "Workshop {} for {:?} on {:?} with {} places",
            name, age_groups, dates, max_per_day
        );
        roster.add_workshop(
            name,
            field(&record, supervisor_col),
            age_groups,
            max_per_day,
            dates,
        );
        added += 1;
    }

    info!("Loaded {} workshops", added);
    Ok(added)
}

/// Reads participants from any CSV source, then shuffles the roster's
/// processing order with the configured seed. Returns the number added.
pub fn read_participants<R: Read>(
    input: R,
    roster: &mut Roster,
    config: &DivisionConfig,
) -> Result<usize> {
    let mut reader = csv_reader(input)?;
    let headers = normalized_headers(&mut reader)?;
    let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let name_col = column(&headers, "name", "participants")?;
    let age_col = column(&headers, "age_group", "participants")?;
    let trupp_col = column(&headers, "trupp", "participants")?;

    let mut workshop_cols: Vec<(usize, WorkshopId)> = Vec::new();
    for (idx, header) in raw_headers.iter().enumerate() {
        if idx == name_col || idx == age_col || idx == trupp_col {
            continue;
        }
        match roster.workshop_by_name(header) {
            Some(w) => workshop_cols.push((idx, w.id)),
            None => warn!("Workshop column '{}' matches no workshop, skipping it", header),
        }
    }

    let mut added = 0;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;
        if is_blank(&record) {
            continue;
        }

        let age_cell = field(&record, age_col);
        let age_group = match match_tags(&age_cell, &config.age_groups)[..] {
            [tag] => tag.to_string(),
            _ => {
                return Err(DivisionError::UnknownTag {
                    row,
                    kind: "age group",
                    value: age_cell,
                })
            }
        };

        let mut points = Vec::with_capacity(workshop_cols.len());
        for &(idx, workshop) in &workshop_cols {
            let cell = field(&record, idx);
            if cell.is_empty() {
                continue;
            }
            let value: u32 = cell.parse().map_err(|_| DivisionError::InvalidNumber {
                row,
                column: raw_headers[idx].clone(),
                value: cell.clone(),
            })?;
            points.push((workshop, value));
        }

        roster.add_participant(
            field(&record, name_col),
            age_group,
            field(&record, trupp_col),
            points,
        );
        added += 1;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    roster.shuffle(&mut rng);

    info!("Loaded {} participants", added);
    Ok(added)
}

fn csv_reader<R: Read>(mut input: R) -> Result<csv::Reader<std::io::Cursor<Vec<u8>>>> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let header = String::from_utf8_lossy(&bytes)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(&header))
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::Cursor::new(bytes)))
}

fn normalized_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    Ok(reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect())
}

fn column(headers: &[String], name: &str, source_name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DivisionError::MissingColumn {
            source_name: source_name.into(),
            column: name.into(),
        })
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).map(|s| s.trim().to_string()).unwrap_or_default()
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKSHOPS: &str = "\
name;supervisor;age_groups;max_per_day;dates
Kochen;Eva;GuSp;2;Sa, Mi
Klettern;Max;GuSp / CaEx;1;Mi
";

    fn config() -> DivisionConfig {
        DivisionConfig::default().with_seed(11)
    }

    fn roster_with_workshops() -> Roster {
        let config = config();
        let mut roster = Roster::new(config.dates.clone());
        read_workshops(WORKSHOPS.as_bytes(), &mut roster, &config).unwrap();
        roster
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a|b|c"), b'|');
        assert_eq!(sniff_delimiter("name"), b',');
        // "GuSp, CaEx" style commas lose against the real separator
        assert_eq!(sniff_delimiter("a;b,c;d"), b';');
    }

    #[test]
    fn test_match_tags_by_containment() {
        let known = vec!["GuSp".to_string(), "CaEx".to_string()];
        assert_eq!(match_tags("GuSp / CaEx", &known), vec!["GuSp", "CaEx"]);
        assert_eq!(match_tags("nur CaEx", &known), vec!["CaEx"]);
        assert!(match_tags("WiWo", &known).is_empty());
    }

    #[test]
    fn test_read_workshops() {
        let roster = roster_with_workshops();
        assert_eq!(roster.workshops().len(), 2);

        let kochen = roster.workshop_by_name("Kochen").unwrap();
        assert_eq!(kochen.supervisor, "Eva");
        assert_eq!(kochen.max_per_day, 2);
        assert_eq!(kochen.offered_dates().collect::<Vec<_>>(), vec!["Sa", "Mi"]);

        let klettern = roster.workshop_by_name("Klettern").unwrap();
        assert!(klettern.admits("GuSp"));
        assert!(klettern.admits("CaEx"));
        assert_eq!(klettern.offered_dates().collect::<Vec<_>>(), vec!["Mi"]);
    }

    #[test]
    fn test_invalid_capacity() {
        let config = config();
        let mut roster = Roster::new(config.dates.clone());
        let csv = "name,supervisor,age_groups,max_per_day,dates\nKochen,Eva,GuSp,viele,Sa\n";
        let err = read_workshops(csv.as_bytes(), &mut roster, &config).unwrap_err();
        assert!(matches!(err, DivisionError::InvalidNumber { row: 2, .. }));
    }

    #[test]
    fn test_missing_column() {
        let config = config();
        let mut roster = Roster::new(config.dates.clone());
        let csv = "name,supervisor,max_per_day,dates\nKochen,Eva,2,Sa\n";
        let err = read_workshops(csv.as_bytes(), &mut roster, &config).unwrap_err();
        assert!(matches!(
            err,
            DivisionError::MissingColumn { ref column, .. } if column == "age_groups"
        ));
    }

    #[test]
    fn test_read_participants() {
        let mut roster = roster_with_workshops();
        let csv = "\
name,age_group,trupp,Kochen,Klettern,Basteln
Lena,GuSp,Falken,3,1,5

Tom,CaEx,Adler,,4,
";
        let added = read_participants(csv.as_bytes(), &mut roster, &config()).unwrap();
        assert_eq!(added, 2);

        let lena = roster.participant(0).unwrap();
        assert_eq!(lena.trupp, "Falken");
        // "Basteln" is not a workshop and does not count
        assert!((lena.preferences().get(0).unwrap() - 75.0).abs() < 1e-9);
        assert!((lena.preferences().get(1).unwrap() - 25.0).abs() < 1e-9);

        let tom = roster.participant(1).unwrap();
        assert_eq!(tom.age_group, "CaEx");
        assert!(!tom.preferences().contains(0));
        assert!((tom.preferences().get(1).unwrap() - 100.0).abs() < 1e-9);

        let mut order = roster.processing_order().to_vec();
        order.sort();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_negative_score_rejected() {
        let mut roster = roster_with_workshops();
        let csv = "name,age_group,trupp,Kochen\nLena,GuSp,Falken,-2\n";
        let err = read_participants(csv.as_bytes(), &mut roster, &config()).unwrap_err();
        assert!(matches!(
            err,
            DivisionError::InvalidNumber { ref column, .. } if column == "Kochen"
        ));
    }

    #[test]
    fn test_unknown_age_group() {
        let mut roster = roster_with_workshops();
        let csv = "name,age_group,trupp,Kochen\nIda,WiWo,Falken,2\n";
        let err = read_participants(csv.as_bytes(), &mut roster, &config()).unwrap_err();
        assert!(matches!(err, DivisionError::UnknownTag { row: 2, .. }));
    }

    #[test]
    fn test_ambiguous_age_group_rejected() {
        let mut roster = roster_with_workshops();
        let csv = "name,age_group,trupp,Kochen\nIda,CaEx (ex GuSp),Falken,2\n";
        let err = read_participants(csv.as_bytes(), &mut roster, &config()).unwrap_err();
        assert!(matches!(
            err,
            DivisionError::UnknownTag { row: 2, ref value, .. } if value == "CaEx (ex GuSp)"
        ));
        assert!(roster.participants().is_empty());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut csv = String::from("name,age_group,trupp,Kochen\n");
        for i in 0..30 {
            csv.push_str(&format!("P{i},GuSp,T,1\n"));
        }

        let mut a = roster_with_workshops();
        let mut b = roster_with_workshops();
        read_participants(csv.as_bytes(), &mut a, &config()).unwrap();
        read_participants(csv.as_bytes(), &mut b, &config()).unwrap();
        assert_eq!(a.processing_order(), b.processing_order());
    }
}
