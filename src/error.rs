//! Error types for the fallible edges of a division run.
//!
//! The assignment engine itself never fails: stalls and unplaceable
//! participants are reported in the outcome. Errors come from file I/O,
//! CSV parsing, configuration loading, record validation, and from the
//! capacity tracker refusing an insert that would break its invariant.

use thiserror::Error;

use crate::models::{ParticipantId, WorkshopId};
use crate::validation::ValidationError;

/// Errors raised while loading, validating, or exporting a division.
#[derive(Debug, Error)]
pub enum DivisionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("missing column '{column}' in {source_name}")]
    MissingColumn { source_name: String, column: String },

    #[error("row {row}, column '{column}': '{value}' is not a valid number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: unknown {kind} tag '{value}'")]
    UnknownTag {
        row: usize,
        kind: &'static str,
        value: String,
    },

    #[error("input failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("workshop {workshop} is already full on {date}")]
    CapacityExceeded { workshop: WorkshopId, date: String },

    #[error("workshop {workshop} is not offered on {date}")]
    DateNotOffered { workshop: WorkshopId, date: String },

    #[error("participant {participant} has no date '{date}'")]
    UnknownDate {
        participant: ParticipantId,
        date: String,
    },

    #[error("participant {participant} is already placed on {date}")]
    SlotOccupied {
        participant: ParticipantId,
        date: String,
    },

    #[error("participant {participant} already attends workshop {workshop}")]
    RepeatedWorkshop {
        participant: ParticipantId,
        workshop: WorkshopId,
    },

    #[error("unknown workshop id {0}")]
    UnknownWorkshop(WorkshopId),

    #[error("unknown participant id {0}")]
    UnknownParticipant(ParticipantId),

    #[error("division has already been run")]
    AlreadyRun,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DivisionError>;
