//! Input validation for a division.
//!
//! Checks the structural integrity of a loaded roster before the engine
//! runs. Malformed records are errors and stop the run:
//! - Duplicate workshop names
//! - Workshops without capacity, dates, or age groups
//! - Preferences naming unknown workshops
//! - Empty participant names
//!
//! Conditions the engine handles by itself are warnings. The run goes on
//! and the affected participants end up as leftovers or unranked:
//! - Participants no workshop admits
//! - Eligible workshops a participant gave no score for
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;

use crate::models::Roster;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two workshops share the same display name.
    DuplicateWorkshopName,
    /// A workshop has a per-date capacity of zero.
    ZeroCapacity,
    /// A workshop is offered on none of the global dates.
    NoDates,
    /// A workshop admits no age group.
    NoAgeGroups,
    /// No workshop admits the participant's age group (warning).
    UnservedAgeGroup,
    /// A workshop admits the participant but has no score from them
    /// (warning).
    MissingPreference,
    /// A preference refers to a workshop id that does not exist.
    UnknownWorkshopReference,
    /// A participant has an empty name.
    EmptyName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. No two workshops share a name
/// 2. Every workshop has capacity, at least one date and one age group
/// 3. Every participant has a name
/// 4. Every preference refers to an existing workshop
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for w in roster.workshops() {
        if !names.insert(w.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateWorkshopName,
                format!("Duplicate workshop name: {}", w.name),
            ));
        }
        if w.max_per_day == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Workshop '{}' has no places per day", w.name),
            ));
        }
        if w.day_count() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoDates,
                format!("Workshop '{}' is offered on no known date", w.name),
            ));
        }
        if w.age_groups.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoAgeGroups,
                format!("Workshop '{}' admits no age group", w.name),
            ));
        }
    }

    for p in roster.participants() {
        if p.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Participant #{} has an empty name", p.id),
            ));
        }
        for (workshop, _) in p.preferences().iter() {
            if roster.workshop(workshop).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownWorkshopReference,
                    format!(
                        "Participant '{}' references unknown workshop {}",
                        p.name, workshop
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal findings on a roster.
///
/// One entry per participant whose age group no workshop admits, and one
/// per (participant, workshop) pair where the workshop admits the
/// participant but has no score from them.
pub fn roster_warnings(roster: &Roster) -> Vec<ValidationError> {
    let served: HashSet<&str> = roster
        .workshops()
        .iter()
        .flat_map(|w| w.age_groups.iter().map(String::as_str))
        .collect();

    let mut warnings = Vec::new();
    for p in roster.participants() {
        if !served.contains(p.age_group.as_str()) {
            warnings.push(ValidationError::new(
                ValidationErrorKind::UnservedAgeGroup,
                format!(
                    "No workshop admits age group '{}' of participant '{}'",
                    p.age_group, p.name
                ),
            ));
            continue;
        }
        for w in roster.workshops() {
            if w.admits(&p.age_group) && !p.preferences().contains(w.id) {
                warnings.push(ValidationError::new(
                    ValidationErrorKind::MissingPreference,
                    format!("Workshop {} is not inside participant {}", w.name, p.name),
                ));
            }
        }
    }
    warnings
}
