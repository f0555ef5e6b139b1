//! Per-participant preference scores.
//!
//! Raw scores are small non-negative integers as entered by the participant.
//! They are rescaled once, on construction, so that one participant's scores
//! sum to [`PreferenceVector::TOTAL`]. A workshop without a raw score stays
//! absent from the vector; it is never filled in with zero.
//!
//! The raw scores are kept next to the normalized ones. Two participants
//! with a single preference each both normalize to 100, and only the raw
//! score still tells them apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::WorkshopId;

/// Normalized preference scores keyed by workshop id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    scores: BTreeMap<WorkshopId, f64>,
    raw: BTreeMap<WorkshopId, u32>,
}

impl PreferenceVector {
    /// Sum of all normalized scores of a participant.
    pub const TOTAL: f64 = 100.0;

    /// Builds a normalized vector from raw scores.
    ///
    /// `score' = score × 100 / Σscores`. If every raw score is zero the
    /// scores stay zero: such a participant is unwilling everywhere.
    /// A workshop listed twice keeps its last raw score.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (WorkshopId, u32)>,
    {
        let raw: BTreeMap<WorkshopId, u32> = raw.into_iter().collect();
        let sum: u64 = raw.values().map(|&p| u64::from(p)).sum();

        let scores = if sum == 0 {
            raw.keys().map(|&w| (w, 0.0)).collect()
        } else {
            let factor = Self::TOTAL / sum as f64;
            raw.iter()
                .map(|(&w, &p)| (w, f64::from(p) * factor))
                .collect()
        };

        Self { scores, raw }
    }

    /// Normalized score for a workshop, `None` if the participant gave none.
    #[inline]
    pub fn get(&self, workshop: WorkshopId) -> Option<f64> {
        self.scores.get(&workshop).copied()
    }

    /// Raw score as entered, `None` if the participant gave none.
    pub fn raw(&self, workshop: WorkshopId) -> Option<u32> {
        self.raw.get(&workshop).copied()
    }

    /// Whether a score exists for the workshop.
    pub fn contains(&self, workshop: WorkshopId) -> bool {
        self.scores.contains_key(&workshop)
    }

    /// Sum of all normalized scores (100, or 0 for an all-zero vector).
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Whether every score is zero (or there are none).
    pub fn is_unwilling(&self) -> bool {
        self.scores.values().all(|&s| s <= 0.0)
    }

    /// Number of workshops with a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no workshop has a score.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates `(workshop, score)` in workshop id order.
    pub fn iter(&self) -> impl Iterator<Item = (WorkshopId, f64)> + '_ {
        self.scores.iter().map(|(&w, &s)| (w, s))
    }
}
