//! Division configuration.
//!
//! All fields have defaults, so an empty JSON object is a valid config.
//!
//! ```
//! use workshop_division::config::DivisionConfig;
//!
//! let config = DivisionConfig::default()
//!     .with_dates(["Sa", "Mi"])
//!     .with_seed(42);
//! assert_eq!(config.seed, Some(42));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Smallest normalized score that still counts as willing.
pub const DEFAULT_MIN_SCORE: f64 = 1e-9;

/// Settings of one division run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionConfig {
    /// Global dates, in the order used for tie-breaks and export.
    pub dates: Vec<String>,
    /// Known age-group tags.
    pub age_groups: Vec<String>,
    /// Seed for the one-time participant shuffle. `None` draws from the OS.
    pub seed: Option<u64>,
    /// A participant is only picked for a workshop with a score strictly
    /// above this value.
    pub min_score: f64,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            dates: vec!["Sa".into(), "Mi".into()],
            age_groups: vec!["GuSp".into(), "CaEx".into()],
            seed: None,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl DivisionConfig {
    /// Reads a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the global dates.
    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates = dates.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the known age groups.
    pub fn with_age_groups<I, S>(mut self, age_groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.age_groups = age_groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the willingness threshold. Negative values are raised to zero.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score.max(0.0);
        self
    }
}
