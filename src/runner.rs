//! One-stop division run.
//!
//! [`WorkshopDivision`] owns the config, the roster and the engine, and
//! walks through load → validate → run → export.
//!
//! ```no_run
//! use workshop_division::{DivisionConfig, WorkshopDivision};
//!
//! let mut division = WorkshopDivision::new(DivisionConfig::default().with_seed(1));
//! division.load_workshops("workshops.csv")?;
//! division.load_participants("participants.csv")?;
//! division.run()?;
//! division.export_all("out")?;
//! # Ok::<(), workshop_division::DivisionError>(())
//! ```

use std::io::{Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::config::DivisionConfig;
use crate::division::{AssignmentEngine, DivisionOutcome, DivisionReport};
use crate::error::{DivisionError, Result};
use crate::io::{export, loader};
use crate::models::Roster;
use crate::validation::{roster_warnings, validate_roster, ValidationError};

/// Config, roster and engine of a single division.
#[derive(Debug, Clone)]
pub struct WorkshopDivision {
    config: DivisionConfig,
    roster: Roster,
    engine: AssignmentEngine,
    outcome: Option<DivisionOutcome>,
}

impl WorkshopDivision {
    /// Creates an empty division over the configured dates.
    pub fn new(config: DivisionConfig) -> Self {
        Self {
            roster: Roster::new(config.dates.iter().cloned()),
            engine: AssignmentEngine::from_config(&config),
            config,
            outcome: None,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &DivisionConfig {
        &self.config
    }

    /// The roster, with placements once [`run`](Self::run) has finished.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Outcome of the last run.
    pub fn outcome(&self) -> Option<&DivisionOutcome> {
        self.outcome.as_ref()
    }

    /// Loads workshops from a CSV file.
    pub fn load_workshops(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        loader::load_workshops(path, &mut self.roster, &self.config)
    }

    /// Loads participants from a CSV file. Workshops must already be loaded.
    pub fn load_participants(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        loader::load_participants(path, &mut self.roster, &self.config)
    }

    /// Reads workshops from any CSV source.
    pub fn read_workshops<R: Read>(&mut self, input: R) -> Result<usize> {
        loader::read_workshops(input, &mut self.roster, &self.config)
    }

    /// Reads participants from any CSV source.
    pub fn read_participants<R: Read>(&mut self, input: R) -> Result<usize> {
        loader::read_participants(input, &mut self.roster, &self.config)
    }

    /// Non-fatal findings on the loaded roster.
    pub fn warnings(&self) -> Vec<ValidationError> {
        roster_warnings(&self.roster)
    }

    /// Checks the loaded roster.
    ///
    /// Warnings are logged and do not fail; only malformed records do.
    pub fn validate(&self) -> Result<()> {
        for w in self.warnings() {
            warn!("{}", w);
        }
        validate_roster(&self.roster).map_err(|errors| {
            for e in &errors {
                warn!("{}", e);
            }
            DivisionError::Validation(errors)
        })
    }

    /// Validates the roster and runs the engine once.
    ///
    /// Leftover participants are not an error; they are listed in the
    /// outcome and the report.
    pub fn run(&mut self) -> Result<&DivisionOutcome> {
        if self.outcome.is_some() {
            return Err(DivisionError::AlreadyRun);
        }
        self.validate()?;
        info!(
            "Dividing {} participants into {} workshops",
            self.roster.participants().len(),
            self.roster.workshops().len()
        );
        let outcome = self.outcome.insert(self.engine.run(&mut self.roster));
        Ok(&*outcome)
    }

    /// Statistics of the finished run, `None` before [`run`](Self::run).
    pub fn report(&self) -> Option<DivisionReport> {
        self.outcome
            .as_ref()
            .map(|outcome| DivisionReport::calculate(&self.roster, outcome))
    }

    /// Writes the per-day view.
    pub fn export_days<W: Write>(&self, writer: W) -> Result<()> {
        export::export_days(&self.roster, writer)
    }

    /// Writes the per-workshop view.
    pub fn export_workshops<W: Write>(&self, writer: W) -> Result<()> {
        export::export_workshops(&self.roster, writer)
    }

    /// Writes the per-trupp view.
    pub fn export_trupps<W: Write>(&self, writer: W) -> Result<()> {
        export::export_trupps(&self.roster, writer)
    }

    /// Writes all three views into a directory.
    pub fn export_all(&self, dir: impl AsRef<Path>) -> Result<()> {
        export::export_all(&self.roster, dir)
    }
}
