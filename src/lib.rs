//! Preference-driven division of participants into workshops.
//!
//! Participants rate workshops, workshops run on a fixed set of dates with a
//! per-date capacity and admit only some age groups. The crate places every
//! participant into one distinct workshop per date, filling the most
//! demanded workshop first with its most eager participant.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Workshop`, `Participant`,
//!   `PreferenceVector`, `Roster`, `AssignmentRecord`
//! - **`division`**: Eligibility, demand ranking, the greedy
//!   `AssignmentEngine`, rollback, and the `DivisionReport`
//! - **`validation`**: Input integrity checks (duplicate names, capacity,
//!   unreachable age groups, dangling preferences)
//! - **`io`**: CSV loading and the three CSV export views
//! - **`config`**, **`error`**, **`logging`**: Ambient plumbing
//!
//! # Algorithm
//!
//! Greedy, demand-ordered: rank workshops by the summed normalized scores
//! of the participants still able to take them, give a place in the top
//! workshop to its best participant on that workshop's least occupied
//! date, and rank again. A sweep that places nobody ends the run; anyone
//! left incomplete is cleared for manual follow-up.
//!
//! # Example
//!
//! ```
//! use workshop_division::{AssignmentEngine, Roster};
//!
//! let mut roster = Roster::new(["Sa", "Mi"]);
//! roster.add_workshop("Kochen", "Eva", ["GuSp"], 1, ["Sa", "Mi"]);
//! roster.add_workshop("Klettern", "Max", ["GuSp"], 1, ["Sa", "Mi"]);
//! roster.add_participant("Lena", "GuSp", "Falken", vec![(0, 3), (1, 1)]);
//!
//! let outcome = AssignmentEngine::new().run(&mut roster);
//! assert!(outcome.is_complete());
//! assert_eq!(roster.assignments().len(), 2);
//! ```

pub mod config;
pub mod division;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
mod runner;
pub mod validation;

pub use config::DivisionConfig;
pub use division::{AssignmentEngine, DivisionOutcome, DivisionReport};
pub use error::{DivisionError, Result};
pub use models::{AssignmentRecord, Participant, Roster, Workshop};
pub use runner::WorkshopDivision;
