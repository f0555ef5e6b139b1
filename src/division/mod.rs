//! The division core: eligibility, demand ranking, the assignment engine,
//! rollback, and run statistics.
//!
//! # Flow
//!
//! The [`DemandRanker`] asks the eligibility filter who can still take each
//! workshop and sums their scores. The [`AssignmentEngine`] takes the most
//! demanded workshop, picks its best available participant, commits the
//! placement through the roster, and ranks again. When a full pass places
//! nobody, the engine stops and [`rollback`] clears the participants it could
//! not complete.
//!
//! Everything is sequential: each step depends on the occupancy left by the
//! previous one.

pub mod eligibility;
mod engine;
mod ranker;
mod report;
pub mod rollback;

pub use engine::{AssignmentEngine, DivisionOutcome, EngineState};
pub use ranker::DemandRanker;
pub use report::{DivisionReport, WorkshopStats};
