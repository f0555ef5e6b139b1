//! File input and output.
//!
//! - [`loader`]: workshops and participants from CSV
//! - [`export`]: the finished division as CSV views

pub mod export;
pub mod loader;

pub use export::{export_all, DAYS_FILE, TRUPPS_FILE, WORKSHOPS_FILE};
pub use loader::{load_participants, load_workshops};
