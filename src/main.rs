//! Command-line driver.
//!
//! ```text
//! workshop-division <workshops.csv> <participants.csv> <out_dir> [config.json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info, warn};
use workshop_division::{logging, DivisionConfig, Result, WorkshopDivision};

const USAGE: &str =
    "usage: workshop-division <workshops.csv> <participants.csv> <out_dir> [config.json]";

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !(3..=4).contains(&args.len()) {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let workshops = PathBuf::from(&args[0]);
    let participants = PathBuf::from(&args[1]);
    let out_dir = PathBuf::from(&args[2]);

    let config = match args.get(3) {
        Some(path) => DivisionConfig::from_json_file(path)?,
        None => DivisionConfig::default(),
    };

    let mut division = WorkshopDivision::new(config);
    division.load_workshops(&workshops)?;
    division.load_participants(&participants)?;

    let outcome = division.run()?;
    if !outcome.is_complete() {
        warn!(
            "{} participants need manual follow-up",
            outcome.leftovers.len()
        );
    }

    division.export_all(&out_dir)?;
    if let Some(report) = division.report() {
        info!("{}", report);
    }
    Ok(())
}
