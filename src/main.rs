//! Stellar Lattice entry point
//!
//! Loads settings, runs one star from formation to fuel exhaustion and writes
//! the charts into the output directory.

use std::process::ExitCode;

use stellar_lattice::{Settings, evolution};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Stellar Lattice starting...");

    let result = Settings::load().and_then(|settings| evolution::run(&settings));
    match result {
        Ok(summary) => {
            log::info!(
                "Seed {}: {} iterations, ignition at {:?}, final fuel {:.2}%",
                summary.seed,
                summary.iterations,
                summary.ignited_at,
                summary.final_fuel
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Run failed: {}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
