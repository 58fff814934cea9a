//! Run driver
//!
//! `Evolution` owns the star, the isotope catalog and the random stream, and
//! steps the simulation until the fuel runs out. `run` wraps it with the
//! console progress, the composition journal and the charts.

use serde::Serialize;

use crate::consts::{DEFAULT_MAX_ITERATIONS, FUEL_CUTOFF_PERCENT};
use crate::error::{SimResult, StellarError};
use crate::journal::{CompositionJournal, JournalMode};
use crate::renderer::{plot_composition, plot_density, plot_profile, plot_rate};
use crate::settings::Settings;
use crate::sim::{
    DensityField, Grid, IsotopeTable, SeededRng, StarState, TickReport, centre_of_mass,
    composition, tick,
};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Hydrogen + helium fell below the cutoff
    FuelExhausted,
    /// The configured iteration cap was reached first
    IterationCap,
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub iterations: u32,
    pub outcome: Outcome,
    pub final_fuel: f64,
    pub ignited_at: Option<u32>,
    pub total_mass: u64,
    /// Cap in force for this run, if any
    pub max_iterations: Option<u32>,
}

/// A star evolving under one seeded random stream
pub struct Evolution {
    state: StarState,
    table: IsotopeTable,
    rng: SeededRng,
    max_iterations: Option<u32>,
}

impl Evolution {
    /// Generate a star from settings
    pub fn new(settings: &Settings) -> SimResult<Self> {
        settings.validate()?;
        let mut rng = match settings.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        let grid = Grid::generate(settings.dim, &mut rng)?;
        Self::from_parts(grid, rng, settings.max_iterations)
    }

    /// Evolve a prepared lattice
    pub fn from_grid(grid: Grid, seed: u64) -> SimResult<Self> {
        Self::from_parts(grid, SeededRng::new(seed), Some(DEFAULT_MAX_ITERATIONS))
    }

    fn from_parts(grid: Grid, rng: SeededRng, max_iterations: Option<u32>) -> SimResult<Self> {
        if grid.total_mass() == 0 {
            return Err(StellarError::EmptyGrid);
        }
        Ok(Self {
            state: StarState::new(grid),
            table: IsotopeTable::standard(),
            rng,
            max_iterations,
        })
    }

    /// Replace the iteration cap; `None` runs until the fuel is gone
    pub fn with_max_iterations(mut self, max_iterations: Option<u32>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn state(&self) -> &StarState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Run a single iteration
    pub fn advance(&mut self) -> SimResult<TickReport> {
        tick(&mut self.state, &self.table, &mut self.rng)
    }

    /// Step until the fuel cutoff or the iteration cap
    pub fn run_until_done(&mut self) -> SimResult<RunSummary> {
        self.run_with(|_| Ok(()))
    }

    /// Like `run_until_done`, handing every report to `observer`
    pub fn run_with<F>(&mut self, mut observer: F) -> SimResult<RunSummary>
    where
        F: FnMut(&TickReport) -> SimResult<()>,
    {
        loop {
            let report = self.advance()?;
            observer(&report)?;

            if report.fuel < FUEL_CUTOFF_PERCENT {
                return Ok(self.summary(Outcome::FuelExhausted));
            }
            if self
                .max_iterations
                .is_some_and(|cap| report.iteration >= cap)
            {
                log::warn!(
                    "Stopping at iteration cap {} with {:.2}% fuel left",
                    report.iteration,
                    report.fuel
                );
                return Ok(self.summary(Outcome::IterationCap));
            }
        }
    }

    fn summary(&self, outcome: Outcome) -> RunSummary {
        RunSummary {
            seed: self.seed(),
            iterations: self.state.iteration,
            outcome,
            final_fuel: self.state.fuel(),
            ignited_at: self.state.ignited_at,
            total_mass: self.state.grid.total_mass(),
            max_iterations: self.max_iterations,
        }
    }
}

/// Full run: initial charts, the iteration loop with console progress and
/// journal, then the final charts
pub fn run(settings: &Settings) -> SimResult<RunSummary> {
    let mut evolution = Evolution::new(settings)?;
    let dir = settings.output_dir.as_path();
    std::fs::create_dir_all(dir)?;

    let grid = &evolution.state().grid;
    log::info!(
        "Starting run: seed {}, {}x{} lattice, mass {}",
        evolution.seed(),
        settings.dim,
        settings.dim,
        grid.total_mass()
    );
    if let Some(cap) = settings.max_iterations {
        log::warn!(
            "Iteration cap {} in force: the run may stop before the fuel is exhausted",
            cap
        );
    }
    println!("\nMass: {}", grid.total_mass());

    // Initial system
    plot_density(&DensityField::from_grid(grid), "initial", dir)?;
    let journal = CompositionJournal::new(settings.journal_path());
    log::info!("Journaling composition to {}", journal.path().display());
    journal.record(
        &composition(grid, &grid.positions()),
        JournalMode::Overwrite,
        0,
    )?;

    println!("\nIterations:\n");
    let summary = evolution.run_with(|report| {
        println!("{}. Fuel: {:.2}%\n", report.iteration, report.fuel);
        journal.record(&report.composition, JournalMode::Append, report.iteration)
    })?;

    // Final system
    let state = evolution.state();
    let centre =
        centre_of_mass(&state.grid, &state.grid.positions()).ok_or(StellarError::EmptyGrid)?;
    let density = DensityField::from_grid(&state.grid);
    plot_density(&density, "final", dir)?;
    plot_profile(&density, centre, dir)?;
    let rows = summary.iterations as usize + 1;
    plot_composition(&state.history, rows, dir)?;
    plot_rate(&state.fusion_rate, rows, dir)?;

    log::info!(
        "Run finished after {} iterations ({:?}), fuel {:.2}%",
        summary.iterations,
        summary.outcome,
        summary.final_fuel
    );
    Ok(summary)
}
