//! One evolution iteration
//!
//! Order within an iteration:
//! 1. Gravity-biased transport over the occupied cells
//! 2. Core assessment (centre of mass, core region, temperature)
//! 3. Ignition check, or fusion across the core once already burning
//! 4. Composition snapshot
//!
//! Mutations apply immediately: later cells in the same pass see the lattice
//! as left by earlier ones.

use glam::DVec2;
use serde::Serialize;

use super::composition::{CompositionRow, Snapshot, composition};
use super::field::{CoreRegion, centre_of_mass, core, force};
use super::fusion::resolve;
use super::grid::{Axis, Grid};
use super::isotopes::IsotopeTable;
use super::nuclide::Nuclide;
use super::random::RandomSource;
use super::state::StarState;
use crate::Cell;
use crate::consts::ENERGY_DAMPING;
use crate::error::{SimResult, StellarError};

/// What happened during one iteration
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub iteration: u32,
    /// Successful transport swaps
    pub moves: u32,
    /// Fusion attempts whose products differed from the reactants
    pub reactions: u32,
    pub core_temperature: f64,
    /// True only on the iteration the core ignited
    pub ignited: bool,
    /// H + He percentage after this iteration
    pub fuel: f64,
    /// Full composition after this iteration
    pub composition: Vec<CompositionRow>,
}

/// Gravity scale left after fusion energy pushes back, clamped to [0, 1]
pub fn damping_factor(total_energy: f64) -> f64 {
    (1.0 - ENERGY_DAMPING * total_energy).clamp(0.0, 1.0)
}

/// Coulomb suppression for a reacting pair, `min(1, T / (Z1·Z2))`
///
/// A neutral reactant (or empty cell) gives a zero charge product, which
/// means no suppression.
pub fn suppression_factor(temperature: f64, p1: Nuclide, p2: Nuclide) -> f64 {
    let charge = (p1.z as f64) * (p2.z as f64);
    if charge == 0.0 {
        return 1.0;
    }
    (temperature / charge).min(1.0)
}

/// Neighbour one step along `axis` in the sign of `component`
fn step_toward(grid: &Grid, cell: Cell, axis: Axis, component: f64) -> Option<Cell> {
    if component == 0.0 {
        return None;
    }
    grid.neighbour(cell, axis, component.signum() as isize)
}

/// One pass of biased nearest-neighbour mass exchange
///
/// For each position a single draw `r` picks a row move (`r <= |x|`), a
/// column move (`r <= |x| + |y|`) or nothing. A move swaps the two cells only
/// when the target holds strictly less mass than the source. Returns the
/// number of swaps.
pub fn transport<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    positions: &[Cell],
    forces: &[DVec2],
    rng: &mut R,
) -> u32 {
    let mut moves = 0;
    for (&cell, pull) in positions.iter().zip(forces) {
        let r = rng.uniform();
        let target = if r <= pull.x.abs() {
            step_toward(grid, cell, Axis::Row, pull.x)
        } else if r <= pull.x.abs() + pull.y.abs() {
            step_toward(grid, cell, Axis::Col, pull.y)
        } else {
            None
        };

        if let Some(target) = target {
            if grid.mass(target) < grid.mass(cell) {
                grid.swap(cell, target);
                moves += 1;
            }
        }
    }
    moves
}

/// One of the four lattice neighbours: first bit picks the axis, second the
/// direction. Bits are drawn even when the neighbour is off the lattice.
fn fusion_partner<R: RandomSource + ?Sized>(grid: &Grid, cell: Cell, rng: &mut R) -> Option<Cell> {
    let axis = if rng.coin() { Axis::Row } else { Axis::Col };
    let step = if rng.coin() { -1 } else { 1 };
    grid.neighbour(cell, axis, step)
}

/// Attempt fusion at every core cell; returns the number of reactions
fn fuse_core<R: RandomSource + ?Sized>(
    state: &mut StarState,
    region: &CoreRegion,
    table: &IsotopeTable,
    rng: &mut R,
) -> u32 {
    let mut reactions = 0;
    for &cell in &region.cells {
        let Some(partner) = fusion_partner(&state.grid, cell, rng) else {
            continue;
        };
        let p1 = state.grid.get(cell);
        let p2 = state.grid.get(partner);
        let f = suppression_factor(region.temperature, p1, p2);

        let out = resolve(table, p1, p2, f, state.energy.get(cell), rng);
        state.grid.set(cell, out.first);
        state.grid.set(partner, out.second);
        // Only the initiating cell keeps the energy
        state.energy.set(cell, out.energy);

        if out.changed(p1, p2) {
            log::trace!("{} + {} -> {} + {} at {:?}", p1, p2, out.first, out.second, cell);
            reactions += 1;
        }
    }
    reactions
}

/// Advance the star by one iteration
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut StarState,
    table: &IsotopeTable,
    rng: &mut R,
) -> SimResult<TickReport> {
    state.iteration += 1;
    let iteration = state.iteration;

    // Gravity, damped by the energy fusion has released so far
    let positions = state.grid.positions();
    let damping = damping_factor(state.energy.total());
    let forces: Vec<DVec2> = force(&state.grid, &positions)
        .into_iter()
        .map(|f| f * damping)
        .collect();
    let moves = transport(&mut state.grid, &positions, &forces, rng);

    // Core assessment
    let positions = state.grid.positions();
    let centre = centre_of_mass(&state.grid, &positions).ok_or(StellarError::EmptyGrid)?;
    let region = core(&state.grid, &positions, centre);
    state.core_temperature = region.temperature;

    let mut reactions = 0;
    let mut ignited = false;
    if state.gate.is_active() {
        if region.is_empty() {
            return Err(StellarError::EmptyCore { iteration });
        }
        reactions = fuse_core(state, &region, table, rng);
    } else if state.gate.observe(region.temperature) {
        ignited = true;
        state.ignited_at = Some(iteration);
        log::info!(
            "Core ignited at iteration {} (T = {:.2})",
            iteration,
            region.temperature
        );
    }
    state.fusion_rate.push(reactions);

    let rows = composition(&state.grid, &state.grid.positions());
    let snapshot = Snapshot::from_rows(&rows);
    state.history.push(snapshot);

    log::debug!(
        "Iteration {}: moves={}, core={} cells, T={:.2}, reactions={}, fuel={:.2}%",
        iteration,
        moves,
        region.cells.len(),
        region.temperature,
        reactions,
        snapshot.fuel()
    );

    Ok(TickReport {
        iteration,
        moves,
        reactions,
        core_temperature: region.temperature,
        ignited,
        fuel: snapshot.fuel(),
        composition: rows,
    })
}
