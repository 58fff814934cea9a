//! Star state and the ignition latch
//!
//! Everything one iteration reads and writes lives in `StarState`.

use serde::{Deserialize, Serialize};

use super::composition::{CompositionHistory, Snapshot, composition};
use super::grid::Grid;
use crate::Cell;
use crate::consts::IGNITION_TEMPERATURE;

/// Whether the core is burning
///
/// The only transition is `Dormant -> Active`; an active core never goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IgnitionGate {
    /// No fusion anywhere on the lattice
    #[default]
    Dormant,
    /// Every core cell attempts fusion each iteration
    Active,
}

impl IgnitionGate {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, IgnitionGate::Active)
    }

    /// Feed a core temperature reading; returns true on the iteration the
    /// core ignites
    pub fn observe(&mut self, temperature: f64) -> bool {
        match *self {
            IgnitionGate::Dormant if temperature > IGNITION_TEMPERATURE => {
                *self = IgnitionGate::Active;
                true
            }
            _ => false,
        }
    }
}

/// Residual reaction energy per cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyField {
    dim: usize,
    values: Vec<f64>,
}

impl EnergyField {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> f64 {
        self.values[cell.0 * self.dim + cell.1]
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: f64) {
        self.values[cell.0 * self.dim + cell.1] = value;
    }

    /// Sum over the whole lattice
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Complete simulation state (deterministic given the random stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarState {
    pub grid: Grid,
    pub energy: EnergyField,
    pub gate: IgnitionGate,
    /// Completed iterations
    pub iteration: u32,
    /// Iteration on which the core ignited
    pub ignited_at: Option<u32>,
    /// Core temperature from the latest assessment
    pub core_temperature: f64,
    /// Watch-list composition, row 0 is the initial lattice
    pub history: CompositionHistory,
    /// Reactions that changed their reactants, one entry per iteration
    pub fusion_rate: Vec<u32>,
}

impl StarState {
    /// Wrap a starting lattice, recording its composition as row 0
    pub fn new(grid: Grid) -> Self {
        let energy = EnergyField::zeros(grid.dim());
        let mut history = CompositionHistory::new();
        history.push(Snapshot::from_rows(&composition(&grid, &grid.positions())));
        Self {
            grid,
            energy,
            gate: IgnitionGate::Dormant,
            iteration: 0,
            ignited_at: None,
            core_temperature: 0.0,
            history,
            fusion_rate: vec![0],
        }
    }

    /// H + He percentage of the latest snapshot
    pub fn fuel(&self) -> f64 {
        self.history.latest().map(Snapshot::fuel).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::nuclide::Nuclide;

    #[test]
    fn test_gate_latches() {
        let mut gate = IgnitionGate::default();
        assert!(!gate.is_active());
        assert!(!gate.observe(IGNITION_TEMPERATURE));
        assert!(!gate.is_active());
        assert!(gate.observe(IGNITION_TEMPERATURE + 0.1));
        assert!(gate.is_active());
        // Cooling down never closes it, and it only fires once
        assert!(!gate.observe(0.0));
        assert!(!gate.observe(100.0));
        assert!(gate.is_active());
    }

    #[test]
    fn test_energy_field() {
        let mut energy = EnergyField::zeros(10);
        assert_eq!(energy.total(), 0.0);
        energy.set((2, 3), 0.5);
        energy.set((7, 1), 0.25);
        assert_eq!(energy.get((2, 3)), 0.5);
        assert_eq!(energy.total(), 0.75);
    }

    #[test]
    fn test_new_state_records_initial_row() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((4, 4), Nuclide::PROTIUM);
        grid.set((4, 5), Nuclide::CARBON_12);
        let state = StarState::new(grid);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.fusion_rate, vec![0]);
        assert_eq!(state.fuel(), 50.0);
        assert_eq!(state.gate, IgnitionGate::Dormant);
    }
}
