//! Lattice of nucleon counts
//!
//! Z and N are stored as independent fields; the mass number A = Z + N is
//! always derived from them, never stored.

use serde::{Deserialize, Serialize};

use super::nuclide::Nuclide;
use super::random::RandomSource;
use crate::consts::{MIN_DIM, STAR_RADIUS_FRACTION};
use crate::error::{SimResult, StellarError};
use crate::{Cell, distance_to};

/// Lattice axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Moves along the row index
    Row,
    /// Moves along the column index
    Col,
}

/// Square lattice of proton and neutron counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    dim: usize,
    z: Vec<u32>,
    n: Vec<u32>,
}

impl Grid {
    /// All-empty lattice of side `dim`
    pub fn empty(dim: usize) -> SimResult<Self> {
        if dim < MIN_DIM {
            return Err(StellarError::GridTooSmall { dim, min: MIN_DIM });
        }
        Ok(Self {
            dim,
            z: vec![0; dim * dim],
            n: vec![0; dim * dim],
        })
    }

    /// Initial star: a loosely packed disc of mostly hydrogen and helium
    ///
    /// Occupancy thins from the centre outward and everything beyond the disc
    /// stays empty, which leaves a margin of vacuum along the border.
    pub fn generate<R: RandomSource + ?Sized>(dim: usize, rng: &mut R) -> SimResult<Self> {
        let mut grid = Self::empty(dim)?;
        let centre = grid.centre();
        let radius = dim as f64 * STAR_RADIUS_FRACTION;

        for row in 0..dim {
            for col in 0..dim {
                let r = distance_to((row, col), centre);
                if r > radius {
                    continue;
                }
                let occupancy = 0.9 - 0.4 * (r / radius);
                if rng.uniform() >= occupancy {
                    continue;
                }
                grid.set((row, col), primordial_species(rng.uniform()));
            }
        }

        log::debug!(
            "Generated {}x{} lattice, {} occupied cells, mass {}",
            dim,
            dim,
            grid.positions().len(),
            grid.total_mass()
        );
        Ok(grid)
    }

    /// Lattice side
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Geometric centre of the lattice
    pub fn centre(&self) -> glam::DVec2 {
        let mid = (self.dim as f64 - 1.0) / 2.0;
        glam::DVec2::new(mid, mid)
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        cell.0 * self.dim + cell.1
    }

    #[inline]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.dim && (col as usize) < self.dim
    }

    /// Nuclide held by a cell
    #[inline]
    pub fn get(&self, cell: Cell) -> Nuclide {
        let i = self.index(cell);
        Nuclide::new(self.z[i], self.n[i])
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, nuclide: Nuclide) {
        let i = self.index(cell);
        self.z[i] = nuclide.z;
        self.n[i] = nuclide.n;
    }

    #[inline]
    pub fn protons(&self, cell: Cell) -> u32 {
        self.z[self.index(cell)]
    }

    /// Mass number A = Z + N of a cell
    #[inline]
    pub fn mass(&self, cell: Cell) -> u32 {
        let i = self.index(cell);
        self.z[i] + self.n[i]
    }

    /// Row-major A field
    pub fn mass_field(&self) -> Vec<u32> {
        self.z.iter().zip(&self.n).map(|(z, n)| z + n).collect()
    }

    /// Sum of A over the lattice
    pub fn total_mass(&self) -> u64 {
        self.z.iter().zip(&self.n).map(|(z, n)| (z + n) as u64).sum()
    }

    /// Exchange the full (Z, N) pair of two cells
    pub fn swap(&mut self, a: Cell, b: Cell) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.z.swap(ia, ib);
        self.n.swap(ia, ib);
    }

    /// Neighbour one step along `axis`; `None` past the lattice edge
    pub fn neighbour(&self, cell: Cell, axis: Axis, step: isize) -> Option<Cell> {
        let (row, col) = (cell.0 as isize, cell.1 as isize);
        let (row, col) = match axis {
            Axis::Row => (row + step, col),
            Axis::Col => (row, col + step),
        };
        self.in_bounds(row, col)
            .then_some((row as usize, col as usize))
    }

    /// Occupied cells (A > 0) in row-major order
    pub fn positions(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for row in 0..self.dim {
            for col in 0..self.dim {
                if self.mass((row, col)) > 0 {
                    out.push((row, col));
                }
            }
        }
        out
    }
}

/// Species drawn for a freshly generated cell
fn primordial_species(roll: f64) -> Nuclide {
    if roll < 0.70 {
        Nuclide::PROTIUM
    } else if roll < 0.75 {
        Nuclide::DEUTERIUM
    } else if roll < 0.76 {
        Nuclide::HELIUM_3
    } else if roll < 0.98 {
        Nuclide::HELIUM_4
    } else if roll < 0.987 {
        Nuclide::CARBON_12
    } else if roll < 0.994 {
        Nuclide::NITROGEN_14
    } else {
        Nuclide::OXYGEN_16
    }
}
