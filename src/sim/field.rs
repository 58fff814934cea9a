//! Derived fields over the lattice: centre of mass, core region, gravity and
//! density.

use glam::DVec2;
use serde::Serialize;

use super::grid::Grid;
use crate::consts::{CORE_RADIUS, CORE_TEMPERATURE_SCALE};
use crate::{Cell, cell_to_point, distance_to};

/// Mass-weighted centroid of the occupied cells (x = row, y = column)
///
/// Returns `None` when the listed positions carry no mass.
pub fn centre_of_mass(grid: &Grid, positions: &[Cell]) -> Option<DVec2> {
    let mut total = 0.0;
    let mut weighted = DVec2::ZERO;
    for &cell in positions {
        let a = grid.mass(cell) as f64;
        total += a;
        weighted += cell_to_point(cell) * a;
    }
    (total > 0.0).then(|| weighted / total)
}

/// Cells close enough to the centre of mass to burn, with their temperature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreRegion {
    pub cells: Vec<Cell>,
    /// Estimated core temperature (units of 10^6 K)
    pub temperature: f64,
}

impl CoreRegion {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Locate the core region around `centre`
///
/// Temperature scales with the mean mass number over every lattice cell in
/// the core disc, so a loosely packed core stays cold until it collapses.
pub fn core(grid: &Grid, positions: &[Cell], centre: DVec2) -> CoreRegion {
    let cells: Vec<Cell> = positions
        .iter()
        .copied()
        .filter(|&cell| distance_to(cell, centre) <= CORE_RADIUS)
        .collect();

    let disc_cells = lattice_cells_within(grid, centre, CORE_RADIUS);
    let temperature = if disc_cells == 0 {
        0.0
    } else {
        let core_mass: u64 = cells.iter().map(|&c| grid.mass(c) as u64).sum();
        CORE_TEMPERATURE_SCALE * core_mass as f64 / disc_cells as f64
    };

    CoreRegion { cells, temperature }
}

/// Number of in-bounds lattice cells within `radius` of `centre`
fn lattice_cells_within(grid: &Grid, centre: DVec2, radius: f64) -> usize {
    let lo_row = (centre.x - radius).floor().max(0.0) as usize;
    let lo_col = (centre.y - radius).floor().max(0.0) as usize;
    let hi_row = ((centre.x + radius).ceil().max(0.0) as usize).min(grid.dim() - 1);
    let hi_col = ((centre.y + radius).ceil().max(0.0) as usize).min(grid.dim() - 1);

    let mut count = 0;
    for row in lo_row..=hi_row {
        for col in lo_col..=hi_col {
            if distance_to((row, col), centre) <= radius {
                count += 1;
            }
        }
    }
    count
}

/// Gravitational pull on each occupied position, same order as `positions`
///
/// Direct O(N²) sum of A(q)·(q − p)/|q − p|³, normalised so the strongest
/// pull has |x| + |y| = 1. Components then read as move probabilities.
pub fn force(grid: &Grid, positions: &[Cell]) -> Vec<DVec2> {
    let points: Vec<(DVec2, f64)> = positions
        .iter()
        .map(|&cell| (cell_to_point(cell), grid.mass(cell) as f64))
        .collect();

    let raw: Vec<DVec2> = points
        .iter()
        .enumerate()
        .map(|(i, &(p, _))| {
            points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, &(q, mass))| {
                    let d = q - p;
                    let r = d.length();
                    d * (mass / (r * r * r))
                })
                .fold(DVec2::ZERO, |acc, f| acc + f)
        })
        .collect();

    let strongest = raw
        .iter()
        .map(|f| f.x.abs() + f.y.abs())
        .fold(0.0_f64, f64::max);
    if strongest <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|f| f / strongest).collect()
}

/// Smoothed mass density over the lattice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityField {
    dim: usize,
    values: Vec<f64>,
}

impl DensityField {
    /// 3×3 box average of A, counting only in-bounds neighbours
    pub fn from_grid(grid: &Grid) -> Self {
        let dim = grid.dim();
        let mut values = Vec::with_capacity(dim * dim);
        for row in 0..dim as isize {
            for col in 0..dim as isize {
                let mut sum = 0.0;
                let mut count = 0.0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        let (r, c) = (row + dr, col + dc);
                        if grid.in_bounds(r, c) {
                            sum += grid.mass((r as usize, c as usize)) as f64;
                            count += 1.0;
                        }
                    }
                }
                values.push(sum / count);
            }
        }
        Self { dim, values }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn at(&self, cell: Cell) -> f64 {
        self.values[cell.0 * self.dim + cell.1]
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Mean density per integer radius bin around `centre`
    pub fn radial_profile(&self, centre: DVec2) -> Vec<(f64, f64)> {
        let mut sums: Vec<(f64, u32)> = Vec::new();
        for row in 0..self.dim {
            for col in 0..self.dim {
                let bin = distance_to((row, col), centre).round() as usize;
                if sums.len() <= bin {
                    sums.resize(bin + 1, (0.0, 0));
                }
                sums[bin].0 += self.at((row, col));
                sums[bin].1 += 1;
            }
        }
        sums.into_iter()
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(bin, (sum, count))| (bin as f64, sum / count as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::nuclide::Nuclide;

    #[test]
    fn test_single_cell_at_minimum_size() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((4, 6), Nuclide::HELIUM_4);
        let positions = grid.positions();
        assert_eq!(positions, vec![(4, 6)]);

        let centre = centre_of_mass(&grid, &positions).unwrap();
        assert_eq!(centre, DVec2::new(4.0, 6.0));

        let region = core(&grid, &positions, centre);
        assert_eq!(region.cells, vec![(4, 6)]);
        // 13 lattice cells lie within two cells of an interior point
        assert!((region.temperature - CORE_TEMPERATURE_SCALE * 4.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_centre_of_mass_is_weighted() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((2, 2), Nuclide::PROTIUM);
        grid.set((2, 6), Nuclide::new(1, 2));
        let centre = centre_of_mass(&grid, &grid.positions()).unwrap();
        assert!((centre.x - 2.0).abs() < 1e-12);
        assert!((centre.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_centre_of_mass_empty() {
        let grid = Grid::empty(10).unwrap();
        assert!(centre_of_mass(&grid, &[]).is_none());
    }

    #[test]
    fn test_core_excludes_distant_cells() {
        let mut grid = Grid::empty(12).unwrap();
        grid.set((5, 5), Nuclide::CARBON_12);
        grid.set((5, 6), Nuclide::PROTIUM);
        grid.set((0, 0), Nuclide::PROTIUM);
        let positions = grid.positions();
        let region = core(&grid, &positions, DVec2::new(5.0, 5.0));
        assert_eq!(region.cells, vec![(5, 5), (5, 6)]);
    }

    #[test]
    fn test_core_near_edge_counts_in_bounds_cells() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((0, 0), Nuclide::PROTIUM);
        let region = core(&grid, &grid.positions(), DVec2::ZERO);
        // Quarter disc: (0,0) (0,1) (0,2) (1,0) (1,1) (2,0)
        assert!((region.temperature - CORE_TEMPERATURE_SCALE / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_points_toward_mass() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((5, 2), Nuclide::PROTIUM);
        grid.set((5, 7), Nuclide::OXYGEN_16);
        let positions = grid.positions();
        let f = force(&grid, &positions);
        assert_eq!(f.len(), 2);
        // Light cell pulled toward the heavy one along the column axis
        assert!(f[0].y > 0.0);
        assert!(f[0].x.abs() < 1e-12);
        assert!(f[1].y < 0.0);
        // Normalised: strongest pull is exactly one
        assert!((f[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_is_probability_split() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((3, 3), Nuclide::HELIUM_4);
        grid.set((4, 6), Nuclide::PROTIUM);
        grid.set((7, 5), Nuclide::CARBON_12);
        for f in force(&grid, &grid.positions()) {
            assert!(f.x.abs() + f.y.abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_force_single_cell_is_zero() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((3, 3), Nuclide::HELIUM_4);
        assert_eq!(force(&grid, &grid.positions()), vec![DVec2::ZERO]);
    }

    #[test]
    fn test_density_box_average() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((5, 5), Nuclide::new(4, 5));
        let density = DensityField::from_grid(&grid);
        assert!((density.at((5, 5)) - 1.0).abs() < 1e-12);
        assert!((density.at((4, 4)) - 1.0).abs() < 1e-12);
        assert_eq!(density.at((2, 2)), 0.0);
        // Corner averages over four cells
        grid.set((0, 0), Nuclide::new(2, 2));
        let density = DensityField::from_grid(&grid);
        assert!((density.at((0, 0)) - 1.0).abs() < 1e-12);
        assert_eq!(density.max(), 1.0);
    }

    #[test]
    fn test_radial_profile_peaks_at_centre() {
        let mut grid = Grid::empty(10).unwrap();
        grid.set((5, 5), Nuclide::OXYGEN_16);
        let density = DensityField::from_grid(&grid);
        let profile = density.radial_profile(DVec2::new(5.0, 5.0));
        assert_eq!(profile[0].0, 0.0);
        assert!(profile[0].1 > profile.last().unwrap().1);
    }
}
