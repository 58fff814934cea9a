//! Composition tracking
//!
//! Composition is reported as the percentage of occupied cells holding each
//! element (by proton count). The watch-list elements are snapshotted every
//! iteration and H + He is the remaining fuel.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::Cell;
use crate::consts::WATCH_LIST;

/// Share of occupied cells holding one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    /// Proton count identifying the element
    pub protons: u32,
    /// Percentage of occupied cells
    pub percent: f64,
}

/// Composition of the occupied cells, sorted by proton count
///
/// An empty position list yields no rows.
pub fn composition(grid: &Grid, positions: &[Cell]) -> Vec<CompositionRow> {
    let occupied: Vec<u32> = positions
        .iter()
        .filter(|&&cell| grid.mass(cell) > 0)
        .map(|&cell| grid.protons(cell))
        .collect();
    if occupied.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(u32, u32)> = Vec::new();
    for z in occupied.iter().copied() {
        match counts.binary_search_by_key(&z, |&(p, _)| p) {
            Ok(i) => counts[i].1 += 1,
            Err(i) => counts.insert(i, (z, 1)),
        }
    }

    let total = occupied.len() as f64;
    counts
        .into_iter()
        .map(|(protons, count)| CompositionRow {
            protons,
            percent: 100.0 * count as f64 / total,
        })
        .collect()
}

/// Watch-list percentages at one iteration (H, He, C, N, O)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot(pub [f64; WATCH_LIST.len()]);

impl Snapshot {
    /// Pick the watch-list elements out of a composition; missing ones are 0
    pub fn from_rows(rows: &[CompositionRow]) -> Self {
        let mut values = [0.0; WATCH_LIST.len()];
        for (slot, &z) in values.iter_mut().zip(WATCH_LIST.iter()) {
            if let Some(row) = rows.iter().find(|row| row.protons == z) {
                *slot = row.percent;
            }
        }
        Self(values)
    }

    /// Percentage for a watched proton count
    pub fn get(&self, protons: u32) -> Option<f64> {
        WATCH_LIST
            .iter()
            .position(|&z| z == protons)
            .map(|i| self.0[i])
    }

    /// Hydrogen + helium percentage
    pub fn fuel(&self) -> f64 {
        self.0[0] + self.0[1]
    }
}

/// Time-ordered table of snapshots, one row per iteration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionHistory {
    rows: Vec<Snapshot>,
}

impl CompositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.rows.push(snapshot);
    }

    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.rows.last()
    }

    /// One element's percentage over time, by watch-list slot
    pub fn series(&self, slot: usize) -> Vec<f64> {
        self.rows.iter().map(|s| s.0[slot]).collect()
    }
}
