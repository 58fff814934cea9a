//! Isotope catalog
//!
//! Read-only table of known isotopes as (Z, N, mass) entries. Catalog order is
//! significant: the fusion resolver enumerates products in this order, which
//! decides tie-breaking during weighted selection.

use serde::{Deserialize, Serialize};

use super::nuclide::Nuclide;

/// A tabulated isotope with its atomic mass (unified atomic mass units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Isotope {
    pub nuclide: Nuclide,
    pub mass: f64,
}

impl Isotope {
    pub const fn new(z: u32, n: u32, mass: f64) -> Self {
        Self {
            nuclide: Nuclide::new(z, n),
            mass,
        }
    }

    #[inline]
    pub fn mass_number(&self) -> u32 {
        self.nuclide.mass_number()
    }
}

/// Stable and long-lived light isotopes, free neutron through silicon
const STANDARD_CATALOG: [Isotope; 34] = [
    Isotope::new(0, 1, 1.008_664_916),
    Isotope::new(1, 0, 1.007_825_032),
    Isotope::new(1, 1, 2.014_101_778),
    Isotope::new(1, 2, 3.016_049_278),
    Isotope::new(2, 1, 3.016_029_320),
    Isotope::new(2, 2, 4.002_603_254),
    Isotope::new(3, 3, 6.015_122_887),
    Isotope::new(3, 4, 7.016_003_437),
    Isotope::new(4, 3, 7.016_928_717),
    Isotope::new(4, 5, 9.012_183_065),
    Isotope::new(5, 5, 10.012_936_950),
    Isotope::new(5, 6, 11.009_305_360),
    Isotope::new(6, 6, 12.000_000_000),
    Isotope::new(6, 7, 13.003_354_835),
    Isotope::new(6, 8, 14.003_241_988),
    Isotope::new(7, 6, 13.005_738_610),
    Isotope::new(7, 7, 14.003_074_004),
    Isotope::new(7, 8, 15.000_108_899),
    Isotope::new(8, 7, 15.003_065_600),
    Isotope::new(8, 8, 15.994_914_620),
    Isotope::new(8, 9, 16.999_131_757),
    Isotope::new(8, 10, 17.999_159_613),
    Isotope::new(9, 10, 18.998_403_163),
    Isotope::new(10, 10, 19.992_440_176),
    Isotope::new(10, 11, 20.993_846_685),
    Isotope::new(10, 12, 21.991_385_114),
    Isotope::new(11, 12, 22.989_769_282),
    Isotope::new(12, 12, 23.985_041_697),
    Isotope::new(12, 13, 24.985_836_976),
    Isotope::new(12, 14, 25.982_592_968),
    Isotope::new(13, 14, 26.981_538_530),
    Isotope::new(14, 14, 27.976_926_535),
    Isotope::new(14, 15, 28.976_494_665),
    Isotope::new(14, 16, 29.973_770_136),
];

/// Immutable, indexed isotope catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeTable {
    entries: Vec<Isotope>,
}

impl Default for IsotopeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl IsotopeTable {
    /// Build a table from entries in the given catalog order
    pub fn new(entries: Vec<Isotope>) -> Self {
        Self { entries }
    }

    /// The built-in light-isotope catalog
    pub fn standard() -> Self {
        Self::new(STANDARD_CATALOG.to_vec())
    }

    pub fn entries(&self) -> &[Isotope] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for an exact (Z, N) match
    pub fn lookup(&self, nuclide: Nuclide) -> Option<&Isotope> {
        self.entries.iter().find(|iso| iso.nuclide == nuclide)
    }

    /// Mass of a nuclide; empty space and untabulated nuclides weigh nothing
    pub fn mass_of(&self, nuclide: Nuclide) -> f64 {
        self.lookup(nuclide).map(|iso| iso.mass).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_catalog_is_unique() {
        let table = IsotopeTable::standard();
        let unique: HashSet<Nuclide> = table.entries().iter().map(|iso| iso.nuclide).collect();
        assert_eq!(unique.len(), table.len());
        assert!(table.entries().iter().all(|iso| !iso.nuclide.is_empty()));
    }

    #[test]
    fn test_masses_track_mass_number() {
        // Atomic masses stay within half a unit of A for light nuclei
        for iso in IsotopeTable::standard().entries() {
            let a = iso.mass_number() as f64;
            assert!((iso.mass - a).abs() < 0.5, "{} mass {}", iso.nuclide, iso.mass);
        }
    }

    #[test]
    fn test_mass_lookup() {
        let table = IsotopeTable::standard();
        assert_eq!(table.mass_of(Nuclide::CARBON_12), 12.0);
        assert!((table.mass_of(Nuclide::PROTIUM) - 1.007_825_032).abs() < 1e-9);
    }

    #[test]
    fn test_untabulated_and_empty_weigh_nothing() {
        let table = IsotopeTable::standard();
        assert_eq!(table.mass_of(Nuclide::EMPTY), 0.0);
        // Diproton is not a bound nucleus
        assert_eq!(table.mass_of(Nuclide::new(2, 0)), 0.0);
        assert!(table.lookup(Nuclide::new(2, 0)).is_none());
    }
}
