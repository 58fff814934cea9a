//! Nuclide identity: a (proton, neutron) pair
//!
//! A cell holding Z = N = 0 is empty space.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A nuclide, or empty space when both counts are zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Nuclide {
    /// Proton count (Z)
    pub z: u32,
    /// Neutron count (N)
    pub n: u32,
}

impl Nuclide {
    /// Empty space
    pub const EMPTY: Nuclide = Nuclide { z: 0, n: 0 };
    /// Protium (¹H)
    pub const PROTIUM: Nuclide = Nuclide { z: 1, n: 0 };
    /// Deuterium (²H)
    pub const DEUTERIUM: Nuclide = Nuclide { z: 1, n: 1 };
    /// Helium-3
    pub const HELIUM_3: Nuclide = Nuclide { z: 2, n: 1 };
    /// Helium-4
    pub const HELIUM_4: Nuclide = Nuclide { z: 2, n: 2 };
    /// Carbon-12
    pub const CARBON_12: Nuclide = Nuclide { z: 6, n: 6 };
    /// Nitrogen-14
    pub const NITROGEN_14: Nuclide = Nuclide { z: 7, n: 7 };
    /// Oxygen-16
    pub const OXYGEN_16: Nuclide = Nuclide { z: 8, n: 8 };

    #[inline]
    pub const fn new(z: u32, n: u32) -> Self {
        Self { z, n }
    }

    /// Mass number A = Z + N
    #[inline]
    pub const fn mass_number(&self) -> u32 {
        self.z + self.n
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.z == 0 && self.n == 0
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(f, "(Z={}, N={})", self.z, self.n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_number() {
        assert_eq!(Nuclide::CARBON_12.mass_number(), 12);
        assert_eq!(Nuclide::HELIUM_3.mass_number(), 3);
        assert_eq!(Nuclide::EMPTY.mass_number(), 0);
    }

    #[test]
    fn test_empty() {
        assert!(Nuclide::default().is_empty());
        assert!(!Nuclide::new(0, 1).is_empty());
        assert_eq!(Nuclide::EMPTY.to_string(), "empty");
    }
}
