//! Fusion reaction resolver
//!
//! Given two reactants, enumerates every nucleon-conserving product
//! configuration of one or two tabulated isotopes, weights the exothermic ones
//! by Q-value and draws one. The draw is suppressed by the Coulomb factor `f`,
//! so a reaction may also fail and leave the reactants untouched.
//!
//! Enumeration walks the isotope catalog in order and is never re-sorted:
//! candidate order decides which product wins a given draw.

use serde::Serialize;

use super::isotopes::IsotopeTable;
use super::nuclide::Nuclide;
use super::random::RandomSource;
use crate::consts::ENERGY_BOOST;

/// A nucleon-conserving product configuration that releases energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub first: Nuclide,
    pub second: Nuclide,
    /// Q-value including the residual-energy boost (always > 0)
    pub q: f64,
}

/// Resolver output: the products written back and the cell's new energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reaction {
    pub first: Nuclide,
    pub second: Nuclide,
    pub energy: f64,
}

impl Reaction {
    /// Reactants returned unchanged with the incoming energy
    pub fn none(p1: Nuclide, p2: Nuclide, e: f64) -> Self {
        Self {
            first: p1,
            second: p2,
            energy: e,
        }
    }

    /// Whether the products differ from the given reactants
    pub fn changed(&self, p1: Nuclide, p2: Nuclide) -> bool {
        (self.first, self.second) != (p1, p2)
    }
}

/// Exothermic product configurations for `p1 + p2`, in catalog order
///
/// For each catalog entry `i`: if it alone carries every nucleon, `(i, empty)`
/// and `(empty, i)` are both listed; then every `(i, j)` pair whose nucleons
/// add up is listed. Each gets `Q = m(p1) + m(p2) - m(products) + 0.01·e`,
/// and only `Q > 0` survives. Untabulated reactants weigh nothing.
pub fn candidates(table: &IsotopeTable, p1: Nuclide, p2: Nuclide, e: f64) -> Vec<Candidate> {
    let nucleons = p1.mass_number() + p2.mass_number();
    if nucleons == 0 {
        return Vec::new();
    }

    let reactant_mass = table.mass_of(p1) + table.mass_of(p2);
    let boost = ENERGY_BOOST * e;
    let mut out = Vec::new();
    let mut consider = |first: Nuclide, second: Nuclide, product_mass: f64| {
        let q = reactant_mass - product_mass + boost;
        if q > 0.0 {
            out.push(Candidate { first, second, q });
        }
    };

    let entries = table.entries();
    for a in entries {
        if a.mass_number() == nucleons {
            consider(a.nuclide, Nuclide::EMPTY, a.mass);
            consider(Nuclide::EMPTY, a.nuclide, a.mass);
        }
        for b in entries {
            if a.mass_number() + b.mass_number() == nucleons {
                consider(a.nuclide, b.nuclide, a.mass + b.mass);
            }
        }
    }
    out
}

/// Running selection weights on a 0..100 scale, suppressed by `f`
///
/// Non-decreasing; the last value is `100·f` whenever any candidate exists.
pub fn cumulative_weights(candidates: &[Candidate], f: f64) -> Vec<f64> {
    let norm: f64 = candidates.iter().map(|c| c.q).sum();
    if norm <= 0.0 {
        return Vec::new();
    }
    let mut running = 0.0;
    candidates
        .iter()
        .map(|c| {
            running += c.q / (0.01 * norm) * f;
            running
        })
        .collect()
}

/// Resolve one fusion attempt between `p1` and `p2`
///
/// `f` in (0, 1] is the Coulomb suppression factor and `e` the residual energy
/// of the cell holding `p1`. On success the winning products come back with
/// their Q-value (before `f` scaling) as the new cell energy. Otherwise the
/// reactants and `e` come back unchanged.
pub fn resolve<R: RandomSource + ?Sized>(
    table: &IsotopeTable,
    p1: Nuclide,
    p2: Nuclide,
    f: f64,
    e: f64,
    rng: &mut R,
) -> Reaction {
    let candidates = candidates(table, p1, p2, e);
    if candidates.is_empty() {
        return Reaction::none(p1, p2, e);
    }

    let weights = cumulative_weights(&candidates, f);
    let r = 100.0 * rng.uniform();
    candidates
        .iter()
        .zip(&weights)
        .find(|&(_, &w)| r < w)
        .map(|(c, _)| Reaction {
            first: c.first,
            second: c.second,
            energy: c.q,
        })
        .unwrap_or_else(|| Reaction::none(p1, p2, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::isotopes::Isotope;
    use crate::sim::random::ScriptedRng;

    fn table() -> IsotopeTable {
        IsotopeTable::standard()
    }

    #[test]
    fn test_empty_reactants_never_react() {
        for &(f, e) in &[(1.0, 0.0), (0.3, 12.5), (1.0, -4.0)] {
            let mut rng = ScriptedRng::uniforms(&[0.0]);
            let out = resolve(&table(), Nuclide::EMPTY, Nuclide::EMPTY, f, e, &mut rng);
            assert_eq!(out, Reaction::none(Nuclide::EMPTY, Nuclide::EMPTY, e));
        }
    }

    #[test]
    fn test_proton_proton_makes_deuterium() {
        let found = candidates(&table(), Nuclide::PROTIUM, Nuclide::PROTIUM, 0.0);
        let pairs: Vec<(Nuclide, Nuclide)> = found.iter().map(|c| (c.first, c.second)).collect();
        assert_eq!(
            pairs,
            vec![
                (Nuclide::DEUTERIUM, Nuclide::EMPTY),
                (Nuclide::EMPTY, Nuclide::DEUTERIUM),
            ]
        );
        assert!(found[0].q > 0.0);

        // Both orderings share the weight; any draw below 100 picks one of them
        for &r in &[0.0, 0.25, 0.75, 0.999] {
            let mut rng = ScriptedRng::uniforms(&[r]);
            let out = resolve(&table(), Nuclide::PROTIUM, Nuclide::PROTIUM, 1.0, 0.0, &mut rng);
            let expected = if r < 0.5 {
                (Nuclide::DEUTERIUM, Nuclide::EMPTY)
            } else {
                (Nuclide::EMPTY, Nuclide::DEUTERIUM)
            };
            assert_eq!((out.first, out.second), expected);
            assert!((out.energy - found[0].q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_candidate_full_weight() {
        let table = IsotopeTable::new(vec![
            Isotope::new(1, 0, 1.007_825_032),
            Isotope::new(1, 1, 2.014_101_778),
        ]);
        // Only (D, empty) and (empty, D) exist; both orderings survive
        let found = candidates(&table, Nuclide::PROTIUM, Nuclide::PROTIUM, 0.0);
        let weights = cumulative_weights(&found, 1.0);
        assert_eq!(weights.len(), 2);
        assert!((weights[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_carbon_with_vacuum() {
        // Nothing lighter than carbon-12 can be assembled from its nucleons
        let mut rng = ScriptedRng::uniforms(&[0.0]);
        let out = resolve(&table(), Nuclide::EMPTY, Nuclide::CARBON_12, 1.0, 0.0, &mut rng);
        assert_eq!(out, Reaction::none(Nuclide::EMPTY, Nuclide::CARBON_12, 0.0));

        // Residual energy lifts the "carbon stays carbon" configurations above zero
        let found = candidates(&table(), Nuclide::EMPTY, Nuclide::CARBON_12, 100.0);
        let pairs: Vec<(Nuclide, Nuclide)> = found.iter().map(|c| (c.first, c.second)).collect();
        assert!(pairs.contains(&(Nuclide::CARBON_12, Nuclide::EMPTY)));
        assert!(pairs.contains(&(Nuclide::EMPTY, Nuclide::CARBON_12)));
        assert!(found.iter().all(|c| c.q > 0.0));
    }

    #[test]
    fn test_endothermic_is_noop() {
        // He-4 + He-4 has no exothermic outcome in the catalog
        let found = candidates(&table(), Nuclide::HELIUM_4, Nuclide::HELIUM_4, 0.0);
        assert!(found.is_empty());
        let mut rng = ScriptedRng::uniforms(&[0.1]);
        let out = resolve(&table(), Nuclide::HELIUM_4, Nuclide::HELIUM_4, 1.0, 0.0, &mut rng);
        assert_eq!(out, Reaction::none(Nuclide::HELIUM_4, Nuclide::HELIUM_4, 0.0));
        assert!(!out.changed(Nuclide::HELIUM_4, Nuclide::HELIUM_4));
    }

    #[test]
    fn test_noop_keeps_residual_energy() {
        // Untabulated reactant: every Q sits near -2 u, and 0.01·e = 0.05
        // cannot lift any of them above zero
        let diproton = Nuclide::new(2, 0);
        let e = 5.0;
        assert!(candidates(&table(), diproton, Nuclide::EMPTY, e).is_empty());
        let mut rng = ScriptedRng::uniforms(&[0.0]);
        let out = resolve(&table(), diproton, Nuclide::EMPTY, 1.0, e, &mut rng);
        assert_eq!(out, Reaction::none(diproton, Nuclide::EMPTY, e));
        assert_eq!(out.energy, e);
    }

    #[test]
    fn test_suppression_can_block_reaction() {
        // f = 0.5 caps the cumulative weight at 50; a draw of 75 misses
        let mut rng = ScriptedRng::uniforms(&[0.75]);
        let out = resolve(&table(), Nuclide::PROTIUM, Nuclide::PROTIUM, 0.5, 3.0, &mut rng);
        assert_eq!(out, Reaction::none(Nuclide::PROTIUM, Nuclide::PROTIUM, 3.0));

        let mut rng = ScriptedRng::uniforms(&[0.2]);
        let out = resolve(&table(), Nuclide::PROTIUM, Nuclide::PROTIUM, 0.5, 0.0, &mut rng);
        assert_eq!((out.first, out.second), (Nuclide::DEUTERIUM, Nuclide::EMPTY));
    }

    #[test]
    fn test_energy_is_unscaled_q() {
        let e = 2.0;
        let found = candidates(&table(), Nuclide::PROTIUM, Nuclide::DEUTERIUM, e);
        let mut rng = ScriptedRng::uniforms(&[0.0]);
        let out = resolve(&table(), Nuclide::PROTIUM, Nuclide::DEUTERIUM, 0.25, e, &mut rng);
        assert_eq!(out.energy, found[0].q);
        assert_eq!(out.first, found[0].first);
    }

    #[test]
    fn test_weights_shape() {
        let found = candidates(&table(), Nuclide::HELIUM_3, Nuclide::HELIUM_4, 0.5);
        assert!(!found.is_empty());
        let weights = cumulative_weights(&found, 0.4);
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
        assert!((weights.last().unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_enumeration_follows_catalog_order() {
        let table = IsotopeTable::new(vec![
            Isotope::new(1, 0, 0.9),
            Isotope::new(1, 1, 1.0),
            Isotope::new(2, 2, 3.5),
            Isotope::new(1, 2, 2.0),
        ]);
        let found = candidates(&table, Nuclide::HELIUM_4, Nuclide::EMPTY, 0.0);
        let pairs: Vec<(Nuclide, Nuclide)> = found.iter().map(|c| (c.first, c.second)).collect();
        // Largest Q sits in the middle: order is catalog order, not magnitude
        assert_eq!(
            pairs,
            vec![
                (Nuclide::PROTIUM, Nuclide::new(1, 2)),
                (Nuclide::DEUTERIUM, Nuclide::DEUTERIUM),
                (Nuclide::new(1, 2), Nuclide::PROTIUM),
            ]
        );
        assert!(found[1].q > found[0].q);
    }

    #[test]
    fn test_untabulated_reactant_weighs_nothing() {
        // A diproton is not in the catalog and resolves to zero mass, so it
        // cannot fuse into anything tabulated on its own...
        let diproton = Nuclide::new(2, 0);
        assert!(candidates(&table(), diproton, Nuclide::EMPTY, 0.0).is_empty());
        // ...until enough residual energy pays for the missing mass
        let found = candidates(&table(), diproton, Nuclide::EMPTY, 1000.0);
        assert!(found.iter().any(|c| c.first == Nuclide::DEUTERIUM));
    }

    #[test]
    fn test_nucleons_conserved() {
        let reactants = [
            (Nuclide::PROTIUM, Nuclide::DEUTERIUM),
            (Nuclide::HELIUM_3, Nuclide::HELIUM_3),
            (Nuclide::CARBON_12, Nuclide::PROTIUM),
            (Nuclide::NITROGEN_14, Nuclide::PROTIUM),
            (Nuclide::OXYGEN_16, Nuclide::HELIUM_4),
        ];
        for (p1, p2) in reactants {
            for c in candidates(&table(), p1, p2, 0.0) {
                assert_eq!(
                    c.first.mass_number() + c.second.mass_number(),
                    p1.mass_number() + p2.mass_number()
                );
            }
        }
    }
}
