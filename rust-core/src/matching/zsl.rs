//! Coincidence-lattice candidate enumeration.
//!
//! Supercells are enumerated by multiplicity pair `(i, j)` (film, substrate). Only pairs
//! whose multiplicity ratio can compensate the unit-cell area ratio are considered. For a
//! pair, every Hermite normal form of index `i` (film) and `j` (substrate) is applied and
//! reduced; a film/substrate combination is a candidate once the reduced vectors agree in
//! length and angle within the configured tolerances.
//!
//! Search order is a stable total order: pairs by substrate multiplicity `j` (i.e. by
//! substrate supercell area), then film multiplicity `i`; inside a pair, film matrices
//! form the outer loop and substrate matrices the inner loop, each in
//! [`hermite_normal_forms`] order.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_MAX_ANGLE_TOL, DEFAULT_MAX_AREA, DEFAULT_MAX_AREA_RATIO_TOL, DEFAULT_MAX_LENGTH_TOL,
    LATTICE_TOLERANCE,
};
use crate::lattice::{Lattice2D, ReducedSuperlattice, hermite_normal_forms, reduce_superlattice};
use crate::matching::matcher::Match;
use crate::matching::strain::StrainTensor;

/// Area budget and coincidence tolerances of the search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Largest supercell area explored on either side (Å²)
    pub max_area: f64,
    /// Largest relative length difference between matched superlattice vectors
    pub max_length_tol: f64,
    /// Largest relative difference between the superlattice angles
    pub max_angle_tol: f64,
    /// Largest difference between the area ratio and the multiplicity ratio
    pub max_area_ratio_tol: f64,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        MatcherSettings {
            max_area: DEFAULT_MAX_AREA,
            max_length_tol: DEFAULT_MAX_LENGTH_TOL,
            max_angle_tol: DEFAULT_MAX_ANGLE_TOL,
            max_area_ratio_tol: DEFAULT_MAX_AREA_RATIO_TOL,
        }
    }
}

impl MatcherSettings {
    pub fn with_max_area(max_area: f64) -> Self {
        MatcherSettings {
            max_area,
            ..Default::default()
        }
    }
}

/// Zur–McGill superlattice matcher
#[derive(Debug, Clone, Default)]
pub struct ZslMatcher {
    settings: MatcherSettings,
}

impl ZslMatcher {
    pub fn new(settings: MatcherSettings) -> Self {
        ZslMatcher { settings }
    }

    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// Multiplicity pairs `(film, substrate)` inside the area budget, in search order.
    pub fn multiplicity_pairs(&self, film_area: f64, substrate_area: f64) -> Vec<(u32, u32)> {
        if !(film_area > LATTICE_TOLERANCE && substrate_area > LATTICE_TOLERANCE) {
            return Vec::new();
        }
        let max_film = (self.settings.max_area / film_area).ceil().max(0.0) as u32;
        let max_substrate = (self.settings.max_area / substrate_area).ceil().max(0.0) as u32;
        let tol = self.settings.max_area_ratio_tol;

        let mut pairs = Vec::new();
        for j in 1..max_substrate {
            for i in 1..max_film {
                let (fi, fj) = (i as f64, j as f64);
                let compatible = (film_area / substrate_area - fj / fi).abs() < tol
                    || (substrate_area / film_area - fi / fj).abs() < tol;
                if compatible {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Lazy sequence of coincident supercell pairs between `film` and `substrate`.
    ///
    /// Calling this again restarts the enumeration from the beginning.
    pub fn candidates(&self, film: &Lattice2D, substrate: &Lattice2D) -> CandidateMatches {
        CandidateMatches {
            matcher: self.clone(),
            film: *film,
            substrate: *substrate,
            pairs: self.multiplicity_pairs(film.area(), substrate.area()),
            next_pair: 0,
            films: Vec::new(),
            substrates: Vec::new(),
            film_index: 0,
            substrate_index: 0,
        }
    }

    /// Coincidence test on two reduced superlattices.
    pub fn is_same_vectors(&self, film: &Lattice2D, substrate: &Lattice2D) -> bool {
        let rel_strain = |f: f64, s: f64| s / f - 1.0;
        let (f1, f2) = film.lattice_parameters();
        let (s1, s2) = substrate.lattice_parameters();

        if rel_strain(f1, s1).abs() > self.settings.max_length_tol {
            return false;
        }
        if rel_strain(f2, s2).abs() > self.settings.max_length_tol {
            return false;
        }
        let rel_angle = substrate.lattice_angle() / film.lattice_angle() - 1.0;
        rel_angle.abs() <= self.settings.max_angle_tol
    }
}

/// Iterator over candidate matches in search order.
///
/// Finite: it visits each multiplicity pair of [`ZslMatcher::multiplicity_pairs`] once.
#[derive(Debug, Clone)]
pub struct CandidateMatches {
    matcher: ZslMatcher,
    film: Lattice2D,
    substrate: Lattice2D,
    pairs: Vec<(u32, u32)>,
    next_pair: usize,
    films: Vec<ReducedSuperlattice>,
    substrates: Vec<ReducedSuperlattice>,
    film_index: usize,
    substrate_index: usize,
}

impl CandidateMatches {
    fn load_next_pair(&mut self) -> bool {
        let Some(&(i, j)) = self.pairs.get(self.next_pair) else {
            return false;
        };
        self.next_pair += 1;
        trace!("superlattice multiplicities: film {} / substrate {}", i, j);

        self.films = hermite_normal_forms(i)
            .iter()
            .map(|t| reduce_superlattice(&self.film, t))
            .collect();
        self.substrates = hermite_normal_forms(j)
            .iter()
            .map(|t| reduce_superlattice(&self.substrate, t))
            .collect();
        self.film_index = 0;
        self.substrate_index = 0;
        true
    }
}

impl Iterator for CandidateMatches {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            if self.film_index >= self.films.len() {
                if !self.load_next_pair() {
                    return None;
                }
                continue;
            }

            let film_sl = self.films[self.film_index];
            let substrate_sl = self.substrates[self.substrate_index];
            self.substrate_index += 1;
            if self.substrate_index >= self.substrates.len() {
                self.substrate_index = 0;
                self.film_index += 1;
            }

            if !self
                .matcher
                .is_same_vectors(&film_sl.lattice, &substrate_sl.lattice)
            {
                continue;
            }
            if let Some(strain) = StrainTensor::between(&film_sl.lattice, &substrate_sl.lattice) {
                return Some(Match {
                    film_transform: film_sl.transform,
                    substrate_transform: substrate_sl.transform,
                    film_superlattice: film_sl.lattice,
                    substrate_superlattice: substrate_sl.lattice,
                    strain,
                });
            }
        }
    }
}
