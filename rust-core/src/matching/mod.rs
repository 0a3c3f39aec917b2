// Matching module: coincidence-lattice search between a film and a substrate lattice
// This module enumerates integer supercell pairs, measures their strain and selects a match

// ======================== MODULE DECLARATIONS ========================
pub mod matcher;
pub mod strain;
pub mod zsl;


// ======================== STRAIN ========================
pub use strain::{
    StrainTensor,         // struct - 2x2 symmetric Green-Lagrange strain
    deformation_gradient, // fn(from: &Lattice2D, to: &Lattice2D) -> Option<Matrix2<f64>> - F with F·from = to
};
// StrainTensor impl methods:
//   green_lagrange(f: &Matrix2<f64>) -> Self                 - E = ½(FᵀF − I)
//   between(from: &Lattice2D, to: &Lattice2D) -> Option<Self> - strain deforming one lattice onto the other
//   max_component(&self) -> f64                               - largest |E_ij|

// ======================== CANDIDATE ENUMERATION ========================
pub use zsl::{
    CandidateMatches, // struct - lazy, finite, restartable iterator over coincident supercell pairs
    MatcherSettings,  // struct - area budget and coincidence tolerances
    ZslMatcher,       // struct - Zur-McGill style superlattice matcher
};
// ZslMatcher impl methods:
//   new(settings: MatcherSettings) -> Self
//   multiplicity_pairs(&self, film_area: f64, substrate_area: f64) -> Vec<(u32, u32)> - (film, substrate) |det| pairs in search order
//   candidates(&self, film: &Lattice2D, substrate: &Lattice2D) -> CandidateMatches
//   is_same_vectors(&self, film: &Lattice2D, substrate: &Lattice2D) -> bool             - coincidence pre-filter
//   find_match(&self, film: &Lattice2D, substrate: &Lattice2D, max_strain: f64) -> Result<Match>

// ======================== MATCH SELECTION ========================
pub use matcher::{
    Match,      // struct - film/substrate transforms, superlattices and strain
    find_match, // fn(film, substrate, max_strain, max_area) -> Result<Match> - first acceptable candidate
};
