use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};
use crate::lattice::{Lattice2D, TransformationMatrix};
use crate::matching::strain::StrainTensor;
use crate::matching::zsl::{MatcherSettings, ZslMatcher};

/// A commensurate film/substrate supercell pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Integer matrix taking the film unit lattice to `film_superlattice`
    pub film_transform: TransformationMatrix,
    /// Integer matrix taking the substrate unit lattice to `substrate_superlattice`
    pub substrate_transform: TransformationMatrix,
    pub film_superlattice: Lattice2D,
    pub substrate_superlattice: Lattice2D,
    /// Strain deforming the film superlattice onto the substrate superlattice
    pub strain: StrainTensor,
}

impl Match {
    /// Largest absolute strain component
    pub fn max_strain(&self) -> f64 {
        self.strain.max_component()
    }

    /// Both transforms have determinants of the same sign and the film superlattice maps
    /// onto the substrate superlattice without a reflection (`det F > 0`).
    pub fn preserves_handedness(&self) -> bool {
        let same_sign =
            self.film_transform.preserves_handedness() == self.substrate_transform.preserves_handedness();
        let unmirrored =
            self.film_superlattice.signed_area() * self.substrate_superlattice.signed_area() > 0.0;
        same_sign && unmirrored
    }

    /// Substrate supercell area (Å²)
    pub fn area(&self) -> f64 {
        self.substrate_superlattice.area()
    }
}

impl ZslMatcher {
    /// First candidate, in search order, strained strictly less than `max_strain` and
    /// keeping relative handedness.
    pub fn find_match(
        &self,
        film: &Lattice2D,
        substrate: &Lattice2D,
        max_strain: f64,
    ) -> Result<Match> {
        let mut inspected = 0usize;
        for candidate in self.candidates(film, substrate) {
            inspected += 1;
            if candidate.max_strain() < max_strain && candidate.preserves_handedness() {
                debug!(
                    "accepted candidate #{}: film {} / substrate {}, area {:.3} Å², max strain {:.3e}",
                    inspected,
                    candidate.film_transform,
                    candidate.substrate_transform,
                    candidate.area(),
                    candidate.max_strain()
                );
                return Ok(candidate);
            }
        }

        debug!(
            "no match among {} coincident candidates (max_area = {}, max_strain = {})",
            inspected,
            self.settings().max_area,
            max_strain
        );
        Err(StackError::NoMatchFound {
            film: None,
            substrate: None,
            max_misfit: max_strain,
            max_area: self.settings().max_area,
        })
    }
}

/// Find the supercell pair matching `film` onto `substrate` with the default coincidence
/// tolerances.
pub fn find_match(
    film: &Lattice2D,
    substrate: &Lattice2D,
    max_strain: f64,
    max_area: f64,
) -> Result<Match> {
    ZslMatcher::new(MatcherSettings::with_max_area(max_area)).find_match(film, substrate, max_strain)
}
