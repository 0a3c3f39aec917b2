use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GAP, DEFAULT_MAX_AREA, DEFAULT_MAX_MISFIT, DEFAULT_VACUUM_SIZE};
use crate::error::{Result, StackError};
use crate::generator::layer_spec::LayerSpec;
use crate::matching::{Match, find_match};
use crate::structure::{Structure, build_oriented_supercell, join};

/// Numeric parameters of the stacking pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Out-of-plane spacing inserted at every interface (Å)
    pub gap: f64,
    /// Strain ceiling for accepted matches (dimensionless, strict)
    pub max_misfit: f64,
    /// Largest supercell area the matcher explores (Å²)
    pub max_area: f64,
    /// Padding below and above the stack (Å)
    pub vacuum_size: f64,
}

impl GeneratorSettings {
    /// Range checks, reported with the offending field name. The gap may be zero; every
    /// other value must be positive, and all must be finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gap", self.gap, true),
            ("max_misfit", self.max_misfit, false),
            ("max_area", self.max_area, false),
            ("vacuum_size", self.vacuum_size, false),
        ];
        for (field, value, zero_allowed) in fields {
            let message = if !value.is_finite() {
                format!("must be finite, got {}", value)
            } else if value < 0.0 || (!zero_allowed && value == 0.0) {
                let bound = if zero_allowed { "non-negative" } else { "positive" };
                format!("must be {}, got {}", bound, value)
            } else {
                continue;
            };
            return Err(StackError::InvalidOptions {
                field: field.to_string(),
                message,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            gap: DEFAULT_GAP,
            max_misfit: DEFAULT_MAX_MISFIT,
            max_area: DEFAULT_MAX_AREA,
            vacuum_size: DEFAULT_VACUUM_SIZE,
        }
    }
}

/// One stacking interface of a generated heterostructure
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceRecord {
    /// Base layer added on top
    pub film: String,
    /// Layer directly underneath
    pub substrate: String,
    pub matched: Match,
    /// Atoms in the film supercell
    pub film_atoms: usize,
    /// Atoms in the substrate supercell (the whole stack below)
    pub substrate_atoms: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackingReport {
    pub structure: Structure,
    pub interfaces: Vec<InterfaceRecord>,
}

/// Stacks named base layers into a heterostructure.
///
/// Base layers are borrowed from the caller and never modified; each stacking step
/// produces a new structure that replaces the previous one.
#[derive(Debug, Clone)]
pub struct HeterostructureGenerator<'a> {
    base_layers: &'a HashMap<String, Structure>,
    settings: GeneratorSettings,
}

impl<'a> HeterostructureGenerator<'a> {
    pub fn new(base_layers: &'a HashMap<String, Structure>, settings: GeneratorSettings) -> Self {
        HeterostructureGenerator {
            base_layers,
            settings,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Stack `layers` bottom to top and return the final structure.
    pub fn generate(&self, layers: &[LayerSpec]) -> Result<Structure> {
        self.generate_with_report(layers).map(|report| report.structure)
    }

    /// Like [`generate`](Self::generate), also returning what was matched at each interface.
    pub fn generate_with_report(&self, layers: &[LayerSpec]) -> Result<StackingReport> {
        self.validate(layers)?;

        let mut current: Option<Structure> = None;
        let mut below = String::new();
        let mut interfaces = Vec::new();

        for spec in layers {
            let base = self.base_layer(&spec.name)?;
            for _ in 0..spec.count {
                current = Some(match current.take() {
                    None => {
                        debug!("starting stack with '{}' ({} atoms)", spec.name, base.len());
                        base.clone()
                    }
                    Some(substrate) => {
                        let (stacked, matched) = self
                            .generate_single_unit(&substrate, base)
                            .map_err(|e| e.with_pairing(&spec.name, &below))?;
                        let film_atoms = matched.film_transform.multiplicity() as usize * base.len();
                        let substrate_atoms =
                            matched.substrate_transform.multiplicity() as usize * substrate.len();
                        info!(
                            "stacked '{}' on '{}': film {} / substrate {}, area {:.2} Å², max strain {:.2e}, {} atoms",
                            spec.name,
                            below,
                            matched.film_transform,
                            matched.substrate_transform,
                            matched.area(),
                            matched.max_strain(),
                            stacked.len()
                        );
                        interfaces.push(InterfaceRecord {
                            film: spec.name.clone(),
                            substrate: below.clone(),
                            matched,
                            film_atoms,
                            substrate_atoms,
                        });
                        stacked
                    }
                });
                below = spec.name.clone();
            }
        }

        let structure = current.ok_or(StackError::EmptyInput)?;
        Ok(StackingReport {
            structure,
            interfaces,
        })
    }

    /// Match `film` onto `substrate`, build both supercells in the common frame and join them.
    ///
    /// Transforms in the returned [`Match`] refer to the right-handed in-plane bases of the
    /// inputs (a left-handed `(a, b)` is read as `(a, -b)`).
    pub fn generate_single_unit(
        &self,
        substrate: &Structure,
        film: &Structure,
    ) -> Result<(Structure, Match)> {
        self.settings.validate()?;
        // Matching and joining assume right-handed in-plane bases on both sides
        let film = &film.right_handed_in_plane();
        let substrate = &substrate.right_handed_in_plane();

        let matched = find_match(
            &film.lattice()?,
            &substrate.lattice()?,
            self.settings.max_misfit,
            self.settings.max_area,
        )?;

        let film_supercell = build_oriented_supercell(film, &matched.film_transform)?;
        let substrate_supercell = build_oriented_supercell(substrate, &matched.substrate_transform)?;
        debug!(
            "joining film supercell ({} atoms) onto substrate supercell ({} atoms)",
            film_supercell.len(),
            substrate_supercell.len()
        );

        let stacked = join(
            &film_supercell,
            &substrate_supercell,
            self.settings.gap,
            self.settings.vacuum_size,
        );
        Ok((stacked, matched))
    }

    fn base_layer(&self, name: &str) -> Result<&'a Structure> {
        self.base_layers
            .get(name)
            .ok_or_else(|| StackError::UnknownLayer {
                name: name.to_string(),
            })
    }

    // Reject the whole sequence before any stacking work is done
    fn validate(&self, layers: &[LayerSpec]) -> Result<()> {
        self.settings.validate()?;
        if layers.is_empty() {
            return Err(StackError::EmptyInput);
        }
        for spec in layers {
            self.base_layer(&spec.name)?;
            if spec.count <= 0 {
                return Err(StackError::InvalidCount {
                    name: spec.name.clone(),
                    count: spec.count,
                });
            }
        }
        Ok(())
    }
}
