// Structure module: atomic structures of layered materials and the geometry applied to them
// This module builds supercells, orients them in a common frame and stacks them

// ======================== MODULE DECLARATIONS ========================
pub mod assembly;
pub mod atoms;
pub mod supercell;

mod _tests_atoms;

// ======================== ATOMIC STRUCTURE ========================
pub use atoms::Structure; // struct - species, cartesian positions, cell (columns) and periodicity
// Structure impl methods:
//   new(species, positions, cell, pbc) -> Result<Self>       - validated constructor
//   species(&self) / positions(&self) / cell(&self) / pbc(&self)
//   len(&self) -> usize, is_empty(&self) -> bool
//   lattice(&self) -> Result<Lattice2D>                       - in-plane lattice for matching
//   fractional_positions(&self) -> Vec<Vector3<f64>>          - positions in cell coordinates
//   stacking_range(&self) -> Option<(f64, f64)>               - min/max coordinate along the stacking axis
//   translated(&self, shift: Vector3<f64>) -> Structure        - rigid translation of all atoms

// ======================== SUPERCELLS ========================
pub use supercell::{
    build_oriented_supercell,    // fn(structure, transform) -> Result<Structure> - supercell, then first vector along x
    build_supercell,             // fn(structure, transform) -> Result<Structure> - replicate atoms into the supercell
    orient_first_vector_along_x, // fn(structure) -> Structure - rigid rotation about the stacking axis
};

// ======================== HETEROSTRUCTURE ASSEMBLY ========================
pub use assembly::{
    center_with_vacuum, // fn(structure, vacuum) -> Structure - center along the stacking axis with vacuum padding
    join,               // fn(film, substrate, gap, vacuum) -> Structure - stack film on substrate
    wrap_in_plane,      // fn(structure) -> Structure - wrap atoms into the cell along periodic axes
};
