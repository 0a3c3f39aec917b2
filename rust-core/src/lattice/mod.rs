// Lattice module: in-plane lattices, integer supercell transformations and their reduction
// This module provides the 2D lattice primitives the coincidence-lattice search is built on

// ======================== MODULE DECLARATIONS ========================
pub mod lattice2d;
pub mod reduction;
pub mod transformation;

// Test modules
mod _tests_lattice2d;

// ======================== 2D LATTICE STRUCTURE ========================
pub use lattice2d::Lattice2D; // struct - in-plane lattice (two basis vectors as columns)
// Lattice2D impl methods:
//   new(a1: Vector2<f64>, a2: Vector2<f64>) -> Self                 - constructs from basis vectors
//   from_cell(cell: &Matrix3<f64>) -> Result<Self>                  - in-plane part of a 3x3 cell (columns a, b)
//   a1(&self) / a2(&self) -> Vector2<f64>                            - basis vectors
//   area(&self) -> f64                                               - unit cell area |det|
//   signed_area(&self) -> f64                                        - det, negative for left-handed bases
//   lattice_parameters(&self) -> (f64, f64)                          - lengths |a1|, |a2|
//   lattice_angle(&self) -> f64                                      - angle between a1 and a2 in radians
//   transformed(&self, t: &TransformationMatrix) -> Lattice2D        - superlattice spanned by t applied to the basis

// ======================== SUPERCELL TRANSFORMATIONS ========================
pub use transformation::{
    TransformationMatrix, // struct - 2x2 integer matrix with nonzero determinant (row convention)
    factors,              // fn(n: u32) -> Vec<u32> - ascending divisors of n
    hermite_normal_forms, // fn(multiplicity: u32) -> Vec<TransformationMatrix> - all HNF matrices of a given |det|
};

// ======================== SUPERLATTICE REDUCTION ========================
pub use reduction::{
    ReducedSuperlattice, // struct - reduced superlattice vectors + exact integer transform from the unit lattice
    reduce_superlattice, // fn(unit: &Lattice2D, t: &TransformationMatrix) -> ReducedSuperlattice - Zur-McGill reduction
};
