use nalgebra::{Matrix2, Matrix3, Vector2};
use serde::{Deserialize, Serialize};

use crate::config::LATTICE_TOLERANCE;
use crate::error::{Result, StackError};
use crate::lattice::transformation::TransformationMatrix;

/// The in-plane lattice of a layered structure.
///
/// Only the x/y components of the first two cell vectors enter; the stacking axis is
/// handled by [`crate::structure::Structure`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice2D {
    /// Real-space basis vectors as columns (a1 | a2).
    pub direct: Matrix2<f64>,
}

impl Lattice2D {
    /// Construct a lattice from two in-plane basis vectors.
    pub fn new(a1: Vector2<f64>, a2: Vector2<f64>) -> Self {
        Lattice2D {
            direct: Matrix2::from_columns(&[a1, a2]),
        }
    }

    /// Take the in-plane lattice from a 3x3 cell whose columns are the lattice vectors.
    pub fn from_cell(cell: &Matrix3<f64>) -> Result<Self> {
        let lattice = Lattice2D::new(
            Vector2::new(cell[(0, 0)], cell[(1, 0)]),
            Vector2::new(cell[(0, 1)], cell[(1, 1)]),
        );
        if lattice.area() < LATTICE_TOLERANCE {
            return Err(StackError::SingularCell);
        }
        Ok(lattice)
    }

    pub fn a1(&self) -> Vector2<f64> {
        self.direct.column(0).into()
    }

    pub fn a2(&self) -> Vector2<f64> {
        self.direct.column(1).into()
    }

    /// Unit cell area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Oriented area; negative when (a1, a2) is a left-handed pair.
    pub fn signed_area(&self) -> f64 {
        self.direct.determinant()
    }

    /// Get 2D lattice parameters: a, b (lengths)
    pub fn lattice_parameters(&self) -> (f64, f64) {
        (self.a1().norm(), self.a2().norm())
    }

    /// Get 2D lattice angle: γ (in radians, within [0, π])
    pub fn lattice_angle(&self) -> f64 {
        let (a1, a2) = (self.a1(), self.a2());
        let sin = (a1.x * a2.y - a1.y * a2.x).abs();
        sin.atan2(a1.dot(&a2))
    }

    /// Superlattice whose i-th vector is Σ_j t[i][j] · a_j.
    pub fn transformed(&self, transform: &TransformationMatrix) -> Lattice2D {
        Lattice2D {
            direct: self.direct * transform.as_f64().transpose(),
        }
    }
}
