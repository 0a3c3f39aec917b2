use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::lattice::Lattice2D;

/// Green–Lagrange strain tensor, E = ½(FᵀF − I).
///
/// Dimensionless and symmetric. Rigid rotations contained in `F` drop out, so the
/// tensor only measures how much the film has to be stretched or sheared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainTensor(pub Matrix2<f64>);

impl StrainTensor {
    pub fn green_lagrange(deformation: &Matrix2<f64>) -> Self {
        StrainTensor(0.5 * (deformation.transpose() * deformation - Matrix2::identity()))
    }

    /// Strain of the linear map carrying `from` onto `to`, vector by vector.
    pub fn between(from: &Lattice2D, to: &Lattice2D) -> Option<Self> {
        deformation_gradient(from, to).map(|f| Self::green_lagrange(&f))
    }

    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.0
    }

    /// Largest absolute component
    pub fn max_component(&self) -> f64 {
        self.0.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

/// Deformation gradient `F` with `F · from_i = to_i` for both basis vectors.
///
/// Returns `None` if `from` is degenerate.
pub fn deformation_gradient(from: &Lattice2D, to: &Lattice2D) -> Option<Matrix2<f64>> {
    from.direct.try_inverse().map(|inv| to.direct * inv)
}
