use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::config::{LATTICE_TOLERANCE, STACKING_AXIS};
use crate::error::{Result, StackError};
use crate::interfaces::Periodicity;
use crate::lattice::Lattice2D;

/// A periodic atomic structure.
///
/// Lattice vectors are the columns of `cell`; positions are cartesian (Å). Values are
/// never modified in place: every geometric operation returns a new structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure {
    species: Vec<String>,
    positions: Vec<Vector3<f64>>,
    cell: Matrix3<f64>,
    pbc: Periodicity,
}

impl Structure {
    /// Construct a structure, checking that species and positions line up and that the cell
    /// spans 3D space.
    pub fn new(
        species: Vec<String>,
        positions: Vec<Vector3<f64>>,
        cell: Matrix3<f64>,
        pbc: Periodicity,
    ) -> Result<Self> {
        if species.len() != positions.len() {
            return Err(StackError::InvalidStructure(format!(
                "{} species for {} positions",
                species.len(),
                positions.len()
            )));
        }
        if cell.determinant().abs() < LATTICE_TOLERANCE {
            return Err(StackError::SingularCell);
        }
        Ok(Self::from_parts(species, positions, cell, pbc))
    }

    // Callers guarantee the invariants checked by `new`
    pub(crate) fn from_parts(
        species: Vec<String>,
        positions: Vec<Vector3<f64>>,
        cell: Matrix3<f64>,
        pbc: Periodicity,
    ) -> Self {
        Structure {
            species,
            positions,
            cell,
            pbc,
        }
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn cell(&self) -> &Matrix3<f64> {
        &self.cell
    }

    pub fn pbc(&self) -> Periodicity {
        self.pbc
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// In-plane lattice spanned by the first two cell vectors.
    pub fn lattice(&self) -> Result<Lattice2D> {
        Lattice2D::from_cell(&self.cell)
    }

    pub(crate) fn inverse_cell(&self) -> Matrix3<f64> {
        self.cell
            .try_inverse()
            .expect("Cell inversion failed. This should never happen as the constructor checks for invertibility.")
    }

    /// Positions in fractional (cell) coordinates
    pub fn fractional_positions(&self) -> Vec<Vector3<f64>> {
        let inv = self.inverse_cell();
        self.positions.iter().map(|r| inv * r).collect()
    }

    /// Smallest and largest cartesian coordinate along the stacking axis, `None` when empty.
    pub fn stacking_range(&self) -> Option<(f64, f64)> {
        self.positions
            .iter()
            .map(|r| r[STACKING_AXIS])
            .fold(None, |range, z| match range {
                None => Some((z, z)),
                Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
            })
    }

    /// Rigidly translate every atom by `shift`; the cell is unchanged.
    pub fn translated(&self, shift: Vector3<f64>) -> Structure {
        Structure {
            positions: self.positions.iter().map(|r| r + shift).collect(),
            ..self.clone()
        }
    }

    /// Same structure with the in-plane basis made right-handed about the stacking axis.
    ///
    /// A left-handed basis `(a, b)` is replaced by `(a, -b)`, which spans the same lattice;
    /// atoms are untouched.
    pub fn right_handed_in_plane(&self) -> Structure {
        let cell = &self.cell;
        let signed_area = cell[(0, 0)] * cell[(1, 1)] - cell[(1, 0)] * cell[(0, 1)];
        if signed_area >= 0.0 {
            return self.clone();
        }
        let mut cell = self.cell;
        let b: Vector3<f64> = -cell.column(1).into_owned();
        cell.set_column(1, &b);
        Structure {
            cell,
            ..self.clone()
        }
    }

    pub(crate) fn with_positions(&self, positions: Vec<Vector3<f64>>) -> Structure {
        Structure {
            positions,
            ..self.clone()
        }
    }
}
