use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};

/// A 2x2 integer supercell matrix.
///
/// Row convention: supercell vector `i` is `Σ_j m[i][j] · a_j`. The determinant is never
/// zero; its absolute value is the number of unit cells in the supercell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformationMatrix(Matrix2<i32>);

impl TransformationMatrix {
    /// Construct from rows, rejecting singular matrices.
    pub fn new(rows: [[i32; 2]; 2]) -> Result<Self> {
        let matrix = Self::from_rows_unchecked(rows);
        if matrix.determinant() == 0 {
            return Err(StackError::SingularTransform(rows));
        }
        Ok(matrix)
    }

    pub(crate) fn from_rows_unchecked(rows: [[i32; 2]; 2]) -> Self {
        TransformationMatrix(Matrix2::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1]))
    }

    pub fn identity() -> Self {
        TransformationMatrix(Matrix2::identity())
    }

    pub fn determinant(&self) -> i64 {
        let m = &self.0;
        m[(0, 0)] as i64 * m[(1, 1)] as i64 - m[(0, 1)] as i64 * m[(1, 0)] as i64
    }

    /// Number of unit cells in the supercell, |det|.
    pub fn multiplicity(&self) -> u64 {
        self.determinant().unsigned_abs()
    }

    /// Whether the supercell basis keeps the handedness of the unit basis.
    pub fn preserves_handedness(&self) -> bool {
        self.determinant() > 0
    }

    pub fn rows(&self) -> [[i32; 2]; 2] {
        let m = &self.0;
        [[m[(0, 0)], m[(0, 1)]], [m[(1, 0)], m[(1, 1)]]]
    }

    pub fn matrix(&self) -> &Matrix2<i32> {
        &self.0
    }

    pub fn as_f64(&self) -> Matrix2<f64> {
        self.0.map(|v| v as f64)
    }
}

impl std::fmt::Display for TransformationMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [[a, b], [c, d]] = self.rows();
        write!(f, "[[{a}, {b}], [{c}, {d}]]")
    }
}

/// Ascending divisors of `n`.
pub fn factors(n: u32) -> Vec<u32> {
    (1..=n).filter(|d| n % d == 0).collect()
}

/// All supercell matrices of the given multiplicity in Hermite normal form,
/// `[[d, k], [0, n/d]]` with `d | n` and `0 <= k < n/d`.
///
/// Each distinct sublattice of index `n` appears exactly once. Order: ascending `d`, then
/// ascending `k`.
pub fn hermite_normal_forms(multiplicity: u32) -> Vec<TransformationMatrix> {
    factors(multiplicity)
        .into_iter()
        .flat_map(|d| {
            let rest = multiplicity / d;
            (0..rest).map(move |k| {
                TransformationMatrix::from_rows_unchecked([[d as i32, k as i32], [0, rest as i32]])
            })
        })
        .collect()
}
