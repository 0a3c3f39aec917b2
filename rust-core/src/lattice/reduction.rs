//! Zur–McGill reduction of superlattice vector pairs.
//!
//! Two superlattices can only be compared vector-by-vector once each is written in a
//! canonical short basis. The reduction below is the 2D Gauss/Lagrange reduction in the
//! form used by Zur and McGill (J. Appl. Phys. 55, 378 (1984)): make the basis acute,
//! order it by length, and shorten the second vector by the first until neither
//! `b + a` nor `b - a` is shorter than `b`.
//!
//! The integer coefficients are carried along with the float vectors, so the resulting
//! [`TransformationMatrix`] maps the unit lattice exactly onto the reduced basis without
//! any rounding step.

use nalgebra::Vector2;

use crate::lattice::lattice2d::Lattice2D;
use crate::lattice::transformation::TransformationMatrix;

/// Reduced superlattice basis and the integer matrix producing it from the unit lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedSuperlattice {
    pub lattice: Lattice2D,
    pub transform: TransformationMatrix,
}

/// Apply `transform` to `unit` and reduce the resulting basis.
///
/// The reduced transform differs from the input by a unimodular factor, so the
/// multiplicity is unchanged while the sign of the determinant may flip (a swap or a
/// negation of one vector).
pub fn reduce_superlattice(unit: &Lattice2D, transform: &TransformationMatrix) -> ReducedSuperlattice {
    let sl = unit.transformed(transform);
    let rows = transform.rows();

    let mut a = sl.a1();
    let mut b = sl.a2();
    let mut ca = Vector2::new(rows[0][0], rows[0][1]);
    let mut cb = Vector2::new(rows[1][0], rows[1][1]);

    // Every branch either keeps |b| and runs at most once in a row (negation, swap) or
    // strictly shortens b, so the loop terminates.
    loop {
        if a.dot(&b) < 0.0 {
            b = -b;
            cb = -cb;
        } else if a.norm() > b.norm() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut ca, &mut cb);
        } else if b.norm() > (b + a).norm() {
            b += a;
            cb += ca;
        } else if b.norm() > (b - a).norm() {
            b -= a;
            cb -= ca;
        } else {
            break;
        }
    }

    ReducedSuperlattice {
        lattice: Lattice2D::new(a, b),
        transform: TransformationMatrix::from_rows_unchecked([[ca.x, ca.y], [cb.x, cb.y]]),
    }
}
