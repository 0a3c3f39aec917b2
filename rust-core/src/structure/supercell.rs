use log::warn;
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::config::SUPERCELL_TOLERANCE;
use crate::error::{Result, StackError};
use crate::lattice::TransformationMatrix;
use crate::structure::atoms::Structure;

/// Replicate `structure` into the in-plane supercell given by `transform`.
///
/// New in-plane vectors are `transform` applied to the old ones (row convention, see
/// [`TransformationMatrix`]); the third vector is kept. Every atom is repeated over the
/// integer in-plane translations that land inside the new cell, and positions are reduced
/// into the new cell along the in-plane axes. Atoms keep their input order, each followed
/// by its images, so the result has `|det| · n` atoms.
pub fn build_supercell(structure: &Structure, transform: &TransformationMatrix) -> Result<Structure> {
    if transform.determinant() == 0 {
        return Err(StackError::SingularTransform(transform.rows()));
    }

    let [[t00, t01], [t10, t11]] = transform.rows();
    let scaling = Matrix3::new(
        t00 as f64, t01 as f64, 0.0,
        t10 as f64, t11 as f64, 0.0,
        0.0, 0.0, 1.0,
    );
    let new_cell = structure.cell() * scaling.transpose();
    // Old fractional coordinates → new fractional coordinates
    let to_new_frac = scaling
        .transpose()
        .try_inverse()
        .ok_or(StackError::SingularTransform(transform.rows()))?;

    // Translations covering the parallelogram spanned by the new vectors in old coordinates
    let corners = [
        (0, 0),
        (t00, t01),
        (t10, t11),
        (t00 + t10, t01 + t11),
    ];
    let (n1_lo, n1_hi) = bounds(corners.iter().map(|c| c.0));
    let (n2_lo, n2_hi) = bounds(corners.iter().map(|c| c.1));

    let inside = |g: f64| g >= -SUPERCELL_TOLERANCE && g < 1.0 - SUPERCELL_TOLERANCE;

    let mut species = Vec::with_capacity(structure.len() * transform.multiplicity() as usize);
    let mut positions = Vec::with_capacity(species.capacity());
    for (symbol, frac) in structure.species().iter().zip(structure.fractional_positions()) {
        let base = Vector3::new(frac.x.rem_euclid(1.0), frac.y.rem_euclid(1.0), frac.z);
        for n1 in (n1_lo - 1)..=n1_hi {
            for n2 in (n2_lo - 1)..=n2_hi {
                let g = to_new_frac * (base + Vector3::new(n1 as f64, n2 as f64, 0.0));
                if inside(g.x) && inside(g.y) {
                    species.push(symbol.clone());
                    positions.push(new_cell * g);
                }
            }
        }
    }

    let expected = structure.len() * transform.multiplicity() as usize;
    if positions.len() != expected {
        warn!(
            "supercell {} produced {} atoms, expected {}",
            transform,
            positions.len(),
            expected
        );
    }

    Ok(Structure::from_parts(species, positions, new_cell, structure.pbc()))
}

fn bounds(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values.fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Rotate cell and atoms rigidly about the stacking axis so the first lattice vector
/// points along +x.
///
/// The stacking axis keeps its direction; species order, interatomic distances and
/// periodicity are unchanged.
pub fn orient_first_vector_along_x(structure: &Structure) -> Structure {
    let a = structure.cell().column(0);
    let angle = a[1].atan2(a[0]);
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), -angle);

    let cell = rotation.matrix() * structure.cell();
    let positions = structure.positions().iter().map(|r| rotation * r).collect();
    Structure::from_parts(structure.species().to_vec(), positions, cell, structure.pbc())
}

/// Build the supercell and bring it into the common stacking frame.
pub fn build_oriented_supercell(
    structure: &Structure,
    transform: &TransformationMatrix,
) -> Result<Structure> {
    build_supercell(structure, transform).map(|supercell| orient_first_vector_along_x(&supercell))
}
