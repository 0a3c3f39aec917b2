//! Stacking two oriented supercells into one periodic layered structure.

use nalgebra::Vector3;

use crate::config::{STACKING_AXIS, WRAP_EPS};
use crate::interfaces::LAYER_PBC;
use crate::structure::atoms::Structure;

/// Stack `film` on top of `substrate`.
///
/// The result takes the substrate cell, its in-plane basis made right-handed; the film is
/// assumed to share it up to the strain accepted by the matcher. The substrate is shifted to start at zero along the stacking
/// axis, the film to start `gap` above the substrate's top atom. Substrate atoms come first,
/// film atoms after them. The stack is then wrapped in-plane and centered along the
/// stacking axis with `vacuum_size` of padding on both sides.
pub fn join(film: &Structure, substrate: &Structure, gap: f64, vacuum_size: f64) -> Structure {
    let substrate = shift_to_floor(substrate, 0.0);
    let substrate_top = substrate.stacking_range().map(|(_, hi)| hi).unwrap_or(0.0);
    let film = shift_to_floor(film, substrate_top + gap);

    let species = substrate
        .species()
        .iter()
        .chain(film.species())
        .cloned()
        .collect();
    let positions = substrate
        .positions()
        .iter()
        .chain(film.positions())
        .copied()
        .collect();

    let stacked = Structure::from_parts(species, positions, *substrate.cell(), LAYER_PBC)
        .right_handed_in_plane();
    center_with_vacuum(&wrap_in_plane(&stacked), vacuum_size)
}

// Translate along the stacking axis so the lowest atom sits at `floor`
fn shift_to_floor(structure: &Structure, floor: f64) -> Structure {
    match structure.stacking_range() {
        Some((lo, _)) => {
            let mut shift = Vector3::zeros();
            shift[STACKING_AXIS] = floor - lo;
            structure.translated(shift)
        }
        None => structure.clone(),
    }
}

/// Wrap atoms into the cell along every periodic axis.
///
/// Wrapped fractional coordinates lie in `[-eps, 1 - eps)` so atoms sitting on the far
/// face within rounding map onto the near one.
pub fn wrap_in_plane(structure: &Structure) -> Structure {
    let pbc = structure.pbc();
    let cell = structure.cell();
    let positions = structure
        .fractional_positions()
        .into_iter()
        .map(|mut frac| {
            for axis in 0..3 {
                if pbc[axis] {
                    frac[axis] = (frac[axis] + WRAP_EPS).rem_euclid(1.0) - WRAP_EPS;
                }
            }
            cell * frac
        })
        .collect();
    structure.with_positions(positions)
}

/// Center atoms along the stacking axis and resize the cell for `vacuum` of empty space
/// below and above them.
///
/// Heights are measured along the plane normal, so a tilted third cell vector is
/// stretched along its own direction until its normal component equals the atom span
/// plus twice the vacuum.
pub fn center_with_vacuum(structure: &Structure, vacuum: f64) -> Structure {
    let cell = structure.cell();
    let a: Vector3<f64> = cell.column(0).into();
    let b: Vector3<f64> = cell.column(1).into();
    let c: Vector3<f64> = cell.column(2).into();

    let mut normal = a.cross(&b).normalize();
    if normal.dot(&c) < 0.0 {
        normal = -normal;
    }

    let (lo, hi) = structure
        .positions()
        .iter()
        .map(|r| r.dot(&normal))
        .fold(None, |range: Option<(f64, f64)>, h| match range {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
        .unwrap_or((0.0, 0.0));

    let height = c.dot(&normal);
    let new_height = hi - lo + 2.0 * vacuum;
    let mut new_cell = *cell;
    new_cell.set_column(2, &(c * (new_height / height)));

    let shift = c * ((vacuum - lo) / height);
    let positions = structure.positions().iter().map(|r| r + shift).collect();
    Structure::from_parts(structure.species().to_vec(), positions, new_cell, structure.pbc())
}
