#[cfg(test)]
mod _tests_atoms {
    use super::super::atoms::Structure;
    use crate::error::StackError;
    use crate::interfaces::LAYER_PBC;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    fn cell(a: f64, c: f64) -> Matrix3<f64> {
        Matrix3::new(a, 0.0, 0.0, 0.0, a, 0.0, 0.0, 0.0, c)
    }

    #[test]
    fn test_new_checks_lengths() {
        let result = Structure::new(
            vec!["C".to_string(), "C".to_string()],
            vec![Vector3::zeros()],
            cell(2.5, 10.0),
            LAYER_PBC,
        );
        assert!(matches!(result, Err(StackError::InvalidStructure(_))));
    }

    #[test]
    fn test_new_checks_cell() {
        let flat = Matrix3::new(2.5, 0.0, 0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 0.0);
        let result = Structure::new(vec![], vec![], flat, LAYER_PBC);
        assert!(matches!(result, Err(StackError::SingularCell)));
    }

    #[test]
    fn test_accessors() {
        let s = Structure::new(
            vec!["Mo".to_string(), "S".to_string()],
            vec![Vector3::new(0.0, 0.0, 5.0), Vector3::new(1.0, 0.5, 6.5)],
            cell(3.16, 20.0),
            LAYER_PBC,
        )
        .unwrap();
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.species(), &["Mo".to_string(), "S".to_string()]);
        assert_eq!(s.pbc(), [true, true, false]);
        assert_eq!(s.stacking_range(), Some((5.0, 6.5)));

        let lattice = s.lattice().unwrap();
        assert_relative_eq!(lattice.area(), 3.16 * 3.16, epsilon = 1e-12);
    }

    #[test]
    fn test_fractional_positions() {
        let s = Structure::new(
            vec!["C".to_string()],
            vec![Vector3::new(1.25, 0.5, 5.0)],
            cell(2.5, 10.0),
            LAYER_PBC,
        )
        .unwrap();
        let frac = s.fractional_positions();
        assert_relative_eq!(frac[0], Vector3::new(0.5, 0.2, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_translated_returns_new_value() {
        let s = Structure::new(
            vec!["C".to_string()],
            vec![Vector3::new(0.0, 0.0, 1.0)],
            cell(2.5, 10.0),
            LAYER_PBC,
        )
        .unwrap();
        let moved = s.translated(Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(s.positions()[0].z, 1.0);
        assert_eq!(moved.positions()[0].z, 3.0);
        assert_eq!(moved.cell(), s.cell());
    }

    #[test]
    fn test_empty_structure_has_no_range() {
        let s = Structure::new(vec![], vec![], cell(2.5, 10.0), LAYER_PBC).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.stacking_range(), None);
    }

    #[test]
    fn test_right_handed_in_plane() {
        let left = Matrix3::new(2.5, 0.0, 0.0, 0.0, -2.5, 0.0, 0.0, 0.0, 10.0);
        let s = Structure::new(
            vec!["C".to_string()],
            vec![Vector3::new(0.5, -0.7, 1.0)],
            left,
            LAYER_PBC,
        )
        .unwrap();

        let fixed = s.right_handed_in_plane();
        assert_eq!(fixed.cell(), &cell(2.5, 10.0));
        assert_eq!(fixed.positions(), s.positions());
        assert_eq!(fixed.species(), s.species());

        // Already right-handed: unchanged
        assert_eq!(fixed.right_handed_in_plane(), fixed);
    }
}
