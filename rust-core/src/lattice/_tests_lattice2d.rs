#[cfg(test)]
mod _tests_lattice2d {
    use super::super::lattice2d::Lattice2D;
    use super::super::transformation::TransformationMatrix;
    use crate::error::StackError;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector2};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    fn hexagonal(a: f64) -> Lattice2D {
        Lattice2D::new(
            Vector2::new(a, 0.0),
            Vector2::new(-a / 2.0, a * 3.0_f64.sqrt() / 2.0),
        )
    }

    #[test]
    fn test_from_cell_uses_first_two_columns() {
        let cell = Matrix3::new(2.0, 0.5, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 20.0);
        let lattice = Lattice2D::from_cell(&cell).unwrap();
        assert_eq!(lattice.a1(), Vector2::new(2.0, 0.0));
        assert_eq!(lattice.a2(), Vector2::new(0.5, 3.0));
        assert_relative_eq!(lattice.area(), 6.0, epsilon = TOL);
    }

    #[test]
    fn test_from_cell_rejects_degenerate_plane() {
        let cell = Matrix3::new(1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            Lattice2D::from_cell(&cell),
            Err(StackError::SingularCell)
        ));
    }

    #[test]
    fn test_hexagonal_parameters() {
        let lattice = hexagonal(2.46);
        let (a, b) = lattice.lattice_parameters();
        assert_relative_eq!(a, 2.46, epsilon = TOL);
        assert_relative_eq!(b, 2.46, epsilon = TOL);
        assert_relative_eq!(lattice.lattice_angle(), 2.0 * PI / 3.0, epsilon = TOL);
        assert_relative_eq!(
            lattice.area(),
            2.46 * 2.46 * 3.0_f64.sqrt() / 2.0,
            epsilon = TOL
        );
    }

    #[test]
    fn test_signed_area_tracks_handedness() {
        let right = Lattice2D::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 2.0));
        let left = Lattice2D::new(Vector2::new(0.0, 2.0), Vector2::new(1.0, 0.0));
        assert_relative_eq!(right.signed_area(), 2.0, epsilon = TOL);
        assert_relative_eq!(left.signed_area(), -2.0, epsilon = TOL);
        assert_relative_eq!(left.area(), 2.0, epsilon = TOL);
    }

    #[test]
    fn test_transformed_row_convention() {
        let lattice = Lattice2D::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 2.0));
        let t = TransformationMatrix::new([[2, 1], [0, 3]]).unwrap();
        let sl = lattice.transformed(&t);

        // a1' = 2 a1 + a2, a2' = 3 a2
        assert_relative_eq!(sl.a1().x, 2.0, epsilon = TOL);
        assert_relative_eq!(sl.a1().y, 2.0, epsilon = TOL);
        assert_relative_eq!(sl.a2().x, 0.0, epsilon = TOL);
        assert_relative_eq!(sl.a2().y, 6.0, epsilon = TOL);
        assert_relative_eq!(sl.area(), 6.0 * lattice.area(), epsilon = TOL);
    }

    #[test]
    fn test_right_angle() {
        let square = Lattice2D::new(Vector2::new(2.5, 0.0), Vector2::new(0.0, 2.5));
        assert_relative_eq!(square.lattice_angle(), PI / 2.0, epsilon = TOL);
    }
}
