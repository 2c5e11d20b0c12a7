//! Rotations and axis-plane mirrors
//!
//! All axis rotations are counter-clockwise when the axis is viewed from its
//! positive end looking towards the origin, matching
//! [`Matrix::rotation_3d`](crate::transform::Matrix::rotation_3d).
//!
//! Rotations around Y and the vertical rotation are a single addition in the
//! angular systems, so they leave the position Cylindrical or Spherical.
//! Rotations around X and Z work on Cartesian components.

use super::Position;
use crate::constants::{HALF, QUARTER};
use crate::coordinates::CoordinateSystem;
use crate::transform::Axis;

impl Position {
    /// Rotates around the vertical Y axis
    ///
    /// Spherical positions stay Spherical; anything else becomes Cylindrical.
    pub fn rotate_around_y(&mut self, angle: f64) -> &mut Self {
        self.with_azimuth(|ang1| *ang1 += angle)
    }

    /// Raises the elevation by `angle`, converting to Spherical
    ///
    /// Elevations past ±π/2 carry the point over the pole, so "up" here means
    /// increasing the angle rather than always increasing y.
    pub fn rotate_vertical(&mut self, angle: f64) -> &mut Self {
        self.with_spherical(|_, _, ang2| *ang2 += angle)
    }

    /// Rotates around the X axis, converting to Cartesian
    pub fn rotate_around_x(&mut self, angle: f64) -> &mut Self {
        self.with_cartesian(|_, y, z| {
            let radius = (*z * *z + *y * *y).sqrt();
            let (sin, cos) = (y.atan2(*z) - angle).sin_cos();
            *y = radius * sin;
            *z = radius * cos;
        })
    }

    /// Rotates around the Z axis, converting to Cartesian
    pub fn rotate_around_z(&mut self, angle: f64) -> &mut Self {
        self.with_cartesian(|x, y, _| {
            let radius = (*x * *x + *y * *y).sqrt();
            let (sin, cos) = (y.atan2(*x) + angle).sin_cos();
            *y = radius * sin;
            *x = radius * cos;
        })
    }

    /// Rotates around a principal axis
    pub fn rotate_around(&mut self, axis: Axis, angle: f64) -> &mut Self {
        match axis {
            Axis::X => self.rotate_around_x(angle),
            Axis::Y => self.rotate_around_y(angle),
            Axis::Z => self.rotate_around_z(angle),
        }
    }

    /// Rotates around the line through the origin and `axis`
    ///
    /// The axis is first turned onto +Y, the rotation happens around Y, and
    /// the axis is turned back:
    /// `Y(-a1)`, `X(-(π/2 - a2))`, `Y(angle)`, `X(π/2 - a2)`, `Y(a1)`,
    /// where `a1` and `a2` are the azimuth and elevation of `axis`.
    pub fn rotate_around_axis(&mut self, axis: &Position, angle: f64) -> &mut Self {
        let azimuth = axis.ang1();
        let tilt = QUARTER - axis.ang2();
        self.rotate_around_y(-azimuth)
            .rotate_around_x(-tilt)
            .rotate_around_y(angle)
            .rotate_around_x(tilt)
            .rotate_around_y(azimuth)
    }

    /// Mirrors across the XY plane (negates z)
    pub fn mirror_across_xy(&mut self) -> &mut Self {
        match self.system() {
            CoordinateSystem::Cartesian => self.with_cartesian(|_, _, z| *z = -*z),
            _ => self.with_azimuth(|ang1| *ang1 = -(*ang1 + HALF)),
        }
    }

    /// Mirrors across the YZ plane (negates x)
    pub fn mirror_across_yz(&mut self) -> &mut Self {
        match self.system() {
            CoordinateSystem::Cartesian => self.with_cartesian(|x, _, _| *x = -*x),
            _ => self.with_azimuth(|ang1| *ang1 = -*ang1),
        }
    }

    /// Mirrors across the ZX plane (negates y)
    pub fn mirror_across_zx(&mut self) -> &mut Self {
        match self.system() {
            CoordinateSystem::Spherical => self.with_spherical(|_, _, ang2| *ang2 = -*ang2),
            CoordinateSystem::Cylindrical => self.with_cylindrical(|_, _, y| *y = -*y),
            CoordinateSystem::Cartesian => self.with_cartesian(|_, y, _| *y = -*y),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinates::{Cartesian3, CoordinateSystem};
    use crate::position::Position;
    use crate::transform::{Axis, Matrix};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Rotation3, Unit, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use std::f64::consts::PI;

    fn random_position(rng: &mut StdRng) -> Position {
        Position::cartesian(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        )
    }

    #[test]
    fn test_quarter_turn_around_y() {
        // Azimuth grows from +Z towards +X, so +X moves on to -Z
        let mut p = Position::cartesian(1.0, 0.0, 0.0);
        p.rotate_around_y(PI / 2.0);
        assert_eq!(p.system(), CoordinateSystem::Cylindrical);
        assert_abs_diff_eq!(p, Position::cartesian(0.0, 0.0, -1.0), epsilon = 1e-12);

        let mut z = Position::cartesian(0.0, 0.0, 1.0);
        z.rotate_around_y(PI / 2.0);
        assert_abs_diff_eq!(z, Position::cartesian(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_stays_spherical_around_y() {
        let mut p = Position::spherical(2.0, 0.1, 0.3);
        p.rotate_around_y(0.5);
        assert_eq!(p.system(), CoordinateSystem::Spherical);
        assert_relative_eq!(p.ang1(), 0.6);
    }

    #[rstest]
    #[case(0.0)]
    #[case(PI / 4.0)]
    #[case(PI / 2.0)]
    #[case(PI)]
    #[case(3.0 * PI / 2.0)]
    fn test_rotations_undo(#[case] angle: f64) {
        let original = Position::cartesian(0.3, -1.7, 2.2);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mut p = original.clone();
            p.rotate_around(axis, angle).rotate_around(axis, -angle);
            assert_abs_diff_eq!(p, original, epsilon = 1e-12);
        }

        let mut v = original.clone();
        v.rotate_vertical(angle).rotate_vertical(-angle);
        assert_abs_diff_eq!(v, original, epsilon = 1e-12);
    }

    #[rstest]
    #[case(Axis::X)]
    #[case(Axis::Y)]
    #[case(Axis::Z)]
    fn test_rotations_match_matrices(#[case] axis: Axis) {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let angle = rng.gen_range(-PI..PI);
            let mut p = random_position(&mut rng);
            let column = Matrix::column(&p.cartesian_value().to_array());
            let rotated = Matrix::rotation_3d(axis, angle, false)
                .multiply(&column)
                .unwrap();

            p.rotate_around(axis, angle);
            assert_relative_eq!(p.x(), rotated[(0, 0)], epsilon = 1e-10);
            assert_relative_eq!(p.y(), rotated[(1, 0)], epsilon = 1e-10);
            assert_relative_eq!(p.z(), rotated[(2, 0)], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rotate_around_axis_matches_nalgebra() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let axis = random_position(&mut rng);
            let angle = rng.gen_range(-PI..PI);
            let mut p = random_position(&mut rng);

            let rotation = Rotation3::from_axis_angle(
                &Unit::new_normalize(axis.cartesian_value().to_vector3()),
                angle,
            );
            let expected: Vector3<f64> = rotation * p.cartesian_value().to_vector3();

            p.rotate_around_axis(&axis, angle);
            assert_abs_diff_eq!(
                p,
                Position::from(Cartesian3::from(expected)),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_rotate_around_principal_axes_as_positions() {
        let original = Position::cartesian(1.0, 2.0, 3.0);
        let mut via_axis = original.clone();
        via_axis.rotate_around_axis(&Position::cartesian(2.0, 0.0, 0.0), 0.7);
        let mut direct = original.clone();
        direct.rotate_around_x(0.7);
        assert_abs_diff_eq!(via_axis, direct, epsilon = 1e-12);

        // Points on the axis stay put
        let axis = Position::cartesian(1.0, 1.0, -1.0);
        let mut on_axis = axis.clone();
        on_axis.scale(3.0).rotate_around_axis(&axis, 2.0);
        let mut expected = axis.clone();
        expected.scale(3.0);
        assert_abs_diff_eq!(on_axis, expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(Position::cartesian(1.0, 2.0, 3.0))]
    #[case(Position::spherical(2.0, 0.4, -0.9))]
    #[case(Position::cylindrical(1.5, 2.5, -1.0))]
    fn test_axis_plane_mirrors(#[case] original: Position) {
        let (x, y, z) = (original.x(), original.y(), original.z());

        let mut p = original.clone();
        p.mirror_across_xy();
        assert_eq!(p.system(), original.system());
        assert_abs_diff_eq!(p, Position::cartesian(x, y, -z), epsilon = 1e-12);

        let mut p = original.clone();
        p.mirror_across_yz();
        assert_abs_diff_eq!(p, Position::cartesian(-x, y, z), epsilon = 1e-12);

        let mut p = original.clone();
        p.mirror_across_zx();
        assert_abs_diff_eq!(p, Position::cartesian(x, -y, z), epsilon = 1e-12);
    }
}
