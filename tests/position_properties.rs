//! Behavioural properties of positions and transforms through the public API

use approx::{assert_abs_diff_eq, assert_relative_eq};
use poslib::{
    marshal, Axis, CoordinateSystem, Matrix, PoslibError, Position, Tolerance, Transform3d,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use std::f64::consts::PI;

fn random_positions(seed: u64, count: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Position::cartesian(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            )
        })
        .collect()
}

#[test]
fn test_conversion_round_trips() {
    for original in random_positions(1, 100) {
        for system in CoordinateSystem::ALL {
            let mut p = original.clone();
            p.to_system(system).to_cartesian();
            assert_abs_diff_eq!(p, original, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_conversions_are_idempotent() {
    for original in random_positions(2, 20) {
        for system in CoordinateSystem::ALL {
            let mut once = original.clone();
            once.to_system(system);
            let mut twice = once.clone();
            twice.to_system(system);
            assert_eq!(once.coords(), twice.coords());
        }
    }
}

#[test]
fn test_additive_inverse() {
    let points = random_positions(3, 40);
    for pair in points.chunks_exact(2) {
        let mut p = pair[0].clone();
        p.to_spherical();
        p.add(&pair[1]).sub(&pair[1]);
        assert_abs_diff_eq!(p, pair[0], epsilon = 1e-9);
    }
}

#[rstest]
#[case(0.0)]
#[case(PI / 4.0)]
#[case(PI / 2.0)]
#[case(PI)]
#[case(3.0 * PI / 2.0)]
fn test_rotation_inverse(#[case] angle: f64) {
    let axis = Position::cartesian(0.2, -1.0, 0.6);
    for original in random_positions(4, 10) {
        let mut p = original.clone();
        p.rotate_around_y(angle).rotate_around_y(-angle);
        assert_abs_diff_eq!(p, original, epsilon = 1e-9);

        let mut a = original.clone();
        a.rotate_around_axis(&axis, angle)
            .rotate_around_axis(&axis, -angle);
        assert_abs_diff_eq!(a, original, epsilon = 1e-9);
    }
}

#[test]
fn test_rotations_preserve_distance() {
    let mut rng = StdRng::seed_from_u64(5);
    for original in random_positions(6, 30) {
        let mut p = original.clone();
        p.rotate_around_x(rng.gen_range(-PI..PI))
            .rotate_around_y(rng.gen_range(-PI..PI))
            .rotate_vertical(rng.gen_range(-PI..PI))
            .rotate_around_z(rng.gen_range(-PI..PI));
        assert_relative_eq!(p.mag_s(), original.mag_s(), epsilon = 1e-9);
    }
}

#[test]
fn test_relative_round_trip() {
    for original in random_positions(7, 30) {
        let mut p = original.clone();
        p.relative();
        p.unrelative().unwrap();
        assert_abs_diff_eq!(p, original, epsilon = 1e-9);
    }
}

#[test]
fn test_local_offsets_keep_their_length() {
    let mut rng = StdRng::seed_from_u64(8);
    for frame in random_positions(9, 30) {
        let local = Position::cartesian(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let mut p = frame.clone();
        p.relative().set_to(&local);
        p.unrelative_with(Tolerance::new(1e-12)).unwrap();

        let distance_sqr = Position::distance_sqr(&p, &frame);
        assert_relative_eq!(distance_sqr, local.mag_s_sqr(), epsilon = 1e-9);
    }
}

#[test]
fn test_transform_inverse_consistency() {
    let frames = random_positions(10, 5);
    for frame in &frames {
        let transforms = frame.transforms();
        for original in random_positions(11, 10) {
            let mut p = original.clone();
            p.transform(&transforms.to_local)
                .transform(&transforms.from_local);
            assert_abs_diff_eq!(p, original, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_matrix_identity_laws() {
    let m = Matrix::rotation_3d(Axis::Y, 0.9, true);
    assert_eq!(Matrix::identity(4).multiply(&m).unwrap(), m);
    assert_eq!(m.multiply(&Matrix::identity(4)).unwrap(), m);
}

#[test]
fn test_transform_matches_position_rotation() {
    let t = Transform3d::from_matrix(Matrix::rotation_3d(Axis::Y, 0.4, true)).unwrap();
    for original in random_positions(12, 20) {
        let mut by_matrix = original.clone();
        by_matrix.transform(&t);
        let mut by_angle = original.clone();
        by_angle.rotate_around_y(0.4);
        assert_abs_diff_eq!(by_matrix, by_angle, epsilon = 1e-9);
    }
}

#[test]
fn test_unit_x_spherical_values() {
    let mut p = Position::cartesian(1.0, 0.0, 0.0);
    p.to_spherical();
    assert_relative_eq!(p.mag_s(), 1.0);
    assert_relative_eq!(p.ang1(), PI / 2.0);
    assert_relative_eq!(p.ang2(), 0.0);
}

#[test]
fn test_errors_leave_state_untouched() {
    let mut p = Position::cylindrical(1.0, 0.5, 2.0);
    let before = p.coords();
    assert_eq!(p.revert().unwrap_err(), PoslibError::NoCheckpoint);
    assert_eq!(p.unrelative().unwrap_err(), PoslibError::NotRelative);
    assert_eq!(p.coords(), before);

    let mut t = Transform3d::new();
    assert!(t.add_transform(Matrix::identity(3)).is_err());
    assert!(t.is_empty());
}

#[test]
fn test_flat_buffers_round_trip() {
    let positions = random_positions(13, 10);
    let flat = marshal::to_flat_tagged(&positions);
    for (index, original) in positions.iter().enumerate() {
        let decoded = marshal::from_flat_tagged(&flat, index).unwrap();
        assert_abs_diff_eq!(decoded, *original);
    }
}
