//! Vector products, projections, distances and octants
//!
//! The distance operations turn the receiver into the offset vector from the
//! closest point on the target (plane, line or segment) to the receiver's
//! original value. Its magnitude is the distance, and subtracting it from the
//! original value gives the closest point.
//!
//! Degenerate targets never produce NaN: projecting onto a zero-length vector
//! (including the normal of a plane given by collinear points) yields the
//! origin.

use super::Position;
use crate::coordinates::{Cartesian3, Coords};
use log::debug;

/// Sign pattern of a position's Cartesian components, in XYZ order
///
/// `N` stands for negative and `P` for positive. The discriminants match the
/// numeric octant codes used in flat data (`NNN = 0` through `PPP = 7`).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octant {
    NNN = 0,
    PNN = 1,
    NPN = 2,
    NNP = 3,
    PPN = 4,
    PNP = 5,
    NPP = 6,
    PPP = 7,
}

impl Octant {
    fn from_signs(x_pos: bool, y_pos: bool, z_pos: bool) -> Self {
        match (x_pos, y_pos, z_pos) {
            (false, false, false) => Octant::NNN,
            (true, false, false) => Octant::PNN,
            (false, true, false) => Octant::NPN,
            (false, false, true) => Octant::NNP,
            (true, true, false) => Octant::PPN,
            (true, false, true) => Octant::PNP,
            (false, true, true) => Octant::NPP,
            (true, true, true) => Octant::PPP,
        }
    }
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn same_signs(a: Cartesian3, b: Cartesian3) -> bool {
    sign(a.x) == sign(b.x) && sign(a.y) == sign(b.y) && sign(a.z) == sign(b.z)
}

/// Offset from the closest point of the segment `start + t·direction`,
/// `t ∈ [0, 1]`, to `point`
fn segment_offset(point: Cartesian3, start: Cartesian3, direction: Cartesian3) -> Cartesian3 {
    let rel = point - start;
    let proj = rel.project_onto(&direction);
    if !same_signs(proj, direction) {
        // Behind the start
        rel
    } else if proj.magnitude_sqr() > direction.magnitude_sqr() {
        rel - direction
    } else {
        rel - proj
    }
}

impl Position {
    /// Dot product with `other`
    pub fn dot(&self, other: &Position) -> f64 {
        self.cartesian_value().dot(&other.cartesian_value())
    }

    /// Replaces the receiver with `self × other`, in Cartesian
    pub fn cross(&mut self, other: &Position) -> &mut Self {
        let product = self.cartesian_value().cross(&other.cartesian_value());
        self.set_cartesian(product)
    }

    /// Angle between the two vectors in `[0, π]`; zero if either is zero
    pub fn angle_between(&self, other: &Position) -> f64 {
        self.cartesian_value().angle_between(&other.cartesian_value())
    }

    /// Projects onto the direction of `onto`
    ///
    /// The receiver takes `onto`'s direction with a spherical magnitude equal
    /// to the scalar projection `dot(self, onto) / |onto|`, so a negative
    /// projection points the opposite way. Projecting onto a zero vector
    /// yields the origin.
    pub fn project_onto(&mut self, onto: &Position) -> &mut Self {
        let length = onto.mag_s();
        if length == 0.0 {
            debug!("Projection onto a zero-length vector, using the origin");
            self.coords = Coords::ORIGIN;
            return self;
        }
        let scalar = self.dot(onto) / length;
        self.coords = onto.coords;
        self.set_mag_s(scalar)
    }

    /// Projects onto the XY plane (z = 0)
    pub fn project_onto_xy(&mut self) -> &mut Self {
        self.set_z(0.0)
    }

    /// Projects onto the YZ plane (x = 0)
    pub fn project_onto_yz(&mut self) -> &mut Self {
        self.set_x(0.0)
    }

    /// Projects onto the XZ plane (y = 0)
    pub fn project_onto_xz(&mut self) -> &mut Self {
        self.set_y(0.0)
    }

    /// Projects onto the X axis
    pub fn project_onto_x(&mut self) -> &mut Self {
        self.set_z(0.0).set_y(0.0)
    }

    /// Projects onto the Y axis
    pub fn project_onto_y(&mut self) -> &mut Self {
        self.set_x(0.0).set_z(0.0)
    }

    /// Projects onto the Z axis
    pub fn project_onto_z(&mut self) -> &mut Self {
        self.set_y(0.0).set_x(0.0)
    }

    /// Projects onto the plane through the origin, `p1` and `p2`
    pub fn project_onto_plane(&mut self, p1: &Position, p2: &Position) -> &mut Self {
        self.project_onto_plane_through(&Position::default(), p1, p2)
    }

    /// Projects onto the plane through `p1`, `p2` and `p3`
    pub fn project_onto_plane_through(
        &mut self,
        p1: &Position,
        p2: &Position,
        p3: &Position,
    ) -> &mut Self {
        let mut offset = Position::from_coords(self.coords);
        offset.dist_from_plane_through(p1, p2, p3);
        self.sub(&offset)
    }

    /// Mirrors across the plane through the origin, `p1` and `p2`
    pub fn mirror_across_plane(&mut self, p1: &Position, p2: &Position) -> &mut Self {
        self.mirror_across_plane_through(&Position::default(), p1, p2)
    }

    /// Mirrors across the plane through `p1`, `p2` and `p3`
    pub fn mirror_across_plane_through(
        &mut self,
        p1: &Position,
        p2: &Position,
        p3: &Position,
    ) -> &mut Self {
        let mut offset = Position::from_coords(self.coords);
        offset.dist_from_plane_through(p1, p2, p3).scale(2.0);
        self.sub(&offset)
    }

    /// Becomes the offset from the plane through the origin, `p1` and `p2`
    pub fn dist_from_plane(&mut self, p1: &Position, p2: &Position) -> &mut Self {
        self.dist_from_plane_through(&Position::default(), p1, p2)
    }

    /// Becomes the offset from the plane through `p1`, `p2` and `p3`
    ///
    /// The offset lies along the plane normal `(p2 - p1) × (p3 - p1)`.
    pub fn dist_from_plane_through(
        &mut self,
        p1: &Position,
        p2: &Position,
        p3: &Position,
    ) -> &mut Self {
        let origin = p1.cartesian_value();
        let normal = (p2.cartesian_value() - origin).cross(&(p3.cartesian_value() - origin));
        self.set_cartesian(self.cartesian_value() - origin)
            .project_onto(&Position::from(normal))
    }

    /// Becomes the offset from the infinite line through `l1` and `l2`
    pub fn dist_from_line(&mut self, l1: &Position, l2: &Position) -> &mut Self {
        let start = l1.cartesian_value();
        let rel = self.cartesian_value() - start;
        let proj = rel.project_onto(&(l2.cartesian_value() - start));
        self.set_cartesian(rel - proj)
    }

    /// Becomes the offset from the closest point on the segment `s1`–`s2`
    pub fn dist_from_segment(&mut self, s1: &Position, s2: &Position) -> &mut Self {
        let start = s1.cartesian_value();
        let offset = segment_offset(self.cartesian_value(), start, s2.cartesian_value() - start);
        self.set_cartesian(offset)
    }

    /// Becomes the offset from the closest point on the segment from the
    /// origin to `end`
    pub fn dist_from_origin_segment(&mut self, end: &Position) -> &mut Self {
        let offset = segment_offset(self.cartesian_value(), Cartesian3::ZERO, end.cartesian_value());
        self.set_cartesian(offset)
    }

    /// Octant of the position, with zero components counted as positive
    pub fn octant_zero_positive(&self) -> Octant {
        let c = self.cartesian_value();
        Octant::from_signs(c.x >= 0.0, c.y >= 0.0, c.z >= 0.0)
    }

    /// Octant of the position, with zero components counted as negative
    pub fn octant_zero_negative(&self) -> Octant {
        let c = self.cartesian_value();
        Octant::from_signs(c.x > 0.0, c.y > 0.0, c.z > 0.0)
    }

    /// Whether every Cartesian component of both positions has the same sign
    ///
    /// Zero is its own sign here, so `(0, 1, 1)` and `(1, 1, 1)` differ.
    pub fn same_octant(&self, other: &Position) -> bool {
        same_signs(self.cartesian_value(), other.cartesian_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HALF, QUARTER};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn random_position(rng: &mut StdRng) -> Position {
        Position::cartesian(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        )
    }

    /// Mirror across a plane through the origin by rotating the plane onto YZ
    fn mirror_by_rotation(point: &Position, p1: &Position, p2: &Position) -> Position {
        let mut normal = p1.clone();
        normal.cross(p2);
        let azimuth = normal.ang1();
        let elevation = normal.ang2();

        let mut p = point.clone();
        p.rotate_around_y(QUARTER - azimuth)
            .rotate_around_z(-elevation)
            .mirror_across_yz()
            .rotate_around_z(elevation)
            .rotate_around_y(azimuth - QUARTER);
        p
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Position::cartesian(1.0, 2.0, 3.0);
        let b = Position::spherical(2.0, 0.0, 0.0);
        assert_relative_eq!(a.dot(&b), 6.0, epsilon = 1e-12);

        let mut x = Position::cartesian(1.0, 0.0, 0.0);
        x.cross(&Position::cartesian(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(x, Position::cartesian(0.0, 0.0, 1.0));

        assert_relative_eq!(
            Position::cartesian(1.0, 0.0, 0.0).angle_between(&Position::cartesian(0.0, 0.0, -3.0)),
            HALF / 2.0
        );
        assert_eq!(Position::default().angle_between(&a), 0.0);
    }

    #[test]
    fn test_project_onto() {
        let mut p = Position::cartesian(3.0, 4.0, 0.0);
        p.project_onto(&Position::cartesian(2.0, 0.0, 0.0));
        assert_abs_diff_eq!(p, Position::cartesian(3.0, 0.0, 0.0), epsilon = 1e-12);

        // Negative projections point away from the target
        let mut n = Position::cartesian(-1.0, 1.0, 0.0);
        n.project_onto(&Position::cartesian(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(n, Position::cartesian(-1.0, 0.0, 0.0), epsilon = 1e-12);

        let mut degenerate = Position::cartesian(1.0, 1.0, 1.0);
        degenerate.project_onto(&Position::default());
        assert_eq!(degenerate.coords(), Coords::ORIGIN);
    }

    #[test]
    fn test_axis_projections() {
        let original = Position::spherical(2.0, 0.8, 0.3);
        let (x, y, z) = (original.x(), original.y(), original.z());
        let cases: [(fn(&mut Position) -> &mut Position, Position); 6] = [
            (Position::project_onto_xy, Position::cartesian(x, y, 0.0)),
            (Position::project_onto_yz, Position::cartesian(0.0, y, z)),
            (Position::project_onto_xz, Position::cartesian(x, 0.0, z)),
            (Position::project_onto_x, Position::cartesian(x, 0.0, 0.0)),
            (Position::project_onto_y, Position::cartesian(0.0, y, 0.0)),
            (Position::project_onto_z, Position::cartesian(0.0, 0.0, z)),
        ];
        for (project, expected) in cases {
            let mut p = original.clone();
            project(&mut p);
            assert_abs_diff_eq!(p, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_plane_offsets() {
        // Horizontal plane at height 2
        let p1 = Position::cartesian(0.0, 2.0, 0.0);
        let p2 = Position::cartesian(1.0, 2.0, 0.0);
        let p3 = Position::cartesian(0.0, 2.0, 1.0);

        let mut offset = Position::cartesian(3.0, 5.0, -1.0);
        offset.dist_from_plane_through(&p1, &p2, &p3);
        assert_abs_diff_eq!(offset, Position::cartesian(0.0, 3.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(offset.mag_s_sqr(), 9.0, epsilon = 1e-12);

        let mut projected = Position::cartesian(3.0, 5.0, -1.0);
        projected.project_onto_plane_through(&p1, &p2, &p3);
        assert_abs_diff_eq!(projected, Position::cartesian(3.0, 2.0, -1.0), epsilon = 1e-12);

        let mut mirrored = Position::cartesian(3.0, 5.0, -1.0);
        mirrored.mirror_across_plane_through(&p1, &p2, &p3);
        assert_abs_diff_eq!(mirrored, Position::cartesian(3.0, -1.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_plane_through_origin() {
        let p1 = Position::cartesian(1.0, 0.0, 0.0);
        let p2 = Position::cartesian(0.0, 1.0, 0.0);

        let mut d = Position::cartesian(2.0, 3.0, 4.0);
        d.dist_from_plane(&p1, &p2);
        assert_abs_diff_eq!(d, Position::cartesian(0.0, 0.0, 4.0), epsilon = 1e-12);

        let mut m = Position::cartesian(2.0, 3.0, 4.0);
        m.mirror_across_plane(&p1, &p2);
        assert_abs_diff_eq!(m, Position::cartesian(2.0, 3.0, -4.0), epsilon = 1e-12);

        let mut p = Position::cartesian(2.0, 3.0, 4.0);
        p.project_onto_plane(&p1, &p2);
        assert_abs_diff_eq!(p, Position::cartesian(2.0, 3.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_plane_has_no_offset() {
        let mut p = Position::cartesian(1.0, 2.0, 3.0);
        p.dist_from_plane(&Position::cartesian(1.0, 0.0, 0.0), &Position::cartesian(2.0, 0.0, 0.0));
        assert_eq!(p.coords(), Coords::ORIGIN);
    }

    #[test]
    fn test_mirror_matches_rotation_method() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let p1 = random_position(&mut rng);
            let p2 = random_position(&mut rng);
            let point = random_position(&mut rng);

            let mut mirrored = point.clone();
            mirrored.mirror_across_plane(&p1, &p2);
            assert_abs_diff_eq!(mirrored, mirror_by_rotation(&point, &p1, &p2), epsilon = 1e-9);

            // Mirroring twice returns the original
            mirrored.mirror_across_plane(&p1, &p2);
            assert_abs_diff_eq!(mirrored, point, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dist_from_line() {
        let mut p = Position::cartesian(5.0, 3.0, 0.0);
        p.dist_from_line(&Position::cartesian(0.0, 1.0, 0.0), &Position::cartesian(1.0, 1.0, 0.0));
        assert_abs_diff_eq!(p, Position::cartesian(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[rstest]
    #[case(Position::cartesian(-2.0, 1.0, 0.0), Position::cartesian(-2.0, 1.0, 0.0))]
    #[case(Position::cartesian(2.0, 1.0, 0.0), Position::cartesian(0.0, 1.0, 0.0))]
    #[case(Position::cartesian(7.0, -1.0, 0.0), Position::cartesian(3.0, -1.0, 0.0))]
    #[case(Position::cartesian(0.0, 0.0, 2.0), Position::cartesian(0.0, 0.0, 2.0))]
    fn test_dist_from_segment(#[case] point: Position, #[case] expected: Position) {
        let s1 = Position::cartesian(0.0, 0.0, 0.0);
        let s2 = Position::cartesian(4.0, 0.0, 0.0);

        let mut p = point.clone();
        p.dist_from_segment(&s1, &s2);
        assert_abs_diff_eq!(p, expected, epsilon = 1e-12);

        let mut o = point.clone();
        o.dist_from_origin_segment(&s2);
        assert_abs_diff_eq!(o, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_dist_from_offset_segment() {
        let s1 = Position::cartesian(1.0, 1.0, 1.0);
        let s2 = Position::cartesian(1.0, 1.0, 3.0);

        let mut beyond = Position::cartesian(1.0, 2.0, 5.0);
        beyond.dist_from_segment(&s1, &s2);
        assert_abs_diff_eq!(beyond, Position::cartesian(0.0, 1.0, 2.0), epsilon = 1e-12);

        let mut inside = Position::cartesian(3.0, 1.0, 2.0);
        inside.dist_from_segment(&s1, &s2);
        assert_abs_diff_eq!(inside, Position::cartesian(2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_octants() {
        let p = Position::cartesian(1.0, -1.0, 0.0);
        assert_eq!(p.octant_zero_positive(), Octant::PNP);
        assert_eq!(p.octant_zero_negative(), Octant::PNN);
        assert_eq!(Position::default().octant_zero_positive(), Octant::PPP);
        assert_eq!(Position::default().octant_zero_negative(), Octant::NNN);
        assert_eq!(Octant::NPP as u8, 6);

        assert!(p.same_octant(&Position::cartesian(3.0, -0.5, 0.0)));
        assert!(!p.same_octant(&Position::cartesian(3.0, -0.5, 1.0)));
    }
}
