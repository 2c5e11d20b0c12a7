//! Coordinate representations
//!
//! [`cartesian::Cartesian3`] is the plain vector used for intermediate math,
//! and [`system::Coords`] is the system-tagged value stored inside a
//! [`Position`](crate::position::Position).

pub mod cartesian;
pub mod system;

pub use cartesian::Cartesian3;
pub use system::{CoordinateSystem, Coords};

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_cartesian3_and_coords_agree() {
        let v = Cartesian3::new(0.0, 0.0, 2.0);
        let coords: Coords = v.into();
        assert_eq!(coords.system(), CoordinateSystem::Cartesian);
        assert_eq!(coords.cartesian(), v);

        // Z marks azimuth zero, X sits a quarter turn away
        assert_eq!(coords.ang1(), 0.0);
        let x: Coords = Cartesian3::X_AXIS.into();
        assert!((x.ang1() - PI / 2.0).abs() < 1e-15);
    }
}
