//! Poslib: 3D positions in Cartesian, Spherical and Cylindrical coordinates
//!
//! This crate provides a mutable [`Position`] type that stores its value in
//! whichever coordinate system it was last used in, together with small
//! matrix utilities for composing homogeneous 3D transforms.
//!
//! Y is the vertical axis. The azimuth `ang1` is measured around Y from +Z
//! towards +X (`atan2(x, z)`) and the elevation `ang2` from the horizontal XZ
//! plane. All rotations are right-handed.
//!
//! ```rust
//! use poslib::{Position, Transform3d, Matrix, Axis};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut p = Position::spherical(2.0, 0.0, 0.0);
//! p.rotate_around_x(FRAC_PI_2);
//! assert!((p.y() + 2.0).abs() < 1e-12);
//!
//! let t = Transform3d::from_matrices(vec![
//!     Matrix::rotation_3d(Axis::X, -FRAC_PI_2, true),
//!     Matrix::translation(&[0.0, 1.0, 0.0]),
//! ])
//! .unwrap();
//! p.transform(&t);
//! assert!((p.z() - 2.0).abs() < 1e-12);
//! assert!((p.y() - 1.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod marshal;
pub mod position;
pub mod transform;

// Re-export commonly used types
pub use config::Tolerance;
pub use coordinates::{Cartesian3, CoordinateSystem, Coords};
pub use errors::{PoslibError, Result};
pub use position::{FrameTransforms, Octant, Position};
pub use transform::{Axis, Matrix, Transform3d};
