//! Matrices and composed homogeneous transforms
//!
//! [`Matrix`] is a general dense matrix with the factories needed to build
//! rotations, translations and scalings. [`Transform3d`] chains 4×4 matrices
//! and applies their product to positions.

pub mod matrix;
pub mod transform3d;

pub use matrix::{Axis, Matrix};
pub use transform3d::Transform3d;
