//! Angular constants and numeric defaults

use std::f64::consts::PI;

/// A quarter turn (π/2)
pub const QUARTER: f64 = PI / 2.0;
/// A half turn (π)
pub const HALF: f64 = PI;

/// Magnitude below which a value is treated as zero, and the default
/// distance under which two positions compare equal
pub const DEFAULT_EQUALS_ERROR: f64 = 1e-11;

/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
