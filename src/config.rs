//! Numerical tolerance configuration
//!
//! Equality between positions and the rotation skip thresholds used when
//! leaving a relative frame are governed by a [`Tolerance`]. It is an ordinary
//! value passed to the functions that need it, never process-wide state.

use crate::constants::DEFAULT_EQUALS_ERROR;
use serde::{Deserialize, Serialize};

/// Accepted numerical error for comparisons and near-zero checks
///
/// Two positions are equal under a tolerance `t` when the squared Cartesian
/// distance between them is below `t²`.
///
/// # Examples
///
/// ```rust
/// use poslib::config::Tolerance;
///
/// let tol = Tolerance::new(1e-6);
/// assert!(tol.is_negligible(1e-7));
/// assert!(!tol.is_negligible(1e-5));
/// assert_eq!(tol.squared(), 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute error below which a value counts as zero
    #[serde(default = "default_equals_error")]
    pub equals_error: f64,
}

fn default_equals_error() -> f64 {
    DEFAULT_EQUALS_ERROR
}

impl Tolerance {
    /// Creates a tolerance with the given absolute error
    pub const fn new(equals_error: f64) -> Self {
        Tolerance { equals_error }
    }

    /// The squared error, compared against squared distances
    pub fn squared(&self) -> f64 {
        self.equals_error * self.equals_error
    }

    /// Whether `value` is small enough to skip processing
    pub fn is_negligible(&self, value: f64) -> bool {
        value.abs() <= self.equals_error
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::new(DEFAULT_EQUALS_ERROR)
    }
}
