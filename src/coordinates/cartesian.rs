//! # Cartesian Vector Module
//!
//! This module provides the plain 3D Cartesian vector used as scratch space by
//! the geometry helpers of [`Position`](crate::position::Position) and as the
//! common intermediate format for transformations.
//!
//! ## Coordinate System Convention
//!
//! This crate uses a Y-up convention:
//! - **Y-axis**: The vertical axis
//! - **Z-axis**: Horizontal, marks azimuth 0 in Spherical and Cylindrical
//! - **X-axis**: Horizontal, azimuth π/2
//!
//! Azimuth is measured as `atan2(x, z)`, counter-clockwise around Y when seen
//! from above.
//!
//! ## Stack Scratch Values
//!
//! `Cartesian3` is `Copy` and three `f64`s wide. Plane, line and segment
//! computations build their intermediates as locals of this type, so none of
//! them share state and all of them are reentrant.
//!
//! ## Examples
//!
//! ```rust
//! use poslib::coordinates::cartesian::Cartesian3;
//!
//! let forward = Cartesian3::new(0.0, 0.0, 1.0);
//! let up = Cartesian3::new(0.0, 1.0, 0.0);
//!
//! assert_eq!(forward.dot(&up), 0.0);
//! let right = up.cross(&forward);
//! assert_eq!(right, Cartesian3::new(1.0, 0.0, 0.0));
//! ```

use nalgebra::Vector3;
use std::f64::consts::PI;

/// Three-dimensional Cartesian vector
///
/// Represents a point or direction in 3D space. Unlike
/// [`Position`](crate::position::Position) it carries no coordinate system
/// tag, checkpoint or frame, which makes it the cheap value type for
/// intermediate results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3 {
    /// X-component (azimuth π/2 direction)
    pub x: f64,
    /// Y-component (vertical)
    pub y: f64,
    /// Z-component (azimuth 0 direction)
    pub z: f64,
}

impl Cartesian3 {
    /// The origin
    pub const ZERO: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along the positive X axis
    pub const X_AXIS: Cartesian3 = Cartesian3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along the positive Y (vertical) axis
    pub const Y_AXIS: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit vector along the positive Z axis
    pub const Z_AXIS: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new Cartesian vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::coordinates::cartesian::Cartesian3;
    ///
    /// let v = Cartesian3::new(1.0, 2.0, 3.0);
    /// assert_eq!(v.x, 1.0);
    /// assert_eq!(v.y, 2.0);
    /// assert_eq!(v.z, 3.0);
    /// ```
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Calculates the magnitude (length) of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 0.0, 4.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        self.magnitude_sqr().sqrt()
    }

    /// Squared magnitude, avoiding the square root
    pub fn magnitude_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Calculates the dot product with another vector
    ///
    /// `dot = x₁*x₂ + y₁*y₂ + z₁*z₂`
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculates the right-handed cross product with another vector
    ///
    /// ```text
    /// cross = (y₁*z₂ - z₁*y₂, z₁*x₂ - x₁*z₂, x₁*y₂ - y₁*x₂)
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::coordinates::cartesian::Cartesian3;
    ///
    /// let z = Cartesian3::X_AXIS.cross(&Cartesian3::Y_AXIS);
    /// assert_eq!(z, Cartesian3::Z_AXIS);
    /// ```
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Angle between two vectors in radians, in [0, π]
    ///
    /// Returns 0 when either vector has zero length.
    pub fn angle_between(&self, other: &Cartesian3) -> f64 {
        let mag_product = self.magnitude() * other.magnitude();

        if mag_product == 0.0 {
            return 0.0;
        }

        let cos_angle = self.dot(other) / mag_product;

        // Handle numerical precision issues
        if cos_angle >= 1.0 {
            0.0
        } else if cos_angle <= -1.0 {
            PI
        } else {
            cos_angle.acos()
        }
    }

    /// Scalar projection of this vector onto `onto`: `dot(self, onto) / |onto|`
    ///
    /// Returns `None` when `onto` has zero length.
    pub fn scalar_projection(&self, onto: &Cartesian3) -> Option<f64> {
        let len = onto.magnitude();
        if len == 0.0 {
            None
        } else {
            Some(self.dot(onto) / len)
        }
    }

    /// Vector projection of this vector onto `onto`
    ///
    /// Projecting onto the zero vector yields the origin.
    pub fn project_onto(&self, onto: &Cartesian3) -> Cartesian3 {
        let len_sqr = onto.magnitude_sqr();
        if len_sqr == 0.0 {
            log::debug!("Projection onto a zero-length vector, using the origin");
            return Cartesian3::ZERO;
        }
        *onto * (self.dot(onto) / len_sqr)
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }

    /// Components as an array in XYZ order
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vector3<f64>> for Cartesian3 {
    fn from(vec: Vector3<f64>) -> Self {
        Cartesian3::from_vector3(vec)
    }
}

impl From<Cartesian3> for Vector3<f64> {
    fn from(cart: Cartesian3) -> Self {
        cart.to_vector3()
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
