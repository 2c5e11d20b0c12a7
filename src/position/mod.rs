//! # Positions
//!
//! [`Position`] is a mutable 3D point (or vector) that can be expressed in
//! Cartesian, Spherical or Cylindrical coordinates. Operations convert the
//! receiver into whichever system they need and leave it there, so chaining
//! operations of the same kind avoids repeated trigonometry.
//!
//! Mutating operations take `&mut self` and return `&mut Self` so they can be
//! chained. Other positions passed as operands are borrowed immutably and are
//! never converted.
//!
//! ```rust
//! use poslib::Position;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut p = Position::cartesian(1.0, 0.0, 0.0);
//! p.rotate_around_y(FRAC_PI_2).scale(3.0);
//! assert!((p.z() + 3.0).abs() < 1e-12);
//! ```
//!
//! Besides its value a position may carry a checkpoint (a saved snapshot it can
//! [`revert`](Position::revert) to) and a relative frame (see [`frame`]).

pub mod frame;
pub mod geometry;
pub mod rotation;

pub use frame::FrameTransforms;
pub use geometry::Octant;

use crate::config::Tolerance;
use crate::constants::{DEFAULT_EQUALS_ERROR, DEG2RAD, HALF};
use crate::coordinates::{Cartesian3, CoordinateSystem, Coords};
use crate::errors::{PoslibError, Result};
use approx::AbsDiffEq;
use std::fmt;

/// A point in 3D space, stored in one coordinate system at a time
#[derive(Debug, Clone, Default)]
pub struct Position {
    coords: Coords,
    checkpoint: Option<Box<Position>>,
    relative: Option<Box<Position>>,
}

impl Position {
    /// Creates a position from three components in `system`
    ///
    /// See [`Coords::from_components`] for the component order.
    pub fn new(a: f64, b: f64, c: f64, system: CoordinateSystem) -> Self {
        Self::from_coords(Coords::from_components(a, b, c, system))
    }

    /// Creates a Cartesian position
    pub fn cartesian(x: f64, y: f64, z: f64) -> Self {
        Self::from_coords(Coords::Cartesian { x, y, z })
    }

    /// Creates a Spherical position from magnitude, azimuth and elevation
    pub fn spherical(mag: f64, ang1: f64, ang2: f64) -> Self {
        Self::from_coords(Coords::Spherical { mag, ang1, ang2 })
    }

    /// Creates a Cylindrical position from horizontal radius, azimuth and height
    pub fn cylindrical(mag: f64, ang1: f64, y: f64) -> Self {
        Self::from_coords(Coords::Cylindrical { mag, ang1, y })
    }

    /// Creates a position from the first three values of `values`
    pub fn from_slice(values: &[f64], system: CoordinateSystem) -> Result<Self> {
        match values {
            [a, b, c, ..] => Ok(Self::new(*a, *b, *c, system)),
            _ => Err(PoslibError::BufferLength {
                expected: 3,
                found: values.len(),
            }),
        }
    }

    /// Creates a position holding `coords`, with no checkpoint or frame
    pub fn from_coords(coords: Coords) -> Self {
        Position {
            coords,
            checkpoint: None,
            relative: None,
        }
    }

    /// A copy of this position without its relative frame
    ///
    /// The value and checkpoint are copied; the copy is in absolute mode.
    pub fn detached(&self) -> Position {
        Position {
            coords: self.coords,
            checkpoint: self.checkpoint.clone(),
            relative: None,
        }
    }

    /// Converts to Cartesian
    pub fn to_cartesian(&mut self) -> &mut Self {
        self.coords = self.coords.to_cartesian();
        self
    }

    /// Converts to Spherical
    pub fn to_spherical(&mut self) -> &mut Self {
        self.coords = self.coords.to_spherical();
        self
    }

    /// Converts to Cylindrical
    pub fn to_cylindrical(&mut self) -> &mut Self {
        self.coords = self.coords.to_cylindrical();
        self
    }

    /// Converts to `system`
    pub fn to_system(&mut self, system: CoordinateSystem) -> &mut Self {
        self.coords = self.coords.to_system(system);
        self
    }

    fn with_cartesian(&mut self, f: impl FnOnce(&mut f64, &mut f64, &mut f64)) -> &mut Self {
        self.to_cartesian();
        if let Coords::Cartesian { x, y, z } = &mut self.coords {
            f(x, y, z);
        }
        self
    }

    fn with_spherical(&mut self, f: impl FnOnce(&mut f64, &mut f64, &mut f64)) -> &mut Self {
        self.to_spherical();
        if let Coords::Spherical { mag, ang1, ang2 } = &mut self.coords {
            f(mag, ang1, ang2);
        }
        self
    }

    fn with_cylindrical(&mut self, f: impl FnOnce(&mut f64, &mut f64, &mut f64)) -> &mut Self {
        self.to_cylindrical();
        if let Coords::Cylindrical { mag, ang1, y } = &mut self.coords {
            f(mag, ang1, y);
        }
        self
    }

    /// Azimuth edits stay in Spherical, anything else goes through Cylindrical
    fn with_azimuth(&mut self, f: impl FnOnce(&mut f64)) -> &mut Self {
        match self.system() {
            CoordinateSystem::Spherical => self.with_spherical(|_, ang1, _| f(ang1)),
            _ => self.with_cylindrical(|_, ang1, _| f(ang1)),
        }
    }

    /// The stored coordinates
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// The system the position is currently stored in
    pub fn system(&self) -> CoordinateSystem {
        self.coords.system()
    }

    /// The position as a plain Cartesian vector
    pub fn cartesian_value(&self) -> Cartesian3 {
        self.coords.cartesian()
    }

    /// Cartesian x
    pub fn x(&self) -> f64 {
        self.coords.x()
    }

    /// Cartesian y (vertical)
    pub fn y(&self) -> f64 {
        self.coords.y()
    }

    /// Cartesian z
    pub fn z(&self) -> f64 {
        self.coords.z()
    }

    /// Azimuth around Y, `atan2(x, z)`
    pub fn ang1(&self) -> f64 {
        self.coords.ang1()
    }

    /// Elevation from the horizontal plane
    pub fn ang2(&self) -> f64 {
        self.coords.ang2()
    }

    /// Rotation around X, `-atan2(y, z)`
    pub fn ang_x(&self) -> f64 {
        -self.y().atan2(self.z())
    }

    /// Rotation around Z, `atan2(y, x)`
    pub fn ang_z(&self) -> f64 {
        self.y().atan2(self.x())
    }

    /// Distance from the origin
    pub fn mag_s(&self) -> f64 {
        self.coords.mag_s()
    }

    /// Squared distance from the origin
    pub fn mag_s_sqr(&self) -> f64 {
        self.coords.mag_s_sqr()
    }

    /// Distance from the Y axis
    pub fn mag_c(&self) -> f64 {
        self.coords.mag_c()
    }

    /// Squared distance from the Y axis
    pub fn mag_c_sqr(&self) -> f64 {
        self.coords.mag_c_sqr()
    }

    /// First raw component of the active system
    pub fn a(&self) -> f64 {
        self.coords.components()[0]
    }

    /// Second raw component of the active system
    pub fn b(&self) -> f64 {
        self.coords.components()[1]
    }

    /// Third raw component of the active system
    pub fn c(&self) -> f64 {
        self.coords.components()[2]
    }

    /// The saved checkpoint, if any
    pub fn checkpoint(&self) -> Option<&Position> {
        self.checkpoint.as_deref()
    }

    /// The frame this position is relative to, if any
    pub fn relative_frame(&self) -> Option<&Position> {
        self.relative.as_deref()
    }

    /// Whether the position is expressed in a relative frame
    pub fn is_relative(&self) -> bool {
        self.relative.is_some()
    }

    /// The components of this position expressed in `system`, without converting it
    pub fn fill_components(&self, system: CoordinateSystem) -> [f64; 3] {
        self.coords.to_system(system).components()
    }

    /// Single precision variant of [`Position::fill_components`]
    pub fn fill_components_f32(&self, system: CoordinateSystem) -> [f32; 3] {
        let [a, b, c] = self.fill_components(system);
        [a as f32, b as f32, c as f32]
    }

    /// Sets x, converting to Cartesian
    pub fn set_x(&mut self, value: f64) -> &mut Self {
        self.with_cartesian(|x, _, _| *x = value)
    }

    /// Sets y
    ///
    /// Spherical positions become Cylindrical first; Cartesian and
    /// Cylindrical positions are updated in place.
    pub fn set_y(&mut self, value: f64) -> &mut Self {
        match self.system() {
            CoordinateSystem::Cartesian => self.with_cartesian(|_, y, _| *y = value),
            _ => self.with_cylindrical(|_, _, y| *y = value),
        }
    }

    /// Sets z, converting to Cartesian
    pub fn set_z(&mut self, value: f64) -> &mut Self {
        self.with_cartesian(|_, _, z| *z = value)
    }

    /// Sets the azimuth
    ///
    /// Cartesian positions become Cylindrical first.
    pub fn set_ang1(&mut self, value: f64) -> &mut Self {
        self.with_azimuth(|ang1| *ang1 = value)
    }

    /// Sets the elevation, converting to Spherical
    pub fn set_ang2(&mut self, value: f64) -> &mut Self {
        self.with_spherical(|_, _, ang2| *ang2 = value)
    }

    /// Sets the distance from the origin, converting to Spherical
    pub fn set_mag_s(&mut self, value: f64) -> &mut Self {
        self.with_spherical(|mag, _, _| *mag = value)
    }

    /// Sets the distance from the Y axis, converting to Cylindrical
    pub fn set_mag_c(&mut self, value: f64) -> &mut Self {
        self.with_cylindrical(|mag, _, _| *mag = value)
    }

    /// Copies the value and system of `other`; checkpoint and frame are kept
    pub fn set_to(&mut self, other: &Position) -> &mut Self {
        self.coords = other.coords;
        self
    }

    /// Sets the value from three components in `system`
    pub fn set_to_coords(&mut self, a: f64, b: f64, c: f64, system: CoordinateSystem) -> &mut Self {
        self.coords = Coords::from_components(a, b, c, system);
        self
    }

    /// Replaces the value with a Cartesian vector
    pub fn set_cartesian(&mut self, value: Cartesian3) -> &mut Self {
        self.coords = value.into();
        self
    }

    /// Drops the vertical part of the active system
    ///
    /// Cartesian and Cylindrical positions lose their height. Spherical
    /// positions lose their elevation and keep their distance from the origin.
    pub fn flatten(&mut self) -> &mut Self {
        match &mut self.coords {
            Coords::Cartesian { y, .. } | Coords::Cylindrical { y, .. } => *y = 0.0,
            Coords::Spherical { ang2, .. } => *ang2 = 0.0,
        }
        self
    }

    /// Reinterprets stored angles as degrees and converts them to radians
    ///
    /// Cartesian positions have no angles and are unchanged.
    pub fn angles_to_radians(&mut self) -> &mut Self {
        match &mut self.coords {
            Coords::Spherical { ang1, ang2, .. } => {
                *ang1 *= DEG2RAD;
                *ang2 *= DEG2RAD;
            }
            Coords::Cylindrical { ang1, .. } => *ang1 *= DEG2RAD,
            Coords::Cartesian { .. } => {}
        }
        self
    }

    /// Floors every stored component
    pub fn floor(&mut self) -> &mut Self {
        self.coords = self.coords.map(f64::floor);
        self
    }

    /// Ceils every stored component
    pub fn ceil(&mut self) -> &mut Self {
        self.coords = self.coords.map(f64::ceil);
        self
    }

    /// Rounds every stored component, half away from zero
    pub fn round(&mut self) -> &mut Self {
        self.coords = self.coords.map(f64::round);
        self
    }

    fn combine(&mut self, other: Cartesian3, op: impl Fn(f64, f64) -> f64) -> &mut Self {
        self.with_cartesian(|x, y, z| {
            *x = op(*x, other.x);
            *y = op(*y, other.y);
            *z = op(*z, other.z);
        })
    }

    fn each_component(&mut self, op: impl Fn(f64) -> f64) -> &mut Self {
        self.with_cartesian(|x, y, z| {
            *x = op(*x);
            *y = op(*y);
            *z = op(*z);
        })
    }

    /// Adds `other` component-wise; the result is Cartesian
    pub fn add(&mut self, other: &Position) -> &mut Self {
        self.combine(other.cartesian_value(), |a, b| a + b)
    }

    /// Subtracts `other` component-wise; the result is Cartesian
    pub fn sub(&mut self, other: &Position) -> &mut Self {
        self.combine(other.cartesian_value(), |a, b| a - b)
    }

    /// Multiplies by `other` component-wise; the result is Cartesian
    pub fn mult(&mut self, other: &Position) -> &mut Self {
        self.combine(other.cartesian_value(), |a, b| a * b)
    }

    /// Divides by `other` component-wise; the result is Cartesian
    pub fn divi(&mut self, other: &Position) -> &mut Self {
        self.combine(other.cartesian_value(), |a, b| a / b)
    }

    /// Adds the point `(a, b, c)` given in `system`
    pub fn add_coords(&mut self, a: f64, b: f64, c: f64, system: CoordinateSystem) -> &mut Self {
        let other = Coords::from_components(a, b, c, system).cartesian();
        self.combine(other, |a, b| a + b)
    }

    /// Subtracts the point `(a, b, c)` given in `system`
    pub fn sub_coords(&mut self, a: f64, b: f64, c: f64, system: CoordinateSystem) -> &mut Self {
        let other = Coords::from_components(a, b, c, system).cartesian();
        self.combine(other, |a, b| a - b)
    }

    /// Multiplies by the point `(a, b, c)` given in `system`
    pub fn mult_coords(&mut self, a: f64, b: f64, c: f64, system: CoordinateSystem) -> &mut Self {
        let other = Coords::from_components(a, b, c, system).cartesian();
        self.combine(other, |a, b| a * b)
    }

    /// Divides by the point `(a, b, c)` given in `system`
    pub fn divi_coords(&mut self, a: f64, b: f64, c: f64, system: CoordinateSystem) -> &mut Self {
        let other = Coords::from_components(a, b, c, system).cartesian();
        self.combine(other, |a, b| a / b)
    }

    /// Squares x, y and z
    pub fn sqr(&mut self) -> &mut Self {
        self.each_component(|v| v * v)
    }

    /// Square root of x, y and z; negative components become NaN
    pub fn sqrt(&mut self) -> &mut Self {
        self.each_component(f64::sqrt)
    }

    /// Square root of the absolute value of x, y and z
    pub fn sqrt_positive(&mut self) -> &mut Self {
        self.each_component(|v| v.abs().sqrt())
    }

    /// Squares x, y and z keeping their signs
    pub fn sqr_preserve_sign(&mut self) -> &mut Self {
        self.each_component(|v| v * v.abs())
    }

    /// Square root of x, y and z keeping their signs
    pub fn sqrt_preserve_sign(&mut self) -> &mut Self {
        self.each_component(|v| v.abs().sqrt().copysign(v))
    }

    /// Scales the position away from the origin, keeping its system
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        match &mut self.coords {
            Coords::Cartesian { x, y, z } => {
                *x *= factor;
                *y *= factor;
                *z *= factor;
            }
            Coords::Spherical { mag, .. } => *mag *= factor,
            Coords::Cylindrical { mag, y, .. } => {
                *mag *= factor;
                *y *= factor;
            }
        }
        self
    }

    /// Adds the position to itself
    pub fn double_pos(&mut self) -> &mut Self {
        self.scale(2.0)
    }

    /// Reflects the position through the origin
    pub fn flip(&mut self) -> &mut Self {
        self.scale(-1.0)
    }

    /// Reflects through the origin and doubles
    pub fn flip_and_double(&mut self) -> &mut Self {
        self.scale(-2.0)
    }

    /// Squares the distance from the origin, converting to Spherical
    pub fn sqr_mag_s(&mut self) -> &mut Self {
        self.with_spherical(|mag, _, _| *mag *= *mag)
    }

    /// Squares the distance from the Y axis, converting to Cylindrical
    pub fn sqr_mag_c(&mut self) -> &mut Self {
        self.with_cylindrical(|mag, _, _| *mag *= *mag)
    }

    /// Square root of the distance from the origin, converting to Spherical
    pub fn sqrt_mag_s(&mut self) -> &mut Self {
        self.with_spherical(|mag, _, _| *mag = mag.sqrt())
    }

    /// Square root of the distance from the Y axis, converting to Cylindrical
    pub fn sqrt_mag_c(&mut self) -> &mut Self {
        self.with_cylindrical(|mag, _, _| *mag = mag.sqrt())
    }

    /// Saves the current value as the checkpoint
    ///
    /// An existing checkpoint's storage is reused.
    pub fn set_checkpoint(&mut self) -> &mut Self {
        let coords = self.coords;
        match &mut self.checkpoint {
            Some(saved) => saved.coords = coords,
            None => self.checkpoint = Some(Box::new(Position::from_coords(coords))),
        }
        self
    }

    /// Saves a copy of `other` as the checkpoint
    ///
    /// The copy includes `other`'s own checkpoint chain but not its frame.
    pub fn set_checkpoint_to(&mut self, other: &Position) -> &mut Self {
        let snapshot = other.detached();
        match &mut self.checkpoint {
            Some(saved) => **saved = snapshot,
            None => self.checkpoint = Some(Box::new(snapshot)),
        }
        self
    }

    /// Restores the value saved by the last checkpoint
    ///
    /// The checkpoint is kept, so a position can revert to it repeatedly.
    pub fn revert(&mut self) -> Result<&mut Self> {
        let saved = self
            .checkpoint
            .as_ref()
            .map(|saved| saved.coords)
            .ok_or(PoslibError::NoCheckpoint)?;
        self.coords = saved;
        Ok(self)
    }

    /// Removes and returns the checkpoint
    pub fn take_checkpoint(&mut self) -> Option<Position> {
        self.checkpoint.take().map(|saved| *saved)
    }

    /// Squared Cartesian distance between two positions
    pub fn distance_sqr(a: &Position, b: &Position) -> f64 {
        (a.cartesian_value() - b.cartesian_value()).magnitude_sqr()
    }

    /// Whether the two positions are closer than `tolerance`
    pub fn approx_eq(&self, other: &Position, tolerance: Tolerance) -> bool {
        Position::distance_sqr(self, other) < tolerance.squared()
    }

    /// Cartesian mean of `positions`; the origin when empty
    pub fn average(positions: &[Position]) -> Position {
        if positions.is_empty() {
            return Position::default();
        }
        let sum = positions
            .iter()
            .fold(Cartesian3::ZERO, |acc, p| acc + p.cartesian_value());
        Position::from(sum / positions.len() as f64)
    }
}

impl From<Coords> for Position {
    fn from(coords: Coords) -> Self {
        Position::from_coords(coords)
    }
}

impl From<Cartesian3> for Position {
    fn from(value: Cartesian3) -> Self {
        Position::from_coords(value.into())
    }
}

/// Positions are equal when they lie within the default tolerance of each
/// other, whatever systems they are stored in
///
/// This equality is not transitive. Use [`Position::approx_eq`] to choose the
/// tolerance.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, Tolerance::default())
    }
}

impl AbsDiffEq for Position {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        DEFAULT_EQUALS_ERROR
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.approx_eq(other, Tolerance::new(epsilon))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{X: {:.2}, Y: {:.2}, Z: {:.2}, MagC: {:.2}, MagS: {:.2}, AzmAng: {:.2}pi, VrtAng: {:.2}pi}}",
            self.x(),
            self.y(),
            self.z(),
            self.mag_c(),
            self.mag_s(),
            self.ang1() / HALF,
            self.ang2() / HALF
        )
    }
}
