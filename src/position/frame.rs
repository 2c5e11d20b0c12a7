//! Relative frames and frame transforms
//!
//! A position can be made relative to its own current value: it remembers
//! that value as its frame and becomes the local origin. Subsequent edits are
//! made in local coordinates, where the frame's up direction (its value
//! rotated a quarter turn upwards) plays the role of +Y. Leaving the frame
//! rotates the local value back into world orientation and adds the frame.
//!
//! ```rust
//! use poslib::Position;
//!
//! let mut p = Position::cartesian(1.0, 0.0, 0.0);
//! p.relative();
//! p.set_z(1.0);
//! p.unrelative().unwrap();
//! assert!((p.x() - 2.0).abs() < 1e-12);
//! ```
//!
//! [`Position::transforms`] produces the same kind of mapping as a pair of
//! [`Transform3d`] values built from the position's angles and offset.

use super::Position;
use crate::config::Tolerance;
use crate::constants::QUARTER;
use crate::coordinates::{Cartesian3, Coords};
use crate::errors::{PoslibError, Result};
use crate::transform::{Axis, Matrix, Transform3d};
use log::debug;

/// A pair of transforms built from a position
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransforms {
    /// Rotations by the position's angles followed by its offset
    pub to_local: Transform3d,
    /// The exact inverse of `to_local`
    pub from_local: Transform3d,
}

fn rotate_unless_negligible(
    position: &mut Position,
    angle: f64,
    tolerance: Tolerance,
    rotate: fn(&mut Position, f64) -> &mut Position,
) {
    if tolerance.is_negligible(angle) {
        debug!("Skipping negligible frame rotation of {angle:e} rad");
    } else {
        rotate(position, angle);
    }
}

impl Position {
    /// Enters relative mode with the current value as the frame
    ///
    /// A position that is already relative first leaves its old frame. The
    /// frame keeps a copy of the checkpoint; the position itself becomes the
    /// Cartesian origin.
    pub fn relative(&mut self) -> &mut Self {
        self.relative_with(Tolerance::default())
    }

    /// [`Position::relative`] with an explicit tolerance for leaving an
    /// existing frame
    pub fn relative_with(&mut self, tolerance: Tolerance) -> &mut Self {
        if let Some(frame) = self.relative.take() {
            self.leave_frame(&frame, tolerance);
        }
        self.relative = Some(Box::new(self.detached()));
        self.coords = Coords::ORIGIN;
        self
    }

    /// Leaves relative mode, expressing the value in world coordinates
    ///
    /// Fails with [`PoslibError::NotRelative`] if the position has no frame.
    pub fn unrelative(&mut self) -> Result<&mut Self> {
        self.unrelative_with(Tolerance::default())
    }

    /// [`Position::unrelative`] with an explicit tolerance
    ///
    /// Frame rotations whose angle is within `tolerance` of zero are skipped.
    pub fn unrelative_with(&mut self, tolerance: Tolerance) -> Result<&mut Self> {
        let frame = self.relative.take().ok_or(PoslibError::NotRelative)?;
        Ok(self.leave_frame(&frame, tolerance))
    }

    fn leave_frame(&mut self, frame: &Position, tolerance: Tolerance) -> &mut Self {
        let mut up = Position::from_coords(frame.coords);
        up.rotate_vertical(QUARTER);
        let normal = up.cartesian_value().cross(&Cartesian3::Y_AXIS);
        let normal_azimuth = Coords::from(normal).ang1();

        let gamma = frame.ang1() - normal_azimuth;
        let beta = QUARTER - up.ang2();
        let alpha = normal_azimuth;

        rotate_unless_negligible(self, gamma, tolerance, Position::rotate_around_y);
        rotate_unless_negligible(self, beta, tolerance, Position::rotate_around_z);
        rotate_unless_negligible(self, alpha, tolerance, Position::rotate_around_y);
        self.add(frame)
    }

    /// Builds the transforms that rotate by this position's angles and then
    /// translate by its offset, and back
    ///
    /// `to_local` applies `X(ang_x)`, `Y(ang1)`, `Z(ang_z)` and then the
    /// translation by `(x, y, z)`. `from_local` applies the inverse steps in
    /// reverse order, so composing the two gives the identity.
    pub fn transforms(&self) -> FrameTransforms {
        let Cartesian3 { x, y, z } = self.cartesian_value();
        let (ang_x, ang1, ang_z) = (self.ang_x(), self.ang1(), self.ang_z());

        let to_local = Transform3d::from_homogeneous(vec![
            Matrix::rotation_3d(Axis::X, ang_x, true),
            Matrix::rotation_3d(Axis::Y, ang1, true),
            Matrix::rotation_3d(Axis::Z, ang_z, true),
            Matrix::translation(&[x, y, z]),
        ]);
        let from_local = Transform3d::from_homogeneous(vec![
            Matrix::translation(&[-x, -y, -z]),
            Matrix::rotation_3d(Axis::Z, -ang_z, true),
            Matrix::rotation_3d(Axis::Y, -ang1, true),
            Matrix::rotation_3d(Axis::X, -ang_x, true),
        ]);
        FrameTransforms {
            to_local,
            from_local,
        }
    }

    /// Applies `transform` to this position, leaving it Cartesian
    pub fn transform(&mut self, transform: &Transform3d) -> &mut Self {
        transform.transform(self);
        self
    }
}
