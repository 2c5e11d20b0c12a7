//! Composition of homogeneous 3D transforms
//!
//! A [`Transform3d`] keeps an ordered list of 4×4 matrices and caches their
//! product. The product is a left fold in insertion order: starting from the
//! identity, each added matrix `m` gives `combined = m × combined`. The first
//! matrix added is therefore the first one applied to a column vector, and
//! the most recently added is applied last.
//!
//! Applying the cached product costs one 4×4 multiply per position, which is
//! what makes transforms worth building when many positions share the same
//! rotation and translation.

use super::matrix::Matrix;
use crate::coordinates::Cartesian3;
use crate::errors::{PoslibError, Result};
use crate::position::Position;
use nalgebra::{Matrix4, Vector4};
use std::fmt;

/// An ordered composition of homogeneous 4×4 matrices
#[derive(Debug, Clone, PartialEq)]
pub struct Transform3d {
    transforms: Vec<Matrix>,
    combined: Matrix,
    homogeneous: Matrix4<f64>,
}

impl Default for Transform3d {
    fn default() -> Self {
        Transform3d {
            transforms: Vec::new(),
            combined: Matrix::identity(4),
            homogeneous: Matrix4::identity(),
        }
    }
}

fn check_homogeneous(matrix: &Matrix) -> Result<()> {
    if matrix.shape() != (4, 4) {
        return Err(PoslibError::ShapeMismatch {
            op: "add_transform",
            left: (4, 4),
            right: matrix.shape(),
        });
    }
    Ok(())
}

fn to_matrix4(matrix: &Matrix) -> Matrix4<f64> {
    Matrix4::from_fn(|i, j| matrix[(i, j)])
}

impl Transform3d {
    /// An empty transform (the identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// A transform made of a single matrix
    pub fn from_matrix(matrix: Matrix) -> Result<Self> {
        let mut transform = Self::new();
        transform.add_transform(matrix)?;
        Ok(transform)
    }

    /// A transform made of `matrices`, applied in iteration order
    pub fn from_matrices<I>(matrices: I) -> Result<Self>
    where
        I: IntoIterator<Item = Matrix>,
    {
        let mut transform = Self::new();
        transform.add_transforms(matrices)?;
        Ok(transform)
    }

    /// Builds from matrices that are 4×4 by construction
    pub(crate) fn from_homogeneous(matrices: Vec<Matrix>) -> Self {
        debug_assert!(matrices.iter().all(|m| m.shape() == (4, 4)));
        let mut transform = Transform3d {
            transforms: matrices,
            ..Self::default()
        };
        transform.recalculate();
        transform
    }

    /// Appends `matrix` and recomputes the combined transform
    ///
    /// Only 4×4 matrices are accepted; anything else is rejected with
    /// [`PoslibError::ShapeMismatch`] and the transform is left unchanged.
    pub fn add_transform(&mut self, matrix: Matrix) -> Result<&mut Self> {
        self.add_transform_deferred(matrix)?;
        Ok(self.recalculate())
    }

    /// Appends `matrix` without recomputing
    ///
    /// Call [`Transform3d::recalculate`] once after a batch of deferred
    /// additions; until then [`Transform3d::matrix`] reflects the old list.
    pub fn add_transform_deferred(&mut self, matrix: Matrix) -> Result<&mut Self> {
        check_homogeneous(&matrix)?;
        self.transforms.push(matrix);
        Ok(self)
    }

    /// Appends every matrix in order, then recomputes once
    ///
    /// If any matrix is not 4×4 nothing is appended.
    pub fn add_transforms<I>(&mut self, matrices: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Matrix>,
    {
        let matrices: Vec<Matrix> = matrices.into_iter().collect();
        for matrix in &matrices {
            check_homogeneous(matrix)?;
        }
        self.transforms.extend(matrices);
        Ok(self.recalculate())
    }

    /// Removes the first matrix equal to `matrix` and recomputes
    ///
    /// Returns `false` and changes nothing when no such matrix is present.
    pub fn remove_transform(&mut self, matrix: &Matrix) -> bool {
        match self.transforms.iter().position(|m| m == matrix) {
            Some(index) => {
                self.transforms.remove(index);
                self.recalculate();
                true
            }
            None => false,
        }
    }

    /// Recomputes the combined matrix from the stored list
    pub fn recalculate(&mut self) -> &mut Self {
        let mut combined = Matrix4::identity();
        for matrix in &self.transforms {
            combined = to_matrix4(matrix) * combined;
        }
        self.homogeneous = combined;
        self.combined = Matrix::from(nalgebra::DMatrix::from_fn(4, 4, |i, j| combined[(i, j)]));
        log::trace!(
            "Recalculated transform from {} matrices",
            self.transforms.len()
        );
        self
    }

    /// The combined transform matrix
    pub fn matrix(&self) -> &Matrix {
        &self.combined
    }

    /// The individual matrices in insertion order
    pub fn matrices(&self) -> &[Matrix] {
        &self.transforms
    }

    /// Number of stored matrices
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no matrices are stored
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Applies the combined transform to a Cartesian point `(x, y, z, 1)`
    pub fn apply(&self, point: Cartesian3) -> Cartesian3 {
        let out = self.homogeneous * Vector4::new(point.x, point.y, point.z, 1.0);
        Cartesian3::new(out.x, out.y, out.z)
    }

    /// Transforms `position` in place; it is left in Cartesian
    pub fn transform(&self, position: &mut Position) -> &Self {
        let moved = self.apply(position.cartesian_value());
        position.set_cartesian(moved);
        self
    }

    /// Transforms every position with a single matrix product
    ///
    /// The positions are packed as the columns of a 4×N matrix, multiplied
    /// into a preallocated output, and unpacked. Every position is left in
    /// Cartesian.
    pub fn transform_all(&self, positions: &mut [Position]) -> Result<&Self> {
        if positions.is_empty() {
            return Ok(self);
        }
        let count = positions.len();
        let mut columns = Matrix::zeros(4, count);
        for (j, position) in positions.iter().enumerate() {
            let point = position.cartesian_value();
            columns
                .set(0, j, point.x)
                .set(1, j, point.y)
                .set(2, j, point.z)
                .set(3, j, 1.0);
        }

        let mut output = Matrix::zeros(4, count);
        self.combined.multiply_into(&columns, &mut output)?;

        for (j, position) in positions.iter_mut().enumerate() {
            position.set_cartesian(Cartesian3::new(
                output[(0, j)],
                output[(1, j)],
                output[(2, j)],
            ));
        }
        Ok(self)
    }
}

impl fmt::Display for Transform3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.combined.fmt(f)
    }
}
