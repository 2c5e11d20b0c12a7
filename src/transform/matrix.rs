//! Dense matrices for homogeneous transforms
//!
//! [`Matrix`] is a fixed-shape, mutable-content grid of `f64` backed by
//! nalgebra's `DMatrix`. Shape errors are reported as
//! [`PoslibError::ShapeMismatch`] instead of panicking; only direct indexing
//! outside the grid panics.
//!
//! Rotation matrices follow the right-handed convention: a positive angle
//! turns counter-clockwise around the named axis when viewed from the
//! positive end of that axis looking towards the origin. "Padded" variants
//! carry one extra homogeneous row and column so they compose with
//! [`Matrix::translation`].

use crate::errors::{PoslibError, Result};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Principal axes for rotation matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis
    X,
    /// The vertical Y axis
    Y,
    /// The Z axis
    Z,
}

/// A dense `height × width` matrix indexed `(row, col)`
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// A `height × width` matrix of zeros
    pub fn zeros(height: usize, width: usize) -> Self {
        Matrix {
            data: DMatrix::zeros(height, width),
        }
    }

    /// The `n × n` identity matrix
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::transform::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        Matrix {
            data: DMatrix::identity(n, n),
        }
    }

    /// Builds a matrix from rows; every row must have the same length
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(PoslibError::ShapeMismatch {
                op: "from_rows",
                left: (1, width),
                right: (1, bad.len()),
            });
        }
        Ok(Matrix {
            data: DMatrix::from_fn(height, width, |i, j| rows[i][j]),
        })
    }

    /// Fills a `height × width` matrix left-to-right, top-to-bottom from `values`
    pub fn from_flat(values: &[f64], width: usize, height: usize) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or(PoslibError::BufferLength {
            expected: usize::MAX,
            found: values.len(),
        })?;
        if values.len() < expected {
            return Err(PoslibError::BufferLength {
                expected,
                found: values.len(),
            });
        }
        Ok(Matrix {
            data: DMatrix::from_row_slice(height, width, &values[..expected]),
        })
    }

    /// A single-column matrix holding `values`
    pub fn column(values: &[f64]) -> Self {
        Matrix {
            data: DMatrix::from_column_slice(values.len(), 1, values),
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Value at `(i, j)`, or `None` outside the grid
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }

    /// Sets the value at `(i, j)`
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the grid.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> &mut Self {
        self.data[(i, j)] = value;
        self
    }

    /// Adds `value` to the entry at `(i, j)`
    pub fn add_at(&mut self, i: usize, j: usize, value: f64) -> &mut Self {
        self.data[(i, j)] += value;
        self
    }

    /// Multiplies the entry at `(i, j)` by `value`
    pub fn mult_at(&mut self, i: usize, j: usize, value: f64) -> &mut Self {
        self.data[(i, j)] *= value;
        self
    }

    /// Overwrites this matrix with the identity pattern (ones on the diagonal)
    pub fn set_identity(&mut self) -> &mut Self {
        self.data.fill_with_identity();
        self
    }

    fn check_covers(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if other.height() < self.height() || other.width() < self.width() {
            return Err(PoslibError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// Copies the overlapping entries of `source`, which must be at least as large
    pub fn set_to(&mut self, source: &Matrix) -> Result<&mut Self> {
        self.check_covers(source, "set_to")?;
        let (h, w) = self.shape();
        self.data.copy_from(&source.data.view((0, 0), (h, w)));
        Ok(self)
    }

    /// Adds the corresponding entries of `other` to this matrix
    pub fn add(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_covers(other, "add")?;
        let (h, w) = self.shape();
        self.data += other.data.view((0, 0), (h, w));
        Ok(self)
    }

    /// Subtracts the corresponding entries of `other` from this matrix
    pub fn sub(&mut self, other: &Matrix) -> Result<&mut Self> {
        self.check_covers(other, "sub")?;
        let (h, w) = self.shape();
        self.data -= other.data.view((0, 0), (h, w));
        Ok(self)
    }

    /// Scales every entry by `scalar`
    pub fn scale(&mut self, scalar: f64) -> &mut Self {
        self.data *= scalar;
        self
    }

    /// Returns `self × other`
    ///
    /// Fails with [`PoslibError::ShapeMismatch`] unless
    /// `self.width() == other.height()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::transform::Matrix;
    ///
    /// let a = Matrix::from_flat(&[1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
    /// let b = Matrix::column(&[1.0, 1.0]);
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c.shape(), (2, 1));
    /// assert_eq!(c[(0, 0)], 3.0);
    /// assert_eq!(c[(1, 0)], 7.0);
    ///
    /// assert!(b.multiply(&a).is_err());
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        let mut output = Matrix::zeros(self.height(), other.width());
        self.multiply_into(other, &mut output)?;
        Ok(output)
    }

    /// Writes `self × other` into `output` without allocating
    ///
    /// `output` must already have shape `(self.height(), other.width())`.
    /// Its previous contents are overwritten.
    pub fn multiply_into(&self, other: &Matrix, output: &mut Matrix) -> Result<()> {
        if self.width() != other.height() {
            return Err(PoslibError::ShapeMismatch {
                op: "multiply",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let expected = (self.height(), other.width());
        if output.shape() != expected {
            return Err(PoslibError::InvalidOutput {
                expected,
                found: output.shape(),
            });
        }
        self.data.mul_to(&other.data, &mut output.data);
        Ok(())
    }

    /// Homogeneous translation by `offsets`
    ///
    /// The result is `(n + 1) × (n + 1)` for `n` offsets, with the offsets in
    /// the last column.
    pub fn translation(offsets: &[f64]) -> Matrix {
        let dims = offsets.len();
        let mut mat = Matrix::identity(dims + 1);
        for (i, offset) in offsets.iter().enumerate() {
            mat.data[(i, dims)] = *offset;
        }
        mat
    }

    /// Homogeneous scaling by `factors` along each axis
    pub fn scaling(factors: &[f64]) -> Matrix {
        let mut mat = Matrix::identity(factors.len() + 1);
        for (i, factor) in factors.iter().enumerate() {
            mat.data[(i, i)] = *factor;
        }
        mat
    }

    /// Planar counter-clockwise rotation, 2×2 or 3×3 when padded
    pub fn rotation_2d(angle: f64, padded: bool) -> Matrix {
        let mut mat = Matrix::identity(if padded { 3 } else { 2 });
        let (sin, cos) = angle.sin_cos();
        mat.set(0, 0, cos).set(0, 1, -sin);
        mat.set(1, 0, sin).set(1, 1, cos);
        mat
    }

    /// Rotation around a principal axis, 3×3 or 4×4 when padded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use poslib::transform::{Axis, Matrix};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// // A quarter turn around Z carries +X onto +Y
    /// let rot = Matrix::rotation_3d(Axis::Z, FRAC_PI_2, false);
    /// let v = rot.multiply(&Matrix::column(&[1.0, 0.0, 0.0])).unwrap();
    /// assert!(v[(0, 0)].abs() < 1e-15);
    /// assert!((v[(1, 0)] - 1.0).abs() < 1e-15);
    /// ```
    pub fn rotation_3d(axis: Axis, angle: f64, padded: bool) -> Matrix {
        let mut mat = Matrix::identity(if padded { 4 } else { 3 });
        let (sin, cos) = angle.sin_cos();

        match axis {
            Axis::X => {
                mat.set(1, 1, cos).set(1, 2, -sin);
                mat.set(2, 1, sin).set(2, 2, cos);
            }
            Axis::Y => {
                mat.set(0, 0, cos).set(0, 2, sin);
                mat.set(2, 0, -sin).set(2, 2, cos);
            }
            Axis::Z => {
                mat.set(0, 0, cos).set(0, 1, -sin);
                mat.set(1, 0, sin).set(1, 1, cos);
            }
        }
        mat
    }

    /// The transposed matrix
    pub fn transpose(&self) -> Matrix {
        Matrix {
            data: self.data.transpose(),
        }
    }

    /// Borrow the underlying nalgebra matrix
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(data: DMatrix<f64>) -> Self {
        Matrix { data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.height() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for j in 0..self.width() {
                if j > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{:.1}", self.data[(i, j)])?;
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}
