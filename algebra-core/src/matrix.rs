//! Dense row-major matrices.
//!
//! [`Matrix<T>`] is the buffer the differentiation drivers read inputs
//! from and write gradients and Hessians into. It is a flat `Vec<T>` of
//! `rows × cols` elements laid out row by row; element `(i, j)` lives at
//! offset `i * cols + j`. A column vector is an `N × 1` matrix.
//!
//! Construction from a flat buffer and the binary operations check
//! shapes and return [`ShapeError`] on a mismatch. Element access out of
//! bounds is a programming error and panics, like slice indexing.
//!
//! # Example
//!
//! ```
//! use algebra_core::Matrix;
//!
//! let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,
//!                                     4.0, 5.0, 6.0]).unwrap();
//! let at = a.transpose();
//!
//! assert_eq!(at.shape(), (3, 2));
//! assert_eq!(at[(2, 1)], 6.0);
//!
//! let g = a.matmul(&at).unwrap();  // 2×2 Gram matrix
//! assert!(g.is_symmetric());
//! assert_eq!(g[(0, 1)], 32.0);
//! ```

use crate::{ApproxEq, Real};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Shape errors raised by matrix construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A flat buffer does not hold `rows × cols` elements.
    #[error("data length {len} does not match a {rows}x{cols} matrix")]
    DataLength {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Elements supplied.
        len: usize,
    },
    /// Elementwise operands differ in shape.
    #[error("shape mismatch: {rows}x{cols} vs {other_rows}x{other_cols}")]
    Mismatch {
        /// Rows of the left operand.
        rows: usize,
        /// Columns of the left operand.
        cols: usize,
        /// Rows of the right operand.
        other_rows: usize,
        /// Columns of the right operand.
        other_cols: usize,
    },
    /// Inner dimensions of a product disagree.
    #[error("cannot multiply: left has {cols} columns, right has {rows} rows")]
    InnerDimension {
        /// Columns of the left operand.
        cols: usize,
        /// Rows of the right operand.
        rows: usize,
    },
    /// A column vector (`N × 1`) was required.
    #[error("expected a column vector, got {rows}x{cols}")]
    NotColumn {
        /// Actual rows.
        rows: usize,
        /// Actual columns.
        cols: usize,
    },
    /// A matrix of a specific shape was required.
    #[error("expected a {expected_rows}x{expected_cols} matrix, got {rows}x{cols}")]
    Expected {
        /// Required rows.
        expected_rows: usize,
        /// Required columns.
        expected_cols: usize,
        /// Actual rows.
        rows: usize,
        /// Actual columns.
        cols: usize,
    },
}

/// A dense `rows × cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// [`ShapeError::DataLength`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// An `N × 1` column vector owning `data`.
    ///
    /// ```
    /// use algebra_core::Matrix;
    ///
    /// let v = Matrix::column(vec![5.0, 2.0]);
    /// assert_eq!(v.shape(), (2, 1));
    /// assert!(v.is_column());
    /// ```
    pub fn column(data: Vec<T>) -> Self {
        Matrix {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether this is an `N × 1` column vector.
    pub fn is_column(&self) -> bool {
        self.cols == 1
    }

    /// Whether `rows == cols`.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The row-major element buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The row-major element buffer, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {i} out of bounds for {}x{} matrix", self.rows, self.cols);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Store `v` at `(i, j)`.
    ///
    /// # Panics
    ///
    /// If `(i, j)` is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        let k = self.offset(i, j);
        self.data[k] = v;
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        i * self.cols + j
    }

    fn mismatch(&self, other: &Self) -> ShapeError {
        ShapeError::Mismatch {
            rows: self.rows,
            cols: self.cols,
            other_rows: other.rows,
            other_cols: other.cols,
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// A `rows × cols` matrix with every element set to `v`.
    pub fn filled(rows: usize, cols: usize, v: T) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![v; rows * cols],
        }
    }

    /// The element at `(i, j)`.
    ///
    /// # Panics
    ///
    /// If `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.offset(i, j)].clone()
    }

    /// Copy of column `j`.
    ///
    /// ```
    /// use algebra_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(m.get_column(1), vec![2, 4]);
    /// ```
    pub fn get_column(&self, j: usize) -> Vec<T> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// Overwrite column `j` with `values`.
    ///
    /// # Panics
    ///
    /// If `j` is out of bounds or `values.len() != rows`.
    pub fn set_column(&mut self, j: usize, values: &[T]) {
        assert_eq!(
            values.len(),
            self.rows,
            "column of length {} written into {}x{} matrix",
            values.len(),
            self.rows,
            self.cols
        );
        for (i, v) in values.iter().enumerate() {
            self.set(i, j, v.clone());
        }
    }

    /// The transpose, `cols × rows`.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j].clone());
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Applies `f` to every element, keeping the shape.
    ///
    /// Over a `Matrix<Dual<T>>` this lifts an elementary function
    /// elementwise, carrying each element's tangent.
    ///
    /// ```
    /// use algebra_core::{Dual, Matrix};
    ///
    /// let m = Matrix::column(vec![Dual::variable(0.0_f64), Dual::constant(1.0)]);
    /// let e = m.map(Dual::exp);
    /// assert_eq!(e[(0, 0)], Dual::new(1.0, 1.0));
    /// assert_eq!(e[(1, 0)].deriv, 0.0);
    /// ```
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().cloned().map(f).collect(),
        }
    }
}

impl<T: Zero + Clone> Matrix<T> {
    /// A zero-initialised `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }
}

impl<T: Zero + One + Clone> Matrix<T> {
    /// The `n × n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }
}

impl<T: Real> Matrix<T> {
    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Mismatch`] if the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, ShapeError> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Mismatch`] if the shapes differ.
    pub fn sub(&self, other: &Self) -> Result<Self, ShapeError> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Matrix product `self · other`.
    ///
    /// Uses the i-k-j loop order so the inner loop walks `other` and the
    /// result row-wise.
    ///
    /// # Errors
    ///
    /// [`ShapeError::InnerDimension`] if `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Self) -> Result<Self, ShapeError> {
        if self.cols != other.rows {
            return Err(ShapeError::InnerDimension {
                cols: self.cols,
                rows: other.rows,
            });
        }
        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut c = Self::zeros(m, n);
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                for j in 0..n {
                    c.data[i * n + j] = c.data[i * n + j] + a * other.data[p * n + j];
                }
            }
        }
        Ok(c)
    }

    /// Whether the matrix is square and equal to its transpose.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        (0..n).all(|i| (i + 1..n).all(|j| self.data[i * n + j] == self.data[j * n + i]))
    }

    fn zip_with(&self, other: &Self, op: impl Fn(T, T) -> T) -> Result<Self, ShapeError> {
        if self.shape() != other.shape() {
            return Err(self.mismatch(other));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[self.offset(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.offset(i, j);
        &mut self.data[k]
    }
}

/// Same shape and every element within `eps`.
impl<T: ApproxEq> ApproxEq for Matrix<T> {
    fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.approx_eq(b, eps))
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[i * self.cols + j])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dual;

    fn m(rows: usize, cols: usize, data: &[f64]) -> Matrix<f64> {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, ShapeError::DataLength { rows: 2, cols: 2, len: 3 });
        assert_eq!(err.to_string(), "data length 3 does not match a 2x2 matrix");
    }

    #[test]
    fn zeros_and_filled() {
        let z: Matrix<f64> = Matrix::zeros(2, 3);
        assert_eq!(z.shape(), (2, 3));
        assert!(z.as_slice().iter().all(|&x| x == 0.0));

        let f = Matrix::filled(1, 2, 7);
        assert_eq!(f.into_vec(), vec![7, 7]);
    }

    #[test]
    fn row_major_layout() {
        let mut a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.get(1, 0), 4.0);
        assert_eq!(a.row(1), &[4.0, 5.0, 6.0]);

        a.set(0, 2, -3.0);
        a[(1, 1)] = 0.5;
        assert_eq!(a.as_slice(), &[1.0, 2.0, -3.0, 4.0, 0.5, 6.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let a: Matrix<f64> = Matrix::zeros(2, 2);
        a.get(2, 0);
    }

    #[test]
    fn columns() {
        let mut a = m(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.get_column(0), vec![1.0, 3.0, 5.0]);

        a.set_column(1, &[-1.0, -2.0, -3.0]);
        assert_eq!(a.as_slice(), &[1.0, -1.0, 3.0, -2.0, 5.0, -3.0]);
    }

    #[test]
    #[should_panic(expected = "column of length 2")]
    fn set_column_wrong_length_panics() {
        let mut a: Matrix<f64> = Matrix::zeros(3, 1);
        a.set_column(0, &[1.0, 2.0]);
    }

    #[test]
    fn add_and_sub() {
        let a = m(1, 2, &[1.0, 2.0]);
        let b = m(1, 2, &[0.5, -1.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[1.5, 1.0]);
        assert_eq!(a.sub(&b).unwrap().as_slice(), &[0.5, 3.0]);

        let c = m(2, 1, &[0.0, 0.0]);
        assert!(matches!(a.add(&c), Err(ShapeError::Mismatch { .. })));
    }

    #[test]
    fn matmul_small() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);

        let i = Matrix::identity(2);
        assert_eq!(a.matmul(&i).unwrap(), a);
    }

    #[test]
    fn matmul_rejects_inner_mismatch() {
        let a: Matrix<f64> = Matrix::zeros(2, 3);
        let b: Matrix<f64> = Matrix::zeros(2, 3);
        assert_eq!(
            a.matmul(&b).unwrap_err(),
            ShapeError::InnerDimension { cols: 3, rows: 2 }
        );
    }

    #[test]
    fn transpose_swaps_shape() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn symmetry() {
        assert!(m(2, 2, &[1.0, 2.0, 2.0, 3.0]).is_symmetric());
        assert!(!m(2, 2, &[1.0, 2.0, 2.5, 3.0]).is_symmetric());
        assert!(!m(1, 2, &[1.0, 1.0]).is_symmetric());
    }

    #[test]
    fn approx_eq_needs_same_shape() {
        let a = m(2, 1, &[1.0, 2.0]);
        assert!(a.approx_eq(&m(2, 1, &[1.0, 2.0 + 1e-12]), 1e-10));
        assert!(!a.approx_eq(&m(1, 2, &[1.0, 2.0]), 1e-10));
    }

    #[test]
    fn holds_duals() {
        let v = Matrix::column(vec![Dual::variable(1.0), Dual::constant(2.0)]);
        let s = v.add(&v).unwrap();
        assert_eq!(s[(0, 0)], Dual::new(2.0, 2.0));
        assert_eq!(s[(1, 0)], Dual::new(4.0, 0.0));
    }

    #[test]
    fn map_is_elementwise() {
        let a = m(2, 2, &[1.0, -2.0, 3.0, -4.0]);
        let b = a.map(|x| x * x);
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b.as_slice(), &[1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn map_lifts_elementary_functions_over_duals() {
        let v = Matrix::from_vec(1, 2, vec![Dual::variable(0.5_f64), Dual::new(2.0, 3.0)]).unwrap();
        let l = v.map(Dual::ln);
        assert!(l[(0, 0)].approx_eq(&Dual::new(0.5_f64.ln(), 2.0), 1e-15));
        assert!(l[(0, 1)].approx_eq(&Dual::new(2.0_f64.ln(), 1.5), 1e-15));
    }

    #[test]
    fn dual_matmul_follows_product_rule() {
        // A(t) = A0 + t·A1, B(t) = B0 + t·B1, so (AB)′ = A1·B0 + A0·B1
        let (a0, a1) = (m(2, 2, &[1.0, 2.0, 3.0, 4.0]), m(2, 2, &[0.5, -1.0, 2.0, 0.0]));
        let (b0, b1) = (m(2, 2, &[-1.0, 0.0, 2.0, 1.0]), m(2, 2, &[1.0, 1.0, 0.0, -3.0]));
        let lift = |v: &Matrix<f64>, d: &Matrix<f64>| {
            let data = v.as_slice().iter().zip(d.as_slice()).map(|(&x, &dx)| Dual::new(x, dx));
            Matrix::from_vec(2, 2, data.collect()).unwrap()
        };

        let p = lift(&a0, &a1).matmul(&lift(&b0, &b1)).unwrap();
        let value = a0.matmul(&b0).unwrap();
        let deriv = a1.matmul(&b0).unwrap().add(&a0.matmul(&b1).unwrap()).unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(p[(i, j)].value, value[(i, j)]);
                assert!((p[(i, j)].deriv - deriv[(i, j)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn display_prints_rows() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.to_string(), "[1, 2]\n[3, 4]\n");
    }
}
