//! Arithmetic on [`DenseMatrix`]
//!
//! The `std::ops` impls follow the usual numeric-library contract: operands
//! with incompatible shapes are a programming error and panic. Callers that
//! cannot guarantee shapes use the `checked_*` methods, which report
//! [`RankError::DimensionMismatch`] instead.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use super::dense::DenseMatrix;
use crate::errors::{RankError, Result};

impl DenseMatrix {
    /// Entrywise sum
    pub fn checked_add(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    /// Entrywise difference
    pub fn checked_sub(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_with(rhs, "subtract", |a, b| a - b)
    }

    /// Matrix product `self · rhs`.
    ///
    /// The result is `self.rows() × rhs.cols()`; requires
    /// `self.cols() == rhs.rows()`.
    pub fn checked_mul(&self, rhs: &DenseMatrix) -> Result<DenseMatrix> {
        if self.cols() != rhs.rows() {
            return Err(RankError::DimensionMismatch {
                op: "multiply",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut out = DenseMatrix::zeros(self.rows(), rhs.cols())?;
        let lhs = self.as_slice();
        let r = rhs.as_slice();
        let (inner, width) = (self.cols(), rhs.cols());
        for i in 0..self.rows() {
            for j in 0..width {
                let acc: f64 = (0..inner).map(|z| lhs[i * inner + z] * r[z * width + j]).sum();
                let idx = out.offset(i, j);
                out.data_mut()[idx] = acc;
            }
        }
        Ok(out)
    }

    fn zip_with(
        &self,
        rhs: &DenseMatrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<DenseMatrix> {
        if self.shape() != rhs.shape() {
            return Err(RankError::DimensionMismatch {
                op,
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut out = self.clone();
        out.data_mut()
            .iter_mut()
            .zip(rhs.as_slice())
            .for_each(|(a, &b)| *a = f(*a, b));
        Ok(out)
    }
}

fn unwrap_shape(result: Result<DenseMatrix>) -> DenseMatrix {
    match result {
        Ok(m) => m,
        Err(err) => panic!("{err}"),
    }
}

impl Add for &DenseMatrix {
    type Output = DenseMatrix;

    fn add(self, rhs: &DenseMatrix) -> DenseMatrix {
        unwrap_shape(self.checked_add(rhs))
    }
}

impl Sub for &DenseMatrix {
    type Output = DenseMatrix;

    fn sub(self, rhs: &DenseMatrix) -> DenseMatrix {
        unwrap_shape(self.checked_sub(rhs))
    }
}

impl Mul for &DenseMatrix {
    type Output = DenseMatrix;

    fn mul(self, rhs: &DenseMatrix) -> DenseMatrix {
        unwrap_shape(self.checked_mul(rhs))
    }
}

impl Mul<f64> for &DenseMatrix {
    type Output = DenseMatrix;

    fn mul(self, factor: f64) -> DenseMatrix {
        let mut out = self.clone();
        out.scale(factor);
        out
    }
}

impl AddAssign<&DenseMatrix> for DenseMatrix {
    fn add_assign(&mut self, rhs: &DenseMatrix) {
        *self = &*self + rhs;
    }
}

impl SubAssign<&DenseMatrix> for DenseMatrix {
    fn sub_assign(&mut self, rhs: &DenseMatrix) {
        *self = &*self - rhs;
    }
}

impl MulAssign<&DenseMatrix> for DenseMatrix {
    fn mul_assign(&mut self, rhs: &DenseMatrix) {
        *self = &*self * rhs;
    }
}

impl MulAssign<f64> for DenseMatrix {
    fn mul_assign(&mut self, factor: f64) {
        self.scale(factor);
    }
}
