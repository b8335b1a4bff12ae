//! Row-major dense matrix
//!
//! A single contiguous buffer plus its dimensions. The shape is fixed at
//! construction; every mutation works in place, and `Clone` always produces
//! an independent copy of the buffer.

use std::fmt;

use crate::errors::{RankError, Result};

/// Absolute per-entry tolerance used by `==` on [`DenseMatrix`].
pub const EQ_TOLERANCE: f64 = 0.00005;

/// A dense `rows × cols` grid of `f64` values stored row-major.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Create a zero-filled `rows × cols` matrix
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(RankError::InvalidDimension { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(RankError::InvalidDimension { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// Create a zero-filled `n × n` matrix
    pub fn square(n: usize) -> Result<Self> {
        Self::zeros(n, n)
    }

    /// Create a `rows × cols` matrix where every entry is `1.0`
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        let mut m = Self::zeros(rows, cols)?;
        m.increment();
        Ok(m)
    }

    /// Lay out a flat sequence of `n²` values as an `n × n` grid, row-major.
    ///
    /// Fails with [`RankError::NotSquare`] when the length has no integer
    /// square root, and with [`RankError::InvalidDimension`] when it is empty.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        let len = values.len();
        if len == 0 {
            return Err(RankError::InvalidDimension { rows: 0, cols: 0 });
        }
        let n = integer_sqrt(len).ok_or(RankError::NotSquare { len })?;
        Ok(Self {
            rows: n,
            cols: n,
            data: values.to_vec(),
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check if the matrix is square
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The backing buffer in row-major order
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over all entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Result<&[f64]> {
        self.check_bounds(row, 0)?;
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Read the entry at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_bounds(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    /// Overwrite the entry at `(row, col)`
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = self.offset(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Sum of one column
    pub fn column_sum(&self, col: usize) -> Result<f64> {
        self.check_bounds(0, col)?;
        Ok((0..self.rows).map(|r| self.data[self.offset(r, col)]).sum())
    }

    /// Turn raw 0/1 link indicators into outbound-link probabilities.
    ///
    /// Each column is divided by the number of entries that are exactly
    /// `1.0` in it, when there is at least one. The last column is then
    /// overwritten with `1 / rows` whatever it held: the final page is
    /// treated as dangling and teleports uniformly.
    pub fn normalize_columns_to_stochastic(&mut self) {
        let uniform = 1.0 / self.rows as f64;
        for col in 0..self.cols {
            let links = (0..self.rows)
                .filter(|&r| self.data[self.offset(r, col)] == 1.0)
                .count();

            if col == self.cols - 1 {
                for r in 0..self.rows {
                    let idx = self.offset(r, col);
                    self.data[idx] = uniform;
                }
            } else if links > 0 {
                for r in 0..self.rows {
                    let idx = self.offset(r, col);
                    self.data[idx] /= links as f64;
                }
            }
        }
    }

    /// Set every entry to `1 / rows`
    pub fn fill_uniform_teleportation(&mut self) {
        self.data.fill(1.0 / self.rows as f64);
    }

    /// Sum of all entries
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Zero-fill in place
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Add `1.0` to every entry
    pub fn increment(&mut self) {
        self.data.iter_mut().for_each(|v| *v += 1.0);
    }

    /// Subtract `1.0` from every entry
    pub fn decrement(&mut self) {
        self.data.iter_mut().for_each(|v| *v -= 1.0);
    }

    /// Multiply every entry by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Entrywise comparison: `true` when shapes match and every pair of
    /// entries differs by strictly less than `tolerance`.
    pub fn approx_eq(&self, other: &DenseMatrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() < tolerance)
    }

    /// Largest absolute entrywise difference, or `None` on a shape mismatch.
    ///
    /// A NaN in either operand makes the result NaN.
    pub fn max_abs_diff(&self, other: &DenseMatrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, |acc: f64, d| {
                    if acc.is_nan() || d.is_nan() {
                        f64::NAN
                    } else {
                        acc.max(d)
                    }
                }),
        )
    }

    /// `true` when no entry is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Render each entry as a labelled percentage.
    ///
    /// Labels are handed out in row-major order starting at `A`; entries of
    /// one row share a line.
    pub fn format_ranked(&self) -> String {
        let mut out = String::new();
        let mut page = 0;
        for row in self.data.chunks(self.cols) {
            for value in row {
                out.push_str(&format!(
                    "Page {} : {:>5.2}%",
                    page_label(page),
                    value * 100.0
                ));
                page += 1;
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(RankError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Echo format: every cell as `[%4]`, one row per line.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            for value in row {
                write!(f, "[{:>4}]", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tolerant equality, see [`EQ_TOLERANCE`].
impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EQ_TOLERANCE)
    }
}

/// Spreadsheet-style page label: `A`..`Z`, `AA`, `AB`, …
pub fn page_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

fn integer_sqrt(len: usize) -> Option<usize> {
    let mut root = (len as f64).sqrt() as usize;
    // correct for float rounding on large inputs
    while root * root > len {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= len {
        root += 1;
    }
    (root * root == len).then_some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_links() -> DenseMatrix {
        DenseMatrix::from_flat(&[
            0.0, 1.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, 0.0,
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            DenseMatrix::zeros(0, 3),
            Err(RankError::InvalidDimension { rows: 0, cols: 3 })
        ));
        assert!(matches!(
            DenseMatrix::zeros(3, 0),
            Err(RankError::InvalidDimension { rows: 3, cols: 0 })
        ));
        assert!(DenseMatrix::square(0).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            DenseMatrix::zeros(usize::MAX / 2 + 1, 2),
            Err(RankError::InvalidDimension { cols: 2, .. })
        ));
        assert!(DenseMatrix::square(usize::MAX).is_err());
    }

    #[test]
    fn test_max_abs_diff_keeps_nan() {
        let a = DenseMatrix::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut b = a.clone();
        b.set(1, 0, 3.5).unwrap();
        assert_eq!(a.max_abs_diff(&b), Some(0.5));

        b.set(0, 1, f64::NAN).unwrap();
        assert!(a.max_abs_diff(&b).unwrap().is_nan());
        assert!(!b.is_finite());
        assert!(a.is_finite());

        let c = DenseMatrix::ones(4, 1).unwrap();
        assert_eq!(a.max_abs_diff(&c), None);
    }

    #[test]
    fn test_zeros_is_zero_filled() {
        let m = DenseMatrix::zeros(2, 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter().all(|v| v == 0.0));
    }

    #[test]
    fn test_from_flat_row_major() {
        let m = DenseMatrix::from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(0, 1).unwrap(), 2.0);
        assert_eq!(m.get(1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_from_flat_rejects_non_square_length() {
        let values = vec![0.0; 10];
        assert!(matches!(
            DenseMatrix::from_flat(&values),
            Err(RankError::NotSquare { len: 10 })
        ));
        assert!(DenseMatrix::from_flat(&[]).is_err());
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut m = DenseMatrix::zeros(2, 2).unwrap();
        m.set(1, 1, 7.5).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 7.5);

        assert!(matches!(
            m.get(2, 0),
            Err(RankError::OutOfBounds { row: 2, col: 0, .. })
        ));
        assert!(m.set(0, 5, 1.0).is_err());
    }

    #[test]
    fn test_normalize_columns() {
        let mut m = reference_links();
        m.normalize_columns_to_stochastic();

        // column 0 has two links, columns 1 and 2 one each
        assert!((m.get(2, 0).unwrap() - 0.5).abs() < 1e-12);
        assert!((m.get(3, 0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(m.get(0, 1).unwrap(), 1.0);
        for col in 0..3 {
            assert!((m.column_sum(col).unwrap() - 1.0).abs() < 1e-12);
        }
        for row in 0..4 {
            assert_eq!(m.get(row, 3).unwrap(), 0.25);
        }
    }

    #[test]
    fn test_last_column_overwritten_even_with_links() {
        // Last column carries links, it is still made uniform
        let mut m = DenseMatrix::from_flat(&[
            0.0, 0.0, 1.0, //
            1.0, 0.0, 1.0, //
            0.0, 0.0, 0.0,
        ])
        .unwrap();
        m.normalize_columns_to_stochastic();

        for row in 0..3 {
            assert!((m.get(row, 2).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        }
        // Column without links is left alone
        assert_eq!(m.column_sum(1).unwrap(), 0.0);
    }

    #[test]
    fn test_teleportation_fill() {
        let mut m = DenseMatrix::square(5).unwrap();
        m.fill_uniform_teleportation();
        assert!(m.iter().all(|v| v == 0.2));
        assert!((m.sum() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_increment_decrement_clear() {
        let mut m = DenseMatrix::zeros(4, 1).unwrap();
        m.increment();
        assert_eq!(m.sum(), 4.0);
        m.decrement();
        m.decrement();
        assert_eq!(m.sum(), -4.0);
        m.clear();
        assert_eq!(m.sum(), 0.0);
    }

    #[test]
    fn test_tolerant_equality() {
        let a = DenseMatrix::ones(2, 2).unwrap();
        let mut b = a.clone();
        b.set(0, 0, 1.00004).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, a);

        b.set(0, 0, 1.0001).unwrap();
        assert_ne!(a, b);

        let c = DenseMatrix::ones(4, 1).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = DenseMatrix::ones(2, 2).unwrap();
        let mut b = a.clone();
        b.clear();
        assert_eq!(a.sum(), 4.0);
        assert_eq!(b.sum(), 0.0);
    }

    #[test]
    fn test_format_ranked() {
        let m = DenseMatrix::from_flat(&[0.5, 0.25, 0.05, 0.2]).unwrap();
        assert_eq!(
            m.format_ranked(),
            "Page A : 50.00%Page B : 25.00%\nPage C :  5.00%Page D : 20.00%\n"
        );
    }

    #[test]
    fn test_display_echo() {
        let m = DenseMatrix::from_flat(&[0.0, 1.0, 1.0, 0.5]).unwrap();
        assert_eq!(m.to_string(), "[   0][   1]\n[   1][ 0.5]\n");
    }

    #[test]
    fn test_page_labels() {
        assert_eq!(page_label(0), "A");
        assert_eq!(page_label(25), "Z");
        assert_eq!(page_label(26), "AA");
        assert_eq!(page_label(27), "AB");
        assert_eq!(page_label(701), "ZZ");
        assert_eq!(page_label(702), "AAA");
    }
}
