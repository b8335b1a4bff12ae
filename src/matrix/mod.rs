//! Dense matrix storage and arithmetic
//!
//! This module provides the row-major grid the ranking engine is built on,
//! together with its operator overloads.

pub mod dense;
pub mod ops;

pub use dense::{page_label, DenseMatrix, EQ_TOLERANCE};
