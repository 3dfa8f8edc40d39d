//! Standard deviation along a matrix axis
//!
//! The reducer walks the outer axis and runs the kernel over the inner one, stepping
//! through the backing store with the matrix strides. Results go into an output matrix
//! the caller already owns.

use super::operations::Axis;
use super::welford::Welford;
use crate::errors::{Result, RuStdevError};
use crate::matrix::Matrix;
use log::trace;

/// Computes the standard deviation of every row or column of `mat` into `out`
///
/// With [`Axis::PerRow`] the `i`-th row's result is written to flat position `i` of
/// `out`; with [`Axis::PerColumn`] the `i`-th column's. Values are converted to the
/// representation of `out`.
///
/// Returns `Ok(None)` if `mat` has a zero-sized dimension, leaving `out` untouched.
/// Otherwise returns `out` itself.
///
/// # Errors
///
/// Returns a shape error if `out` has fewer cells than there are results.
pub fn stdev_axis<'o>(
    out: &'o mut Matrix,
    mat: &Matrix,
    bias: bool,
    axis: Axis,
) -> Result<Option<&'o mut Matrix>> {
    let [rows, cols] = mat.shape();
    let [row_stride, col_stride] = mat.strides();
    let (outer, inner, outer_stride, inner_stride) = match axis {
        Axis::PerRow => (rows, cols, row_stride, col_stride),
        Axis::PerColumn => (cols, rows, col_stride, row_stride),
    };
    if outer == 0 || inner == 0 {
        return Ok(None);
    }
    if out.len() < outer {
        return Err(RuStdevError::shape(format!(
            "output matrix holds {} values but {outer} results are required",
            out.len()
        )));
    }

    let data = mat.data();
    for i in 0..outer {
        let start = mat.offset() + i * outer_stride;
        let mut acc = Welford::new();
        for j in 0..inner {
            acc.push(data.value(start + j * inner_stride));
        }
        if let Some(value) = acc.stdev(bias) {
            trace!("axis {} slot {i}: {value}", axis.dim());
            out.set_flat(i, value);
        }
    }

    Ok(Some(out))
}
