//! Shape-based dispatch to the sequence, accessor and axis reducers

use super::axis::stdev_axis;
use super::operations::{Datum, Stdev};
use super::welford::{stdev_by, stdev_values};
use crate::errors::{Result, RuStdevError};
use crate::matrix::Matrix;
use crate::options::Options;
use log::debug;

/// Input accepted by [`stdev`]
#[derive(Debug, Clone, Copy)]
pub enum Input<'a, T = f64> {
    Sequence(&'a [T]),
    Matrix(&'a Matrix),
}

impl<'a, T> Input<'a, T> {
    pub const fn sequence(items: &'a [T]) -> Self {
        Self::Sequence(items)
    }
}

impl<'a> Input<'a, f64> {
    pub const fn matrix(matrix: &'a Matrix) -> Self {
        Self::Matrix(matrix)
    }
}

impl<'a, T> From<&'a [T]> for Input<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::Sequence(items)
    }
}

impl<'a, T> From<&'a Vec<T>> for Input<'a, T> {
    fn from(items: &'a Vec<T>) -> Self {
        Self::Sequence(items)
    }
}

/// Computes the standard deviation of a sequence or of each row/column of a matrix
///
/// - A sequence yields a scalar, through the accessor when one is set.
/// - A matrix with one row or one column is treated as a flat sequence and yields a
///   scalar; `dim` and `dtype` are still validated but otherwise ignored.
/// - Any other matrix yields an `R x 1` (`dim = 2`, default) or `1 x C` (`dim = 1`)
///   matrix stored as `dtype`.
///
/// `Ok(None)` means there is no value: an empty sequence, or a matrix with a
/// zero-sized dimension.
///
/// # Errors
///
/// All checks run before any computation:
/// - option error if `dim` is zero
/// - configuration error if `dtype` names no representation
/// - range error if `dim` exceeds 2
/// - input error if a sequence element has no numeric value and no accessor is set
pub fn stdev<T: Datum>(
    input: Input<'_, T>,
    options: Option<&Options<'_, T>>,
) -> Result<Option<Stdev>> {
    let defaults = Options::default();
    let opts = match options {
        Some(opts) => {
            opts.validate()?;
            opts
        }
        None => &defaults,
    };
    let bias = opts.is_biased();

    match input {
        Input::Matrix(mat) => {
            let dtype = opts.output_dtype()?;
            let axis = opts.axis()?;

            if mat.is_vector() {
                debug!(
                    "{}x{} matrix treated as a flat sequence",
                    mat.rows(),
                    mat.cols()
                );
                return Ok(stdev_values(mat.iter(), bias).map(Stdev::Scalar));
            }

            let shape = axis.output_shape(mat.shape());
            debug!(
                "reducing {}x{} matrix along dim {} into {}x{} {dtype}",
                mat.rows(),
                mat.cols(),
                axis.dim(),
                shape[0],
                shape[1]
            );
            let mut out = Matrix::zeros(shape, dtype);
            if stdev_axis(&mut out, mat, bias, axis)?.is_none() {
                return Ok(None);
            }
            Ok(Some(Stdev::Matrix(out)))
        }
        Input::Sequence(items) => {
            if let Some(accessor) = &opts.accessor {
                debug!("sequence of {} elements through accessor", items.len());
                let value = stdev_by(items, |item, index| accessor(item, index), bias);
                return Ok(value.map(Stdev::Scalar));
            }
            if let Some(index) = items.iter().position(|item| item.value().is_none()) {
                return Err(RuStdevError::InvalidInput {
                    message: format!("element {index} has no numeric value; provide an accessor"),
                });
            }
            debug!("sequence of {} elements", items.len());
            let value = stdev_by(items, |item, _| item.value().unwrap_or(f64::NAN), bias);
            Ok(value.map(Stdev::Scalar))
        }
    }
}
