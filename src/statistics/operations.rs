//! Core statistical types and traits
//!
//! This module defines the reduction axis, the result of a dispatched computation and
//! the [`Datum`] trait that lets sequences of arbitrary elements feed the kernel.

use crate::errors::{Result, RuStdevError};
use crate::matrix::Matrix;

/// Matrix dimension collapsed by an axis reduction
///
/// The `dim` option numbers dimensions from 1: `dim = 1` is the rows dimension and
/// `dim = 2` the columns dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Collapse the rows dimension, producing one value per column (`dim = 1`)
    PerColumn,
    /// Collapse the columns dimension, producing one value per row (`dim = 2`)
    #[default]
    PerRow,
}

impl Axis {
    /// Resolve a `dim` option value
    ///
    /// # Errors
    ///
    /// Returns an option error for `0` and a range error for anything above `2`.
    pub fn from_dim(dim: usize) -> Result<Self> {
        match dim {
            0 => Err(RuStdevError::invalid_option(
                "dim",
                "dimension option must be a positive integer",
            )),
            1 => Ok(Self::PerColumn),
            2 => Ok(Self::PerRow),
            dim => Err(RuStdevError::DimensionOutOfRange { dim }),
        }
    }

    #[must_use]
    pub const fn dim(self) -> usize {
        match self {
            Self::PerColumn => 1,
            Self::PerRow => 2,
        }
    }

    /// Shape of the output matrix for an input of the given shape
    #[must_use]
    pub const fn output_shape(self, shape: [usize; 2]) -> [usize; 2] {
        match self {
            Self::PerColumn => [1, shape[1]],
            Self::PerRow => [shape[0], 1],
        }
    }
}

/// Result of a dispatched standard deviation
#[derive(Debug, Clone, PartialEq)]
pub enum Stdev {
    Scalar(f64),
    /// One value per row or per column
    Matrix(Matrix),
}

impl Stdev {
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Matrix(_) => None,
        }
    }

    #[must_use]
    pub const fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Self::Matrix(matrix) => Some(matrix),
            Self::Scalar(_) => None,
        }
    }

    #[must_use]
    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Self::Matrix(matrix) => Some(matrix),
            Self::Scalar(_) => None,
        }
    }
}

/// Sequence elements that may carry their own numeric value
///
/// Numbers always do. Structured elements return `None` and need an accessor.
pub trait Datum {
    fn value(&self) -> Option<f64>;
}

macro_rules! impl_numeric_datum {
    ($($t:ty),*) => {
        $(
            impl Datum for $t {
                fn value(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }
            }
        )*
    };
}

impl_numeric_datum!(i8, u8, i16, u16, i32, u32, f32, f64);

impl Datum for serde_json::Value {
    fn value(&self) -> Option<f64> {
        self.as_f64()
    }
}
