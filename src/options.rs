//! Options for the standard deviation entry point
//!
//! Every field is optional; unset fields take their defaults when the computation is
//! dispatched (`bias = false`, `dim = 2`, `dtype = "float64"`).

use crate::dtype::DType;
use crate::errors::{Result, RuStdevError};
use crate::statistics::Axis;
use std::fmt;

/// Extraction function applied to each sequence element and its index
pub type Accessor<'a, T> = Box<dyn Fn(&T, usize) -> f64 + 'a>;

pub struct Options<'a, T = f64> {
    /// Divide by `N` instead of `N - 1`
    pub bias: Option<bool>,
    /// Matrix dimension to collapse, `1` or `2`
    pub dim: Option<usize>,
    /// Tag of the output matrix representation
    pub dtype: Option<String>,
    pub accessor: Option<Accessor<'a, T>>,
}

impl<T> Default for Options<'_, T> {
    fn default() -> Self {
        Self {
            bias: None,
            dim: None,
            dtype: None,
            accessor: None,
        }
    }
}

impl<T> fmt::Debug for Options<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("bias", &self.bias)
            .field("dim", &self.dim)
            .field("dtype", &self.dtype)
            .field("accessor", &self.accessor.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<'a, T> Options<'a, T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bias(mut self, bias: bool) -> Self {
        self.bias = Some(bias);
        self
    }

    #[must_use]
    pub fn dim(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }

    #[must_use]
    pub fn dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = Some(dtype.into());
        self
    }

    #[must_use]
    pub fn with_accessor(mut self, accessor: impl Fn(&T, usize) -> f64 + 'a) -> Self {
        self.accessor = Some(Box::new(accessor));
        self
    }

    /// Check the fields whose type alone does not guarantee validity
    ///
    /// # Errors
    ///
    /// Returns an option error if `dim` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.dim == Some(0) {
            return Err(RuStdevError::invalid_option(
                "dim",
                "dimension option must be a positive integer",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_biased(&self) -> bool {
        self.bias.unwrap_or(false)
    }

    /// Resolve the output representation, `float64` when unset
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the tag if it has no representation.
    pub fn output_dtype(&self) -> Result<DType> {
        self.dtype.as_deref().map_or(Ok(DType::default()), str::parse)
    }

    /// Resolve the reduction axis, collapsing columns when unset
    ///
    /// # Errors
    ///
    /// Returns a range error if `dim` exceeds 2.
    pub fn axis(&self) -> Result<Axis> {
        self.dim.map_or(Ok(Axis::default()), Axis::from_dim)
    }
}
