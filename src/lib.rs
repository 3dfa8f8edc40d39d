//! ru_stdev: numerically stable standard deviation
//!
//! Computes the standard deviation of numeric data in a single pass with Welford's
//! method, over plain sequences, sequences of records read through an accessor, and
//! the rows or columns of two-dimensional strided matrices.
//!
//! ## Module Organization
//!
//! - [`statistics`]: The kernel, the axis reducer and the dispatching entry point
//! - [`matrix`]: Strided two-dimensional matrices
//! - [`dtype`]: Numeric storage representations and their tags
//! - [`options`]: Options accepted by the entry point
//! - [`json_io`]: JSON inputs, option bags and results
//! - [`cli`]: Command-line arguments of the `ru_stdev` binary
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust
//! use ru_stdev::prelude::*;
//!
//! let data = [2.0, 4.0, 5.0, 3.0, 8.0, 2.0];
//! let s = stdev(Input::sequence(&data), None).unwrap();
//! assert_eq!(s.and_then(|s| s.as_scalar()), Some(2.280350850198276));
//!
//! // One value per row of a 3x3 matrix
//! let m = Matrix::from_vec((1..=9).map(|v| v as f64).collect::<Vec<_>>(), [3, 3]).unwrap();
//! let rows = stdev(Input::matrix(&m), Some(&Options::new().dim(2))).unwrap();
//! assert_eq!(rows.unwrap().as_matrix().unwrap().to_string(), "1;1;1");
//! ```
//!
//! Empty inputs produce `Ok(None)`, which is never used to signal an error.

// Core modules
pub mod cli;
pub mod dtype;
pub mod errors;
pub mod json_io;
pub mod matrix;
pub mod options;
pub mod statistics;

// Direct re-exports for the public API
pub use dtype::{DType, DataBuffer, Element};
pub use errors::{Result, RuStdevError};
pub use matrix::Matrix;
pub use options::{Accessor, Options};
pub use statistics::{stdev, stdev_axis, stdev_by, stdev_sequence, Axis, Datum, Input, Stdev};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::dtype::{DType, DataBuffer};
    pub use crate::errors::{Result, RuStdevError};
    pub use crate::json_io::stdev_value;
    pub use crate::matrix::Matrix;
    pub use crate::options::Options;
    pub use crate::statistics::{stdev, stdev_axis, Axis, Input, Stdev};
}
