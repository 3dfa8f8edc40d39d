//! Standard deviation computations
//!
//! # Organization
//!
//! This module is organized into submodules:
//! - [`operations`]: Axis, result and element types
//! - [`welford`]: The single-pass kernel over sequences
//! - [`axis`]: Row and column reductions of matrices
//! - [`dispatch`]: The shape-dispatching entry point

pub mod axis;
pub mod dispatch;
pub mod operations;
pub mod welford;

// Re-export the main types and functions for convenience
pub use axis::stdev_axis;
pub use dispatch::{stdev, Input};
pub use operations::{Axis, Datum, Stdev};
pub use welford::{stdev_by, stdev_sequence};
