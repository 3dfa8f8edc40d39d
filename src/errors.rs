//! Centralized error handling for ru_stdev
//!
//! Every fallible operation in the crate returns [`Result`], so callers can tell a
//! rejected input apart from an empty one (which is `Ok(None)`, never an error).

use thiserror::Error;

/// Main error type for ru_stdev operations
#[derive(Debug, Error)]
pub enum RuStdevError {
    /// Top-level input is neither a sequence nor a matrix, or a sequence element
    /// has no numeric value
    #[error("invalid input argument: {message}")]
    InvalidInput { message: String },

    /// An option value has the wrong type, or the option bag is not a record
    #[error("invalid option `{option}`: {message}")]
    InvalidOption { option: String, message: String },

    /// Dimension option exceeds the number of matrix dimensions
    #[error("invalid option `dim`: {dim} exceeds number of matrix dimensions (2)")]
    DimensionOutOfRange { dim: usize },

    /// Data type tag without a backing numeric representation
    #[error("invalid option `dtype`: `{dtype}` does not have a corresponding array representation")]
    UnknownDType { dtype: String },

    /// Matrix layout or output sizing error
    #[error("shape error: {message}")]
    Shape { message: String },

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or conversion errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuStdevError {
    /// Errors raised because a value has the wrong kind
    #[must_use]
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidOption { .. })
    }

    #[must_use]
    pub const fn is_range_error(&self) -> bool {
        matches!(self, Self::DimensionOutOfRange { .. })
    }

    /// Errors raised because a configuration value names nothing known
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::UnknownDType { .. })
    }

    pub(crate) fn invalid_option(option: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}

impl From<ndarray::ShapeError> for RuStdevError {
    fn from(error: ndarray::ShapeError) -> Self {
        Self::shape(error.to_string())
    }
}

/// Result type alias for ru_stdev operations
pub type Result<T> = std::result::Result<T, RuStdevError>;
