//! JSON input and output
//!
//! The dynamic counterpart of [`crate::statistics::stdev`]: inputs and option bags
//! arrive as `serde_json::Value`, so their shapes and option types are checked here
//! before anything is computed.
//!
//! A matrix is an object with a `data` array and a two-element `shape`; `strides`,
//! `offset` and `dtype` are optional. Any other array is a sequence.

use crate::dtype::{DType, DataBuffer};
use crate::errors::{Result, RuStdevError};
use crate::matrix::Matrix;
use crate::options::Options;
use crate::statistics::{stdev, Input, Stdev};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialized form of a [`Matrix`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRepr {
    pub data: Vec<f64>,
    pub shape: [usize; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strides: Option<[usize; 2]>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub dtype: Option<String>,
}

impl MatrixRepr {
    /// Build the matrix, storing `data` in the tagged representation
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown dtype tag, an input error for a
    /// value the tagged representation cannot hold, and a shape error for an
    /// inconsistent layout.
    pub fn into_matrix(self) -> Result<Matrix> {
        let dtype = self
            .dtype
            .as_deref()
            .map_or(Ok(DType::default()), str::parse)?;
        let data = DataBuffer::try_from_f64_slice(dtype, &self.data)?;
        match self.strides {
            Some(strides) => Matrix::from_layout(data, self.shape, strides, self.offset),
            None if self.offset == 0 => Matrix::new(data, self.shape),
            None => Matrix::from_layout(data, self.shape, [self.shape[1], 1], self.offset),
        }
    }
}

impl From<&Matrix> for MatrixRepr {
    /// Logical cells in row-major order
    fn from(matrix: &Matrix) -> Self {
        Self {
            data: matrix.iter().collect(),
            shape: matrix.shape(),
            strides: None,
            offset: 0,
            dtype: Some(matrix.dtype().to_string()),
        }
    }
}

/// Whether a value looks like a serialized matrix
#[must_use]
pub fn is_matrix_like(value: &Value) -> bool {
    value.get("data").is_some_and(Value::is_array)
        && value
            .get("shape")
            .and_then(Value::as_array)
            .is_some_and(|shape| shape.len() == 2)
}

/// Parse a serialized matrix
///
/// # Errors
///
/// Returns an error if the object does not describe a valid matrix.
pub fn matrix_from_value(value: &Value) -> Result<Matrix> {
    MatrixRepr::deserialize(value)?.into_matrix()
}

/// Encode a float; JSON has no NaN or infinities, so those become the strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"` and `null` stays reserved for no value
#[must_use]
pub fn float_to_value(value: f64) -> Value {
    if value.is_nan() {
        Value::from("NaN")
    } else if value == f64::INFINITY {
        Value::from("Infinity")
    } else if value == f64::NEG_INFINITY {
        Value::from("-Infinity")
    } else {
        Value::from(value)
    }
}

/// Serialize a matrix; integer representations are written as integers
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn matrix_to_value(matrix: &Matrix) -> Value {
    let repr = MatrixRepr::from(matrix);
    let data: Vec<Value> = if matrix.dtype().is_integer() {
        repr.data.iter().map(|&v| Value::from(v as i64)).collect()
    } else {
        repr.data.iter().map(|&v| float_to_value(v)).collect()
    };
    serde_json::json!({
        "data": data,
        "shape": repr.shape,
        "dtype": repr.dtype,
    })
}

/// Resolve a field name or JSON pointer against an element
fn lookup<'v>(item: &'v Value, path: &str) -> Option<&'v Value> {
    if path.starts_with('/') {
        item.pointer(path)
    } else {
        item.get(path)
    }
}

/// Validate an option bag
///
/// Recognized keys are checked in the order `accessor`, `dim`, `dtype`, `bias`, and the
/// first invalid one is reported. The accessor is a field name, or a JSON pointer when
/// it starts with `/`; elements where it resolves to no number read as NaN. Unknown
/// keys are ignored.
///
/// # Errors
///
/// Returns an option error if the bag is not an object or a recognized key has a
/// value of the wrong type.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn options_from_value(value: &Value) -> Result<Options<'static, Value>> {
    let Value::Object(map) = value else {
        return Err(RuStdevError::invalid_option(
            "options",
            format!("options argument must be an object, got `{value}`"),
        ));
    };
    let mut opts = Options::new();

    if let Some(accessor) = map.get("accessor") {
        let Some(path) = accessor.as_str() else {
            return Err(RuStdevError::invalid_option(
                "accessor",
                format!("accessor must be a field name or JSON pointer, got `{accessor}`"),
            ));
        };
        let path = path.to_string();
        opts = opts.with_accessor(move |item: &Value, _| {
            lookup(item, &path).and_then(Value::as_f64).unwrap_or(f64::NAN)
        });
    }
    if let Some(dim) = map.get("dim") {
        let positive = dim
            .as_u64()
            .or_else(|| dim.as_f64().filter(|d| d.fract() == 0.0).map(|d| d as u64))
            .filter(|&d| d >= 1);
        let Some(dim) = positive.and_then(|d| usize::try_from(d).ok()) else {
            return Err(RuStdevError::invalid_option(
                "dim",
                format!("dimension option must be a positive integer, got `{dim}`"),
            ));
        };
        opts = opts.dim(dim);
    }
    if let Some(dtype) = map.get("dtype") {
        let Some(dtype) = dtype.as_str() else {
            return Err(RuStdevError::invalid_option(
                "dtype",
                format!("data type option must be a string, got `{dtype}`"),
            ));
        };
        opts = opts.dtype(dtype);
    }
    if let Some(bias) = map.get("bias") {
        let Some(bias) = bias.as_bool() else {
            return Err(RuStdevError::invalid_option(
                "bias",
                format!("bias option must be a boolean, got `{bias}`"),
            ));
        };
        opts = opts.bias(bias);
    }

    for key in map.keys() {
        if !matches!(key.as_str(), "accessor" | "dim" | "dtype" | "bias") {
            warn!("ignoring unrecognized option `{key}`");
        }
    }

    Ok(opts)
}

/// Convert a result to JSON: `null` for no value, a number (see [`float_to_value`])
/// or a serialized matrix
#[must_use]
pub fn stdev_to_value(result: Option<Stdev>) -> Value {
    match result {
        None => Value::Null,
        Some(Stdev::Scalar(value)) => float_to_value(value),
        Some(Stdev::Matrix(matrix)) => matrix_to_value(&matrix),
    }
}

/// Computes the standard deviation of a JSON sequence or matrix
///
/// # Errors
///
/// Returns an error if the options are invalid or the input is neither an array nor a
/// matrix object, plus every error [`stdev`] raises.
pub fn stdev_value(input: &Value, options: Option<&Value>) -> Result<Value> {
    let opts = options.map(options_from_value).transpose()?;

    let result = if is_matrix_like(input) {
        let matrix = matrix_from_value(input)?;
        stdev(Input::Matrix(&matrix), opts.as_ref())?
    } else if let Value::Array(items) = input {
        stdev(Input::Sequence(items.as_slice()), opts.as_ref())?
    } else {
        return Err(RuStdevError::InvalidInput {
            message: format!("first argument must be either an array or a matrix, got `{input}`"),
        });
    };

    Ok(stdev_to_value(result))
}
