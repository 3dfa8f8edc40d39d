//! Numeric storage representations
//!
//! A matrix keeps its values in a [`DataBuffer`], a vector of one fixed-width numeric
//! type tagged with its [`DType`]. The tag strings (`"int8"`, `"float64"`, ...) are the
//! ones accepted by the `dtype` option; [`DType::from_tag`] is the lookup that turns a
//! tag into a representation, returning `None` for tags it does not know.

use crate::errors::{Result, RuStdevError};
use std::fmt;
use std::str::FromStr;

/// Supported element representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DType {
    Int8,
    Uint8,
    /// `u8` storage that clamps and rounds on write instead of truncating
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    #[default]
    Float64,
    /// Untyped storage, kept as `f64`
    Generic,
}

impl DType {
    pub const ALL: [Self; 10] = [
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
        Self::Generic,
    ];

    /// Look up the representation for a tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dtype| dtype.as_str() == tag)
    }

    /// Get the tag string of the representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Uint8Clamped => "uint8_clamped",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Generic => "generic",
        }
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64 | Self::Generic)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = RuStdevError;

    fn from_str(tag: &str) -> Result<Self> {
        Self::from_tag(tag).ok_or_else(|| RuStdevError::UnknownDType {
            dtype: tag.to_string(),
        })
    }
}

/// Fixed-width numeric types that can be read as `f64` and stored from `f64`
pub trait Element: Copy + fmt::Debug + PartialEq + 'static {
    /// Representation used when a vector of this type becomes a [`DataBuffer`]
    const DTYPE: DType;

    fn to_f64(self) -> f64;

    /// Convert from `f64`, truncating toward zero and saturating for integers
    fn from_f64(value: f64) -> Self;

    fn into_buffer(values: Vec<Self>) -> DataBuffer;
}

macro_rules! impl_element {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$variant;

                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::unnecessary_cast)]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn into_buffer(values: Vec<Self>) -> DataBuffer {
                    DataBuffer::$variant(values)
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_u8(value: f64) -> u8 {
    // NaN casts to 0
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Linear backing store of a matrix, tagged with its element representation
#[derive(Debug, Clone, PartialEq)]
pub enum DataBuffer {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Generic(Vec<f64>),
}

macro_rules! each_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            DataBuffer::Int8($values) => $body,
            DataBuffer::Uint8($values) | DataBuffer::Uint8Clamped($values) => $body,
            DataBuffer::Int16($values) => $body,
            DataBuffer::Uint16($values) => $body,
            DataBuffer::Int32($values) => $body,
            DataBuffer::Uint32($values) => $body,
            DataBuffer::Float32($values) => $body,
            DataBuffer::Float64($values) | DataBuffer::Generic($values) => $body,
        }
    };
}

impl DataBuffer {
    /// Allocate a zero-filled buffer of the given representation
    #[must_use]
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Int8 => Self::Int8(vec![0; len]),
            DType::Uint8 => Self::Uint8(vec![0; len]),
            DType::Uint8Clamped => Self::Uint8Clamped(vec![0; len]),
            DType::Int16 => Self::Int16(vec![0; len]),
            DType::Uint16 => Self::Uint16(vec![0; len]),
            DType::Int32 => Self::Int32(vec![0; len]),
            DType::Uint32 => Self::Uint32(vec![0; len]),
            DType::Float32 => Self::Float32(vec![0.0; len]),
            DType::Float64 => Self::Float64(vec![0.0; len]),
            DType::Generic => Self::Generic(vec![0.0; len]),
        }
    }

    /// Build a buffer of the given representation from `f64` values, converting each
    /// value the way [`DataBuffer::set`] does
    #[must_use]
    pub fn from_f64_slice(dtype: DType, values: &[f64]) -> Self {
        let mut buffer = Self::zeros(dtype, values.len());
        for (index, &value) in values.iter().enumerate() {
            buffer.set(index, value);
        }
        buffer
    }

    /// Build a buffer from input data, refusing values an integer representation
    /// cannot hold exactly
    ///
    /// `float32` accepts every value, rounded to the nearest `f32`.
    ///
    /// # Errors
    ///
    /// Returns an input error naming the first value that is not an integer in the
    /// range of an integer representation.
    #[allow(clippy::float_cmp)]
    pub fn try_from_f64_slice(dtype: DType, values: &[f64]) -> Result<Self> {
        let mut buffer = Self::zeros(dtype, values.len());
        for (index, &value) in values.iter().enumerate() {
            buffer.set(index, value);
            if dtype.is_integer() && buffer.value(index) != value {
                return Err(RuStdevError::InvalidInput {
                    message: format!("value {value} at index {index} cannot be stored as {dtype}"),
                });
            }
        }
        Ok(buffer)
    }

    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int8(_) => DType::Int8,
            Self::Uint8(_) => DType::Uint8,
            Self::Uint8Clamped(_) => DType::Uint8Clamped,
            Self::Int16(_) => DType::Int16,
            Self::Uint16(_) => DType::Uint16,
            Self::Int32(_) => DType::Int32,
            Self::Uint32(_) => DType::Uint32,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
            Self::Generic(_) => DType::Generic,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        each_buffer!(self, values => values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the value at `index` widened to `f64`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        each_buffer!(self, values => values.get(index).map(|&v| v.to_f64()))
    }

    /// Read the value at `index` widened to `f64`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        each_buffer!(self, values => values[index].to_f64())
    }

    /// Store `value` at `index`, converted to the buffer's representation
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: f64) {
        match self {
            Self::Int8(values) => values[index] = i8::from_f64(value),
            Self::Uint8(values) => values[index] = u8::from_f64(value),
            Self::Uint8Clamped(values) => values[index] = clamp_u8(value),
            Self::Int16(values) => values[index] = i16::from_f64(value),
            Self::Uint16(values) => values[index] = u16::from_f64(value),
            Self::Int32(values) => values[index] = i32::from_f64(value),
            Self::Uint32(values) => values[index] = u32::from_f64(value),
            Self::Float32(values) => values[index] = f32::from_f64(value),
            Self::Float64(values) | Self::Generic(values) => values[index] = value,
        }
    }

    /// Copy every stored value out as `f64`
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        each_buffer!(self, values => values.iter().map(|&v| v.to_f64()).collect())
    }
}

impl<T: Element> From<Vec<T>> for DataBuffer {
    fn from(values: Vec<T>) -> Self {
        T::into_buffer(values)
    }
}
