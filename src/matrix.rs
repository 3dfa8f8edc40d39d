//! Two-dimensional strided matrices
//!
//! A [`Matrix`] is a view description over a linear [`DataBuffer`]: a shape, a pair of
//! strides and a base offset. Cell `(i, j)` lives at `offset + i * strides[0] + j * strides[1]`.
//! Layouts are checked once at construction so reads never leave the backing store.

use crate::dtype::{DType, DataBuffer, Element};
use crate::errors::{Result, RuStdevError};
use ndarray::{Array2, ArrayView2};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DataBuffer,
    shape: [usize; 2],
    strides: [usize; 2],
    offset: usize,
}

impl Matrix {
    /// Create a row-major matrix over `data`
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not hold exactly `rows * cols` values.
    pub fn new(data: DataBuffer, shape: [usize; 2]) -> Result<Self> {
        let [rows, cols] = shape;
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| RuStdevError::shape(format!("shape {rows}x{cols} overflows")))?;
        if data.len() != expected {
            return Err(RuStdevError::shape(format!(
                "data length {} does not match shape {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            shape,
            strides: [cols, 1],
            offset: 0,
        })
    }

    /// Create a matrix with an explicit stride pair and base offset
    ///
    /// # Errors
    ///
    /// Returns an error if `rows * cols` overflows or any cell would map outside the
    /// backing store.
    pub fn from_layout(
        data: DataBuffer,
        shape: [usize; 2],
        strides: [usize; 2],
        offset: usize,
    ) -> Result<Self> {
        let [rows, cols] = shape;
        if rows.checked_mul(cols).is_none() {
            return Err(RuStdevError::shape(format!("shape {rows}x{cols} overflows")));
        }
        if rows > 0 && cols > 0 {
            let last = (rows - 1)
                .checked_mul(strides[0])
                .zip((cols - 1).checked_mul(strides[1]))
                .and_then(|(a, b)| a.checked_add(b))
                .and_then(|span| span.checked_add(offset));
            match last {
                Some(last) if last < data.len() => {}
                _ => {
                    return Err(RuStdevError::shape(format!(
                        "layout {rows}x{cols} with strides {strides:?} and offset {offset} \
                         exceeds backing store of length {}",
                        data.len()
                    )))
                }
            }
        }
        Ok(Self {
            data,
            shape,
            strides,
            offset,
        })
    }

    /// Create a zero-filled row-major matrix of the given representation
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` cells cannot be allocated.
    #[must_use]
    pub fn zeros(shape: [usize; 2], dtype: DType) -> Self {
        Self {
            data: DataBuffer::zeros(dtype, shape[0].saturating_mul(shape[1])),
            shape,
            strides: [shape[1], 1],
            offset: 0,
        }
    }

    /// Create a row-major matrix from a vector of numbers
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not hold exactly `rows * cols` values.
    pub fn from_vec<T: Element>(values: Vec<T>, shape: [usize; 2]) -> Result<Self> {
        Self::new(DataBuffer::from(values), shape)
    }

    /// Copy an `ndarray` view into a row-major matrix of the element's representation
    #[must_use]
    pub fn from_array<T: Element>(array: ArrayView2<'_, T>) -> Self {
        let (rows, cols) = array.dim();
        let values: Vec<T> = array.iter().copied().collect();
        Self {
            data: DataBuffer::from(values),
            shape: [rows, cols],
            strides: [cols, 1],
            offset: 0,
        }
    }

    /// Copy the logical cells into an `ndarray` array
    ///
    /// # Errors
    ///
    /// Returns an error if the cells cannot be arranged into the matrix shape.
    pub fn to_array(&self) -> Result<Array2<f64>> {
        let [rows, cols] = self.shape;
        Ok(Array2::from_shape_vec((rows, cols), self.iter().collect())?)
    }

    #[must_use]
    pub const fn shape(&self) -> [usize; 2] {
        self.shape
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.shape[0]
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.shape[1]
    }

    #[must_use]
    pub const fn strides(&self) -> [usize; 2] {
        self.strides
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn data(&self) -> &DataBuffer {
        &self.data
    }

    #[must_use]
    pub const fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Number of logical cells; every constructor rejects shapes whose product overflows
    #[must_use]
    pub const fn len(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the matrix has exactly one row or exactly one column
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        self.shape[0] == 1 || self.shape[1] == 1
    }

    /// Position of cell `(i, j)` in the backing store
    #[must_use]
    pub const fn index_of(&self, i: usize, j: usize) -> usize {
        self.offset + i * self.strides[0] + j * self.strides[1]
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.shape[0] || j >= self.shape[1] {
            return None;
        }
        self.data.get(self.index_of(i, j))
    }

    /// Write `value` into the cell at row-major position `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than [`Matrix::len`].
    pub fn set_flat(&mut self, index: usize, value: f64) {
        assert!(index < self.len(), "flat index {index} out of bounds");
        let cols = self.shape[1];
        let position = self.index_of(index / cols, index % cols);
        self.data.set(position, value);
    }

    /// Swap the axes by exchanging shape and strides; the backing store is not touched
    #[must_use]
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            shape: [self.shape[1], self.shape[0]],
            strides: [self.strides[1], self.strides[0]],
            offset: self.offset,
        }
    }

    /// Iterate over the logical cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let [rows, cols] = self.shape;
        (0..rows).flat_map(move |i| (0..cols).map(move |j| self.data.value(self.index_of(i, j))))
    }
}

impl<T: Element> From<Array2<T>> for Matrix {
    fn from(array: Array2<T>) -> Self {
        Self::from_array(array.view())
    }
}

/// Columns separated by `,`, rows by `;`
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [rows, cols] = self.shape;
        for i in 0..rows {
            if i > 0 {
                f.write_str(";")?;
            }
            for j in 0..cols {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", self.data.value(self.index_of(i, j)))?;
            }
        }
        Ok(())
    }
}
