// src/tensor/mod.rs

use crate::error::OodError;
use std::fmt;
use std::sync::Arc;

pub mod create;

pub use create::{from_vec_f32, full, zeros};

/// A dense, row-major `f32` tensor living in host memory.
///
/// Clones share the `Arc`-held buffer. There is no autograd state.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Arc<Vec<f32>>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a new Tensor from `f32` data and a shape.
    ///
    /// # Errors
    ///
    /// Returns `OodError::TensorCreationError` when `data_vec.len()` is not the
    /// product of `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, OodError> {
        let numel: usize = shape.iter().product();
        if data_vec.len() != numel {
            return Err(OodError::TensorCreationError {
                data_len: data_vec.len(),
                shape,
            });
        }
        Ok(Tensor {
            data: Arc::new(data_vec),
            shape,
        })
    }

    /// Returns a clone of the tensor's shape (dimensions).
    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    /// Returns the rank (number of dimensions) of the tensor.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Borrows the contiguous element buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Copies the elements out into an owned `Vec<f32>`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, OodError> {
        Ok(self.data.as_ref().clone())
    }

    /// Returns a view of row `index` along the first dimension as a new tensor.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` for a scalar tensor, `IndexOutOfBounds` when `index`
    /// is past the first dimension.
    pub fn row(&self, index: usize) -> Result<Tensor, OodError> {
        let (&rows, rest) = self.shape.split_first().ok_or_else(|| OodError::ShapeMismatch {
            expected: "rank >= 1".to_string(),
            actual: "scalar".to_string(),
            operation: "Tensor::row".to_string(),
        })?;
        if index >= rows {
            return Err(OodError::IndexOutOfBounds {
                index: vec![index],
                shape: self.shape.clone(),
            });
        }
        let width: usize = rest.iter().product();
        let start = index * width;
        Tensor::new(self.data[start..start + width].to_vec(), rest.to_vec())
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("numel", &self.numel())
            .finish()
    }
}
