// src/tensor/create.rs

use crate::error::OodError;
use crate::tensor::Tensor;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, OodError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with `value` with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, OodError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new Tensor from a `Vec<f32>` and shape.
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, OodError> {
    Tensor::new(data_vec, shape)
}

/// Converts interleaved `u8` pixels (`[H, W, C]`) into a `[C, H, W]` tensor
/// scaled to `[0, 1]`.
///
/// # Errors
///
/// Returns `OodError::TensorCreationError` if `pixels.len() != height * width * channels`.
pub fn from_hwc_u8(
    pixels: &[u8],
    height: usize,
    width: usize,
    channels: usize,
) -> Result<Tensor, OodError> {
    let plane = height * width;
    if pixels.len() != plane * channels {
        return Err(OodError::TensorCreationError {
            data_len: pixels.len(),
            shape: vec![channels, height, width],
        });
    }
    let mut data = vec![0.0f32; pixels.len()];
    for (i, px) in pixels.chunks_exact(channels).enumerate() {
        for (c, &value) in px.iter().enumerate() {
            data[c * plane + i] = f32::from(value) / 255.0;
        }
    }
    Tensor::new(data, vec![channels, height, width])
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
