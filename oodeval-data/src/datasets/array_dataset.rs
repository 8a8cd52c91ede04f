// oodeval-data/src/datasets/array_dataset.rs

use super::traits::{Dataset, Subsettable};
use crate::transforms::ImageTransform;
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{Array3, Array4, Axis};
use oodeval_core::{OodError, Tensor};

/// An in-memory image benchmark: `[N, H, W, C]` pixels plus one label per image.
///
/// Items are `(image, label)` where the image has gone through the
/// dataset's [`ImageTransform`]. `C` must be 1 (grayscale) or 3 (RGB).
#[derive(Debug, Clone)]
pub struct ArrayDataset {
    images: Array4<u8>,
    labels: Vec<i64>,
    transform: ImageTransform,
}

impl ArrayDataset {
    /// Creates a dataset from `[N, H, W, C]` pixels and `N` labels.
    ///
    /// # Errors
    ///
    /// Returns `OodError::ShapeMismatch` if the label count differs from `N`
    /// or if `C` is neither 1 nor 3.
    pub fn new(
        images: Array4<u8>,
        labels: Vec<i64>,
        transform: ImageTransform,
    ) -> Result<Self, OodError> {
        let (n, h, w, c) = images.dim();
        if n != labels.len() {
            return Err(OodError::ShapeMismatch {
                expected: format!("{} labels", n),
                actual: format!("{} labels", labels.len()),
                operation: "ArrayDataset::new".to_string(),
            });
        }
        if c != 1 && c != 3 {
            return Err(OodError::ShapeMismatch {
                expected: "1 or 3 channels".to_string(),
                actual: format!("[{}, {}, {}, {}]", n, h, w, c),
                operation: "ArrayDataset::new".to_string(),
            });
        }
        Ok(ArrayDataset {
            images,
            labels,
            transform,
        })
    }

    /// Creates a grayscale dataset from `[N, H, W]` pixels.
    pub fn from_grayscale(
        images: Array3<u8>,
        labels: Vec<i64>,
        transform: ImageTransform,
    ) -> Result<Self, OodError> {
        Self::new(images.insert_axis(Axis(3)), labels, transform)
    }

    pub fn images(&self) -> &Array4<u8> {
        &self.images
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    /// Replaces the preprocessing pipeline.
    pub fn with_transform(mut self, transform: ImageTransform) -> Self {
        self.transform = transform;
        self
    }

    fn decode(&self, index: usize) -> Result<DynamicImage, OodError> {
        let (_, h, w, c) = self.images.dim();
        let pixels: Vec<u8> = self.images.index_axis(Axis(0), index).iter().copied().collect();
        let built = if c == 1 {
            GrayImage::from_raw(w as u32, h as u32, pixels).map(DynamicImage::ImageLuma8)
        } else {
            RgbImage::from_raw(w as u32, h as u32, pixels).map(DynamicImage::ImageRgb8)
        };
        built.ok_or_else(|| OodError::TensorCreationError {
            data_len: h * w * c,
            shape: vec![h, w, c],
        })
    }
}

impl Dataset for ArrayDataset {
    type Item = (Tensor, i64);

    /// Returns the transformed image and label at `index`.
    ///
    /// # Errors
    ///
    /// Returns `OodError::IndexOutOfBounds` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, OodError> {
        if index >= self.labels.len() {
            return Err(OodError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.labels.len()],
            });
        }
        let image = self.decode(index)?;
        let tensor = self.transform.apply(image)?;
        Ok((tensor, self.labels[index]))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

impl Subsettable for ArrayDataset {
    fn subset(&self, indices: &[usize]) -> Result<Self, OodError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.labels.len()) {
            return Err(OodError::IndexOutOfBounds {
                index: vec![bad],
                shape: vec![self.labels.len()],
            });
        }
        Ok(ArrayDataset {
            images: self.images.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            transform: self.transform.clone(),
        })
    }
}

#[cfg(test)]
#[path = "array_dataset_test.rs"]
mod tests;
