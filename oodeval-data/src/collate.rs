// oodeval-data/src/collate.rs

use crate::dataloader::{CollateFn, DataLoader};
use crate::datasets::EvalDataset;
use crate::samplers::SequentialSampler;
use oodeval_core::ops::stack_op;
use oodeval_core::{OodError, Tensor};

/// A batch of images with their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    /// `[B, C, H, W]`.
    pub images: Tensor,
    pub labels: Vec<i64>,
}

impl ImageBatch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The loader type returned by every OOD loader function.
pub type ImageLoader = DataLoader<EvalDataset, SequentialSampler, ImageBatch>;

/// Stacks `(image, label)` items into one [`ImageBatch`].
///
/// # Errors
///
/// `EmptyTensorList` for an empty batch, `ShapeMismatch` when the images do
/// not share a shape.
pub fn collate_images(items: Vec<(Tensor, i64)>) -> Result<ImageBatch, OodError> {
    let (images, labels): (Vec<Tensor>, Vec<i64>) = items.into_iter().unzip();
    let images = stack_op(&images, 0)?;
    Ok(ImageBatch { images, labels })
}

/// [`collate_images`] boxed for [`DataLoader::with_collate`].
pub fn image_collate() -> CollateFn<(Tensor, i64), ImageBatch> {
    Box::new(collate_images)
}
