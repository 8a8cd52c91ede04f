// oodeval-data/src/datasets/eval_dataset.rs

use super::array_dataset::ArrayDataset;
use super::image_folder::ImageFolder;
use super::traits::{Dataset, Subsettable};
use oodeval_core::{OodError, Tensor};

/// The dataset behind every evaluation loader.
#[derive(Debug, Clone)]
pub enum EvalDataset {
    Array(ArrayDataset),
    Folder(ImageFolder),
}

impl EvalDataset {
    /// Labels in item order.
    pub fn targets(&self) -> Vec<i64> {
        match self {
            EvalDataset::Array(d) => d.labels().to_vec(),
            EvalDataset::Folder(d) => d.targets(),
        }
    }

    /// Applies the subsample selection, if there is one.
    pub fn maybe_subset(self, indices: Option<&[usize]>) -> Result<Self, OodError> {
        match indices {
            Some(indices) => self.subset(indices),
            None => Ok(self),
        }
    }
}

impl Dataset for EvalDataset {
    type Item = (Tensor, i64);

    fn get(&self, index: usize) -> Result<Self::Item, OodError> {
        match self {
            EvalDataset::Array(d) => d.get(index),
            EvalDataset::Folder(d) => d.get(index),
        }
    }

    fn len(&self) -> usize {
        match self {
            EvalDataset::Array(d) => d.len(),
            EvalDataset::Folder(d) => d.len(),
        }
    }
}

impl Subsettable for EvalDataset {
    fn subset(&self, indices: &[usize]) -> Result<Self, OodError> {
        Ok(match self {
            EvalDataset::Array(d) => EvalDataset::Array(d.subset(indices)?),
            EvalDataset::Folder(d) => EvalDataset::Folder(d.subset(indices)?),
        })
    }
}

impl From<ArrayDataset> for EvalDataset {
    fn from(d: ArrayDataset) -> Self {
        EvalDataset::Array(d)
    }
}

impl From<ImageFolder> for EvalDataset {
    fn from(d: ImageFolder) -> Self {
        EvalDataset::Folder(d)
    }
}
