// oodeval-data/src/loaders.rs
//! The OOD evaluation loaders: corrupted benchmarks, rotated test splits
//! and cross-dataset pairs.
//!
//! Every loader validates the dataset name against its own family list
//! before touching the filesystem, then reads the data under
//! [`LoaderConfig::data_dir`], optionally subsamples it with
//! [`select_subset`] and returns an unshuffled [`ImageLoader`].

use crate::collate::{image_collate, ImageLoader};
use crate::config::LoaderConfig;
use crate::dataloader::DataLoader;
use crate::datasets::{Dataset, EvalDataset};
use crate::family::{DatasetFamily, CORRUPTED_FAMILIES, CROSS_FAMILIES, ROTATION_FAMILIES};
use crate::samplers::{select_subset, SequentialSampler};
use crate::sources;
use crate::transforms::{Geometric, ImageTransform, Normalize};
use log::info;
use oodeval_core::OodError;

const IMAGENET_RESIZE: u32 = 256;
const IMAGENET_CROP: u32 = 224;

fn family_normalization(family: DatasetFamily) -> Result<Normalize, OodError> {
    family.normalization().ok_or_else(|| {
        OodError::InvalidArgument(format!("{} has no normalization statistics", family))
    })
}

fn subsample(dataset: EvalDataset, config: &LoaderConfig) -> Result<EvalDataset, OodError> {
    let indices = select_subset(dataset.len(), config.n_data, config.subset_idx)?;
    dataset.maybe_subset(indices.as_deref())
}

fn build_loader(dataset: EvalDataset, config: &LoaderConfig) -> Result<ImageLoader, OodError> {
    DataLoader::with_collate(
        dataset,
        config.batch_size,
        SequentialSampler::new(),
        false,
        image_collate(),
    )?
    .with_workers(config.workers)
    .map(|loader| loader.with_pin_memory(config.pin_memory))
}

/// Loads the corrupted benchmark of `name` at `severity`.
///
/// CIFAR10 and CIFAR100 read the CIFAR-C arrays and only normalize.
/// Imagenet reads the ImageNet-C folder and resizes to 256, center-crops to
/// 224, then normalizes. The result is subsampled per `config`.
///
/// # Errors
///
/// `UnsupportedDataset` for names other than CIFAR10, CIFAR100 and Imagenet.
pub fn load_corrupted_dataset(
    name: &str,
    severity: u32,
    config: &LoaderConfig,
) -> Result<ImageLoader, OodError> {
    let family = DatasetFamily::parse_for(name, CORRUPTED_FAMILIES, "load_corrupted_dataset")?;
    let mut transform = ImageTransform::new(family_normalization(family)?);
    if family == DatasetFamily::Imagenet {
        transform = transform
            .then(Geometric::Resize { size: IMAGENET_RESIZE })
            .then(Geometric::CenterCrop { size: IMAGENET_CROP });
    }
    let dataset = sources::load_corrupted_split(family, severity, &config.data_dir, transform)?;
    let dataset = subsample(dataset, config)?;
    info!(
        "load_corrupted_dataset: {} severity {} with {} items",
        family,
        severity,
        dataset.len()
    );
    build_loader(dataset, config)
}

/// Loads the test split of `name` with every image rotated by `angle`
/// degrees (counter-clockwise), then normalized.
///
/// # Errors
///
/// `UnsupportedDataset` for names outside MNIST, Fashion, SVHN, CIFAR10
/// and CIFAR100.
pub fn rotate_load_dataset(
    name: &str,
    angle: f32,
    config: &LoaderConfig,
) -> Result<ImageLoader, OodError> {
    let family = DatasetFamily::parse_for(name, ROTATION_FAMILIES, "rotate_load_dataset")?;
    let transform = ImageTransform::new(family_normalization(family)?)
        .then(Geometric::Rotate { degrees: angle });
    let dataset = sources::load_test_split(family, &config.data_dir, transform)?;
    let dataset = subsample(dataset, config)?;
    info!(
        "rotate_load_dataset: {} rotated by {} with {} items",
        family,
        angle,
        dataset.len()
    );
    build_loader(dataset, config)
}

/// Loads the test splits of `source` and `target`, both normalized with the
/// statistics of `source`.
///
/// Only the target set is subsampled.
///
/// # Errors
///
/// `UnsupportedDataset` if either name is outside MNIST, Fashion, KMNIST,
/// SVHN, CIFAR10 and CIFAR100.
pub fn cross_load_dataset(
    source: &str,
    target: &str,
    config: &LoaderConfig,
) -> Result<(ImageLoader, ImageLoader), OodError> {
    let source_family = DatasetFamily::parse_for(source, CROSS_FAMILIES, "cross_load_dataset")?;
    let target_family = DatasetFamily::parse_for(target, CROSS_FAMILIES, "cross_load_dataset")?;
    let transform = ImageTransform::new(family_normalization(source_family)?);

    let source_set = sources::load_test_split(source_family, &config.data_dir, transform.clone())?;
    let target_set = sources::load_test_split(target_family, &config.data_dir, transform)?;
    let target_set = subsample(target_set, config)?;
    info!(
        "cross_load_dataset: {} ({} items) against {} ({} items)",
        source_family,
        source_set.len(),
        target_family,
        target_set.len()
    );
    Ok((build_loader(source_set, config)?, build_loader(target_set, config)?))
}
