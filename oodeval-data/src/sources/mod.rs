// oodeval-data/src/sources/mod.rs
//! Locates and reads the on-disk layout of each [`DatasetFamily`] under a
//! data directory.

pub mod cifar;
pub mod idx;
pub mod npy;

use crate::datasets::{ArrayDataset, EvalDataset, ImageFolder};
use crate::family::DatasetFamily;
use crate::transforms::ImageTransform;
use cifar::CifarLayout;
use log::debug;
use oodeval_core::OodError;
use std::path::{Path, PathBuf};

const TEST_SPLIT_FAMILIES: &[DatasetFamily] = &[
    DatasetFamily::Mnist,
    DatasetFamily::Fashion,
    DatasetFamily::Kmnist,
    DatasetFamily::Svhn,
    DatasetFamily::Cifar10,
    DatasetFamily::Cifar100,
];

/// SVHN stores the digit 0 as class 10.
const SVHN_ZERO_LABEL: i64 = 10;

/// Directory holding the idx files of an MNIST-family dataset.
pub fn idx_dir(data_dir: &Path, family: DatasetFamily) -> Option<PathBuf> {
    let name = match family {
        DatasetFamily::Mnist => "MNIST",
        DatasetFamily::Fashion => "FashionMNIST",
        DatasetFamily::Kmnist => "KMNIST",
        _ => return None,
    };
    Some(data_dir.join(name).join("raw"))
}

/// `(images, labels)` paths of a corrupted CIFAR benchmark at `severity`.
pub fn corrupted_array_paths(
    data_dir: &Path,
    family: DatasetFamily,
    severity: u32,
) -> Option<(PathBuf, PathBuf)> {
    let (dir, stem) = match family {
        DatasetFamily::Cifar10 => ("CIFAR-10-C", "CIFAR10_c"),
        DatasetFamily::Cifar100 => ("CIFAR-100-C", "CIFAR100_c"),
        _ => return None,
    };
    let dir = data_dir.join(dir);
    Some((
        dir.join(format!("{}{}.npy", stem, severity)),
        dir.join(format!("{}_labels.npy", stem)),
    ))
}

/// Root of the ImageNet-C image folder at `severity`.
pub fn imagenet_c_dir(data_dir: &Path, severity: u32) -> PathBuf {
    data_dir.join("imagenet-c").join(severity.to_string())
}

/// Reads the test split of `family`.
///
/// # Errors
///
/// `UnsupportedDataset` for families without a test split reader, plus
/// whatever the reader raises (`Io`, `Decode`, `ShapeMismatch`).
pub fn load_test_split(
    family: DatasetFamily,
    data_dir: &Path,
    transform: ImageTransform,
) -> Result<EvalDataset, OodError> {
    debug!("load_test_split: {} under {:?}", family, data_dir);
    let dataset = match family {
        DatasetFamily::Mnist | DatasetFamily::Fashion | DatasetFamily::Kmnist => {
            let dir = idx_dir(data_dir, family).ok_or_else(|| unsupported(family))?;
            let (images, labels) = idx::read_test_split(&dir)?;
            ArrayDataset::from_grayscale(images, labels, transform)?
        }
        DatasetFamily::Svhn => {
            let dir = data_dir.join("SVHN");
            let images = npy::read_images(&dir.join("test_32x32_images.npy"))?;
            let labels = npy::read_labels(&dir.join("test_32x32_labels.npy"))?
                .into_iter()
                .map(|l| if l == SVHN_ZERO_LABEL { 0 } else { l })
                .collect();
            ArrayDataset::new(images, labels, transform)?
        }
        DatasetFamily::Cifar10 => {
            let (images, labels) =
                cifar::read_file(&data_dir.join(cifar::CIFAR10_TEST_FILE), CifarLayout::Cifar10)?;
            ArrayDataset::new(images, labels, transform)?
        }
        DatasetFamily::Cifar100 => {
            let (images, labels) =
                cifar::read_file(&data_dir.join(cifar::CIFAR100_TEST_FILE), CifarLayout::Cifar100)?;
            ArrayDataset::new(images, labels, transform)?
        }
        DatasetFamily::SmallImagenet | DatasetFamily::Imagenet => return Err(unsupported(family)),
    };
    Ok(dataset.into())
}

/// Reads the corrupted benchmark of `family` at `severity`.
pub fn load_corrupted_split(
    family: DatasetFamily,
    severity: u32,
    data_dir: &Path,
    transform: ImageTransform,
) -> Result<EvalDataset, OodError> {
    debug!("load_corrupted_split: {} severity {} under {:?}", family, severity, data_dir);
    if family == DatasetFamily::Imagenet {
        let folder = ImageFolder::new(imagenet_c_dir(data_dir, severity), transform)?;
        return Ok(folder.into());
    }
    let (images_path, labels_path) = corrupted_array_paths(data_dir, family, severity).ok_or_else(|| {
        OodError::UnsupportedDataset {
            name: family.name().to_string(),
            loader: "load_corrupted_split",
            allowed: crate::family::CORRUPTED_FAMILIES.iter().map(|f| f.name()).collect(),
        }
    })?;
    let images = npy::read_images(&images_path)?;
    let labels = npy::read_labels(&labels_path)?;
    Ok(ArrayDataset::new(images, labels, transform)?.into())
}

fn unsupported(family: DatasetFamily) -> OodError {
    OodError::UnsupportedDataset {
        name: family.name().to_string(),
        loader: "load_test_split",
        allowed: TEST_SPLIT_FAMILIES.iter().map(|f| f.name()).collect(),
    }
}
