// oodeval-data/src/sources/npy.rs
//! NumPy array files: SVHN and the CIFAR-C corruption benchmarks.

use log::debug;
use ndarray::{Array1, Array4};
use ndarray_npy::{read_npy, ReadNpyError};
use oodeval_core::OodError;
use std::path::Path;

fn npy_error(path: &Path, err: ReadNpyError) -> OodError {
    match err {
        ReadNpyError::Io(e) => OodError::io(path, e),
        other => OodError::decode(path, other),
    }
}

/// Reads a `[N, H, W, C]` `uint8` image array.
pub fn read_images(path: &Path) -> Result<Array4<u8>, OodError> {
    let images: Array4<u8> = read_npy(path).map_err(|e| npy_error(path, e))?;
    debug!("npy: images {:?} from {:?}", images.dim(), path);
    Ok(images)
}

/// Reads a 1-D label array stored as `int64`, `int32` or `uint8`.
pub fn read_labels(path: &Path) -> Result<Vec<i64>, OodError> {
    match read_npy::<_, Array1<i64>>(path) {
        Ok(labels) => return Ok(labels.to_vec()),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(npy_error(path, e)),
    }
    match read_npy::<_, Array1<i32>>(path) {
        Ok(labels) => return Ok(labels.iter().map(|&l| i64::from(l)).collect()),
        Err(ReadNpyError::WrongDescriptor(_)) => {}
        Err(e) => return Err(npy_error(path, e)),
    }
    let labels: Array1<u8> = read_npy(path).map_err(|e| npy_error(path, e))?;
    Ok(labels.iter().map(|&l| i64::from(l)).collect())
}
