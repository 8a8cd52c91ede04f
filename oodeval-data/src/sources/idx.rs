// oodeval-data/src/sources/idx.rs
//! Readers for the big-endian idx files of the MNIST family
//! (MNIST, FashionMNIST, KMNIST).

use log::debug;
use ndarray::Array3;
use oodeval_core::OodError;
use std::fs;
use std::path::Path;

pub const IMAGES_MAGIC: u32 = 2051;
pub const LABELS_MAGIC: u32 = 2049;

pub const TEST_IMAGES_FILE: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS_FILE: &str = "t10k-labels-idx1-ubyte";

struct IdxReader<'a> {
    path: &'a Path,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> IdxReader<'a> {
    fn new(path: &'a Path, bytes: &'a [u8]) -> Self {
        IdxReader { path, bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], OodError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(OodError::decode(
                self.path,
                format!(
                    "truncated idx file: need {} bytes at offset {}, file has {}",
                    n,
                    self.pos,
                    self.bytes.len()
                ),
            ));
        };
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, OodError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn check_magic_number(&mut self, expected: u32) -> Result<(), OodError> {
        let magic_number = self.read_u32()?;
        if magic_number != expected {
            return Err(OodError::decode(
                self.path,
                format!("incorrect magic number {} != {}", magic_number, expected),
            ));
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, OodError> {
    fs::read(path).map_err(|e| OodError::io(path, e))
}

/// Reads an idx3 image file into `[N, rows, cols]` pixels.
pub fn read_images(path: &Path) -> Result<Array3<u8>, OodError> {
    let bytes = read_file(path)?;
    let mut reader = IdxReader::new(path, &bytes);
    reader.check_magic_number(IMAGES_MAGIC)?;
    let samples = reader.read_u32()? as usize;
    let rows = reader.read_u32()? as usize;
    let cols = reader.read_u32()? as usize;
    let len = samples
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| OodError::decode(path, "idx image dimensions overflow"))?;
    let data = reader.take(len)?.to_vec();
    debug!("idx: {} images of {}x{} from {:?}", samples, rows, cols, path);
    Array3::from_shape_vec((samples, rows, cols), data).map_err(|e| OodError::decode(path, e))
}

/// Reads an idx1 label file.
pub fn read_labels(path: &Path) -> Result<Vec<i64>, OodError> {
    let bytes = read_file(path)?;
    let mut reader = IdxReader::new(path, &bytes);
    reader.check_magic_number(LABELS_MAGIC)?;
    let samples = reader.read_u32()? as usize;
    Ok(reader.take(samples)?.iter().map(|&l| i64::from(l)).collect())
}

/// Reads the test split stored under `dir`.
pub fn read_test_split(dir: &Path) -> Result<(Array3<u8>, Vec<i64>), OodError> {
    let images = read_images(&dir.join(TEST_IMAGES_FILE))?;
    let labels = read_labels(&dir.join(TEST_LABELS_FILE))?;
    Ok((images, labels))
}

/// Encodes images and labels in the idx layout. Used to build fixtures.
pub fn encode_images(images: &Array3<u8>) -> Vec<u8> {
    let (n, rows, cols) = images.dim();
    let mut out = Vec::with_capacity(16 + images.len());
    for v in [IMAGES_MAGIC, n as u32, rows as u32, cols as u32] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend(images.iter().copied());
    out
}

pub fn encode_labels(labels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + labels.len());
    out.extend_from_slice(&LABELS_MAGIC.to_be_bytes());
    out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    out.extend_from_slice(labels);
    out
}
