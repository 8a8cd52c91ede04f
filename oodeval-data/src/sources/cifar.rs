// oodeval-data/src/sources/cifar.rs
//! The binary releases of CIFAR-10 and CIFAR-100.
//!
//! Each record is the label byte(s) followed by 3072 pixel bytes stored
//! channel-major (`[3, 32, 32]`). Records are converted to `[N, 32, 32, 3]`.

use log::debug;
use ndarray::Array4;
use oodeval_core::OodError;
use std::fs;
use std::path::Path;

const W: usize = 32;
const H: usize = 32;
const C: usize = 3;
const PIXELS_PER_IMAGE: usize = W * H * C;

pub const CIFAR10_TEST_FILE: &str = "cifar-10-batches-bin/test_batch.bin";
pub const CIFAR100_TEST_FILE: &str = "cifar-100-binary/test.bin";

/// Which header byte carries the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CifarLayout {
    /// One label byte per record.
    Cifar10,
    /// Coarse then fine label byte; the fine label is kept.
    Cifar100,
}

impl CifarLayout {
    fn label_bytes(self) -> usize {
        match self {
            CifarLayout::Cifar10 => 1,
            CifarLayout::Cifar100 => 2,
        }
    }

    fn record_len(self) -> usize {
        self.label_bytes() + PIXELS_PER_IMAGE
    }
}

/// Reads every record of a CIFAR binary file.
///
/// # Errors
///
/// `Io` if the file cannot be read, `Decode` if its length is not a whole
/// number of records.
pub fn read_file(path: &Path, layout: CifarLayout) -> Result<(Array4<u8>, Vec<i64>), OodError> {
    let content = fs::read(path).map_err(|e| OodError::io(path, e))?;
    let record_len = layout.record_len();
    if content.len() % record_len != 0 {
        return Err(OodError::decode(
            path,
            format!(
                "file length {} is not a multiple of the {}-byte record",
                content.len(),
                record_len
            ),
        ));
    }
    let samples = content.len() / record_len;
    let mut labels = Vec::with_capacity(samples);
    let mut images = Array4::<u8>::zeros((samples, H, W, C));
    for (index, record) in content.chunks_exact(record_len).enumerate() {
        let (header, pixels) = record.split_at(layout.label_bytes());
        labels.push(i64::from(header[header.len() - 1]));
        for c in 0..C {
            let plane = &pixels[c * H * W..(c + 1) * H * W];
            for (offset, &value) in plane.iter().enumerate() {
                images[[index, offset / W, offset % W, c]] = value;
            }
        }
    }
    debug!("cifar: {} records from {:?}", samples, path);
    Ok((images, labels))
}

/// Encodes `[N, 32, 32, 3]` images and labels as binary records. Used to
/// build fixtures.
pub fn encode_records(images: &Array4<u8>, labels: &[u8], layout: CifarLayout) -> Vec<u8> {
    let mut out = Vec::with_capacity(labels.len() * layout.record_len());
    for (index, &label) in labels.iter().enumerate() {
        if layout == CifarLayout::Cifar100 {
            out.push(0); // coarse label
        }
        out.push(label);
        for c in 0..C {
            for y in 0..H {
                for x in 0..W {
                    out.push(images[[index, y, x, c]]);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_images(n: usize) -> Array4<u8> {
        Array4::from_shape_fn((n, H, W, C), |(i, y, x, c)| ((i * 7 + y + 2 * x + 50 * c) % 256) as u8)
    }

    #[test]
    fn test_cifar10_records_are_converted_to_hwc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_batch.bin");
        let images = sample_images(2);
        fs::write(&path, encode_records(&images, &[3, 8], CifarLayout::Cifar10)).unwrap();

        let (read, labels) = read_file(&path, CifarLayout::Cifar10).unwrap();
        assert_eq!(labels, vec![3, 8]);
        assert_eq!(read, images);
    }

    #[test]
    fn test_cifar100_keeps_the_fine_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bin");
        let mut bytes = encode_records(&sample_images(1), &[42], CifarLayout::Cifar100);
        bytes[0] = 7;
        fs::write(&path, bytes).unwrap();

        let (_, labels) = read_file(&path, CifarLayout::Cifar100).unwrap();
        assert_eq!(labels, vec![42]);
    }

    #[test]
    fn test_partial_record_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_batch.bin");
        fs::write(&path, vec![0u8; PIXELS_PER_IMAGE]).unwrap();
        assert!(matches!(
            read_file(&path, CifarLayout::Cifar10),
            Err(OodError::Decode { .. })
        ));
    }
}
