// Writes a miniature data directory with the on-disk layouts the loaders read.
#![allow(dead_code)]

use image::{Rgb, RgbImage};
use ndarray::{Array1, Array3, Array4};
use ndarray_npy::write_npy;
use oodeval_data::sources::cifar::{self, CifarLayout};
use oodeval_data::sources::idx;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MNIST_COUNT: usize = 12;
pub const CIFAR_COUNT: usize = 10;
pub const CIFAR_C_COUNT: usize = 20;
pub const IMAGENET_C_PER_CLASS: usize = 2;

// Label of item i in every array fixture.
pub fn label_of(i: usize) -> i64 {
    (i % 10) as i64
}

// Image i is a horizontal bar at row i % 8 on a 28x28 canvas.
fn write_idx(dir: &Path, count: usize) {
    fs::create_dir_all(dir).expect("create idx dir");
    let images = Array3::from_shape_fn((count, 28, 28), |(i, y, _)| if y == i % 8 + 10 { 255 } else { 0 });
    let labels: Vec<u8> = (0..count).map(|i| label_of(i) as u8).collect();
    fs::write(dir.join(idx::TEST_IMAGES_FILE), idx::encode_images(&images)).expect("write images");
    fs::write(dir.join(idx::TEST_LABELS_FILE), idx::encode_labels(&labels)).expect("write labels");
}

fn color_images(count: usize) -> Array4<u8> {
    Array4::from_shape_fn((count, 32, 32, 3), |(i, y, x, c)| ((i * 11 + y * 3 + x + c * 40) % 256) as u8)
}

fn write_cifar10(data_dir: &Path) {
    let path = data_dir.join(cifar::CIFAR10_TEST_FILE);
    fs::create_dir_all(path.parent().expect("parent")).expect("create cifar dir");
    let labels: Vec<u8> = (0..CIFAR_COUNT).map(|i| label_of(i) as u8).collect();
    fs::write(&path, cifar::encode_records(&color_images(CIFAR_COUNT), &labels, CifarLayout::Cifar10))
        .expect("write cifar");
}

fn write_cifar10_c(data_dir: &Path, severities: &[u32]) {
    let dir = data_dir.join("CIFAR-10-C");
    fs::create_dir_all(&dir).expect("create CIFAR-10-C");
    for &severity in severities {
        write_npy(dir.join(format!("CIFAR10_c{}.npy", severity)), &color_images(CIFAR_C_COUNT))
            .expect("write corrupted images");
    }
    let labels = Array1::from_shape_fn(CIFAR_C_COUNT, label_of);
    write_npy(dir.join("CIFAR10_c_labels.npy"), &labels).expect("write corrupted labels");
}

fn write_imagenet_c(data_dir: &Path, severity: u32) {
    for class in ["n01", "n02"] {
        let dir = data_dir.join("imagenet-c").join(severity.to_string()).join(class);
        fs::create_dir_all(&dir).expect("create imagenet-c class");
        for k in 0..IMAGENET_C_PER_CLASS {
            RgbImage::from_pixel(300, 260, Rgb([120, 60, k as u8 * 30]))
                .save(dir.join(format!("{}.png", k)))
                .expect("write imagenet-c image");
        }
    }
}

/// MNIST, FashionMNIST, CIFAR10, CIFAR-10-C (severities 1 and 3) and
/// ImageNet-C severity 2.
pub fn create_data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    write_idx(&dir.path().join("MNIST").join("raw"), MNIST_COUNT);
    write_idx(&dir.path().join("FashionMNIST").join("raw"), MNIST_COUNT);
    write_cifar10(dir.path());
    write_cifar10_c(dir.path(), &[1, 3]);
    write_imagenet_c(dir.path(), 2);
    dir
}
