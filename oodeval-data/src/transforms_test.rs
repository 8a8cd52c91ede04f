// oodeval-data/src/transforms_test.rs

use super::*;
use approx::assert_relative_eq;
use image::{GrayImage, RgbImage};
use oodeval_core::tensor::from_vec_f32;

fn identity() -> Normalize {
    Normalize::new(vec![0.0], vec![1.0])
}

#[test]
fn test_to_tensor_grayscale_keeps_one_channel() {
    let gray = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
    let t = to_tensor(&DynamicImage::ImageLuma8(gray)).unwrap();
    assert_eq!(t.shape(), vec![1, 1, 2]);
    assert_eq!(t.as_slice(), &[0.0, 1.0]);
}

#[test]
fn test_normalize_per_channel() {
    let t = from_vec_f32(vec![0.5, 0.5, 1.0, 1.0], vec![2, 1, 2]).unwrap();
    let norm = Normalize::new(vec![0.5, 0.0], vec![0.25, 2.0]);
    let out = norm.apply(&t).unwrap();
    assert_eq!(out.as_slice(), &[0.0, 0.0, 0.5, 0.5]);
}

#[test]
fn test_normalize_single_statistic_broadcasts() {
    let t = from_vec_f32(vec![0.1307; 3], vec![3, 1, 1]).unwrap();
    let out = Normalize::new(vec![0.1307], vec![0.3081]).apply(&t).unwrap();
    for &v in out.as_slice() {
        assert_relative_eq!(v, 0.0);
    }
}

#[test]
fn test_normalize_rejects_mismatched_statistics() {
    let gray = from_vec_f32(vec![0.5; 4], vec![1, 2, 2]).unwrap();
    let cifar = Normalize::new(vec![0.49, 0.48, 0.44], vec![0.24, 0.24, 0.26]);
    assert!(matches!(cifar.apply(&gray), Err(OodError::ShapeMismatch { .. })));

    let flat = from_vec_f32(vec![0.5; 4], vec![4]).unwrap();
    assert!(identity().apply(&flat).is_err());
}

#[test]
fn test_resize_scales_shorter_side() {
    let wide = DynamicImage::ImageRgb8(RgbImage::new(40, 20));
    let resized = Geometric::Resize { size: 10 }.apply(wide).unwrap();
    assert_eq!(resized.dimensions(), (20, 10));

    let tall = DynamicImage::ImageLuma8(GrayImage::new(30, 60));
    let resized = Geometric::Resize { size: 15 }.apply(tall).unwrap();
    assert_eq!(resized.dimensions(), (15, 30));
}

#[test]
fn test_center_crop_takes_the_middle() {
    let mut gray = GrayImage::new(4, 4);
    gray.put_pixel(1, 1, Luma([9]));
    gray.put_pixel(2, 2, Luma([7]));
    let cropped = Geometric::CenterCrop { size: 2 }
        .apply(DynamicImage::ImageLuma8(gray))
        .unwrap()
        .to_luma8();
    assert_eq!(cropped.dimensions(), (2, 2));
    assert_eq!(cropped.get_pixel(0, 0), &Luma([9]));
    assert_eq!(cropped.get_pixel(1, 1), &Luma([7]));
}

#[test]
fn test_center_crop_larger_than_image_fails() {
    let small = DynamicImage::ImageLuma8(GrayImage::new(3, 3));
    assert!(Geometric::CenterCrop { size: 4 }.apply(small).is_err());
}

#[test]
fn test_rotation_keeps_canvas_and_channels() {
    let gray = GrayImage::from_pixel(7, 5, Luma([255]));
    let rotated = Geometric::Rotate { degrees: 30.0 }
        .apply(DynamicImage::ImageLuma8(gray))
        .unwrap();
    assert_eq!(rotated.dimensions(), (7, 5));
    let rotated = rotated.to_luma8();
    // The interior of a uniform image stays uniform; corners pick up fill.
    assert!(rotated.get_pixel(3, 2)[0] >= 250);
    assert!(rotated.get_pixel(0, 0)[0] < 255);
}

fn gray_with(w: u32, h: u32, pixels: &[(u32, u32, u8)]) -> GrayImage {
    let mut gray = GrayImage::new(w, h);
    for &(x, y, v) in pixels {
        gray.put_pixel(x, y, Luma([v]));
    }
    gray
}

fn rotate_gray(gray: GrayImage, degrees: f32) -> GrayImage {
    Geometric::Rotate { degrees }
        .apply(DynamicImage::ImageLuma8(gray))
        .unwrap()
        .to_luma8()
}

fn bright_pixels(gray: &GrayImage) -> Vec<(u32, u32)> {
    gray.enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 0)
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn test_half_turn_mirrors_both_axes() {
    let rotated = rotate_gray(gray_with(4, 4, &[(0, 0, 200), (1, 1, 100)]), 180.0);
    assert_eq!(rotated.get_pixel(3, 3), &Luma([200]));
    assert_eq!(rotated.get_pixel(2, 2), &Luma([100]));
    assert_eq!(bright_pixels(&rotated).len(), 2);

    // Every pixel of an even, non-square image lands on (w-1-x, h-1-y).
    let ramp = GrayImage::from_fn(6, 4, |x, y| Luma([(1 + x + 6 * y) as u8]));
    let rotated = rotate_gray(ramp.clone(), 180.0);
    for (x, y, p) in ramp.enumerate_pixels() {
        assert_eq!(rotated.get_pixel(5 - x, 3 - y), p);
    }
}

#[test]
fn test_quarter_turn_is_counter_clockwise() {
    // Right of center goes to the top for +90, to the bottom for -90.
    let right_of_center = || gray_with(5, 5, &[(4, 2, 255)]);
    assert_eq!(bright_pixels(&rotate_gray(right_of_center(), 90.0)), vec![(2, 0)]);
    assert_eq!(bright_pixels(&rotate_gray(right_of_center(), -90.0)), vec![(2, 4)]);
    assert_eq!(bright_pixels(&rotate_gray(right_of_center(), 450.0)), vec![(2, 0)]);
    assert_eq!(bright_pixels(&rotate_gray(right_of_center(), 360.0)), vec![(4, 2)]);
}

#[test]
fn test_horizontal_bar_becomes_vertical() {
    let bar = GrayImage::from_fn(10, 10, |_, y| Luma([if y == 3 { 255 } else { 0 }]));
    let rotated = rotate_gray(bar, 90.0);
    for (x, y, p) in rotated.enumerate_pixels() {
        let expected = if x == 3 { 255 } else { 0 };
        assert_eq!(p[0], expected, "pixel ({}, {})", x, y);
    }
}

#[test]
fn test_arbitrary_angle_turns_about_the_pixel_center() {
    // The middle pixel of an odd image is the fixed point of any rotation.
    for degrees in [30.0, 45.0, 135.0] {
        let rotated = rotate_gray(gray_with(5, 5, &[(2, 2, 255)]), degrees);
        assert!(rotated.get_pixel(2, 2)[0] >= 250, "center moved at {} degrees", degrees);
        assert!(rotated.get_pixel(0, 0)[0] == 0);
    }
}

#[test]
fn test_quarter_turn_of_non_square_image_keeps_canvas() {
    let rgb = RgbImage::from_pixel(7, 5, Rgb([255, 255, 255]));
    let rotated = Geometric::Rotate { degrees: 90.0 }
        .apply(DynamicImage::ImageRgb8(rgb))
        .unwrap();
    assert_eq!(rotated.dimensions(), (7, 5));
    assert_eq!(rotated.to_rgb8().get_pixel(3, 2), &Rgb([255, 255, 255]));
}

#[test]
fn test_pipeline_runs_steps_then_normalizes() {
    let transform = ImageTransform::new(Normalize::new(vec![0.5], vec![0.5]))
        .then(Geometric::Resize { size: 4 })
        .then(Geometric::CenterCrop { size: 4 });
    assert_eq!(transform.steps().len(), 2);

    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, Rgb([255, 255, 255])));
    let t = transform.apply(image).unwrap();
    assert_eq!(t.shape(), vec![3, 4, 4]);
    for &v in t.as_slice() {
        assert_relative_eq!(v, 1.0, epsilon = 1e-6);
    }
}
