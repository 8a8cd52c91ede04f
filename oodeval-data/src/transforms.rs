// oodeval-data/src/transforms.rs
//! Image preprocessing pipelines.
//!
//! A pipeline runs its geometric steps on the decoded image, converts the
//! result to a `[C, H, W]` tensor in `[0, 1]`, then normalizes each channel.
//! Pixel work is delegated to `image` and `imageproc`.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Luma, Rgb};
use imageproc::geometric_transformations::{self, Interpolation};
use oodeval_core::tensor::create::from_hwc_u8;
use oodeval_core::{OodError, Tensor};

/// A geometric step applied before tensor conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometric {
    /// Fixed-angle rotation about the image center, bilinear, same canvas
    /// size, black fill. Positive angles turn counter-clockwise. Half turns,
    /// and quarter turns of square images, move pixels exactly.
    Rotate { degrees: f32 },
    /// Scales the shorter side to `size`, keeping the aspect ratio.
    Resize { size: u32 },
    /// Keeps the centered `size x size` window.
    CenterCrop { size: u32 },
}

impl Geometric {
    pub fn apply(&self, image: DynamicImage) -> Result<DynamicImage, OodError> {
        match *self {
            Geometric::Rotate { degrees } => Ok(rotate(image, degrees)),
            Geometric::Resize { size } => {
                let (w, h) = image.dimensions();
                if size == 0 || w == 0 || h == 0 {
                    return Err(OodError::InvalidArgument(format!(
                        "cannot resize a {}x{} image to shorter side {}",
                        w, h, size
                    )));
                }
                let (nw, nh) = if w <= h {
                    (size, (u64::from(size) * u64::from(h) / u64::from(w)) as u32)
                } else {
                    ((u64::from(size) * u64::from(w) / u64::from(h)) as u32, size)
                };
                Ok(image.resize_exact(nw, nh, FilterType::Triangle))
            }
            Geometric::CenterCrop { size } => {
                let (w, h) = image.dimensions();
                if size > w || size > h {
                    return Err(OodError::InvalidArgument(format!(
                        "center crop {} is larger than the {}x{} image",
                        size, w, h
                    )));
                }
                let left = ((w - size) as f32 / 2.0).round() as u32;
                let top = ((h - size) as f32 / 2.0).round() as u32;
                Ok(image.crop_imm(left, top, size, size))
            }
        }
    }
}

fn rotate(image: DynamicImage, degrees: f32) -> DynamicImage {
    let (w, h) = image.dimensions();
    let turns = degrees / 90.0;
    if (turns - turns.round()).abs() < 1e-6 {
        // Exact multiples of 90 degrees are pixel permutations.
        match (turns.round() as i64).rem_euclid(4) {
            0 => return image,
            2 => return image.rotate180(),
            1 if w == h => return image.rotate270(),
            3 if w == h => return image.rotate90(),
            _ => {}
        }
    }
    // Pixel centers sit on integer coordinates, so the middle is ((w-1)/2, (h-1)/2).
    let center = ((w as f32 - 1.0) / 2.0, (h as f32 - 1.0) / 2.0);
    // imageproc turns clockwise for positive theta.
    let theta = -degrees.to_radians();
    match image {
        DynamicImage::ImageLuma8(gray) => DynamicImage::ImageLuma8(geometric_transformations::rotate(
            &gray,
            center,
            theta,
            Interpolation::Bilinear,
            Luma([0u8]),
        )),
        other => DynamicImage::ImageRgb8(geometric_transformations::rotate(
            &other.to_rgb8(),
            center,
            theta,
            Interpolation::Bilinear,
            Rgb([0u8, 0, 0]),
        )),
    }
}

/// Per-channel `(x - mean) / std`.
///
/// Statistics of length 1 apply to every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Normalize {
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Normalize { mean, std }
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }

    /// Normalizes a `[C, H, W]` tensor.
    ///
    /// # Errors
    ///
    /// Returns `OodError::ShapeMismatch` if the tensor is not rank 3 or the
    /// statistics neither have length 1 nor match the channel count.
    pub fn apply(&self, tensor: &Tensor) -> Result<Tensor, OodError> {
        let shape = tensor.shape();
        let mismatch = |expected: String| OodError::ShapeMismatch {
            expected,
            actual: format!(
                "tensor {:?} with {} mean / {} std values",
                shape,
                self.mean.len(),
                self.std.len()
            ),
            operation: "Normalize::apply".to_string(),
        };
        if shape.len() != 3 {
            return Err(mismatch("[C, H, W] image".to_string()));
        }
        let channels = shape[0];
        let fits = |n: usize| n == 1 || n == channels;
        if self.mean.len() != self.std.len() || !fits(self.mean.len()) {
            return Err(mismatch(format!("1 or {} statistics", channels)));
        }

        let plane = shape[1] * shape[2];
        let mut data = tensor.get_f32_data()?;
        if plane > 0 {
            for (c, chunk) in data.chunks_exact_mut(plane).enumerate() {
                let k = if self.mean.len() == 1 { 0 } else { c };
                let (m, s) = (self.mean[k], self.std[k]);
                chunk.iter_mut().for_each(|x| *x = (*x - m) / s);
            }
        }
        Tensor::new(data, shape)
    }
}

/// Geometric steps, tensor conversion, then normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTransform {
    steps: Vec<Geometric>,
    normalize: Normalize,
}

impl ImageTransform {
    pub fn new(normalize: Normalize) -> Self {
        ImageTransform {
            steps: Vec::new(),
            normalize,
        }
    }

    /// Appends a geometric step.
    pub fn then(mut self, step: Geometric) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Geometric] {
        &self.steps
    }

    pub fn normalize(&self) -> &Normalize {
        &self.normalize
    }

    /// Runs the pipeline and returns a normalized `[C, H, W]` tensor.
    ///
    /// Grayscale images keep one channel; everything else becomes RGB.
    pub fn apply(&self, image: DynamicImage) -> Result<Tensor, OodError> {
        let mut image = image;
        for step in &self.steps {
            image = step.apply(image)?;
        }
        let tensor = to_tensor(&image)?;
        self.normalize.apply(&tensor)
    }
}

/// `u8` pixels to a `[C, H, W]` tensor scaled to `[0, 1]`.
pub fn to_tensor(image: &DynamicImage) -> Result<Tensor, OodError> {
    match image {
        DynamicImage::ImageLuma8(gray) => from_hwc_u8(
            gray.as_raw(),
            gray.height() as usize,
            gray.width() as usize,
            1,
        ),
        other => {
            let rgb = other.to_rgb8();
            from_hwc_u8(rgb.as_raw(), rgb.height() as usize, rgb.width() as usize, 3)
        }
    }
}

#[cfg(test)]
#[path = "transforms_test.rs"]
mod tests;
