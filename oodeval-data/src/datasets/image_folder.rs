// oodeval-data/src/datasets/image_folder.rs

use super::traits::{Dataset, Subsettable};
use crate::transforms::ImageTransform;
use log::debug;
use oodeval_core::{OodError, Tensor};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions picked up when scanning class folders (lower-case).
pub const IMG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "ppm", "bmp", "pgm", "tif", "tiff", "webp"];

/// A dataset laid out as `root/<class>/<image file>`.
///
/// Class folders are indexed in name order; files are sorted inside each
/// class. Images stay on disk until [`Dataset::get`] decodes them.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    root: PathBuf,
    classes: Vec<String>,
    samples: Vec<(PathBuf, i64)>,
    transform: ImageTransform,
}

impl ImageFolder {
    /// Scans `root` and builds the sample list.
    ///
    /// # Errors
    ///
    /// `Io` if `root` cannot be read, `EmptyImageFolder` if no class folder
    /// holds a single image.
    pub fn new(root: impl AsRef<Path>, transform: ImageTransform) -> Result<Self, OodError> {
        let root = root.as_ref().to_path_buf();
        let mut class_dirs = Vec::new();
        for entry in fs::read_dir(&root).map_err(|e| OodError::io(&root, e))? {
            let entry = entry.map_err(|e| OodError::io(&root, e))?;
            let path = entry.path();
            if path.is_dir() {
                class_dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
            }
        }
        class_dirs.sort();

        let mut classes = Vec::with_capacity(class_dirs.len());
        let mut samples = Vec::new();
        for (class_index, (name, dir)) in class_dirs.into_iter().enumerate() {
            let mut files = Vec::new();
            for entry in fs::read_dir(&dir).map_err(|e| OodError::io(&dir, e))? {
                let path = entry.map_err(|e| OodError::io(&dir, e))?.path();
                if path.is_file() && has_image_extension(&path) {
                    files.push(path);
                }
            }
            files.sort();
            samples.extend(files.into_iter().map(|p| (p, class_index as i64)));
            classes.push(name);
        }

        if samples.is_empty() {
            return Err(OodError::EmptyImageFolder { path: root });
        }
        debug!(
            "ImageFolder: {} images in {} classes under {:?}",
            samples.len(),
            classes.len(),
            root
        );
        Ok(ImageFolder {
            root,
            classes,
            samples,
            transform,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Class names, position = label.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn samples(&self) -> &[(PathBuf, i64)] {
        &self.samples
    }

    pub fn targets(&self) -> Vec<i64> {
        self.samples.iter().map(|(_, t)| *t).collect()
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMG_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl Dataset for ImageFolder {
    type Item = (Tensor, i64);

    /// Decodes the image at `index` as RGB and runs the transform.
    fn get(&self, index: usize) -> Result<Self::Item, OodError> {
        let (path, target) = self.samples.get(index).ok_or_else(|| OodError::IndexOutOfBounds {
            index: vec![index],
            shape: vec![self.samples.len()],
        })?;
        let image = image::open(path).map_err(|e| OodError::decode(path, e))?;
        let image = image::DynamicImage::ImageRgb8(image.to_rgb8());
        Ok((self.transform.apply(image)?, *target))
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl Subsettable for ImageFolder {
    fn subset(&self, indices: &[usize]) -> Result<Self, OodError> {
        let samples = indices
            .iter()
            .map(|&i| {
                self.samples.get(i).cloned().ok_or_else(|| OodError::IndexOutOfBounds {
                    index: vec![i],
                    shape: vec![self.samples.len()],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ImageFolder {
            root: self.root.clone(),
            classes: self.classes.clone(),
            samples,
            transform: self.transform.clone(),
        })
    }
}

#[cfg(test)]
#[path = "image_folder_test.rs"]
mod tests;
