// oodeval-data/src/evaluation.rs
//! Runs a classifier over OOD loaders and collects per-item scores.
//!
//! The classifier is any `FnMut(&Tensor) -> Result<Tensor, OodError>` that
//! maps a `[B, C, H, W]` image batch to `[B, K]` class probabilities.

use crate::collate::ImageBatch;
use crate::config::LoaderConfig;
use crate::loaders::rotate_load_dataset;
use log::debug;
use oodeval_core::metrics::{predictive_entropy, DEFAULT_ENTROPY_EPS};
use oodeval_core::ops::cat_op;
use oodeval_core::{OodError, Tensor};

fn check_batch(probs: &Tensor, batch: &ImageBatch) -> Result<(), OodError> {
    let shape = probs.shape();
    if shape.len() != 2 || shape[0] != batch.len() {
        return Err(OodError::ShapeMismatch {
            expected: format!("[{}, C] probabilities", batch.len()),
            actual: format!("{:?}", shape),
            operation: "predict".to_string(),
        });
    }
    Ok(())
}

/// Predictive entropy of every item the loader yields, in loader order.
pub fn evaluate_predictive_entropy<L, F>(
    loader: L,
    mut predict: F,
    eps: f32,
) -> Result<Vec<f32>, OodError>
where
    L: IntoIterator<Item = Result<ImageBatch, OodError>>,
    F: FnMut(&Tensor) -> Result<Tensor, OodError>,
{
    let mut entropies = Vec::new();
    for batch in loader {
        let batch = batch?;
        let probs = predict(&batch.images)?;
        check_batch(&probs, &batch)?;
        entropies.extend_from_slice(predictive_entropy(&probs, eps)?.as_slice());
    }
    Ok(entropies)
}

/// Concatenated `[N, K]` probabilities and the matching labels.
///
/// # Errors
///
/// `EmptyInput` if the loader yields no batch.
pub fn predictions_and_targets<L, F>(loader: L, mut predict: F) -> Result<(Tensor, Vec<i64>), OodError>
where
    L: IntoIterator<Item = Result<ImageBatch, OodError>>,
    F: FnMut(&Tensor) -> Result<Tensor, OodError>,
{
    let mut predictions = Vec::new();
    let mut targets = Vec::new();
    for batch in loader {
        let batch = batch?;
        let probs = predict(&batch.images)?;
        check_batch(&probs, &batch)?;
        predictions.push(probs);
        targets.extend(batch.labels);
    }
    if predictions.is_empty() {
        return Err(OodError::EmptyInput("loader yielded no batches".to_string()));
    }
    Ok((cat_op(&predictions)?, targets))
}

/// `0, step, 2 * step, ...` up to and including `stop_angle`.
///
/// The grid never passes `stop_angle`. A NumPy `arange(0, stop + 5, step)`
/// grid can: for `stop = 10, step = 3` it also yields 12, which this does not.
///
/// # Errors
///
/// `InvalidArgument` unless `step > 0` and `stop_angle >= 0`, both finite.
pub fn rotation_angles(stop_angle: f32, step: f32) -> Result<Vec<f32>, OodError> {
    if !(step.is_finite() && step > 0.0) || !(stop_angle.is_finite() && stop_angle >= 0.0) {
        return Err(OodError::InvalidArgument(format!(
            "cannot sweep angles to {} with step {}",
            stop_angle, step
        )));
    }
    let count = (stop_angle / step + 1e-4).floor() as usize + 1;
    Ok((0..count).map(|k| k as f32 * step).collect())
}

/// Entropies of the rotated test split of `name` at each angle of
/// [`rotation_angles`].
///
/// Returns the angles and one entropy vector per angle.
pub fn angle_entropy_sweep<F>(
    name: &str,
    config: &LoaderConfig,
    stop_angle: f32,
    step: f32,
    mut predict: F,
) -> Result<(Vec<f32>, Vec<Vec<f32>>), OodError>
where
    F: FnMut(&Tensor) -> Result<Tensor, OodError>,
{
    let angles = rotation_angles(stop_angle, step)?;
    let mut per_angle = Vec::with_capacity(angles.len());
    for &angle in &angles {
        let loader = rotate_load_dataset(name, angle, config)?;
        let entropies = evaluate_predictive_entropy(loader, &mut predict, DEFAULT_ENTROPY_EPS)?;
        debug!(
            "angle_entropy_sweep: {} at {} degrees, {} items",
            name,
            angle,
            entropies.len()
        );
        per_angle.push(entropies);
    }
    Ok((angles, per_angle))
}
