use crate::error::OodError;
use crate::tensor::Tensor;

/// Clamp floor for probabilities before taking the logarithm.
pub const DEFAULT_ENTROPY_EPS: f32 = 1e-35;

/// Predictive entropy of each row of a `[N, C]` class-probability tensor.
///
/// `H_i = -sum_c p_ic * ln(max(p_ic, eps))`, returned as a `[N]` tensor.
///
/// # Errors
///
/// Returns `OodError::ShapeMismatch` if `probs` is not rank 2.
pub fn predictive_entropy(probs: &Tensor, eps: f32) -> Result<Tensor, OodError> {
    let shape = probs.shape();
    if shape.len() != 2 {
        return Err(OodError::ShapeMismatch {
            expected: "[N, C] probabilities".to_string(),
            actual: format!("{:?}", shape),
            operation: "predictive_entropy".to_string(),
        });
    }
    let (rows, classes) = (shape[0], shape[1]);
    let entropy: Vec<f32> = if classes == 0 {
        vec![0.0; rows]
    } else {
        probs
            .as_slice()
            .chunks_exact(classes)
            .map(|row| -row.iter().map(|&p| p * p.max(eps).ln()).sum::<f32>())
            .collect()
    };
    Tensor::new(entropy, vec![rows])
}

#[cfg(test)]
#[path = "entropy_test.rs"]
mod tests;
