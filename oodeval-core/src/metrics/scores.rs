use crate::error::OodError;
use crate::tensor::Tensor;
use num_traits::Float;

/// Anything that can hand over a one-dimensional sequence of scores.
///
/// Implementations copy values out into host `f64`s, so the result never
/// aliases the source.
pub trait ScoreSource {
    /// Returns the scores as an owned `Vec<f64>`.
    fn to_scores(&self) -> Result<Vec<f64>, OodError>;
}

impl<T: Float> ScoreSource for [T] {
    fn to_scores(&self) -> Result<Vec<f64>, OodError> {
        Ok(self.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect())
    }
}

impl<T: Float, const N: usize> ScoreSource for [T; N] {
    fn to_scores(&self) -> Result<Vec<f64>, OodError> {
        self.as_slice().to_scores()
    }
}

impl<T: Float> ScoreSource for Vec<T> {
    fn to_scores(&self) -> Result<Vec<f64>, OodError> {
        self.as_slice().to_scores()
    }
}

impl ScoreSource for Tensor {
    /// Accepts rank-1 tensors only.
    fn to_scores(&self) -> Result<Vec<f64>, OodError> {
        if self.rank() != 1 {
            return Err(OodError::ShapeMismatch {
                expected: "rank-1 score tensor".to_string(),
                actual: format!("shape {:?}", self.shape()),
                operation: "ScoreSource::to_scores".to_string(),
            });
        }
        self.as_slice().to_scores()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::from_vec_f32;

    #[test]
    fn test_slice_and_vec_sources() {
        let v = vec![0.5f32, 0.25];
        assert_eq!(v.to_scores().unwrap(), vec![0.5, 0.25]);
        assert_eq!([1.0f64, 2.0].to_scores().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_tensor_source_requires_rank_one() {
        let t = from_vec_f32(vec![0.1, 0.2, 0.3, 0.4], vec![4]).unwrap();
        assert_eq!(t.to_scores().unwrap().len(), 4);

        let m = from_vec_f32(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2]).unwrap();
        assert!(matches!(m.to_scores(), Err(OodError::ShapeMismatch { .. })));
    }
}
