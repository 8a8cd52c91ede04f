use crate::error::OodError;
use crate::tensor::Tensor;

/// Stacks a sequence of tensors along a new dimension.
///
/// All input tensors must have the same shape.
///
/// # Arguments
/// * `tensors` - A slice of tensors to stack.
/// * `dim` - The dimension along which to stack. The new dimension will be inserted here.
///
/// # Errors
/// `EmptyTensorList` for an empty slice, `IndexOutOfBounds` when `dim` exceeds
/// the input rank, `ShapeMismatch` when the inputs disagree on shape.
pub fn stack_op(tensors: &[Tensor], dim: usize) -> Result<Tensor, OodError> {
    let first = tensors.first().ok_or(OodError::EmptyTensorList)?;
    let first_shape = first.shape();
    let rank = first_shape.len();

    if dim > rank {
        return Err(OodError::IndexOutOfBounds {
            index: vec![dim],
            shape: vec![rank + 1],
        });
    }

    for (i, tensor) in tensors.iter().enumerate().skip(1) {
        if tensor.shape() != first_shape {
            return Err(OodError::ShapeMismatch {
                expected: format!("{:?}", first_shape),
                actual: format!("{:?} for tensor at index {}", tensor.shape(), i),
                operation: "stack_op".to_string(),
            });
        }
    }

    let outer: usize = first_shape[..dim].iter().product();
    let inner: usize = first_shape[dim..].iter().product();

    let mut output_data = Vec::with_capacity(outer * inner * tensors.len());
    for o in 0..outer {
        for tensor in tensors {
            output_data.extend_from_slice(&tensor.as_slice()[o * inner..(o + 1) * inner]);
        }
    }

    let mut output_shape = first_shape;
    output_shape.insert(dim, tensors.len());
    Tensor::new(output_data, output_shape)
}

/// Concatenates tensors along their first dimension.
///
/// Every input must have rank >= 1 and identical trailing dimensions.
pub fn cat_op(tensors: &[Tensor]) -> Result<Tensor, OodError> {
    let first = tensors.first().ok_or(OodError::EmptyTensorList)?;
    let first_shape = first.shape();
    let Some((_, trailing)) = first_shape.split_first() else {
        return Err(OodError::ShapeMismatch {
            expected: "rank >= 1".to_string(),
            actual: "scalar".to_string(),
            operation: "cat_op".to_string(),
        });
    };

    let mut rows = 0;
    let mut output_data = Vec::new();
    for (i, tensor) in tensors.iter().enumerate() {
        let shape = tensor.shape();
        if shape.is_empty() || &shape[1..] != trailing {
            return Err(OodError::ShapeMismatch {
                expected: format!("[_, {:?}]", trailing),
                actual: format!("{:?} for tensor at index {}", shape, i),
                operation: "cat_op".to_string(),
            });
        }
        rows += shape[0];
        output_data.extend_from_slice(tensor.as_slice());
    }

    let mut output_shape = vec![rows];
    output_shape.extend_from_slice(trailing);
    Tensor::new(output_data, output_shape)
}

#[cfg(test)]
#[path = "stack_test.rs"]
mod tests;
