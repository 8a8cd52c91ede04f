use super::*;
use crate::tensor::from_vec_f32;

fn create_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    from_vec_f32(data, shape).expect("Test tensor creation failed")
}

#[test]
fn test_stack_basic() {
    let t1 = create_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_tensor(vec![3.0, 4.0], vec![2]);

    let res0 = stack_op(&[t1.clone(), t2.clone()], 0).unwrap();
    assert_eq!(res0.shape(), vec![2, 2]);
    assert_eq!(res0.get_f32_data().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);

    let res1 = stack_op(&[t1, t2], 1).unwrap();
    assert_eq!(res1.shape(), vec![2, 2]);
    assert_eq!(res1.get_f32_data().unwrap(), vec![1.0, 3.0, 2.0, 4.0]);
}

#[test]
fn test_stack_images_into_batch() {
    let a = create_tensor(vec![0.0; 12], vec![3, 2, 2]);
    let b = create_tensor(vec![1.0; 12], vec![3, 2, 2]);
    let batch = stack_op(&[a, b], 0).unwrap();
    assert_eq!(batch.shape(), vec![2, 3, 2, 2]);
    assert!(batch.as_slice()[..12].iter().all(|&x| x == 0.0));
    assert!(batch.as_slice()[12..].iter().all(|&x| x == 1.0));
}

#[test]
fn test_stack_empty_list() {
    assert!(matches!(stack_op(&[], 0), Err(OodError::EmptyTensorList)));
}

#[test]
fn test_stack_shape_mismatch() {
    let t1 = create_tensor(vec![1.0, 2.0], vec![2]);
    let t2 = create_tensor(vec![3.0, 4.0, 5.0], vec![3]);
    match stack_op(&[t1, t2], 0) {
        Err(OodError::ShapeMismatch { operation, .. }) => assert_eq!(operation, "stack_op"),
        other => panic!("Expected ShapeMismatch, got {:?}", other),
    }
}

#[test]
fn test_stack_dim_out_of_range() {
    let t1 = create_tensor(vec![1.0, 2.0], vec![2]);
    assert!(matches!(stack_op(&[t1], 2), Err(OodError::IndexOutOfBounds { .. })));
}

#[test]
fn test_cat_rows() {
    let t1 = create_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let t2 = create_tensor(vec![5.0, 6.0], vec![1, 2]);
    let res = cat_op(&[t1, t2]).unwrap();
    assert_eq!(res.shape(), vec![3, 2]);
    assert_eq!(res.get_f32_data().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_cat_trailing_mismatch() {
    let t1 = create_tensor(vec![1.0, 2.0], vec![1, 2]);
    let t2 = create_tensor(vec![1.0, 2.0, 3.0], vec![1, 3]);
    assert!(matches!(cat_op(&[t1, t2]), Err(OodError::ShapeMismatch { .. })));
}
