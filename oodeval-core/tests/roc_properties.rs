use approx::assert_relative_eq;
use oodeval_core::metrics::{compute_roc, predictive_entropy, DEFAULT_ENTROPY_EPS};
use oodeval_core::tensor::from_vec_f32;

mod common;
use common::gaussian_scores;

#[test]
fn test_auc_grows_with_separation() {
    let id = gaussian_scores(500, 0.0, 1.0, 7);
    let mut previous = 0.0;
    for shift in [0.0, 0.5, 1.0, 2.0, 4.0] {
        let ood = gaussian_scores(400, shift, 1.0, 11);
        let auc = compute_roc(&id, &ood).unwrap().auc;
        assert!(auc >= previous, "auc {} dropped below {} at shift {}", auc, previous, shift);
        previous = auc;
    }
    assert!(previous > 0.99);
}

#[test]
fn test_identical_distributions_are_near_chance() {
    let id = gaussian_scores(2000, 0.0, 1.0, 1);
    let ood = gaussian_scores(2000, 0.0, 1.0, 2);
    let auc = compute_roc(&id, &ood).unwrap().auc;
    assert!((auc - 0.5).abs() < 0.05, "auc {} far from chance", auc);
}

#[test]
fn test_swapping_roles_mirrors_auc() {
    let a = gaussian_scores(300, 0.0, 1.0, 3);
    let b = gaussian_scores(200, 0.8, 1.5, 4);
    let forward = compute_roc(&a, &b).unwrap().auc;
    let backward = compute_roc(&b, &a).unwrap().auc;
    assert_relative_eq!(forward + backward, 1.0, epsilon = 1e-9);
}

#[test]
fn test_entropy_scores_feed_the_roc() {
    // Confident ID predictions against near-uniform OOD predictions.
    let id_probs = from_vec_f32(vec![0.98, 0.01, 0.01, 0.95, 0.03, 0.02], vec![2, 3]).unwrap();
    let ood_probs = from_vec_f32(vec![0.34, 0.33, 0.33, 0.4, 0.3, 0.3], vec![2, 3]).unwrap();
    let id_entropy = predictive_entropy(&id_probs, DEFAULT_ENTROPY_EPS).unwrap();
    let ood_entropy = predictive_entropy(&ood_probs, DEFAULT_ENTROPY_EPS).unwrap();
    let roc = compute_roc(&id_entropy, &ood_entropy).unwrap();
    assert_relative_eq!(roc.auc, 1.0);
}
