//! # Scoring an OOD benchmark
//!
//! 1. Pick a reproducible subsample with `select_subset`.
//! 2. Score ID and OOD items (fixed scores here, or predictive entropies
//!    when a data directory is given).
//! 3. Summarize the separation with `compute_roc`.
//!
//! ## Running
//! `RUST_LOG=debug cargo run -p oodeval-data --example ood_roc_example [DATA_DIR]`
//!
//! With `DATA_DIR`, MNIST is the ID set and FashionMNIST the OOD set; both
//! must be laid out as `MNIST/raw/` and `FashionMNIST/raw/` idx files.

use oodeval_core::tensor::from_vec_f32;
use oodeval_core::{compute_roc, OodError, Tensor};
use oodeval_data::evaluation::evaluate_predictive_entropy;
use oodeval_data::{cross_load_dataset, select_subset, LoaderConfig};

// Stand-in for a trained network: softmax over the per-image mean and its negation.
fn toy_classifier(images: &Tensor) -> Result<Tensor, OodError> {
    let shape = images.shape();
    let per_image: usize = shape[1..].iter().product();
    let mut probs = Vec::with_capacity(shape[0] * 2);
    for image in images.as_slice().chunks_exact(per_image) {
        let mean = image.iter().sum::<f32>() / per_image as f32;
        let p = 1.0 / (1.0 + (-2.0 * mean).exp());
        probs.extend([p, 1.0 - p]);
    }
    from_vec_f32(probs, vec![shape[0], 2])
}

fn main() -> Result<(), OodError> {
    env_logger::init();

    let subset = select_subset(10, Some(5), Some(1))?;
    println!("Block 1 of size 5 out of 10: {:?}", subset);
    let subset = select_subset(10, Some(5), None)?;
    println!("Seeded random subset of 5 out of 10: {:?}", subset);

    let (id, ood) = match std::env::args().nth(1) {
        Some(data_dir) => {
            let config = LoaderConfig::new(data_dir).batch_size(128).random_subset(1000);
            let (source, target) = cross_load_dataset("MNIST", "Fashion", &config)?;
            let id = evaluate_predictive_entropy(source, toy_classifier, 1e-35)?;
            let ood = evaluate_predictive_entropy(target, toy_classifier, 1e-35)?;
            (id, ood)
        }
        None => (vec![0.1, 0.2, 0.1], vec![0.9, 0.8]),
    };

    let roc = compute_roc(&id, &ood)?;
    println!("ID items: {}, OOD items: {}", id.len(), ood.len());
    println!("FPR: {:?}", roc.fpr);
    println!("TPR: {:?}", roc.tpr);
    println!("AUC: {:.4}", roc.auc);
    Ok(())
}
