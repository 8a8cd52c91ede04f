//! Dataset loaders, deterministic subsampling and batching for
//! out-of-distribution evaluation.
//!
//! The loader functions in [`loaders`] read a benchmark from disk, apply
//! the optional subsample and hand back an [`ImageLoader`] of
//! [`ImageBatch`]es. [`evaluation`] runs a classifier over those loaders and
//! [`oodeval_core::compute_roc`] turns the resulting scores into an ROC curve.

pub mod collate;
pub mod config;
pub mod dataloader;
pub mod datasets;
pub mod evaluation;
pub mod family;
pub mod loaders;
pub mod samplers;
pub mod sources;
pub mod transforms;

// Re-export main components
pub use collate::{collate_images, ImageBatch, ImageLoader};
pub use config::LoaderConfig;
pub use dataloader::DataLoader;
pub use datasets::{ArrayDataset, Dataset, EvalDataset, ImageFolder, Subsettable};
pub use family::DatasetFamily;
pub use loaders::{cross_load_dataset, load_corrupted_dataset, rotate_load_dataset};
pub use samplers::{select_subset, Sampler, SequentialSampler};
