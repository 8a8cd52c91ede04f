// oodeval-data/src/config.rs

use std::path::{Path, PathBuf};

/// Shared settings for the OOD loader functions.
///
/// Defaults mirror the usual evaluation setup: data under `../../data`,
/// batches of 256, four workers, and no subsampling.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Root directory holding every dataset layout.
    pub data_dir: PathBuf,
    /// Items per batch.
    pub batch_size: usize,
    /// Requested page-locked transfer. Tensors here are host-only, so this
    /// is carried onto the loader but changes nothing.
    pub pin_memory: bool,
    /// Worker threads used to fetch the items of a batch.
    pub workers: usize,
    /// Subsample size. `None` keeps the whole dataset.
    pub n_data: Option<usize>,
    /// Block to take when subsampling. `None` draws a seeded random subset.
    pub subset_idx: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            data_dir: PathBuf::from("../../data"),
            batch_size: 256,
            pin_memory: true,
            workers: 4,
            n_data: None,
            subset_idx: None,
        }
    }
}

impl LoaderConfig {
    /// Default settings rooted at `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        LoaderConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn pin_memory(mut self, pin_memory: bool) -> Self {
        self.pin_memory = pin_memory;
        self
    }

    /// Keeps `n_data` items, picked at random with the fixed subset seed.
    pub fn random_subset(mut self, n_data: usize) -> Self {
        self.n_data = Some(n_data);
        self.subset_idx = None;
        self
    }

    /// Keeps block `subset_idx` of size `n_data`.
    pub fn block_subset(mut self, n_data: usize, subset_idx: usize) -> Self {
        self.n_data = Some(n_data);
        self.subset_idx = Some(subset_idx);
        self
    }
}
