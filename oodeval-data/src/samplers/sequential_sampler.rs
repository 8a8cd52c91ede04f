// oodeval-data/src/samplers/sequential_sampler.rs

use super::traits::Sampler;

/// Parcourt les éléments séquentiellement, toujours dans le même ordre.
///
/// C'est le seul sampler des loaders d'évaluation : le i-ème score produit
/// par un modèle doit correspondre au i-ème label.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler;

impl SequentialSampler {
    /// Crée un nouveau `SequentialSampler`.
    pub fn new() -> Self {
        SequentialSampler
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        Box::new(0..dataset_len)
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
