// oodeval-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Trait Sampler : définit l'ordre de parcours des indices d'un dataset.
///
/// Le `DataLoader` utilise un sampler pour générer la séquence d'indices
/// à charger depuis un `Dataset`.
pub trait Sampler: Debug + Send + Sync {
    /// Retourne un itérateur sur les indices du dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - Le nombre total d'éléments du dataset.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Retourne le nombre total d'indices produits par l'itérateur.
    fn len(&self, dataset_len: usize) -> usize;
}
