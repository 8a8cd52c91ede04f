// dataloader.rs
//! # DataLoader
//!
//! Le module `DataLoader` regroupe les éléments d'un [`Dataset`] en batches, dans l'ordre produit par un [`Sampler`].
//!
//! ## Exemple d'utilisation basique
//!
//! ```rust,no_run
//! use ndarray::Array4;
//! use oodeval_data::dataloader::DataLoader;
//! use oodeval_data::datasets::ArrayDataset;
//! use oodeval_data::samplers::SequentialSampler;
//! use oodeval_data::transforms::{ImageTransform, Normalize};
//!
//! let transform = ImageTransform::new(Normalize::new(vec![0.5], vec![0.5]));
//! let dataset = ArrayDataset::new(Array4::zeros((6, 8, 8, 3)), vec![0; 6], transform).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! for batch in loader {
//!     let batch = batch.expect("Pas d'erreur attendue");
//!     println!("Batch de {} éléments", batch.len());
//! }
//! ```
//!
//! ## Fonctionnalités principales
//!
//! - Batching automatique des données
//! - Ordre des indices via le trait `Sampler`
//! - Fonction de collation personnalisable (voir [`crate::collate`] pour les batches d'images)
//! - Option pour ignorer le dernier batch incomplet (`drop_last`)
//! - Chargement des éléments d'un batch sur un pool de workers (`with_workers`)

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use log::debug;
use oodeval_core::OodError;
use rayon::prelude::*;

/// Type pour la fonction de collation personnalisée.
///
/// Elle reçoit les éléments d'un batch et retourne le batch de type `B`.
pub type CollateFn<I, B> = Box<dyn Fn(Vec<I>) -> Result<B, OodError> + Send + Sync>;

/// DataLoader générique pour le batching et le sampling de données.
///
/// # Paramètres de type
/// - `D`: Le type du dataset, qui doit implémenter le trait [`Dataset`].
/// - `S`: Le type du sampler, qui doit implémenter le trait [`Sampler`].
/// - `B`: Le type de batch produit par la fonction de collation. Par défaut,
///   un simple `Vec` d'éléments.
pub struct DataLoader<D: Dataset, S: Sampler, B = Vec<<D as Dataset>::Item>> {
    /// Le dataset source.
    pub dataset: D,
    /// La taille des batches.
    pub batch_size: usize,
    /// Le sampler utilisé pour générer les indices.
    pub sampler: S,
    /// Si vrai, le dernier batch est ignoré s'il est incomplet.
    pub drop_last: bool,
    /// Nombre de threads de chargement. 0 ou 1 charge dans le thread appelant.
    pub num_workers: usize,
    /// Mémoire épinglée. Sans effet : les tenseurs restent en mémoire hôte.
    pub pin_memory: bool,
    collate_fn: CollateFn<D::Item, B>,
    pool: Option<rayon::ThreadPool>,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Crée un DataLoader qui retourne chaque batch sous forme de `Vec`.
    ///
    /// # Erreurs
    ///
    /// Retourne `OodError::InvalidArgument` si `batch_size` vaut 0.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, OodError> {
        Self::with_collate(dataset, batch_size, sampler, drop_last, Box::new(|batch| Ok(batch)))
    }
}

impl<D: Dataset, S: Sampler, B> DataLoader<D, S, B> {
    /// Crée un DataLoader avec une fonction de collation personnalisée.
    pub fn with_collate(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: CollateFn<D::Item, B>,
    ) -> Result<Self, OodError> {
        if batch_size == 0 {
            return Err(OodError::InvalidArgument(
                "batch_size must be at least 1".to_string(),
            ));
        }
        let indices_iter = sampler.iter(dataset.len());
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            num_workers: 0,
            pin_memory: false,
            collate_fn,
            pool: None,
            indices_iter,
        })
    }

    /// Charge les éléments de chaque batch sur `num_workers` threads.
    ///
    /// L'ordre des éléments dans un batch est conservé.
    pub fn with_workers(mut self, num_workers: usize) -> Result<Self, OodError> {
        self.pool = if num_workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_workers)
                .thread_name(|i| format!("oodeval-loader-{}", i))
                .build()
                .map_err(|e| OodError::WorkerPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };
        self.num_workers = num_workers;
        Ok(self)
    }

    pub fn with_pin_memory(mut self, pin_memory: bool) -> Self {
        if pin_memory {
            debug!("DataLoader: pin_memory requested, but batches stay in host memory");
        }
        self.pin_memory = pin_memory;
        self
    }

    /// Nombre de batches d'une passe complète.
    pub fn len(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recommence l'itération au premier indice du sampler.
    pub fn reset(&mut self) {
        debug!("DataLoader: reset over {} items", self.dataset.len());
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }
}

impl<D, S, B> Iterator for DataLoader<D, S, B>
where
    D: Dataset + Sync,
    S: Sampler,
{
    type Item = Result<B, OodError>;

    /// Retourne le prochain batch de données.
    ///
    /// - `Some(Ok(batch))` : un batch assemblé.
    /// - `Some(Err(e))` : le chargement d'un élément ou la collation a échoué.
    /// - `None` : plus de données.
    fn next(&mut self) -> Option<Self::Item> {
        let indices: Vec<usize> = self.indices_iter.by_ref().take(self.batch_size).collect();
        if indices.is_empty() || (self.drop_last && indices.len() < self.batch_size) {
            return None;
        }
        let dataset = &self.dataset;
        let items = match &self.pool {
            Some(pool) => pool.install(|| {
                indices
                    .par_iter()
                    .map(|&idx| dataset.get(idx))
                    .collect::<Result<Vec<_>, _>>()
            }),
            None => indices
                .iter()
                .map(|&idx| dataset.get(idx))
                .collect::<Result<Vec<_>, _>>(),
        };
        Some(items.and_then(|batch| (self.collate_fn)(batch)))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
