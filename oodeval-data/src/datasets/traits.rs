// oodeval-data/src/datasets/traits.rs

use oodeval_core::OodError;

/// Trait représentant un dataset accessible par indice.
///
/// L'élément `i` correspond toujours à la même image et au même label,
/// ce qui garde les scores alignés avec les labels.
pub trait Dataset {
    /// Le type d'un élément retourné par le dataset.
    ///
    /// Il doit être `Send` et `'static` pour être chargé sur les threads
    /// du loader.
    type Item: Send + 'static;

    /// Retourne l'élément à l'indice donné.
    ///
    /// # Erreurs
    ///
    /// Retourne `OodError` si l'indice est hors limites ou si l'élément ne
    /// peut pas être lu ou décodé.
    fn get(&self, index: usize) -> Result<Self::Item, OodError>;

    /// Retourne le nombre total d'éléments du dataset.
    fn len(&self) -> usize;

    /// Retourne vrai si le dataset ne contient aucun élément.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dataset whose items and labels can be filtered down to a selection.
pub trait Subsettable: Sized {
    /// Returns a new dataset holding only `indices`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `OodError::IndexOutOfBounds` if any index is past the end.
    fn subset(&self, indices: &[usize]) -> Result<Self, OodError>;
}
