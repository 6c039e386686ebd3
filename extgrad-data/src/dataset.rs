use extgrad_core::ExtGradError;

/// Represents a dataset that can be accessed by index.
///
/// An item can be a single tensor, a tuple of tensors (e.g. `(features,
/// label)`), or any other type that is `Send + 'static`.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    /// Returns `ExtGradError::IndexOutOfBounds` if `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item, ExtGradError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
