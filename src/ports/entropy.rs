//! Entropy port for generating peer names.

/// Fills buffers with unpredictable bytes.
///
/// Abstracting the entropy source lets tests supply deterministic bytes or
/// simulate an unavailable source.
pub trait EntropySource: Send + Sync {
    /// Fills `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
