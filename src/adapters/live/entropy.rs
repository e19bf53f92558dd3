//! Live entropy adapter backed by the operating system.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::ports::entropy::EntropySource;

/// Entropy source reading from the OS random number generator.
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}
