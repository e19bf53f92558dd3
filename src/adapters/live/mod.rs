//! Live adapters for real external interactions.

pub mod entropy;
pub mod filesystem;
