//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the identity store and an
//! external system (the filesystem, the OS entropy pool).
//! Implementations live in `src/adapters/`.

pub mod entropy;
pub mod filesystem;

pub use entropy::EntropySource;
pub use filesystem::FileSystem;
