//! Infrastructure adapters for rebrand.
//!
//! This crate implements the ports defined in `rebrand-core::application::ports`
//! and everything else that reads the disk on the CLI's behalf: the
//! `rebrand.toml` manifest and the residue scanner.

pub mod filesystem;
pub mod manifest;
pub mod residue;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::{Manifest, ManifestError, ManifestLoader, ManifestSource};
pub use residue::{Residue, ResidueError, ResidueReport, ResidueScanner};
