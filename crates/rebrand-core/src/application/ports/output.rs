//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rebrand-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;

/// Result type for filesystem port calls.
pub type FsResult<T> = Result<T, ApplicationError>;

/// What sits at a path, without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    File,
    Directory,
    Symlink,
    /// Sockets, devices, FIFOs.
    Other,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `rebrand_adapters::filesystem::LocalFilesystem` (production)
/// - `rebrand_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every error is an [`ApplicationError::FileAccess`] carrying the path, the
/// operation, and the underlying cause. Services re-tag it
/// (relocation, prune) depending on where it happened.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Classify a path. Never fails; unreadable paths are `Missing`.
    fn entry_kind(&self, path: &Path) -> EntryKind;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Replace a file's content in full.
    ///
    /// Implementations must leave the previous content intact if the write
    /// fails.
    fn write_file(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Create a directory and all missing parents. Existing directories are
    /// reused.
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Move a file (or symlink), replacing whatever file is at `to`.
    fn move_file(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Rename a directory. `to` must not exist.
    fn rename_dir(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Entries directly under `path`, sorted.
    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> FsResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool {
        self.entry_kind(path) != EntryKind::Missing
    }
}
