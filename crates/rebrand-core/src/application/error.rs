//! Application layer errors.
//!
//! These errors represent failures while touching the filesystem, not
//! configuration problems. Configuration errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while rewriting or relocating.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A declared file exists but could not be read or written.
    #[error("Failed to {operation} {path}: {reason}")]
    FileAccess {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },

    /// An I/O failure while moving a source tree.
    #[error("Relocation failed to {operation} {path}: {reason}")]
    Relocation {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },

    /// An empty ancestor directory could not be deleted.
    #[error("Failed to prune empty directory {path}: {reason}")]
    Prune { path: PathBuf, reason: String },

    /// The project root is missing or not a directory.
    #[error("Invalid project root {path}: {reason}")]
    ProjectRootInvalid { path: PathBuf, reason: String },

    /// The run finished but some work failed.
    #[error(
        "Initialization incomplete: {failed_files} file(s) and {failed_roots} source root(s) failed"
    )]
    InitFailed {
        failed_files: usize,
        failed_roots: usize,
    },
}

impl ApplicationError {
    /// Re-tag a filesystem error as a relocation error, keeping its path and
    /// cause.
    pub fn into_relocation(self) -> Self {
        match self {
            Self::FileAccess {
                path,
                operation,
                reason,
            } => Self::Relocation {
                path,
                operation,
                reason,
            },
            other => other,
        }
    }

    /// Re-tag a filesystem error as a prune error.
    pub fn into_prune(self) -> Self {
        match self {
            Self::FileAccess { path, reason, .. } | Self::Relocation { path, reason, .. } => {
                Self::Prune { path, reason }
            }
            other => other,
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::FileAccess { path, .. }
            | Self::Relocation { path, .. }
            | Self::Prune { path, .. }
            | Self::ProjectRootInvalid { path, .. } => Some(path),
            Self::InitFailed { .. } => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileAccess { path, .. } => vec![
                format!("Could not access: {}", path.display()),
                "Check that you have read and write permissions".into(),
                "Remove the file from rebrand.toml if it is not a text file".into(),
            ],
            Self::Relocation { path, .. } => vec![
                format!("Relocation stopped at: {}", path.display()),
                "Earlier source roots were relocated and are not rolled back".into(),
                "Fix the problem and run again; finished roots are skipped".into(),
            ],
            Self::Prune { path, .. } => vec![
                format!("Empty directory left behind: {}", path.display()),
                "It is safe to delete it by hand".into(),
            ],
            Self::ProjectRootInvalid { path, .. } => vec![
                format!("Project root: {}", path.display()),
                "Run from the template checkout or pass --project <DIR>".into(),
            ],
            Self::InitFailed { .. } => vec![
                "Some files or source roots could not be processed".into(),
                "See the report above for each failure".into(),
                "Run `rebrand check` to find identifiers left behind".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileAccess { .. } | Self::Relocation { .. } | Self::Prune { .. } => {
                ErrorCategory::Internal
            }
            Self::ProjectRootInvalid { .. } => ErrorCategory::NotFound,
            Self::InitFailed { .. } => ErrorCategory::Internal,
        }
    }
}
