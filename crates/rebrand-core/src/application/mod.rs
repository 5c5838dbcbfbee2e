//! Application layer for rebrand.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (InitService, IdentifierRewriter, TreeRelocator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Reports**: Per-file and per-root outcomes of a run
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Substitution rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{IdentifierRewriter, InitService, TreeRelocator};

// Re-export port traits (for adapter implementation)
pub use ports::{EntryKind, Filesystem, FsResult};

pub use error::ApplicationError;
pub use report::{
    FileOutcome, FileReport, InitReport, RelocationReport, RelocationStats, RewriteReport,
    RootOutcome, RootReport,
};
