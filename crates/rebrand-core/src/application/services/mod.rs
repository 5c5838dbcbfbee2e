//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and the `Filesystem` port to carry
//! out "rewrite identifiers", "relocate the source tree" and the combined
//! "initialize a project".

pub mod init_service;
pub mod relocation_service;
pub mod rewrite_service;

pub use init_service::InitService;
pub use relocation_service::TreeRelocator;
pub use rewrite_service::IdentifierRewriter;

/// Whether a service touches the filesystem or only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Apply,
    Preview,
}

impl Mode {
    pub(crate) fn applies(self) -> bool {
        matches!(self, Self::Apply)
    }
}
