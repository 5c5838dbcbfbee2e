//! Rebrand Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the rebrand
//! project-template initializer, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           rebrand-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (InitService, IdentifierRewriter,       │
//! │  TreeRelocator)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (Filesystem)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    rebrand-adapters (Infrastructure)    │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Identifier, SubstitutionPlan, InitSpec)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rebrand_core::{application::InitService, domain::InitSpec};
//!
//! let spec = InitSpec::builder()
//!     .project_root("./my-app")
//!     .from_id("io.github.bamboo.krust")
//!     .from_name("Krust")
//!     .to_id("com.acme.rocket")
//!     .to_name("Rocket")
//!     .file("settings.gradle.kts")
//!     .source_root("app/src/main/java")
//!     .build()
//!     .unwrap();
//!
//! // `filesystem` is any `Filesystem` adapter.
//! let service = InitService::new(filesystem);
//! let report = service.initialize(&spec).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, IdentifierRewriter, InitReport, InitService, TreeRelocator,
        ports::{EntryKind, Filesystem, FsResult},
    };
    pub use crate::domain::{
        DisplayName, DomainError, DottedId, Identifier, IdentifierForm, InitSpec, InitSpecBuilder,
        RelocationSpec, RewriteSpec, SubstitutionPlan,
    };
    pub use crate::error::{ErrorCategory, RebrandError, RebrandResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
