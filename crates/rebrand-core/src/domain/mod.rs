// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for rebrand.
//!
//! This module contains pure logic with no I/O. Reading, writing and moving
//! files is done by the application layer through the `Filesystem` port.
//!
//! - **No I/O**: identifiers, substitution plans and specs are plain values
//! - **Validated on construction**: a `DottedId` or `InitSpec` that exists is
//!   consistent
//! - **Immutable values**: all domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod error;
pub mod identifier;
pub mod spec;
pub mod substitution;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use identifier::{DisplayName, DottedId, Identifier, IdentifierForm};
pub use spec::{InitSpec, InitSpecBuilder, RelocationSpec, RewriteSpec};
pub use substitution::{FormCounts, Rewritten, Substitution, SubstitutionPlan};
pub use validation::DomainValidator;
