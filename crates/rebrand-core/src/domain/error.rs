// ============================================================================
// domain/error.rs - CONFIGURATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is detected before anything on disk is touched, so a
/// `DomainError` always means "nothing changed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Identifier Errors
    // ========================================================================
    #[error("invalid identifier '{value}': {reason}")]
    InvalidIdentifier { value: String, reason: String },

    #[error("invalid display name '{value}': {reason}")]
    InvalidDisplayName { value: String, reason: String },

    // ========================================================================
    // Spec Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("invalid source root '{path}': {reason}")]
    InvalidSourceRoot { path: String, reason: String },

    #[error("invalid file path '{path}': {reason}")]
    InvalidFilePath { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { value, .. } => vec![
                format!("'{value}' is not a valid dotted identifier"),
                "Use a reverse-domain id such as io.github.you.app".into(),
                "Components must be non-empty and contain no '/', '\\' or whitespace".into(),
            ],
            Self::InvalidDisplayName { value, .. } => vec![
                format!("'{value}' is not a valid display name"),
                "Use a simple PascalCase name such as MyApp".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Pass it on the command line or set it in rebrand.toml".into(),
            ],
            Self::InvalidSourceRoot { .. } | Self::InvalidFilePath { .. } => vec![
                "Paths in rebrand.toml must be relative to the project root".into(),
                "Parent-directory components ('..') are not allowed".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. } | Self::InvalidDisplayName { .. } => {
                ErrorCategory::Validation
            }
            Self::MissingRequiredField { .. }
            | Self::InvalidSourceRoot { .. }
            | Self::InvalidFilePath { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
