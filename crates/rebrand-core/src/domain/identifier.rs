//! Identifier value objects: `DottedId`, `DisplayName`, `Identifier`.
//!
//! A dotted id like `io.github.bamboo.krust` shows up in a project in three
//! surface forms, all derived from the same string:
//!
//! | Form    | Example                  | Where it appears                  |
//! |---------|--------------------------|-----------------------------------|
//! | dotted  | `io.github.bamboo.krust` | package names, application ids    |
//! | path    | `io/github/bamboo/krust` | resource paths, source directories|
//! | linkage | `io_github_bamboo_krust` | native symbol names (JNI exports) |
//!
//! The display name (`Krust`) is the fourth form, used as a type prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::error::DomainError;

const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

// ── DottedId ────────────────────────────────────────────────────────────────

/// A validated reverse-domain identifier.
///
/// Invariant: non-empty, no whitespace, no path separators, no empty
/// components. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedId(String);

impl DottedId {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let invalid = |reason: &str| DomainError::InvalidIdentifier {
            value: value.clone(),
            reason: reason.into(),
        };

        if value.is_empty() {
            return Err(invalid("identifier cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("identifier cannot contain whitespace"));
        }
        if value.contains(PATH_SEPARATORS) {
            return Err(invalid("identifier cannot contain path separators"));
        }
        if value.chars().any(char::is_control) {
            return Err(invalid("identifier cannot contain control characters"));
        }
        if value.split('.').any(str::is_empty) {
            return Err(invalid("identifier components cannot be empty"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual components, e.g. `["io", "github", "bamboo", "krust"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Textual path form: dots replaced by `/`.
    ///
    /// This is what appears inside files (imports, resource paths), so it is
    /// always `/`-separated regardless of platform.
    pub fn path_form(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Filesystem path form: one path component per segment.
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }

    /// Linkage form: dots replaced by `_`.
    pub fn linkage_form(&self) -> String {
        self.0.replace('.', "_")
    }
}

impl fmt::Display for DottedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DottedId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── DisplayName ─────────────────────────────────────────────────────────────

/// Human-readable name used as a type and asset prefix (`Krust`,
/// `KrustTheme`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let invalid = |reason: &str| DomainError::InvalidDisplayName {
            value: value.clone(),
            reason: reason.into(),
        };

        if value.is_empty() {
            return Err(invalid("display name cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("display name cannot contain whitespace"));
        }
        if value.contains(PATH_SEPARATORS) {
            return Err(invalid("display name cannot contain path separators"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DisplayName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Identifier ──────────────────────────────────────────────────────────────

/// A project identity: dotted id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub dotted_id: DottedId,
    pub display_name: DisplayName,
}

impl Identifier {
    pub fn new(dotted_id: DottedId, display_name: DisplayName) -> Self {
        Self {
            dotted_id,
            display_name,
        }
    }

    /// Parse both parts from raw strings.
    pub fn parse(dotted_id: &str, display_name: &str) -> Result<Self, DomainError> {
        Ok(Self::new(
            DottedId::parse(dotted_id)?,
            DisplayName::parse(display_name)?,
        ))
    }

    /// Render any of the four forms.
    pub fn render(&self, form: IdentifierForm) -> String {
        match form {
            IdentifierForm::Dotted => self.dotted_id.to_string(),
            IdentifierForm::Path => self.dotted_id.path_form(),
            IdentifierForm::Linkage => self.dotted_id.linkage_form(),
            IdentifierForm::DisplayName => self.display_name.to_string(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.dotted_id, self.display_name)
    }
}

// ── IdentifierForm ──────────────────────────────────────────────────────────

/// The surface forms an identifier takes in a project.
///
/// Declaration order is substitution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierForm {
    Dotted,
    Path,
    Linkage,
    DisplayName,
}

impl IdentifierForm {
    pub const ALL: [Self; 4] = [Self::Dotted, Self::Path, Self::Linkage, Self::DisplayName];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dotted => "dotted",
            Self::Path => "path",
            Self::Linkage => "linkage",
            Self::DisplayName => "display-name",
        }
    }
}

impl fmt::Display for IdentifierForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
