//! Invocation specs: what to rewrite, what to relocate, and where.
//!
//! [`InitSpec`] is the single input of an initialization run. It is built once
//! from caller-supplied configuration, validated up front, and split into a
//! [`RewriteSpec`] for the rewriter and a [`RelocationSpec`] for the relocator.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::{
    error::DomainError,
    identifier::{DisplayName, DottedId, Identifier},
    substitution::SubstitutionPlan,
};

// ── RewriteSpec ─────────────────────────────────────────────────────────────

/// Input of the identifier rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSpec {
    pub from: Identifier,
    pub to: Identifier,
    /// Ordered candidate files. Missing files are skipped.
    pub files: Vec<PathBuf>,
}

impl RewriteSpec {
    pub fn plan(&self) -> SubstitutionPlan {
        SubstitutionPlan::new(&self.from, &self.to)
    }
}

// ── RelocationSpec ──────────────────────────────────────────────────────────

/// Input of the tree relocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationSpec {
    /// Path form of the source dotted id, e.g. `io/github/bamboo/krust`.
    pub from_fragment: PathBuf,
    /// Path form of the destination dotted id.
    pub to_fragment: PathBuf,
    /// Ordered source-set roots.
    pub source_roots: Vec<PathBuf>,
}

impl RelocationSpec {
    pub fn new(from: &DottedId, to: &DottedId, source_roots: Vec<PathBuf>) -> Self {
        Self {
            from_fragment: from.to_path_buf(),
            to_fragment: to.to_path_buf(),
            source_roots,
        }
    }

    /// Source and destination resolve to the same directory.
    pub fn is_identity(&self) -> bool {
        self.from_fragment == self.to_fragment
    }

    /// The destination lies strictly inside the source tree
    /// (`a/b` → `a/b/c`).
    pub fn destination_nested_in_source(&self) -> bool {
        !self.is_identity() && self.to_fragment.starts_with(&self.from_fragment)
    }

    /// One of source and destination lies inside the other.
    pub fn overlaps(&self) -> bool {
        self.destination_nested_in_source()
            || (!self.is_identity() && self.from_fragment.starts_with(&self.to_fragment))
    }
}

// ── InitSpec ────────────────────────────────────────────────────────────────

/// Everything an initialization run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSpec {
    pub project_root: PathBuf,
    pub from: Identifier,
    pub to: Identifier,
    pub files: Vec<PathBuf>,
    pub source_roots: Vec<PathBuf>,
}

impl InitSpec {
    pub fn builder() -> InitSpecBuilder {
        InitSpecBuilder::default()
    }

    /// Check path invariants that identifiers cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        for file in &self.files {
            if file.as_os_str().is_empty() {
                return Err(DomainError::InvalidFilePath {
                    path: String::new(),
                    reason: "file path cannot be empty".into(),
                });
            }
        }

        for root in &self.source_roots {
            validate_source_root(root)?;
        }

        Ok(())
    }

    pub fn rewrite_spec(&self) -> RewriteSpec {
        RewriteSpec {
            from: self.from.clone(),
            to: self.to.clone(),
            files: self
                .files
                .iter()
                .map(|f| self.project_root.join(f))
                .collect(),
        }
    }

    pub fn relocation_spec(&self) -> RelocationSpec {
        RelocationSpec::new(
            &self.from.dotted_id,
            &self.to.dotted_id,
            self.source_roots
                .iter()
                .map(|r| self.project_root.join(r))
                .collect(),
        )
    }
}

impl fmt::Display for InitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

fn validate_source_root(root: &Path) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidSourceRoot {
        path: root.display().to_string(),
        reason: reason.into(),
    };

    if root.as_os_str().is_empty() {
        return Err(invalid("source root cannot be empty"));
    }
    if root.is_absolute() {
        return Err(invalid("source root must be relative to the project root"));
    }
    if root
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(invalid("source root cannot leave the project root"));
    }
    Ok(())
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Builder for [`InitSpec`].
///
/// Takes raw strings so that every missing or malformed field surfaces as a
/// [`DomainError`] from [`InitSpecBuilder::build`].
#[derive(Debug, Default)]
pub struct InitSpecBuilder {
    project_root: Option<PathBuf>,
    from_id: Option<String>,
    from_name: Option<String>,
    to_id: Option<String>,
    to_name: Option<String>,
    files: Vec<PathBuf>,
    source_roots: Vec<PathBuf>,
}

impl InitSpecBuilder {
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn from_id(mut self, id: impl Into<String>) -> Self {
        self.from_id = Some(id.into());
        self
    }

    pub fn from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    pub fn to_id(mut self, id: impl Into<String>) -> Self {
        self.to_id = Some(id.into());
        self
    }

    pub fn to_name(mut self, name: impl Into<String>) -> Self {
        self.to_name = Some(name.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_roots.push(path.into());
        self
    }

    pub fn source_roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.source_roots.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<InitSpec, DomainError> {
        let from_id = required(self.from_id, "from_id")?;
        let from_name = required(self.from_name, "from_name")?;
        let to_id = required(self.to_id, "to_id")?;
        let to_name = required(self.to_name, "to_name")?;

        let spec = InitSpec {
            project_root: self.project_root.unwrap_or_else(|| PathBuf::from(".")),
            from: Identifier::new(DottedId::parse(from_id)?, DisplayName::parse(from_name)?),
            to: Identifier::new(DottedId::parse(to_id)?, DisplayName::parse(to_name)?),
            files: self.files,
            source_roots: self.source_roots,
        };
        spec.validate()?;
        Ok(spec)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::MissingRequiredField { field }),
    }
}
