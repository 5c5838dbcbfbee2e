//! `rebrand.toml` manifest loading.
//!
//! A template checkout declares its current identifier, the files that
//! mention it and the source roots whose package directories must move.
//!
//! # `rebrand.toml` format
//!
//! ```toml
//! files = [
//!   "app/build.gradle.kts",
//!   "README.md",
//! ]
//!
//! source_roots = [
//!   "app/src/main/java",
//! ]
//!
//! [template]
//! id   = "io.github.bamboo.krust"
//! name = "Krust"
//! ```
//!
//! Unknown keys are rejected so that a typo (`source_root = [...]`) fails
//! loudly instead of silently relocating nothing.

pub mod builtin;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use rebrand_core::domain::{DisplayName, DottedId, InitSpecBuilder};

pub const DEFAULT_FILE_NAME: &str = "rebrand.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `rebrand.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Files to rewrite, relative to the project root. Order is kept.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Source-set roots, relative to the project root.
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
    pub template: TemplateSection,
}

/// `[template]` section - the identifier the checkout currently uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSection {
    pub id: String,
    pub name: String,
}

impl Manifest {
    /// Parse manifest text. `path` is only used in error messages.
    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(raw).map_err(|e| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Render as TOML with a short header.
    pub fn to_toml(&self) -> Result<String, ManifestError> {
        let body = toml::to_string_pretty(self).map_err(|e| ManifestError::Serialize {
            message: e.to_string(),
        })?;
        Ok(format!(
            "# rebrand manifest: the identifier this checkout uses today.\n\
             # `rebrand init --app-id <ID> --app-name <NAME>` renames it.\n\n{body}"
        ))
    }

    /// Check the identifier and paths without touching the disk.
    pub fn validate(&self, path: &Path) -> Result<(), ManifestError> {
        let invalid = |reason: String| ManifestError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        DottedId::parse(self.template.id.as_str())
            .map_err(|e| invalid(format!("template.id: {e}")))?;
        DisplayName::parse(self.template.name.as_str())
            .map_err(|e| invalid(format!("template.name: {e}")))?;

        for file in &self.files {
            if file.as_os_str().is_empty() || file.is_absolute() {
                return Err(invalid(format!(
                    "files: '{}' must be a non-empty relative path",
                    file.display()
                )));
            }
        }
        Ok(())
    }

    /// Start an [`InitSpecBuilder`] seeded with this manifest's identifier,
    /// files and source roots. Callers add the new identifier and may
    /// override anything else.
    pub fn to_spec_builder(&self, project_root: impl Into<PathBuf>) -> InitSpecBuilder {
        rebrand_core::domain::InitSpec::builder()
            .project_root(project_root)
            .from_id(self.template.id.clone())
            .from_name(self.template.name.clone())
            .files(self.files.iter().cloned())
            .source_roots(self.source_roots.iter().cloned())
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid manifest {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("Manifest already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize manifest: {message}")]
    Serialize { message: String },
}

impl ManifestError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { .. } => vec![
                "Run `rebrand manifest` to write a starter rebrand.toml".into(),
                "Or pass --builtin to use the Android + Rust template preset".into(),
                "Or pass --manifest <FILE> to point at another manifest".into(),
            ],
            Self::Read { .. } | Self::Write { .. } => {
                vec!["Check file permissions".into()]
            }
            Self::Parse { .. } | Self::Invalid { .. } => vec![
                "Allowed keys: files, source_roots, [template] id and name".into(),
                "Top-level keys must come before the [template] table".into(),
            ],
            Self::AlreadyExists { .. } => vec!["Use --force to overwrite it".into()],
            Self::Serialize { .. } => vec!["This is a bug, please report it".into()],
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Where a resolved manifest came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin => f.write_str("built-in preset"),
        }
    }
}

/// Finds, reads and writes the manifest of one project.
///
/// # Example
///
/// ```no_run
/// use rebrand_adapters::ManifestLoader;
///
/// let (manifest, source) = ManifestLoader::new("./my-app").resolve(true)?;
/// println!("{} from {source}", manifest.template.id);
/// # Ok::<(), rebrand_adapters::ManifestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    project_root: PathBuf,
    file: PathBuf,
}

impl ManifestLoader {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            file: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }

    /// Use another manifest file. Relative paths are resolved against the
    /// project root.
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.project_root.join(&self.file)
    }

    /// Read and validate the manifest file.
    #[instrument(skip(self), fields(path = %self.path().display()))]
    pub fn load(&self) -> Result<Manifest, ManifestError> {
        let path = self.path();
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound { path: path.clone() }
            } else {
                ManifestError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let manifest = Manifest::from_toml(&raw, &path)?;
        debug!(
            id = %manifest.template.id,
            files = manifest.files.len(),
            roots = manifest.source_roots.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Load the manifest, falling back to the built-in preset when the file
    /// is missing and `allow_builtin` is set.
    pub fn resolve(&self, allow_builtin: bool) -> Result<(Manifest, ManifestSource), ManifestError> {
        match self.load() {
            Ok(manifest) => Ok((manifest, ManifestSource::File(self.path()))),
            Err(ManifestError::NotFound { .. }) if allow_builtin => {
                info!("No manifest found, using built-in preset");
                Ok((builtin::manifest(), ManifestSource::Builtin))
            }
            Err(e) => Err(e),
        }
    }

    /// Write `manifest` to the manifest path.
    #[instrument(skip(self, manifest), fields(path = %self.path().display()))]
    pub fn write(&self, manifest: &Manifest, force: bool) -> Result<PathBuf, ManifestError> {
        let path = self.path();
        if path.exists() && !force {
            return Err(ManifestError::AlreadyExists { path });
        }

        let content = manifest.to_toml()?;
        fs::write(&path, content).map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Wrote manifest");
        Ok(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
files = ["README.md", "app/build.gradle.kts"]
source_roots = ["app/src/main/java"]

[template]
id   = "io.github.bamboo.krust"
name = "Krust"
"#;

    fn project_with(manifest: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(DEFAULT_FILE_NAME), manifest).unwrap();
        temp
    }

    #[test]
    fn loads_minimal_manifest() {
        let temp = project_with(MINIMAL);
        let manifest = ManifestLoader::new(temp.path()).load().unwrap();

        assert_eq!(manifest.template.id, "io.github.bamboo.krust");
        assert_eq!(manifest.template.name, "Krust");
        assert_eq!(
            manifest.files,
            [PathBuf::from("README.md"), PathBuf::from("app/build.gradle.kts")]
        );
        assert_eq!(manifest.source_roots, [PathBuf::from("app/src/main/java")]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let manifest =
            Manifest::from_toml("[template]\nid = \"a.b\"\nname = \"Ab\"\n", Path::new("m"))
                .unwrap();
        assert!(manifest.files.is_empty());
        assert!(manifest.source_roots.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let raw = "source_root = [\"src\"]\n[template]\nid = \"a.b\"\nname = \"Ab\"\n";
        assert!(matches!(
            Manifest::from_toml(raw, Path::new("m")),
            Err(ManifestError::Parse { .. })
        ));
    }

    #[test]
    fn missing_template_section_is_rejected() {
        assert!(matches!(
            Manifest::from_toml("files = []\n", Path::new("m")),
            Err(ManifestError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        let raw = "[template]\nid = \"a..b\"\nname = \"Ab\"\n";
        let err = Manifest::from_toml(raw, Path::new("m")).unwrap_err();

        assert!(matches!(err, ManifestError::Invalid { .. }));
        assert!(err.to_string().contains("template.id"));
    }

    #[test]
    fn absolute_file_is_rejected() {
        let raw = "files = [\"/etc/passwd\"]\n[template]\nid = \"a.b\"\nname = \"Ab\"\n";
        assert!(matches!(
            Manifest::from_toml(raw, Path::new("m")),
            Err(ManifestError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            ManifestLoader::new(temp.path()).load(),
            Err(ManifestError::NotFound { .. })
        ));
    }

    #[test]
    fn resolve_falls_back_to_builtin_only_when_allowed() {
        let temp = TempDir::new().unwrap();
        let loader = ManifestLoader::new(temp.path());

        let (manifest, source) = loader.resolve(true).unwrap();
        assert_eq!(source, ManifestSource::Builtin);
        assert_eq!(manifest.template.id, builtin::TEMPLATE_ID);

        assert!(loader.resolve(false).is_err());
    }

    #[test]
    fn resolve_prefers_file_over_builtin() {
        let temp = project_with("[template]\nid = \"org.demo\"\nname = \"Demo\"\n");
        let (manifest, source) = ManifestLoader::new(temp.path()).resolve(true).unwrap();

        assert_eq!(manifest.template.id, "org.demo");
        assert!(matches!(source, ManifestSource::File(_)));
    }

    #[test]
    fn custom_file_is_relative_to_project() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("conf")).unwrap();
        fs::write(temp.path().join("conf/custom.toml"), MINIMAL).unwrap();

        let manifest = ManifestLoader::new(temp.path())
            .file("conf/custom.toml")
            .load()
            .unwrap();
        assert_eq!(manifest.template.name, "Krust");
    }

    #[test]
    fn written_manifest_loads_back() {
        let temp = TempDir::new().unwrap();
        let loader = ManifestLoader::new(temp.path());

        loader.write(&builtin::manifest(), false).unwrap();
        assert_eq!(loader.load().unwrap(), builtin::manifest());

        assert!(matches!(
            loader.write(&builtin::manifest(), false),
            Err(ManifestError::AlreadyExists { .. })
        ));
        assert!(loader.write(&builtin::manifest(), true).is_ok());
    }

    #[test]
    fn spec_builder_is_seeded_from_manifest() {
        let manifest = Manifest::from_toml(MINIMAL, Path::new("m")).unwrap();
        let spec = manifest
            .to_spec_builder("/work")
            .to_id("com.acme.rocket")
            .to_name("Rocket")
            .build()
            .unwrap();

        assert_eq!(spec.from.dotted_id.as_str(), "io.github.bamboo.krust");
        assert_eq!(spec.files.len(), 2);
        assert_eq!(spec.source_roots, [PathBuf::from("app/src/main/java")]);
    }
}
