//! Residue scanner - find identifier forms left behind in a project.
//!
//! Walks the project tree and reports every UTF-8 text file that still
//! contains one of the four forms of an identifier, plus every directory
//! whose path still spells the identifier's path form. Build output and VCS
//! directories are skipped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use rebrand_core::domain::{FormCounts, Identifier, IdentifierForm};

/// Directory names never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "target", "build", ".gradle", "node_modules"];

/// One file that still mentions the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Residue {
    /// Relative to the scanned root.
    pub path: PathBuf,
    pub counts: FormCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResidueReport {
    pub files_scanned: usize,
    /// Files that are not UTF-8 text.
    pub binary_skipped: usize,
    pub matches: Vec<Residue>,
    /// Directories whose relative path ends with the identifier's path form.
    pub stale_directories: Vec<PathBuf>,
}

impl ResidueReport {
    pub fn is_clean(&self) -> bool {
        self.matches.is_empty() && self.stale_directories.is_empty()
    }

    pub fn total_occurrences(&self) -> usize {
        self.matches.iter().map(|r| r.counts.total()).sum()
    }
}

#[derive(Debug, Error)]
pub enum ResidueError {
    #[error("Scan root {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },
}

/// Scans a project tree for leftover identifier forms.
#[derive(Debug, Clone)]
pub struct ResidueScanner {
    root: PathBuf,
    skip_dirs: Vec<String>,
    ignore_files: Vec<PathBuf>,
}

impl ResidueScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_files: Vec::new(),
        }
    }

    /// Also skip directories with this name.
    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skip_dirs.push(name.into());
        self
    }

    /// Ignore one file, relative to the root (the manifest names the
    /// template identifier on purpose).
    pub fn ignore_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore_files.push(path.into());
        self
    }

    #[instrument(skip_all, fields(root = %self.root.display(), identifier = %identifier))]
    pub fn scan(&self, identifier: &Identifier) -> Result<ResidueReport, ResidueError> {
        if !self.root.is_dir() {
            return Err(ResidueError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let path_form = identifier.render(IdentifierForm::Path);
        let mut report = ResidueReport::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| ResidueError::Walk {
                path: e.path().map_or_else(|| self.root.clone(), Path::to_path_buf),
                reason: e.to_string(),
            })?;
            let rel = self.relative(entry.path());

            if entry.file_type().is_dir() {
                if normalize(&rel).ends_with(&path_form) {
                    debug!(dir = %rel.display(), "Stale package directory");
                    report.stale_directories.push(rel);
                }
                continue;
            }
            if !entry.file_type().is_file() || self.ignore_files.contains(&rel) {
                continue;
            }

            report.files_scanned += 1;
            let text = match fs::read(entry.path()).map(String::from_utf8) {
                Ok(Ok(text)) => text,
                Ok(Err(_)) => {
                    report.binary_skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Unreadable file");
                    continue;
                }
            };

            let counts = FormCounts::occurrences(identifier, &text);
            if !counts.is_empty() {
                debug!(path = %rel.display(), total = counts.total(), "Residue found");
                report.matches.push(Residue { path: rel, counts });
            }
        }

        Ok(report)
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|s| s == name))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

/// Forward slashes, so Windows paths compare against the path form.
fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn krust() -> Identifier {
        Identifier::parse("io.github.bamboo.krust", "Krust").unwrap()
    }

    #[test]
    fn finds_each_form_with_counts() {
        let temp = TempDir::new().unwrap();
        touch(
            temp.path(),
            "lib.rs",
            b"Java_io_github_bamboo_krust_a Java_io_github_bamboo_krust_b",
        );
        touch(temp.path(), "README.md", b"# Krust\nio.github.bamboo.krust");
        touch(temp.path(), "clean.txt", b"nothing here");

        let report = ResidueScanner::new(temp.path()).scan(&krust()).unwrap();

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.matches.len(), 2);
        let readme = &report.matches[0];
        assert_eq!(readme.path, PathBuf::from("README.md"));
        assert_eq!(readme.counts.get(IdentifierForm::DisplayName), 1);
        assert_eq!(readme.counts.get(IdentifierForm::Dotted), 1);
        assert_eq!(report.matches[1].counts.get(IdentifierForm::Linkage), 2);
        assert_eq!(report.total_occurrences(), 4);
    }

    #[test]
    fn skips_build_and_vcs_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".git/config", b"Krust");
        touch(temp.path(), "build/out.txt", b"Krust");
        touch(temp.path(), "target/debug/x", b"Krust");
        touch(temp.path(), "src/ok.kt", b"fine");

        let report = ResidueScanner::new(temp.path()).scan(&krust()).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn reports_stale_package_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app/src/main/java/io/github/bamboo/krust/.keep", b"");

        let report = ResidueScanner::new(temp.path()).scan(&krust()).unwrap();

        assert_eq!(
            report.stale_directories,
            [PathBuf::from("app/src/main/java/io/github/bamboo/krust")]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn binary_files_are_counted_not_matched() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "icon.png", &[0x89, 0x50, 0xff, 0xfe]);

        let report = ResidueScanner::new(temp.path()).scan(&krust()).unwrap();
        assert_eq!(report.binary_skipped, 1);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn ignored_file_is_not_reported() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "rebrand.toml", b"id = \"io.github.bamboo.krust\"");

        let report = ResidueScanner::new(temp.path())
            .ignore_file("rebrand.toml")
            .scan(&krust())
            .unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = ResidueScanner::new(temp.path().join("nope")).scan(&krust());
        assert!(matches!(result, Err(ResidueError::NotADirectory { .. })));
    }

    #[test]
    fn report_serializes_counts_by_form() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.txt", b"Krust");

        let report = ResidueScanner::new(temp.path()).scan(&krust()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["matches"][0]["counts"]["display-name"], 1);
    }
}
