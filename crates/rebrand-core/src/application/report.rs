//! Outcome reports for rewrite, relocation, and whole runs.
//!
//! Reports are plain data. The CLI renders them as text or JSON.

use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::{
    application::ApplicationError,
    domain::FormCounts,
    error::{RebrandError, RebrandResult},
};

fn serialize_error<S: Serializer>(error: &ApplicationError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

fn serialize_errors<S: Serializer>(errors: &[ApplicationError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(errors.iter().map(ToString::to_string))
}

// ── Rewrite ─────────────────────────────────────────────────────────────────

/// What happened to one declared file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileOutcome {
    /// Content changed and was written back (or would be, in a dry run).
    Rewritten { replacements: FormCounts },
    /// No identifier form occurs in the file.
    Unchanged,
    /// The file does not exist.
    Skipped,
    Failed {
        #[serde(serialize_with = "serialize_error")]
        error: ApplicationError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub files: Vec<FileReport>,
}

impl RewriteReport {
    pub fn push(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.files.push(FileReport { path, outcome });
    }

    pub fn rewritten(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Rewritten { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &ApplicationError)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed { error } => Some((&f.path, error)),
            _ => None,
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Skipped)
            .count()
    }

    pub fn total_replacements(&self) -> usize {
        self.files
            .iter()
            .map(|f| match &f.outcome {
                FileOutcome::Rewritten { replacements } => replacements.total(),
                _ => 0,
            })
            .sum()
    }
}

// ── Relocation ──────────────────────────────────────────────────────────────

/// Counters collected while moving one source tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelocationStats {
    pub files_moved: usize,
    pub files_overwritten: usize,
    pub dirs_created: usize,
    pub dirs_removed: usize,
    pub ancestors_pruned: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RootOutcome {
    Relocated {
        stats: RelocationStats,
    },
    /// The source directory does not exist under this root.
    Skipped,
    /// Source and destination are the same directory.
    Unchanged,
    /// Aborted part way. `stats` counts what was done before the failure.
    Failed {
        stats: RelocationStats,
        #[serde(serialize_with = "serialize_error")]
        error: ApplicationError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootReport {
    pub source_root: PathBuf,
    pub from_dir: PathBuf,
    pub to_dir: PathBuf,
    #[serde(flatten)]
    pub outcome: RootOutcome,
    /// Non-fatal failures while pruning empty ancestors.
    #[serde(serialize_with = "serialize_errors", skip_serializing_if = "Vec::is_empty")]
    pub prune_warnings: Vec<ApplicationError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    pub roots: Vec<RootReport>,
}

impl RelocationReport {
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &ApplicationError)> {
        self.roots.iter().filter_map(|r| match &r.outcome {
            RootOutcome::Failed { error, .. } => Some((&r.source_root, error)),
            _ => None,
        })
    }

    pub fn prune_warnings(&self) -> impl Iterator<Item = &ApplicationError> {
        self.roots.iter().flat_map(|r| r.prune_warnings.iter())
    }

    pub fn relocated_count(&self) -> usize {
        self.roots
            .iter()
            .filter(|r| matches!(r.outcome, RootOutcome::Relocated { .. }))
            .count()
    }
}

// ── Whole run ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// `true` when produced by a dry run; nothing on disk changed.
    pub dry_run: bool,
    pub rewrite: RewriteReport,
    pub relocation: RelocationReport,
}

impl InitReport {
    pub fn failed_files(&self) -> usize {
        self.rewrite.failures().count()
    }

    pub fn failed_roots(&self) -> usize {
        self.relocation.failures().count()
    }

    /// No file and no source root failed. Prune warnings do not count.
    pub fn is_success(&self) -> bool {
        self.failed_files() == 0 && self.failed_roots() == 0
    }

    /// Turn the report into a result.
    ///
    /// Relocation failures are always fatal. File failures are fatal only
    /// when `strict` is set; otherwise the caller is expected to show them as
    /// warnings.
    pub fn into_result(self, strict: bool) -> RebrandResult<Self> {
        let failed_files = self.failed_files();
        let failed_roots = self.failed_roots();

        if failed_roots > 0 || (strict && failed_files > 0) {
            return Err(RebrandError::Application(ApplicationError::InitFailed {
                failed_files,
                failed_roots,
            }));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IdentifierForm;

    fn failure(path: &str) -> ApplicationError {
        ApplicationError::FileAccess {
            path: PathBuf::from(path),
            operation: "read",
            reason: "permission denied".into(),
        }
    }

    fn report_with_file_failure() -> InitReport {
        let mut rewrite = RewriteReport::default();
        rewrite.push("ok.kt".into(), FileOutcome::Unchanged);
        rewrite.push(
            "locked.kt".into(),
            FileOutcome::Failed {
                error: failure("locked.kt"),
            },
        );
        InitReport {
            rewrite,
            ..InitReport::default()
        }
    }

    #[test]
    fn file_failure_is_fatal_only_when_strict() {
        assert!(report_with_file_failure().into_result(false).is_ok());
        assert!(matches!(
            report_with_file_failure().into_result(true),
            Err(RebrandError::Application(ApplicationError::InitFailed {
                failed_files: 1,
                failed_roots: 0
            }))
        ));
    }

    #[test]
    fn root_failure_is_always_fatal() {
        let report = InitReport {
            relocation: RelocationReport {
                roots: vec![RootReport {
                    source_root: "src".into(),
                    from_dir: "src/a".into(),
                    to_dir: "src/b".into(),
                    outcome: RootOutcome::Failed {
                        stats: RelocationStats::default(),
                        error: failure("src/a/x"),
                    },
                    prune_warnings: vec![],
                }],
            },
            ..InitReport::default()
        };

        assert!(!report.is_success());
        assert!(report.into_result(false).is_err());
    }

    #[test]
    fn prune_warnings_do_not_fail_the_run() {
        let report = InitReport {
            relocation: RelocationReport {
                roots: vec![RootReport {
                    source_root: "src".into(),
                    from_dir: "src/a".into(),
                    to_dir: "src/b".into(),
                    outcome: RootOutcome::Relocated {
                        stats: RelocationStats::default(),
                    },
                    prune_warnings: vec![ApplicationError::Prune {
                        path: "src".into(),
                        reason: "busy".into(),
                    }],
                }],
            },
            ..InitReport::default()
        };

        assert!(report.is_success());
        assert_eq!(report.relocation.prune_warnings().count(), 1);
    }

    #[test]
    fn totals_sum_rewritten_files() {
        let mut counts = FormCounts::default();
        counts.add(IdentifierForm::Dotted, 2);
        counts.add(IdentifierForm::DisplayName, 1);

        let mut rewrite = RewriteReport::default();
        rewrite.push(
            "a.kt".into(),
            FileOutcome::Rewritten {
                replacements: counts,
            },
        );
        rewrite.push("b.kt".into(), FileOutcome::Skipped);

        assert_eq!(rewrite.total_replacements(), 3);
        assert_eq!(rewrite.rewritten().count(), 1);
        assert_eq!(rewrite.skipped_count(), 1);
    }
}
