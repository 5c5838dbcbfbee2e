//! Identifier rewriter - ordered literal substitutions, file by file.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem, FsResult},
        report::{FileOutcome, RewriteReport},
    },
    domain::{RewriteSpec, SubstitutionPlan},
};

use super::Mode;

/// Rewrites every declared file in place.
///
/// Files are independent: a failure on one is recorded and the next file is
/// processed.
pub struct IdentifierRewriter<'fs> {
    filesystem: &'fs dyn Filesystem,
}

impl<'fs> IdentifierRewriter<'fs> {
    pub fn new(filesystem: &'fs dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Rewrite all files in `spec`.
    #[instrument(skip_all, fields(from = %spec.from.dotted_id, to = %spec.to.dotted_id))]
    pub fn rewrite(&self, spec: &RewriteSpec) -> RewriteReport {
        self.run(spec, Mode::Apply)
    }

    /// Report what [`Self::rewrite`] would do without writing anything.
    #[instrument(skip_all, fields(from = %spec.from.dotted_id, to = %spec.to.dotted_id))]
    pub fn preview(&self, spec: &RewriteSpec) -> RewriteReport {
        self.run(spec, Mode::Preview)
    }

    pub(crate) fn run(&self, spec: &RewriteSpec, mode: Mode) -> RewriteReport {
        let plan = spec.plan();
        let mut report = RewriteReport::default();

        for path in &spec.files {
            let outcome = match self.rewrite_file(&plan, path, mode) {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(path = %path.display(), %error, "File rewrite failed");
                    FileOutcome::Failed { error }
                }
            };
            report.push(path.clone(), outcome);
        }

        report
    }

    fn rewrite_file(
        &self,
        plan: &SubstitutionPlan,
        path: &Path,
        mode: Mode,
    ) -> FsResult<FileOutcome> {
        match self.filesystem.entry_kind(path) {
            EntryKind::Missing => {
                debug!(path = %path.display(), "Skipping missing file");
                return Ok(FileOutcome::Skipped);
            }
            EntryKind::Directory | EntryKind::Other => {
                return Err(ApplicationError::FileAccess {
                    path: path.to_path_buf(),
                    operation: "rewrite",
                    reason: "not a regular file".into(),
                });
            }
            EntryKind::File | EntryKind::Symlink => {}
        }

        let original = self.filesystem.read_to_string(path)?;
        let rewritten = plan.apply(&original);

        if rewritten.content == original {
            debug!(path = %path.display(), "No occurrences");
            return Ok(FileOutcome::Unchanged);
        }

        if mode.applies() {
            self.filesystem.write_file(path, &rewritten.content)?;
            info!(
                path = %path.display(),
                replacements = rewritten.counts.total(),
                "Rewrote file"
            );
        }

        Ok(FileOutcome::Rewritten {
            replacements: rewritten.counts,
        })
    }
}
