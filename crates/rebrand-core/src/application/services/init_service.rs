//! Init Service - main application orchestrator.
//!
//! This service coordinates the whole initialization workflow:
//! 1. Validate the spec and the project root
//! 2. Rewrite identifiers in the declared files
//! 3. Relocate the namespace directory under every source root
//!
//! Steps 2 and 3 are independent; a file failure does not stop relocation.

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
        report::InitReport,
    },
    domain::{DomainValidator as validator, InitSpec},
    error::RebrandResult,
};

use super::{IdentifierRewriter, Mode, TreeRelocator};

/// Main initialization service.
pub struct InitService {
    filesystem: Box<dyn Filesystem>,
}

impl InitService {
    /// Create a new init service on top of a filesystem adapter.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Rename the template project described by `spec`.
    ///
    /// Errors are returned only for problems found before anything is
    /// touched. Per-file and per-root failures are collected in the report;
    /// use [`InitReport::into_result`] to decide whether they are fatal.
    #[instrument(skip_all, fields(spec = %spec, project = %spec.project_root.display()))]
    pub fn initialize(&self, spec: &InitSpec) -> RebrandResult<InitReport> {
        self.prepare(spec)?;
        info!("Initializing project");

        let report = self.run(spec, Mode::Apply);
        log_summary(&report);
        Ok(report)
    }

    /// Compute the report of [`Self::initialize`] without changing anything.
    #[instrument(skip_all, fields(spec = %spec, project = %spec.project_root.display()))]
    pub fn plan(&self, spec: &InitSpec) -> RebrandResult<InitReport> {
        self.prepare(spec)?;
        info!("Planning project initialization");

        Ok(self.run(spec, Mode::Preview))
    }

    fn prepare(&self, spec: &InitSpec) -> RebrandResult<()> {
        validator::validate_init_spec(spec)?;

        match self.filesystem.entry_kind(&spec.project_root) {
            EntryKind::Directory => Ok(()),
            EntryKind::Missing => Err(ApplicationError::ProjectRootInvalid {
                path: spec.project_root.clone(),
                reason: "directory does not exist".into(),
            }
            .into()),
            _ => Err(ApplicationError::ProjectRootInvalid {
                path: spec.project_root.clone(),
                reason: "not a directory".into(),
            }
            .into()),
        }
    }

    fn run(&self, spec: &InitSpec, mode: Mode) -> InitReport {
        let fs = self.filesystem.as_ref();

        let rewrite = IdentifierRewriter::new(fs).run(&spec.rewrite_spec(), mode);
        let relocation = TreeRelocator::new(fs).run(&spec.relocation_spec(), mode);

        InitReport {
            dry_run: !mode.applies(),
            rewrite,
            relocation,
        }
    }
}

fn log_summary(report: &InitReport) {
    if report.is_success() {
        info!(
            files = report.rewrite.rewritten().count(),
            roots = report.relocation.relocated_count(),
            "Initialization completed successfully"
        );
    } else {
        warn!(
            failed_files = report.failed_files(),
            failed_roots = report.failed_roots(),
            "Initialization finished with failures"
        );
    }
}
