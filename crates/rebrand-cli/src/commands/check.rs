//! `rebrand check` - look for identifier forms left in a project.

use tracing::{debug, instrument};

use rebrand_adapters::ResidueScanner;
use rebrand_core::{domain::Identifier, error::RebrandError};

use crate::{
    cli::CheckArgs,
    commands::{load_manifest, manifest_file, project_root},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Scan the project and fail when anything is left.
#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = project_root(&args.project.project)?;
    let identifier = resolve_identifier(&args, &root, &config)?;
    debug!(%identifier, "Scanning for residue");

    // The manifest names the template identifier on purpose.
    let manifest = manifest_file(&args.project, &config);
    let manifest = manifest
        .strip_prefix(&root)
        .map(|p| p.to_path_buf())
        .unwrap_or(manifest);

    let report = ResidueScanner::new(&root)
        .ignore_file(manifest)
        .scan(&identifier)?;

    output.json("check", &report)?;

    output.header(&format!("Scanning {} for {identifier}", root.display()))?;
    for residue in &report.matches {
        let forms: Vec<String> = residue
            .counts
            .iter()
            .map(|(form, count)| format!("{form}: {count}"))
            .collect();
        output.warning(&format!(
            "{} ({})",
            residue.path.display(),
            forms.join(", ")
        ))?;
    }
    for dir in &report.stale_directories {
        output.warning(&format!("{}/ (stale package directory)", dir.display()))?;
    }
    if report.binary_skipped > 0 {
        output.detail(&format!(
            "{} non-text file(s) not scanned",
            report.binary_skipped
        ))?;
    }

    if !report.is_clean() {
        return Err(CliError::ResidueFound {
            occurrences: report.total_occurrences(),
            files: report.matches.len(),
            directories: report.stale_directories.len(),
        });
    }

    output.success(&format!(
        "No trace of {identifier} in {} file(s)",
        report.files_scanned
    ))?;
    Ok(())
}

/// `--id`/`--name` when both are given; the manifest fills in the rest.
fn resolve_identifier(
    args: &CheckArgs,
    root: &std::path::Path,
    config: &AppConfig,
) -> CliResult<Identifier> {
    let parsed = match (&args.id, &args.name) {
        (Some(id), Some(name)) => Identifier::parse(id, name),
        (id, name) => {
            let (manifest, _) = load_manifest(&args.project, root, config)?;
            Identifier::parse(
                id.as_deref().unwrap_or(&manifest.template.id),
                name.as_deref().unwrap_or(&manifest.template.name),
            )
        }
    };
    parsed.map_err(|e| CliError::Core(RebrandError::Domain(e)))
}
