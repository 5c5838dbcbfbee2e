//! Implementation of the `rebrand init` command.
//!
//! Responsibility: merge flags, manifest and config into an `InitSpec`, ask
//! for confirmation, call the core `InitService`, and display the report.

use std::io::IsTerminal as _;
use std::path::Path;

use tracing::{debug, info, instrument};

use rebrand_adapters::{LocalFilesystem, Manifest, ManifestSource};
use rebrand_core::{
    application::{FileOutcome, InitReport, InitService, RootOutcome},
    domain::InitSpec,
    error::RebrandError,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::{load_manifest, project_root, relative},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `rebrand init` command.
///
/// Dispatch sequence:
/// 1. Resolve the project root and load the manifest
/// 2. Build the `InitSpec`, flags overriding manifest values
/// 3. Confirm with the user unless `--yes`, `--dry-run` or `--quiet`
/// 4. Run `initialize` (or `plan` for `--dry-run`)
/// 5. Render the report, failing on relocation errors (and file errors
///    under `--strict`)
#[instrument(skip_all, fields(app_id = %args.app_id))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Project + manifest
    let root = project_root(&args.project.project)?;
    let (manifest, source) = load_manifest(&args.project, &root, &config)?;
    debug!(%source, id = %manifest.template.id, "Manifest resolved");

    // 2. Spec
    let spec = build_spec(&args, &manifest, &root)?;
    let strict = args.strict || config.defaults.strict;

    // 3. Confirm
    if !args.dry_run && !args.yes && !global.quiet && !output.is_json() {
        show_configuration(&spec, &source, &output)?;
        if !std::io::stdin().is_terminal() {
            return Err(CliError::InvalidInput {
                message: "stdin is not a terminal, cannot ask for confirmation".into(),
                source: None,
            });
        }
        if !confirm("Rename the project?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Run
    let service = InitService::new(Box::new(LocalFilesystem::new()));
    let report = if args.dry_run {
        output.header(&format!("Dry run: {spec}"))?;
        service.plan(&spec)?
    } else {
        output.header(&format!("Initializing {spec}"))?;
        service.initialize(&spec)?
    };
    info!(
        dry_run = report.dry_run,
        rewritten = report.rewrite.rewritten().count(),
        relocated = report.relocation.relocated_count(),
        "Init finished"
    );

    // 5. Report
    render_report(&report, &root, &output)?;
    output.json("init", &report)?;

    let dry_run = report.dry_run;
    report.into_result(strict)?;

    if dry_run {
        output.info("Dry run: nothing was changed")?;
    } else {
        output.success(&format!("Project renamed to {}", spec.to))?;
        if !global.quiet {
            output.print("")?;
            output.print("Next steps:")?;
            output.print(&format!(
                "  rebrand check --id {} --name {}",
                spec.from.dotted_id, spec.from.display_name
            ))?;
        }
    }

    Ok(())
}

// ── Spec construction ─────────────────────────────────────────────────────────

fn build_spec(args: &InitArgs, manifest: &Manifest, root: &Path) -> CliResult<InitSpec> {
    let mut builder = manifest
        .to_spec_builder(root)
        .to_id(args.app_id.as_str())
        .to_name(args.app_name.as_str());

    if let Some(id) = &args.from_id {
        builder = builder.from_id(id.as_str());
    }
    if let Some(name) = &args.from_name {
        builder = builder.from_name(name.as_str());
    }

    builder
        .build()
        .map_err(|e| CliError::Core(RebrandError::Domain(e)))
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_configuration(
    spec: &InitSpec,
    source: &ManifestSource,
    output: &OutputManager,
) -> CliResult<()> {
    output.header("About to rename this project")?;
    output.print(&format!("  Project:  {}", spec.project_root.display()))?;
    output.print(&format!("  Manifest: {source}"))?;
    output.print(&format!("  From:     {}", spec.from))?;
    output.print(&format!("  To:       {}", spec.to))?;
    output.print(&format!(
        "  Files:    {}    Source roots: {}",
        spec.files.len(),
        spec.source_roots.len()
    ))?;
    output.print("")?;
    Ok(())
}

fn render_report(report: &InitReport, root: &Path, output: &OutputManager) -> CliResult<()> {
    let verb = if report.dry_run { "Would rewrite" } else { "Rewrote" };

    output.info(&format!(
        "{verb} {} file(s), {} replacement(s)",
        report.rewrite.rewritten().count(),
        report.rewrite.total_replacements()
    ))?;

    for file in &report.rewrite.files {
        let path = relative(root, &file.path);
        match &file.outcome {
            FileOutcome::Rewritten { replacements } => {
                output.detail(&format!("{path} ({})", replacements.total()))?;
            }
            FileOutcome::Skipped => output.detail(&format!("{path} (missing, skipped)"))?,
            FileOutcome::Unchanged => {}
            FileOutcome::Failed { error } => output.warning(&error.to_string())?,
        }
    }

    for root_report in &report.relocation.roots {
        let from = relative(root, &root_report.from_dir);
        let to = relative(root, &root_report.to_dir);
        match &root_report.outcome {
            RootOutcome::Relocated { stats } => {
                let verb = if report.dry_run { "Would move" } else { "Moved" };
                output.info(&format!("{verb} {from} -> {to}"))?;
                output.detail(&format!(
                    "{} file(s), {} overwritten, {} empty director(ies) pruned",
                    stats.files_moved, stats.files_overwritten, stats.ancestors_pruned
                ))?;
            }
            RootOutcome::Skipped => output.detail(&format!("{from} (missing, skipped)"))?,
            RootOutcome::Unchanged => output.detail(&format!("{from} (already in place)"))?,
            RootOutcome::Failed { error, .. } => output.error(&error.to_string())?,
        }
        for warning in &root_report.prune_warnings {
            output.warning(&warning.to_string())?;
        }
    }

    Ok(())
}

// ── Confirmation ──────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Confirmation prompt failed".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use rebrand_adapters::manifest::builtin;

    use crate::cli::ProjectArgs;

    fn init_args(app_id: &str, app_name: &str) -> InitArgs {
        InitArgs {
            app_id: app_id.into(),
            app_name: app_name.into(),
            from_id: None,
            from_name: None,
            project: ProjectArgs {
                project: PathBuf::from("."),
                manifest: None,
                builtin: false,
            },
            dry_run: false,
            yes: true,
            strict: false,
        }
    }

    #[test]
    fn spec_takes_identifier_from_manifest() {
        let spec = build_spec(
            &init_args("com.acme.rocket", "Rocket"),
            &builtin::manifest(),
            Path::new("/work"),
        )
        .unwrap();

        assert_eq!(spec.from.dotted_id.as_str(), builtin::TEMPLATE_ID);
        assert_eq!(spec.to.display_name.as_str(), "Rocket");
        assert_eq!(spec.files.len(), builtin::FILES.len());
        assert_eq!(spec.project_root, PathBuf::from("/work"));
    }

    #[test]
    fn from_flags_override_manifest() {
        let mut args = init_args("com.acme.rocket", "Rocket");
        args.from_id = Some("org.old.app".into());
        args.from_name = Some("Old".into());

        let spec = build_spec(&args, &builtin::manifest(), Path::new("/work")).unwrap();

        assert_eq!(spec.from.dotted_id.as_str(), "org.old.app");
        assert_eq!(spec.from.display_name.as_str(), "Old");
    }

    #[test]
    fn invalid_new_identifier_is_a_user_error() {
        let err = build_spec(
            &init_args("com..rocket", "Rocket"),
            &builtin::manifest(),
            Path::new("/work"),
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }
}
