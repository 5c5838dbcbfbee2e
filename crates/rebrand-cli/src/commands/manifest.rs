//! `rebrand manifest` - write the built-in preset as a starter manifest.

use std::io::Write as _;

use tracing::instrument;

use rebrand_adapters::{ManifestLoader, manifest::builtin};

use crate::{
    cli::ManifestArgs,
    commands::project_root,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ManifestArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = builtin::manifest();

    if args.print {
        let toml = manifest.to_toml()?;
        return std::io::stdout()
            .lock()
            .write_all(toml.as_bytes())
            .with_cli_context(|| "Failed to write manifest to stdout");
    }

    let root = project_root(&args.project)?;
    let path = ManifestLoader::new(&root)
        .file(&config.defaults.manifest)
        .write(&manifest, args.force)?;

    output.json("manifest", &serde_json::json!({ "path": path }))?;
    output.success(&format!("Wrote {}", path.display()))?;
    output.info("Edit [template], files and source_roots to match your template")?;
    Ok(())
}
