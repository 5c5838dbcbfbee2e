//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on `rebrand-core` and
//! `rebrand-adapters`, then render the outcome. No business logic lives here.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod manifest;

use std::path::{Path, PathBuf};

use rebrand_adapters::{Manifest, ManifestLoader, ManifestSource};
use rebrand_core::{application::ApplicationError, error::RebrandError};

use crate::{
    cli::ProjectArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Resolve `--project` to an absolute, symlink-free directory.
pub(crate) fn project_root(path: &Path) -> CliResult<PathBuf> {
    let root = path.canonicalize().map_err(|e| {
        CliError::Core(RebrandError::Application(
            ApplicationError::ProjectRootInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        ))
    })?;

    if !root.is_dir() {
        return Err(CliError::Core(RebrandError::Application(
            ApplicationError::ProjectRootInvalid {
                path: root,
                reason: "not a directory".into(),
            },
        )));
    }
    Ok(root)
}

/// Manifest file from `--manifest`, else the configured default.
pub(crate) fn manifest_file(args: &ProjectArgs, config: &AppConfig) -> PathBuf {
    args.manifest
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.defaults.manifest))
}

/// Load the project's manifest, honouring `--builtin`.
pub(crate) fn load_manifest(
    args: &ProjectArgs,
    root: &Path,
    config: &AppConfig,
) -> CliResult<(Manifest, ManifestSource)> {
    let loader = ManifestLoader::new(root).file(manifest_file(args, config));
    Ok(loader.resolve(args.builtin)?)
}

/// `path` relative to `root` for display, unchanged when outside it.
pub(crate) fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
