//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "rebrand",
    bin_name = "rebrand",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Turn a cloned project template into your own project",
    long_about = "rebrand renames a template checkout: it rewrites the template's \
                  identifier in the declared files and moves the package \
                  directories under each source root.",
    after_help = "EXAMPLES:\n\
        \x20 rebrand init --app-id com.acme.rocket --app-name Rocket\n\
        \x20 rebrand init --app-id com.acme.rocket --app-name Rocket --dry-run\n\
        \x20 rebrand check --id com.acme.rocket --name Rocket\n\
        \x20 rebrand completions bash > /usr/share/bash-completion/completions/rebrand",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rename the template project.
    #[command(
        about = "Rename the template to a new identifier",
        after_help = "EXAMPLES:\n\
            \x20 rebrand init --app-id com.acme.rocket --app-name Rocket\n\
            \x20 rebrand init --app-id com.acme.rocket --app-name Rocket --builtin --yes\n\
            \x20 rebrand init --app-id org.demo --app-name Demo --project ../demo --dry-run"
    )]
    Init(InitArgs),

    /// Look for identifier forms left in the project.
    #[command(
        about = "Find leftover occurrences of an identifier",
        after_help = "EXAMPLES:\n\
            \x20 rebrand check                      # the manifest's identifier\n\
            \x20 rebrand check --id io.github.bamboo.krust --name Krust"
    )]
    Check(CheckArgs),

    /// Write a starter manifest.
    #[command(
        about = "Write a starter rebrand.toml",
        after_help = "EXAMPLES:\n\
            \x20 rebrand manifest\n\
            \x20 rebrand manifest --force --project ../template"
    )]
    Manifest(ManifestArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 rebrand completions bash > ~/.local/share/bash-completion/completions/rebrand\n\
            \x20 rebrand completions zsh  > ~/.zfunc/_rebrand\n\
            \x20 rebrand completions fish > ~/.config/fish/completions/rebrand.fish"
    )]
    Completions(CompletionsArgs),

    /// Show the rebrand configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 rebrand config get defaults.strict\n\
            \x20 rebrand config list\n\
            \x20 rebrand config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where to find the project and its manifest.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project root.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "DIR",
        default_value = ".",
        help = "Project root (default: current directory)"
    )]
    pub project: PathBuf,

    /// Manifest file, relative to the project root.
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Manifest file (default: rebrand.toml)"
    )]
    pub manifest: Option<PathBuf>,

    /// Fall back to the built-in Android + Rust preset.
    #[arg(
        long = "builtin",
        help = "Use the built-in template preset when no manifest exists"
    )]
    pub builtin: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `rebrand init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// New dotted identifier, e.g. `com.acme.rocket`.
    #[arg(long = "app-id", value_name = "ID", help = "New application id")]
    pub app_id: String,

    /// New display name, e.g. `Rocket`.
    #[arg(long = "app-name", value_name = "NAME", help = "New application name")]
    pub app_name: String,

    /// Override the manifest's current identifier.
    #[arg(
        long = "from-id",
        value_name = "ID",
        help = "Identifier the template uses now"
    )]
    pub from_id: Option<String>,

    /// Override the manifest's current display name.
    #[arg(
        long = "from-name",
        value_name = "NAME",
        help = "Display name the template uses now"
    )]
    pub from_name: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Preview the changes without writing anything.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,

    /// Treat per-file failures as fatal.
    #[arg(long = "strict", help = "Fail when any file could not be rewritten")]
    pub strict: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `rebrand check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Identifier to look for (default: the manifest's).
    #[arg(long = "id", value_name = "ID", help = "Dotted identifier to look for")]
    pub id: Option<String>,

    /// Display name to look for (default: the manifest's).
    #[arg(long = "name", value_name = "NAME", help = "Display name to look for")]
    pub name: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

// ── manifest ──────────────────────────────────────────────────────────────────

/// Arguments for `rebrand manifest`.
#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Project root.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "DIR",
        default_value = ".",
        help = "Project root (default: current directory)"
    )]
    pub project: PathBuf,

    /// Overwrite an existing manifest.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing manifest")]
    pub force: bool,

    /// Print the manifest instead of writing it.
    #[arg(long = "print", help = "Print to stdout instead of writing")]
    pub print: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `rebrand completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `rebrand config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.strict`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
