//! CLI command definitions using clap
//!
//! Defines the command structure for the `commitai` CLI tool.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::config::CommitStyle;

/// commitai - AI-powered git commit messages using Google Gemini
///
/// Analyzes your staged changes and suggests meaningful commit messages.
/// Run without a subcommand to generate and create commits.
#[derive(Parser, Debug)]
#[command(
    name = "commitai",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(flatten)]
    pub commit: CommitArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a tagged release with AI-generated release notes
    Release(ReleaseArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Print version and build information
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commit (default command)
// ─────────────────────────────────────────────────────────────────────────────

/// Options for the default commit command
#[derive(Args, Debug, Default)]
pub struct CommitArgs {
    /// Generate a separate commit per staged file
    #[arg(short = 'g', long, conflicts_with = "all")]
    pub granular: bool,

    /// Generate one commit message for all staged changes
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Let commitai pick between single and per-file commits (the default)
    #[arg(long, hide = true)]
    pub auto: bool,

    /// Preview commit messages without committing
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Language for messages (en, pt-br, ...)
    #[arg(short = 'l', long = "lang")]
    pub language: Option<String>,

    /// Commit message style
    #[arg(long)]
    pub style: Option<CommitStyle>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Release Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Release options
#[derive(Args, Debug, Default)]
pub struct ReleaseArgs {
    /// Bump major version (1.0.0 -> 2.0.0)
    #[arg(long, group = "version_source")]
    pub major: bool,

    /// Bump minor version (1.0.0 -> 1.1.0)
    #[arg(long, group = "version_source")]
    pub minor: bool,

    /// Bump patch version (1.0.0 -> 1.0.1)
    #[arg(long, group = "version_source")]
    pub patch: bool,

    /// Let AI suggest the version bump
    #[arg(short = 'a', long, group = "version_source")]
    pub auto: bool,

    /// Use a specific tag (e.g. v1.2.3)
    #[arg(long, group = "version_source")]
    pub tag: Option<String>,

    /// Preview without creating the tag
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Push the tag to origin after creation
    #[arg(short = 'p', long)]
    pub push: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Reset a configuration value to its default
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ConfigKey {
    /// Gemini API key
    #[value(name = "api-key")]
    ApiKey,

    /// Message language
    Language,

    /// Commit style (conventional, simple)
    Style,

    /// Gemini model identifier
    Model,

    /// Output token budget
    #[value(name = "max-tokens")]
    MaxTokens,

    /// Gemini API base URL
    Endpoint,
}
