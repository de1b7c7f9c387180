//! commitai - AI-powered git commit messages
//!
//! Run without arguments to generate commits for the staged changes, or use
//! subcommands for releases and configuration.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use commitai::cli::commands::{Cli, Commands};
use commitai::cli::{commit, config, release};
use commitai::core::git::GitRepository;
use commitai::error::{CommitaiError, Result};

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => {}
        // Not configured yet is a warning, not a failure
        Err(e @ CommitaiError::ApiKeyMissing) => {
            println!("{}", format!("⚠️  {}", e).yellow());
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Config and version commands don't require a git repository
        Some(Commands::Config(args)) => config::handle_config(args.command),
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }

        Some(Commands::Release(args)) => {
            ensure_git_repository()?;
            release::handle_release(args.into()).await
        }
        None => {
            ensure_git_repository()?;
            commit::handle_commit(cli.commit.into()).await
        }
    }
}

fn print_version() {
    println!(
        "commitai {} (commit: {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("COMMITAI_GIT_COMMIT").unwrap_or("unknown")
    );
}

/// Ensure we're in a git repository
fn ensure_git_repository() -> Result<()> {
    if !GitRepository::is_git_repository() {
        return Err(CommitaiError::NotGitRepository);
    }
    Ok(())
}
