//! Commit CLI command handler
//!
//! Collects staged changes, asks Gemini for messages in one request, then
//! creates either one commit or one commit per file.

use std::collections::HashSet;
use std::io::{self, BufRead};

use colored::Colorize;

use crate::ai::{CommitPlan, GeminiClient};
use crate::cli::commands::CommitArgs;
use crate::cli::ui::{self, Choice};
use crate::core::config::{CommitStyle, Config};
use crate::core::diff::FileChange;
use crate::core::git::GitRepository;
use crate::error::{CommitaiError, Result};

/// Number of recent commits sent as style context
const RECENT_COMMITS: usize = 5;

/// How staged files are grouped into commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Decide from the staged file layout
    #[default]
    Auto,
    /// One commit per file
    Granular,
    /// One commit for everything
    Single,
}

impl CommitMode {
    /// Whether to generate one message per file for these changes
    ///
    /// Auto picks granular when the nested paths span more than one
    /// top-level directory, or when three or more files are staged.
    pub fn is_granular(self, changes: &[FileChange]) -> bool {
        match self {
            CommitMode::Granular => true,
            CommitMode::Single => false,
            CommitMode::Auto => {
                if changes.len() <= 1 {
                    return false;
                }
                let top_dirs: HashSet<&str> = changes
                    .iter()
                    .filter_map(|c| c.path.split_once('/').map(|(dir, _)| dir))
                    .collect();
                top_dirs.len() > 1 || changes.len() >= 3
            }
        }
    }
}

/// Options for one commit invocation
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    pub mode: CommitMode,
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    pub language: Option<String>,
    pub style: Option<CommitStyle>,
}

impl From<CommitArgs> for CommitOptions {
    fn from(args: CommitArgs) -> Self {
        let mode = if args.granular {
            CommitMode::Granular
        } else if args.all {
            CommitMode::Single
        } else {
            CommitMode::Auto
        };

        Self {
            mode,
            dry_run: args.dry_run,
            yes: args.yes,
            language: args.language,
            style: args.style,
        }
    }
}

impl CommitOptions {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(style) = self.style {
            config.commit_style = style;
        }
    }
}

/// A file and the message it will be committed with
#[derive(Debug, Clone)]
pub struct PlannedCommit<'a> {
    pub change: &'a FileChange,
    pub message: String,
}

/// Handle the default commit command
pub async fn handle_commit(options: CommitOptions) -> Result<()> {
    let git = GitRepository::open_current_dir()?;

    let mut config = Config::load()?;
    options.apply_to(&mut config);
    let client = GeminiClient::new(&config)?;

    println!("{}", "🔍 Analyzing staged changes...".cyan());
    let changes = git.staged_changes()?;
    let granular = options.mode.is_granular(&changes);

    println!("{}", format!("\n📂 Staged files ({}):", changes.len()).cyan());
    for change in &changes {
        println!("  {} {}", ui::status_icon(&change.status), change.path);
    }

    let recent_commits = git.recent_commits(RECENT_COMMITS).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read recent commits");
        Vec::new()
    });

    println!(
        "{}",
        format!("\n✨ Generating commit message(s) with {}...", client.model_name()).cyan()
    );
    let plan = client
        .generate_commit_messages(&changes, granular, &recent_commits)
        .await?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match plan {
        CommitPlan::Single(message) => commit_single(&git, message, &options, &mut input),
        per_file @ CommitPlan::PerFile(_) => {
            let plans = plan_per_file(&changes, &per_file);
            commit_per_file(&git, plans, &options, &mut input)
        }
    }
}

/// Pair every staged file with its message, in collection order
pub fn plan_per_file<'a>(changes: &'a [FileChange], plan: &CommitPlan) -> Vec<PlannedCommit<'a>> {
    changes
        .iter()
        .map(|change| PlannedCommit {
            change,
            message: plan.message_for(&change.path),
        })
        .collect()
}

fn commit_single(
    git: &GitRepository,
    message: String,
    options: &CommitOptions,
    input: &mut impl BufRead,
) -> Result<()> {
    println!();
    println!("{}", "💬 Suggested commit message:".green());
    ui::print_boxed(&message);

    if options.dry_run {
        println!("{}", "\n🔍 Dry run — no commit was made.".yellow());
        return Ok(());
    }

    let message = if options.yes {
        message
    } else {
        match ui::ask_choice(input, "\n⚡ Use this message? [Y/n/e(dit)]: ")? {
            Choice::Accept => message,
            Choice::Reject => {
                println!("{}", "Commit cancelled.".yellow());
                return Ok(());
            }
            Choice::Edit => {
                println!("Enter your message (end with an empty line):");
                let edited = read_message(input)?;
                if edited.is_empty() {
                    message
                } else {
                    edited
                }
            }
        }
    };

    git.commit(&message)?;
    println!("{}", "\n✅ Committed successfully!".green());
    Ok(())
}

fn commit_per_file(
    git: &GitRepository,
    mut plans: Vec<PlannedCommit<'_>>,
    options: &CommitOptions,
    input: &mut impl BufRead,
) -> Result<()> {
    println!();
    println!("{}", "💬 Suggested commit messages (per file):".green());
    let total = plans.len();
    for (i, plan) in plans.iter().enumerate() {
        println!("\n[{}/{}] {}", i + 1, total, plan.change.path);
        ui::print_boxed(&plan.message);
    }

    if options.dry_run {
        println!("{}", "\n🔍 Dry run — no commits were made.".yellow());
        return Ok(());
    }

    if !options.yes {
        match ui::ask_choice(input, "\n⚡ Commit all with these messages? [Y/n/e(dit)]: ")? {
            Choice::Accept => {}
            Choice::Reject => {
                println!("{}", "Commit cancelled.".yellow());
                return Ok(());
            }
            Choice::Edit => {
                for plan in plans.iter_mut() {
                    println!(
                        "\nNew message for {} (empty line keeps the current one):",
                        plan.change.path
                    );
                    let edited = read_message(input)?;
                    if !edited.is_empty() {
                        plan.message = edited;
                    }
                }
            }
        }
    }

    let committed = apply_per_file(git, &plans)?;
    println!("{}", format!("\n🎉 All {} files committed!", committed).green());
    Ok(())
}

/// Unstage everything, then stage and commit each file in order
///
/// Each file is staged from a snapshot of the index taken up front, so the
/// commit holds exactly what was staged, never later working tree edits.
/// Stops at the first failure: commits already made stay in place and the
/// files not yet committed are staged again as they were.
pub fn apply_per_file(git: &GitRepository, plans: &[PlannedCommit<'_>]) -> Result<usize> {
    let snapshot = git.snapshot_index()?;
    tracing::debug!(tree = %snapshot, "snapshotted index");
    git.unstage_all()?;

    let total = plans.len();
    for (i, plan) in plans.iter().enumerate() {
        let path = &plan.change.path;

        let result = git
            .restore_staged_from(&snapshot, &plan.change.staging_paths())
            .map_err(|e| with_file_context(e, "stage", path))
            .and_then(|()| {
                git.commit(&plan.message)
                    .map_err(|e| with_file_context(e, "commit", path))
            });

        if let Err(err) = result {
            restage_remaining(git, &snapshot, &plans[i..]);
            return Err(err);
        }

        tracing::debug!(path = %path, "committed file");
        println!("{}", format!("  ✅ [{}/{}] {}", i + 1, total, path).green());
    }

    Ok(total)
}

fn restage_remaining(git: &GitRepository, snapshot: &str, remaining: &[PlannedCommit<'_>]) {
    let paths: Vec<&str> = remaining
        .iter()
        .flat_map(|plan| plan.change.staging_paths())
        .collect();

    if let Err(e) = git.restore_staged_from(snapshot, &paths) {
        tracing::warn!(error = %e, "could not stage uncommitted files again");
    }
}

fn with_file_context(err: CommitaiError, action: &str, path: &str) -> CommitaiError {
    match err {
        CommitaiError::GitCommand { output, .. } => CommitaiError::GitCommand {
            context: format!("Failed to {} {}", action, path),
            output,
        },
        other => other,
    }
}

/// Read lines until an empty line or end of input
fn read_message(input: &mut impl BufRead) -> io::Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines.join("\n"))
}
