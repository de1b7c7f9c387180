//! Release CLI command handler

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use colored::Colorize;

use crate::ai::GeminiClient;
use crate::cli::commands::ReleaseArgs;
use crate::cli::ui::{self, Choice};
use crate::core::config::Config;
use crate::core::git::GitRepository;
use crate::core::version::{bump_version, strip_v, BumpLevel};
use crate::error::Result;

/// Where the next version number comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Explicit tag given by the user
    Explicit(String),
    /// Ask Gemini
    Suggested,
    /// Increment the latest tag
    Bump(BumpLevel),
}

/// Options for one release invocation
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    pub source: VersionSource,
    pub dry_run: bool,
    pub push: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

impl From<ReleaseArgs> for ReleaseOptions {
    fn from(args: ReleaseArgs) -> Self {
        let source = if let Some(tag) = args.tag {
            VersionSource::Explicit(tag)
        } else if args.auto {
            VersionSource::Suggested
        } else {
            VersionSource::Bump(BumpLevel::from_flags(args.major, args.minor))
        };

        Self {
            source,
            dry_run: args.dry_run,
            push: args.push,
            yes: args.yes,
        }
    }
}

/// Handle the release command
pub async fn handle_release(options: ReleaseOptions) -> Result<()> {
    let git = GitRepository::open_current_dir()?;
    let config = Config::load()?;
    let client = GeminiClient::new(&config)?;

    let current_tag = git.latest_tag();
    println!(
        "{}",
        format!("📦 Current version: {}", current_tag.as_deref().unwrap_or("none")).cyan()
    );

    let commits = git.commits_since_tag(current_tag.as_deref())?;
    if commits.is_empty() {
        println!("{}", "No commits since last tag. Nothing to release.".yellow());
        return Ok(());
    }
    println!("{}", format!("📝 {} commit(s) since last tag", commits.len()).cyan());

    let new_version = match &options.source {
        VersionSource::Explicit(tag) => strip_v(tag).to_string(),
        VersionSource::Suggested => {
            println!("{}", "\n🤖 Asking AI to suggest version bump...".cyan());
            client
                .suggest_next_version(&commits, current_tag.as_deref())
                .await?
        }
        VersionSource::Bump(level) => bump_version(current_tag.as_deref(), *level),
    };

    let new_tag = format!("v{}", new_version);
    println!("{}", format!("🏷️  New version: {}", new_tag).cyan());

    println!("{}", "\n✨ Generating release notes with Gemini...".cyan());
    let notes = client
        .generate_release_notes(&commits, current_tag.as_deref(), &new_tag)
        .await?;

    println!();
    println!("{}", "📋 Release Notes:".green());
    ui::print_boxed(&notes);

    if options.dry_run {
        println!("{}", "\n🔍 Dry run — no tag was created.".yellow());
        return Ok(());
    }

    if !options.yes {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        if !confirm_tag(&mut input, &new_tag)? {
            println!("{}", "Release cancelled.".yellow());
            return Ok(());
        }
    }

    git.create_annotated_tag(&new_tag, &notes)?;
    println!("{}", format!("\n✅ Tag {} created!", new_tag).green());

    let notes_file = git.root_dir().join(release_notes_file_name(&new_tag));
    match write_release_notes(&notes_file, &notes) {
        Ok(()) => println!(
            "{}",
            format!("📄 Release notes saved to {}", notes_file.display()).cyan()
        ),
        Err(e) => tracing::warn!(error = %e, path = %notes_file.display(), "could not save release notes"),
    }

    if options.push {
        println!("{}", "\n📤 Pushing tag to origin...".cyan());
        git.push_tag(&new_tag)?;
        println!("{}", "✅ Tag pushed to origin!".green());
    }

    Ok(())
}

/// `RELEASE-<tag>.md`
pub fn release_notes_file_name(tag: &str) -> String {
    format!("RELEASE-{}.md", tag)
}

fn write_release_notes(path: &Path, notes: &str) -> io::Result<()> {
    fs::write(path, notes)
}

/// `[Y/n]` prompt; only an explicit no declines
fn confirm_tag(input: &mut impl BufRead, tag: &str) -> io::Result<bool> {
    let choice = ui::ask_choice(input, &format!("\n⚡ Create tag {}? [Y/n]: ", tag))?;
    Ok(choice != Choice::Reject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_args() {
        let explicit = ReleaseOptions::from(ReleaseArgs {
            tag: Some("v1.2.3".to_string()),
            ..Default::default()
        });
        assert_eq!(explicit.source, VersionSource::Explicit("v1.2.3".to_string()));

        let auto = ReleaseOptions::from(ReleaseArgs {
            auto: true,
            push: true,
            ..Default::default()
        });
        assert_eq!(auto.source, VersionSource::Suggested);
        assert!(auto.push);

        let default = ReleaseOptions::from(ReleaseArgs::default());
        assert_eq!(default.source, VersionSource::Bump(BumpLevel::Patch));

        let minor = ReleaseOptions::from(ReleaseArgs {
            minor: true,
            ..Default::default()
        });
        assert_eq!(minor.source, VersionSource::Bump(BumpLevel::Minor));
    }

    #[test]
    fn test_release_notes_file_name() {
        assert_eq!(release_notes_file_name("v1.0.0"), "RELEASE-v1.0.0.md");
    }

    #[test]
    fn test_confirm_tag() {
        assert!(confirm_tag(&mut io::Cursor::new("\n"), "v1.0.0").unwrap());
        assert!(confirm_tag(&mut io::Cursor::new("y\n"), "v1.0.0").unwrap());
        assert!(!confirm_tag(&mut io::Cursor::new("no\n"), "v1.0.0").unwrap());
    }
}
