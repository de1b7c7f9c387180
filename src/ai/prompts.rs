//! Prompt templates for AI generation

use std::fmt::Write;

use crate::core::config::CommitStyle;
use crate::core::diff::FileChange;

/// Per-file diff budget when one message is generated per file
pub const GRANULAR_DIFF_LIMIT: usize = 3000;

/// Per-file diff budget when a single message covers every file
pub const SINGLE_DIFF_LIMIT: usize = 2000;

/// Appended to a diff cut at its budget
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

const CONVENTIONAL_TYPES: &str = "feat, fix, docs, style, refactor, test, chore, perf, ci, build";

/// Settings that shape the commit prompt
#[derive(Debug, Clone, Copy)]
pub struct PromptStyle<'a> {
    pub style: CommitStyle,
    pub language: &'a str,
}

/// Generate the prompt for commit message generation
///
/// In granular mode the model is told to answer with one
/// `FILE:`/`MESSAGE:`/`---` record per file.
pub fn commit_message_prompt(
    changes: &[FileChange],
    granular: bool,
    recent_commits: &[String],
    style: PromptStyle<'_>,
) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an expert developer writing git commit messages.\n\n");

    if style.style == CommitStyle::Conventional {
        prompt.push_str("Use Conventional Commits format: <type>(<scope>): <description>\n");
        let _ = writeln!(prompt, "Types: {}\n", CONVENTIONAL_TYPES);
    }

    if is_portuguese(style.language) {
        prompt.push_str("Write commit messages in Portuguese (pt-BR).\n\n");
    } else {
        prompt.push_str("Write commit messages in English.\n\n");
    }

    if !recent_commits.is_empty() {
        prompt.push_str("Recent commits for context:\n");
        for commit in recent_commits {
            let _ = writeln!(prompt, "  {}", commit);
        }
        prompt.push('\n');
    }

    if granular {
        let _ = writeln!(
            prompt,
            "I have {} staged file(s). Generate ONE commit message per file.",
            changes.len()
        );
        prompt.push_str(
            "Rules:\n\
             - Each message must be concise (max 72 chars for subject line)\n\
             - Add a blank line then a short body if needed\n\
             - Use this format for EVERY file\n\
             - Output format must be EXACTLY:\n\n\
             FILE: <filepath>\nMESSAGE:\n<commit message>\n---\n\n\
             Now here are the diffs:\n\n",
        );

        for change in changes {
            let _ = writeln!(prompt, "FILE: {} (status: {})", change.path, change.status);
            if !change.diff.is_empty() {
                prompt.push_str("DIFF:\n```\n");
                prompt.push_str(&truncate_diff(&change.diff, GRANULAR_DIFF_LIMIT));
                prompt.push_str("\n```\n");
            }
            prompt.push('\n');
        }
    } else {
        prompt.push_str(
            "Generate ONE single commit message that summarizes ALL the following staged changes.\n\
             Rules:\n\
             - Subject line: max 72 chars\n\
             - Add a blank line then bullet points listing key changes if there are multiple files\n\
             - Output ONLY the commit message, nothing else.\n\n\
             Staged changes:\n\n",
        );

        for change in changes {
            let _ = writeln!(prompt, "FILE: {} (status: {})", change.path, change.status);
            if !change.diff.is_empty() {
                prompt.push_str("```\n");
                prompt.push_str(&truncate_diff(&change.diff, SINGLE_DIFF_LIMIT));
                prompt.push_str("\n```\n");
            }
            prompt.push('\n');
        }
    }

    prompt
}

/// Generate the prompt for release notes
pub fn release_notes_prompt(commits: &[String], current_tag: Option<&str>, new_tag: &str) -> String {
    let mut prompt = String::from("You are a developer writing GitHub release notes.\n\n");

    let _ = write!(prompt, "Generate release notes for version {}", new_tag);
    if let Some(current) = current_tag {
        let _ = write!(prompt, " (previous: {})", current);
    }
    prompt.push_str(".\n\n");

    prompt.push_str(
        "Rules:\n\
         - Use markdown\n\
         - Group into sections: ## 🚀 Features, ## 🐛 Bug Fixes, ## 🔧 Improvements, ## 📚 Docs (omit empty sections)\n\
         - Be concise and user-friendly\n\
         - Start with a one-sentence summary\n\
         - Output ONLY the release notes markdown\n\n\
         Commits since last release:\n",
    );
    for commit in commits {
        let _ = writeln!(prompt, "- {}", commit);
    }

    prompt
}

/// Generate the prompt for a semantic version suggestion
pub fn next_version_prompt(commits: &[String], current_tag: Option<&str>) -> String {
    let mut prompt =
        String::from("You are a versioning expert using Semantic Versioning (semver).\n\n");

    match current_tag {
        Some(current) => {
            let _ = writeln!(prompt, "Current version: {}", current);
        }
        None => prompt.push_str("Current version: none (first release)\n"),
    }

    prompt.push_str(
        "\nBased on these commits, suggest the next version number.\n\
         Rules:\n\
         - MAJOR: breaking changes (feat! or BREAKING CHANGE)\n\
         - MINOR: new features (feat:)\n\
         - PATCH: fixes and other changes\n\
         - If no current version, suggest 0.1.0\n\
         - Output ONLY the version number (e.g. 1.2.3), no 'v' prefix, no explanation\n\n\
         Commits:\n",
    );
    for commit in commits {
        let _ = writeln!(prompt, "- {}", commit);
    }

    prompt
}

/// Hard character cutoff; may cut mid-line
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &diff[..cut], TRUNCATION_MARKER),
        None => diff.to_string(),
    }
}

/// Only Portuguese has its own directive; every other code gets English
fn is_portuguese(language: &str) -> bool {
    language.eq_ignore_ascii_case("pt") || language.eq_ignore_ascii_case("pt-br")
}
