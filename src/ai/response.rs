//! Parsing of Gemini reply text
//!
//! Granular replies follow a loose record format, one record per file:
//!
//! ```text
//! FILE: <path>
//! MESSAGE:
//! <message lines>
//! ---
//! ```
//!
//! The reply is free text from the model, so parsing is a permissive line
//! scan rather than a strict grammar.

use std::collections::HashMap;

use crate::core::diff::FileChange;

const RECORD_SEPARATOR: &str = "---";
const FILE_PREFIX: &str = "FILE:";
const MESSAGE_PREFIX: &str = "MESSAGE:";

/// Generated messages for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPlan {
    /// One message covering every staged file
    Single(String),
    /// One message per file path
    PerFile(HashMap<String, String>),
}

impl CommitPlan {
    /// Message for a file, falling back to a generic update message
    pub fn message_for(&self, path: &str) -> String {
        match self {
            CommitPlan::Single(message) => message.clone(),
            CommitPlan::PerFile(messages) => messages
                .get(path)
                .cloned()
                .unwrap_or_else(|| format!("chore: update {}", path)),
        }
    }
}

/// Build the plan from raw reply text
pub fn parse_commit_response(raw: &str, changes: &[FileChange], granular: bool) -> CommitPlan {
    if granular {
        CommitPlan::PerFile(parse_file_messages(raw, changes))
    } else {
        CommitPlan::Single(raw.trim().to_string())
    }
}

/// Decode `FILE:`/`MESSAGE:` records into a path → message map
///
/// Later records for the same path win. When no record parses and there
/// are staged files, every file gets the whole trimmed reply.
pub fn parse_file_messages(raw: &str, changes: &[FileChange]) -> HashMap<String, String> {
    let mut messages = HashMap::new();

    for block in raw.split(RECORD_SEPARATOR) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        if let Some((path, message)) = parse_record(block) {
            messages.insert(path, message);
        }
    }

    tracing::debug!(records = messages.len(), files = changes.len(), "parsed per-file reply");

    if messages.is_empty() && !changes.is_empty() {
        tracing::debug!("reply did not follow the record format, using it for every file");
        let whole = raw.trim().to_string();
        for change in changes {
            messages.insert(change.path.clone(), whole.clone());
        }
    }

    messages
}

fn parse_record(block: &str) -> Option<(String, String)> {
    let mut path = String::new();
    let mut lines: Vec<&str> = Vec::new();
    let mut in_message = false;

    for line in block.lines() {
        if let Some(rest) = line.strip_prefix(FILE_PREFIX) {
            path = rest.trim().to_string();
            in_message = false;
        } else if let Some(rest) = line.strip_prefix(MESSAGE_PREFIX) {
            in_message = true;
            let rest = rest.trim();
            if !rest.is_empty() {
                lines.push(rest);
            }
        } else if in_message {
            lines.push(line);
        }
    }

    let message = lines.join("\n").trim().to_string();
    if path.is_empty() || message.is_empty() {
        None
    } else {
        Some((path, message))
    }
}

/// Pull a version number out of a suggestion reply
///
/// Takes the first line starting with `v` or a digit, minus the `v`;
/// otherwise the whole trimmed reply.
pub fn extract_version(raw: &str) -> String {
    raw.trim()
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('v') || line.starts_with(|c: char| c.is_ascii_digit()))
        .map(|line| line.strip_prefix('v').unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}
