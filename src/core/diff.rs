//! Staged change model and unified diff splitting
//!
//! Turns the output of `git diff --cached -z --name-status` and
//! `git diff --cached` into one [`FileChange`] per staged path.

use std::collections::HashMap;
use std::fmt;

/// Marker that opens a file section in a unified diff
const DIFF_HEADER: &str = "diff --git ";

/// Status of a staged file as reported by git
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    /// Any other status code (copy, type change, ...), kept verbatim
    Other(String),
}

impl FileStatus {
    /// Parse a name-status code such as `M`, `A` or `R100`
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => FileStatus::Added,
            Some('M') => FileStatus::Modified,
            Some('D') => FileStatus::Deleted,
            Some('R') => FileStatus::Renamed,
            _ => FileStatus::Other(code.to_string()),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "added"),
            FileStatus::Modified => write!(f, "modified"),
            FileStatus::Deleted => write!(f, "deleted"),
            FileStatus::Renamed => write!(f, "renamed"),
            FileStatus::Other(code) => write!(f, "{}", code),
        }
    }
}

/// A staged file together with its own section of the combined diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path relative to the repository root (new path for renames)
    pub path: String,
    pub status: FileStatus,
    /// Previous path for renames and copies
    pub old_path: Option<String>,
    /// This file's section of the unified diff, empty if none was produced
    pub diff: String,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            old_path: None,
            diff: String::new(),
        }
    }

    /// Paths that must be staged together to reproduce this change
    pub fn staging_paths(&self) -> Vec<&str> {
        match &self.old_path {
            Some(old) => vec![old.as_str(), self.path.as_str()],
            None => vec![self.path.as_str()],
        }
    }
}

/// Parse `git diff --cached -z --name-status` output
///
/// Fields are NUL separated and paths are never quoted. Renames and copies
/// carry two paths (`R100\0old\0new`): the change is keyed by the new path
/// and keeps the old one as `old_path`.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    let mut fields = output.split('\0').filter(|field| !field.is_empty());
    let mut changes = Vec::new();

    while let Some(code) = fields.next() {
        let code = code.trim();
        let Some(first) = fields.next() else {
            break;
        };

        let change = if code.starts_with('R') || code.starts_with('C') {
            let Some(new_path) = fields.next() else {
                break;
            };
            let mut change = FileChange::new(new_path, FileStatus::from_code(code));
            change.old_path = Some(first.to_string());
            change
        } else {
            FileChange::new(first, FileStatus::from_code(code))
        };
        changes.push(change);
    }

    changes
}

/// Split a combined unified diff into per-file sections keyed by path
///
/// The path is the text after the last ` b/` on the `diff --git` line, so a
/// path that itself contains ` b/` is keyed by its trailing segment only.
/// Each section keeps its own header line.
pub fn split_diff_by_file(diff: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();
    let mut current_path: Option<String> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in diff.split('\n') {
        if line.starts_with(DIFF_HEADER) {
            if let Some(path) = current_path.take() {
                sections.insert(path, current_lines.join("\n"));
            }

            current_path = header_path(line);
            current_lines = vec![line];
        } else {
            current_lines.push(line);
        }
    }

    if let Some(path) = current_path {
        sections.insert(path, current_lines.join("\n"));
    }

    sections
}

/// Destination path of a `diff --git` header line
///
/// `diff --git a/path b/path` gives `path`. Paths git had to quote
/// (`"b/tab\there"`) are unquoted.
fn header_path(header: &str) -> Option<String> {
    let rest = header.strip_prefix(DIFF_HEADER)?;

    if let Some(quoted) = rest.strip_suffix('"') {
        let (_, path) = quoted.rsplit_once(" \"b/")?;
        return Some(unquote_c_style(path));
    }

    rest.rsplit_once(" b/").map(|(_, path)| path.to_string())
}

/// Undo git's C-style path quoting (`\"`, `\\`, `\t`, `\n`, octal bytes)
fn unquote_c_style(quoted: &str) -> String {
    let raw = quoted.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] != b'\\' || i + 1 == raw.len() {
            bytes.push(raw[i]);
            i += 1;
            continue;
        }

        let escaped = raw[i + 1];
        if (b'0'..=b'7').contains(&escaped) {
            let mut value: u8 = 0;
            let mut consumed = 0;
            while consumed < 3 {
                match raw.get(i + 1 + consumed) {
                    Some(d) if (b'0'..=b'7').contains(d) => {
                        value = value.wrapping_mul(8).wrapping_add(d - b'0');
                        consumed += 1;
                    }
                    _ => break,
                }
            }
            bytes.push(value);
            i += 1 + consumed;
            continue;
        }

        bytes.push(match escaped {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            other => other,
        });
        i += 2;
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Attach each change's diff section from the combined diff
pub fn attach_diffs(changes: &mut [FileChange], full_diff: &str) {
    let mut sections = split_diff_by_file(full_diff);
    for change in changes.iter_mut() {
        if let Some(section) = sections.remove(&change.path) {
            change.diff = section;
        }
    }
}
