//! Console output helpers and confirmation prompts

use std::io::{self, BufRead, Write};

use colored::{ColoredString, Colorize};

use crate::core::diff::FileStatus;

const RULE_WIDTH: usize = 60;

/// Answer to a `[Y/n/e(dit)]` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Reject,
    Edit,
}

impl Choice {
    /// Parse a typed answer; anything unrecognized (including empty) accepts
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "n" | "no" => Choice::Reject,
            "e" | "edit" => Choice::Edit,
            _ => Choice::Accept,
        }
    }
}

/// Print a message between horizontal rules
pub fn print_boxed(text: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("{}", rule);
    println!("{}", text);
    println!("{}", rule);
}

/// Colored icon for a file status
pub fn status_icon(status: &FileStatus) -> ColoredString {
    match status {
        FileStatus::Added => "✚".green(),
        FileStatus::Modified => "●".yellow(),
        FileStatus::Deleted => "✖".red(),
        FileStatus::Renamed => "→".cyan(),
        FileStatus::Other(_) => "?".normal(),
    }
}

/// Print a question and read one answer line
pub fn ask(reader: &mut impl BufRead, question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Ask a `[Y/n/e(dit)]` style question
pub fn ask_choice(reader: &mut impl BufRead, question: &str) -> io::Result<Choice> {
    Ok(Choice::parse(&ask(reader, question)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse(""), Choice::Accept);
        assert_eq!(Choice::parse("Y\n"), Choice::Accept);
        assert_eq!(Choice::parse(" no "), Choice::Reject);
        assert_eq!(Choice::parse("N"), Choice::Reject);
        assert_eq!(Choice::parse("e"), Choice::Edit);
        assert_eq!(Choice::parse("EDIT"), Choice::Edit);
    }

    #[test]
    fn test_ask_reads_one_line() {
        let mut input = io::Cursor::new("first\nsecond\n");
        assert_eq!(ask(&mut input, "? ").unwrap(), "first");
        assert_eq!(ask(&mut input, "? ").unwrap(), "second");
    }
}
