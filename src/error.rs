//! Custom error types for commitai
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the commitai application
#[derive(Error, Debug)]
pub enum CommitaiError {
    /// Not running in a git repository
    #[error("This directory is not a git repository.\n\n  → Run 'git init' to create one, or navigate to an existing git project.")]
    NotGitRepository,

    /// Nothing staged for commit
    #[error("No staged changes found.\n\n  → Use 'git add' to stage files first.")]
    NoStagedChanges,

    /// Gemini API key not configured
    #[error("Gemini API key is not set.\n\n  → Get an API key from https://aistudio.google.com/apikey\n  → Run 'commitai config set api-key YOUR_KEY' or set the GEMINI_API_KEY environment variable.")]
    ApiKeyMissing,

    /// Backend call failed
    #[error("AI generation failed: {0}")]
    Ai(#[from] AiError),

    /// A git command exited unsuccessfully
    #[error("{context}: {output}")]
    GitCommand {
        /// What was being attempted
        context: String,
        /// Combined output of the failed command
        output: String,
    },

    /// Git library error
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// Tag already exists
    #[error("Tag '{0}' already exists.\n\n  → Delete it with 'git tag -d {0}' or choose a different version.")]
    TagAlreadyExists(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

/// Failures of a single Gemini `generateContent` round trip
#[derive(Error, Debug)]
pub enum AiError {
    /// Connection, timeout, or body read failure
    #[error("request to Gemini failed: {0}\n\n  → Check your internet connection.")]
    Transport(#[source] reqwest::Error),

    /// Reply body was not a Gemini envelope
    #[error("failed to parse Gemini response: {source}\nBody: {body}")]
    Protocol {
        #[source]
        source: serde_json::Error,
        /// Raw reply body, kept for diagnosis
        body: String,
    },

    /// Envelope carried a structured error object
    #[error("Gemini API error: {message}\n\n  → Check your Gemini API key with 'commitai config get api-key'.")]
    Backend {
        /// Message reported by the API
        message: String,
    },

    /// Envelope had no candidate text
    #[error("empty response from Gemini")]
    EmptyResponse,
}

impl From<toml::de::Error> for CommitaiError {
    fn from(err: toml::de::Error) -> Self {
        CommitaiError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for CommitaiError {
    fn from(err: toml::ser::Error) -> Self {
        CommitaiError::Toml(err.to_string())
    }
}

/// Result type alias using CommitaiError
pub type Result<T> = std::result::Result<T, CommitaiError>;
