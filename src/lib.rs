//! commitai - AI-generated git commit messages and release notes
//!
//! This library sends staged diffs to Google Gemini and turns the reply
//! into one commit, one commit per file, or an annotated release tag.

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;

pub use error::{AiError, CommitaiError, Result};
