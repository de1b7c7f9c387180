//! AI integration module
//!
//! This module provides Gemini AI integration for generating:
//! - Commit messages (single or one per file)
//! - Release notes and version suggestions

pub mod gemini;
pub mod prompts;
pub mod response;

pub use gemini::GeminiClient;
pub use response::CommitPlan;
