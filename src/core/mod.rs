//! Core functionality for commitai
//!
//! This module contains shared business logic including:
//! - Git repository operations and staged diff collection
//! - Application configuration
//! - Release version arithmetic

pub mod config;
pub mod diff;
pub mod git;
pub mod version;

pub use config::{CommitStyle, Config};
pub use diff::{FileChange, FileStatus};
pub use git::GitRepository;
