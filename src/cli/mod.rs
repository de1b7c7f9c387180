//! CLI module for commitai
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod commit;
pub mod config;
pub mod release;
pub mod ui;

pub use commands::{Cli, Commands};
