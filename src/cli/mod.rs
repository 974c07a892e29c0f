//! CLI support for rank-lang
//!
//! Provides programmatic access to the `rank` commands so build tooling can
//! validate and apply rules without shelling out.

mod check;
mod convert;
mod docs;
mod sort;

pub use check::{CheckOptions, CheckResult, CheckedRule, execute_check};
pub use convert::json_to_versions;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use sort::{SortOptions, execute_sort};

use std::io;

use thiserror::Error;

use crate::{ConfigError, ValidationError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid rule: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'rank docs' to see available categories.")]
    UnknownCategory(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),
}
