//! Error types for abbrkit operations.

use thiserror::Error;

/// Errors that can occur while rewriting a token stream.
///
/// Malformed definition lines are not errors: the scanner simply declines
/// them and the host hands the line to its next block rule.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to compile abbreviation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
