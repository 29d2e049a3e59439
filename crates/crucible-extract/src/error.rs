//! Error types for crucible-extract.

use smol_str::SmolStr;
use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors produced while slicing test functions out of suite sources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A declared prototype has no matching definition in the
    /// implementation file.
    #[error("no definition found for `{name}`")]
    DefinitionNotFound { name: SmolStr },

    /// End of input was reached before the brace counts balanced.
    #[error("unbalanced braces in function starting at line {line}")]
    UnbalancedBraces { line: usize },
}
