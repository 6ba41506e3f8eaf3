//! Error types and handling for bx core

use thiserror::Error;

/// Result type alias for bx core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bx core
#[derive(Error, Debug)]
pub enum Error {
    /// Route pattern errors
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Route table configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Regex compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors raised while compiling a route path pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern '{pattern}' must start with '/'")]
    MissingLeadingSlash { pattern: String },

    #[error("Pattern '{pattern}' has an unnamed parameter")]
    EmptyParameterName { pattern: String },

    #[error("Pattern '{pattern}' declares parameter '{name}' more than once")]
    DuplicateParameter { pattern: String, name: String },

    #[error("Pattern '{pattern}' has a wildcard that is not the last segment")]
    MisplacedWildcard { pattern: String },
}

/// Route table configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown page '{page}' referenced by route '{path}'")]
    UnknownPage { path: String, page: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}
