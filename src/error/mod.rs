//! Error handling for the mission-files crate.

use std::path::PathBuf;

/// Specialized error type for file utility operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid glob pattern
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path could not be read while expanding a glob
    #[error("glob expansion failed: {0}")]
    Glob(#[from] glob::GlobError),

    /// Invalid filename regex
    #[error("invalid filename regex: {0}")]
    Regex(#[from] regex::Error),

    /// Glob match count below the requested minimum
    #[error("at least {min} file(s) required for {pattern} but {found} found")]
    TooFewMatches {
        /// The glob pattern that was expanded
        pattern: String,
        /// Minimum number of matches required
        min: usize,
        /// Number of matches actually found
        found: usize,
    },

    /// Glob match count above the requested maximum
    #[error("no more than {max} file(s) required for {pattern} but {found} found")]
    TooManyMatches {
        /// The glob pattern that was expanded
        pattern: String,
        /// Maximum number of matches allowed
        max: usize,
        /// Number of matches actually found
        found: usize,
    },

    /// Input file for a copy or link operation does not exist
    #[error("input file {} not found", .0.display())]
    MissingInput(PathBuf),

    /// Output path already exists and clobber is not set
    #[error("output file {} already exists and clobber is not set", .0.display())]
    OutputExists(PathBuf),
}

/// Result type for mission-files operations
pub type Result<T> = std::result::Result<T, Error>;
