//! errors.rs - Custom error types for the copywacht-core library.
//!
//! License: MIT OR Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types surfaced by the `copywacht-core` library.
///
/// `#[non_exhaustive]` signals to consumers that new variants may be added
/// in future versions, so they should keep a catch-all arm.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CopywachtError {
    /// A rule pattern failed to compile. Names the category and the raw
    /// pattern so a broken rule set is immediately locatable.
    #[error("failed to compile pattern `{1}` in category '{0}': {2}")]
    RuleCompilation(String, String, regex::Error),

    #[error("category '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    /// The scan root does not exist. Unlike per-file errors this is fatal:
    /// a missing root means the caller pointed the tool at the wrong tree.
    #[error("root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("an unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("a fatal error occurred: {0}")]
    Fatal(String),
}
