//! Error types for the sorting engine.

use std::fmt;

/// Errors reported synchronously by the engine.
///
/// Comparator inconsistencies are not detected: a comparator that is not a
/// total order produces an unspecified permutation of the input, but the call
/// still terminates without touching memory outside the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A configuration value or index range that the engine cannot work with.
    InvalidArgument(String),
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for SortError {}
