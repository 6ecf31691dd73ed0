//! Error types for profile loading and optimization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a [`FormatProfile`].
///
/// [`FormatProfile`]: crate::profile::FormatProfile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse profile file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "profile '{name}': tick resolution {tpqn} is too coarse for minimum note length {minimum_note_duration} (need 4*tpqn >= 3*minimum)"
    )]
    DegenerateTiming {
        name: String,
        tpqn: u32,
        minimum_note_duration: u32,
    },
    #[error("profile '{name}': max volume must be greater than zero")]
    ZeroMaxVolume { name: String },
    #[error("profile '{name}': default duration {duration} is not a valid note length")]
    InvalidDefaultDuration { name: String, duration: String },
}

impl ProfileError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::Io { .. } => "PROFILE_001",
            ProfileError::Json { .. } => "PROFILE_002",
            ProfileError::DegenerateTiming { .. } => "PROFILE_003",
            ProfileError::ZeroMaxVolume { .. } => "PROFILE_004",
            ProfileError::InvalidDefaultDuration { .. } => "PROFILE_005",
        }
    }
}

/// Errors raised by the optimizer.
///
/// The search graph always contains a direct edge for every token, so
/// [`OptimizeError::NoPath`] signals a broken invariant rather than bad input.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("no optimized path found ({tokens} tokens, {expanded} nodes expanded)")]
    NoPath { tokens: usize, expanded: usize },
    #[error("unexpected search transition at token {cursor}")]
    UnexpectedTransition { cursor: usize },
}

impl OptimizeError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            OptimizeError::NoPath { .. } => "OPTIMIZE_001",
            OptimizeError::UnexpectedTransition { .. } => "OPTIMIZE_002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            ProfileError::ZeroMaxVolume {
                name: "x".to_string(),
            }
            .code(),
            ProfileError::DegenerateTiming {
                name: "x".to_string(),
                tpqn: 1,
                minimum_note_duration: 64,
            }
            .code(),
            OptimizeError::NoPath {
                tokens: 0,
                expanded: 0,
            }
            .code(),
            OptimizeError::UnexpectedTransition { cursor: 0 }.code(),
        ];
        let mut sorted = errors.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), errors.len());
    }

    #[test]
    fn test_no_path_message() {
        let err = OptimizeError::NoPath {
            tokens: 3,
            expanded: 7,
        };
        assert_eq!(
            err.to_string(),
            "no optimized path found (3 tokens, 7 nodes expanded)"
        );
    }
}
