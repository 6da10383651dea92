//! Error types for the rhythmcard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all rhythmcard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input validation ---
    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    // --- Upstream rhythm collaborator ---
    #[error("Rhythm source error: {0}")]
    Rhythm(#[from] RhythmError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("personality dimension '{dimension}' is {value}, expected 0–100")]
    DimensionOutOfRange { dimension: &'static str, value: f64 },

    #[error("personality dimension '{dimension}' is not a finite number")]
    DimensionNotFinite { dimension: &'static str },

    #[error("at most {max} primary interests are allowed, got {count}")]
    TooManyPrimaryInterests { count: usize, max: usize },

    #[error("profile id must not be empty")]
    EmptyId,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

#[derive(Debug, Clone, Error)]
pub enum RhythmError {
    #[error("Rhythm source unavailable: {0}")]
    Unavailable(String),

    #[error("No rhythm signal for {date}")]
    MissingDate { date: String },

    #[error("Malformed rhythm signal: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_error_displays_correctly() {
        let err = Error::InvalidProfile(ProfileError::DimensionOutOfRange {
            dimension: "neuroticism",
            value: 140.0,
        });
        assert!(err.to_string().contains("neuroticism"));
        assert!(err.to_string().contains("140"));
    }

    #[test]
    fn rhythm_error_displays_correctly() {
        let err = Error::Rhythm(RhythmError::MissingDate {
            date: "2025-03-14".into(),
        });
        assert!(err.to_string().contains("2025-03-14"));
    }
}
