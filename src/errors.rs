//! Error taxonomy for the engine.
//!
//! The taxonomy is deliberately narrow: the engine performs no I/O, and
//! malformed record input is normalized (clamped or bucketed to UNKNOWN)
//! rather than rejected, so errors only arise from genuine contract
//! violations by the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller asked to sort a record family by a key name that family
    /// does not expose.
    #[error("unknown sort key '{key}' for {family} records")]
    UnknownSortKey { family: &'static str, key: String },

    /// Threshold configuration failed validation.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
