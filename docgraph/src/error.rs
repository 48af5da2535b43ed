//! Crate error type.

use thiserror::Error;

/// Everything that can go wrong while parsing a block graph or loading
/// configuration. Linearization itself never produces one of these — see
/// the module-level docs on `linearize`.
#[derive(Debug, Error)]
pub enum DocgraphError {
    #[error("declared page count {declared} does not match materialized page count {materialized}")]
    MetadataMismatch { declared: u32, materialized: u32 },

    #[error("corrupt input: {0}")]
    CorruptInput(String),

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocgraphError>;
