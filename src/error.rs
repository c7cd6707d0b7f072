use thiserror::Error;

/// Errors reported by the analysis operations.
/// Every variant is an invalid-input condition except `Codec`,
/// which wraps model encode/decode failures.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The corpus contains no documents
    #[error("corpus contains no documents")]
    EmptyCorpus,

    /// Requested cluster count is out of range
    #[error("cluster count ({count}) must be between 1 and document count ({max})")]
    InvalidClusterCount { count: usize, max: usize },

    /// Requested component count is out of range
    #[error("component count ({count}) must be between 1 and {max}")]
    InvalidComponentCount { count: usize, max: usize },

    /// Vector dimensions do not match
    #[error("vector length ({got}) does not match expected ({expected})")]
    DimensionMismatch { expected: usize, got: usize },

    /// Cosine distance is undefined for a zero-magnitude vector
    #[error("cosine distance is undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    /// Model encode/decode failed
    #[error("model encode/decode failed: {0}")]
    Codec(#[from] serde_cbor::Error),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzeError>;
