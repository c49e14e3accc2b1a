//! Error types for all ctxwin crates.

/// Errors from truncation operations.
///
/// Only the sliding window policy and the strategy dispatcher can fail;
/// every other policy is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TruncationError {
    /// The sliding window overlap is not smaller than the window count.
    #[error("invalid overlap: overlap {overlap} must be smaller than window count {count}")]
    InvalidOverlap {
        /// Requested overlap.
        overlap: usize,
        /// Window count it was checked against.
        count: usize,
    },
    /// The strategy identifier does not name a known policy.
    #[error("unknown truncation strategy: {0}")]
    UnknownStrategy(String),
    /// Truncation configuration could not be parsed.
    #[error("invalid truncation config: {0}")]
    Config(String),
}

impl TruncationError {
    /// Stable, machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOverlap { .. } => "invalid_overlap",
            Self::UnknownStrategy(_) => "unknown_strategy",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for TruncationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
