//! Serializable truncation configuration.

use ctxwin_types::{ProviderId, TruncationError};
use serde::{Deserialize, Serialize};

use crate::strategy::{Strategy, TruncationOptions};

/// Default token budget when none is configured.
pub const DEFAULT_BUDGET: usize = 100_000;

/// Which strategy to run, against what budget, with which options.
///
/// `strategy` stays a string so that a config naming an unknown strategy
/// still loads and reports [`TruncationError::UnknownStrategy`] when resolved.
///
/// # Example
///
/// ```
/// use ctxwin::{Strategy, TruncationConfig};
///
/// let config = TruncationConfig::from_json(
///     r#"{"strategy": "sliding_window", "budget": 8000, "options": {"overlap": 1}}"#,
/// )
/// .unwrap();
/// assert_eq!(config.strategy().unwrap(), Strategy::SlidingWindow);
/// assert_eq!(config.options.overlap, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncationConfig {
    /// Strategy identifier, e.g. `keep_bookends`.
    pub strategy: String,
    /// Token budget the truncated conversation must fit.
    pub budget: usize,
    /// Provider passed to the token counter.
    pub provider: ProviderId,
    /// Token count above which truncation is needed; defaults to `budget`.
    pub threshold: Option<usize>,
    /// Options forwarded to the strategy.
    pub options: TruncationOptions,
}

impl Default for TruncationConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::KeepBookends.as_str().to_string(),
            budget: DEFAULT_BUDGET,
            provider: ProviderId::default(),
            threshold: None,
            options: TruncationOptions::default(),
        }
    }
}

impl TruncationConfig {
    /// Config for `strategy` with `budget` and default everything else.
    #[must_use]
    pub fn new(strategy: Strategy, budget: usize) -> Self {
        Self {
            strategy: strategy.as_str().to_string(),
            budget,
            ..Self::default()
        }
    }

    /// Parses a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, TruncationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the configured strategy identifier.
    pub fn strategy(&self) -> Result<Strategy, TruncationError> {
        self.strategy.parse()
    }

    /// Token count above which truncation is needed.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold.unwrap_or(self.budget)
    }

    /// Sets the provider.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<ProviderId>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets the strategy options.
    #[must_use]
    pub fn with_options(mut self, options: TruncationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the truncation threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }
}
