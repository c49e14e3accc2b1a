//! A counter and a config bundled into a reusable truncator.

use ctxwin_types::{Message, TokenCounter, TruncationError};

use crate::config::TruncationConfig;
use crate::counter::HeuristicCounter;
use crate::strategy::{Strategy, apply_strategy};

/// Applies a configured strategy with a fixed token counter.
///
/// Triggers truncation when the estimated token count exceeds the
/// configured threshold.
///
/// # Example
///
/// ```
/// use ctxwin::{Strategy, TruncationConfig, Truncator};
/// use ctxwin_types::Message;
///
/// let config = TruncationConfig::new(Strategy::SmartTruncate, 100_000);
/// let truncator = Truncator::new(config).unwrap();
/// let conversation = vec![Message::system("Be brief."), Message::user("Hello")];
/// assert!(!truncator.should_truncate(&conversation));
/// ```
#[derive(Debug, Clone)]
pub struct Truncator<C = HeuristicCounter> {
    config: TruncationConfig,
    strategy: Strategy,
    counter: C,
}

impl Truncator<HeuristicCounter> {
    /// Creates a `Truncator` using the default [`HeuristicCounter`].
    ///
    /// Fails if the configured strategy is unknown.
    pub fn new(config: TruncationConfig) -> Result<Self, TruncationError> {
        Self::with_counter(config, HeuristicCounter::new())
    }

    /// Creates a `Truncator` from a JSON config document.
    pub fn from_config_json(json: &str) -> Result<Self, TruncationError> {
        Self::new(TruncationConfig::from_json(json)?)
    }
}

impl<C: TokenCounter> Truncator<C> {
    /// Creates a `Truncator` with a custom [`TokenCounter`].
    pub fn with_counter(config: TruncationConfig, counter: C) -> Result<Self, TruncationError> {
        let strategy = config.strategy()?;
        Ok(Self {
            config,
            strategy,
            counter,
        })
    }

    /// The configuration this truncator was built from.
    pub fn config(&self) -> &TruncationConfig {
        &self.config
    }

    /// The resolved strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Token count of `messages` under the configured provider.
    pub fn token_estimate(&self, messages: &[Message]) -> usize {
        self.counter.count(messages, &self.config.provider)
    }

    /// Whether `messages` exceed the configured threshold.
    pub fn should_truncate(&self, messages: &[Message]) -> bool {
        self.token_estimate(messages) > self.config.threshold()
    }

    /// Runs the configured strategy.
    pub fn truncate(&self, messages: &[Message]) -> Result<Vec<Message>, TruncationError> {
        apply_strategy(
            messages,
            &self.counter,
            &self.config.provider,
            self.config.budget,
            self.strategy,
            &self.config.options,
        )
    }

    /// Runs the configured strategy only when [`should_truncate`](Self::should_truncate)
    /// says so; otherwise returns a copy of `messages`.
    pub fn truncate_if_needed(
        &self,
        messages: &[Message],
    ) -> Result<Vec<Message>, TruncationError> {
        if self.should_truncate(messages) {
            self.truncate(messages)
        } else {
            tracing::trace!(messages = messages.len(), "under threshold, not truncating");
            Ok(messages.to_vec())
        }
    }
}
