//! Strategy identifiers and the dispatcher that runs them.

use std::fmt;
use std::str::FromStr;

use ctxwin_types::{Message, ProviderId, TokenCounter, TruncationError};
use serde::{Deserialize, Serialize};

use crate::strategies::{
    DEFAULT_OVERLAP, KeepBookendsOptions, KeepRecentOptions, SlidingWindowOptions,
    SmartTruncateOptions, keep_bookends, keep_recent, sliding_window, smart_truncate,
};

/// A retention policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// See [`keep_recent`].
    KeepRecent,
    /// See [`keep_bookends`].
    KeepBookends,
    /// See [`sliding_window`].
    SlidingWindow,
    /// See [`smart_truncate`].
    SmartTruncate,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::KeepRecent,
        Strategy::KeepBookends,
        Strategy::SlidingWindow,
        Strategy::SmartTruncate,
    ];

    /// The identifier this strategy parses from.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::KeepRecent => "keep_recent",
            Strategy::KeepBookends => "keep_bookends",
            Strategy::SlidingWindow => "sliding_window",
            Strategy::SmartTruncate => "smart_truncate",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = TruncationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| TruncationError::UnknownStrategy(s.to_string()))
    }
}

/// Options accepted by the dispatcher; each policy reads the fields it knows.
///
/// `overlap` only affects [`Strategy::SlidingWindow`] and `preserve_first`
/// only affects [`Strategy::SmartTruncate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncationOptions {
    /// Explicit message count overriding budget fitting.
    pub count: Option<usize>,
    /// Sliding window overlap.
    pub overlap: usize,
    /// Whether smart truncation keeps the opening through the first user message.
    pub preserve_first: bool,
}

impl Default for TruncationOptions {
    fn default() -> Self {
        Self {
            count: None,
            overlap: DEFAULT_OVERLAP,
            preserve_first: true,
        }
    }
}

impl TruncationOptions {
    /// Options with an explicit count and every other field defaulted.
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }
}

impl From<&TruncationOptions> for KeepRecentOptions {
    fn from(opts: &TruncationOptions) -> Self {
        Self { count: opts.count }
    }
}

impl From<&TruncationOptions> for KeepBookendsOptions {
    fn from(opts: &TruncationOptions) -> Self {
        Self { count: opts.count }
    }
}

impl From<&TruncationOptions> for SlidingWindowOptions {
    fn from(opts: &TruncationOptions) -> Self {
        Self {
            count: opts.count,
            overlap: opts.overlap,
        }
    }
}

impl From<&TruncationOptions> for SmartTruncateOptions {
    fn from(opts: &TruncationOptions) -> Self {
        Self {
            count: opts.count,
            preserve_first: opts.preserve_first,
        }
    }
}

/// Runs `strategy` over `messages`.
pub fn apply_strategy<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    strategy: Strategy,
    opts: &TruncationOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let result = match strategy {
        Strategy::KeepRecent => keep_recent(
            messages,
            counter,
            provider,
            budget,
            &KeepRecentOptions::from(opts),
        ),
        Strategy::KeepBookends => keep_bookends(
            messages,
            counter,
            provider,
            budget,
            &KeepBookendsOptions::from(opts),
        ),
        Strategy::SlidingWindow => sliding_window(
            messages,
            counter,
            provider,
            budget,
            &SlidingWindowOptions::from(opts),
        ),
        Strategy::SmartTruncate => smart_truncate(
            messages,
            counter,
            provider,
            budget,
            &SmartTruncateOptions::from(opts),
        ),
    };

    match &result {
        Ok(kept) => tracing::debug!(
            strategy = %strategy,
            provider = %provider,
            budget,
            input = messages.len(),
            output = kept.len(),
            "truncated conversation"
        ),
        Err(err) => tracing::debug!(
            strategy = %strategy,
            error = %err,
            kind = err.kind(),
            "truncation failed"
        ),
    }
    result
}

/// Parses `strategy` and runs it over `messages`.
///
/// Unrecognized identifiers yield [`TruncationError::UnknownStrategy`].
///
/// # Example
///
/// ```
/// use ctxwin::{FixedCounter, TruncationOptions, apply};
/// use ctxwin_types::{Message, ProviderId, TruncationError};
///
/// let conversation = vec![Message::system("S"), Message::user("U1"), Message::user("U2")];
/// let counter = FixedCounter::new(1);
/// let provider = ProviderId::default();
/// let opts = TruncationOptions::default();
///
/// let kept = apply(&conversation, &counter, &provider, 2, "keep_bookends", &opts).unwrap();
/// assert_eq!(kept.len(), 2);
///
/// let err = apply(&conversation, &counter, &provider, 2, "nonsense", &opts).unwrap_err();
/// assert_eq!(err, TruncationError::UnknownStrategy("nonsense".into()));
/// ```
pub fn apply<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    strategy: &str,
    opts: &TruncationOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let strategy = strategy.parse::<Strategy>()?;
    apply_strategy(messages, counter, provider, budget, strategy, opts)
}
