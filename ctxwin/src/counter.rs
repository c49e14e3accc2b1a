//! Token counters: a chars-per-token heuristic and a fixed per-message cost.

use std::collections::HashMap;

use ctxwin_types::{ContentBlock, Message, ProviderId, TokenCounter};

/// Overhead per message for role markers and formatting.
const ROLE_OVERHEAD: usize = 4;

/// Images are expensive; use a fixed estimate.
const IMAGE_TOKENS: usize = 300;

/// Chars-per-token ratio used when none, or an unusable one, is given.
pub const DEFAULT_CHARS_PER_TOKEN: f32 = 4.0;

/// Estimates token counts from text using a configurable chars-per-token ratio.
///
/// This is a heuristic estimator; real tokenization varies per model. The
/// default ratio of 4.0 chars/token approximates GPT-family and Claude models.
/// Ratios can be overridden per provider. A ratio that is not finite and
/// positive is replaced by [`DEFAULT_CHARS_PER_TOKEN`].
///
/// # Example
///
/// ```
/// use ctxwin::HeuristicCounter;
///
/// let counter = HeuristicCounter::new().with_provider_ratio("ollama", 3.5);
/// let estimate = counter.estimate_text("Hello, world!");
/// assert_eq!(estimate, 4);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicCounter {
    chars_per_token: f32,
    provider_ratios: HashMap<ProviderId, f32>,
}

impl Default for HeuristicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicCounter {
    /// Creates a new `HeuristicCounter` with the default ratio of 4.0 chars/token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ratio(DEFAULT_CHARS_PER_TOKEN)
    }

    /// Creates a new `HeuristicCounter` with a custom chars-per-token ratio.
    #[must_use]
    pub fn with_ratio(chars_per_token: f32) -> Self {
        Self {
            chars_per_token: usable_ratio(chars_per_token),
            provider_ratios: HashMap::new(),
        }
    }

    /// Uses `chars_per_token` instead of the default ratio when counting for `provider`.
    #[must_use]
    pub fn with_provider_ratio(
        mut self,
        provider: impl Into<ProviderId>,
        chars_per_token: f32,
    ) -> Self {
        self.provider_ratios
            .insert(provider.into(), usable_ratio(chars_per_token));
        self
    }

    /// The ratio applied when counting for `provider`.
    #[must_use]
    pub fn ratio_for(&self, provider: &ProviderId) -> f32 {
        self.provider_ratios
            .get(provider)
            .copied()
            .unwrap_or(self.chars_per_token)
    }

    /// Estimates the number of tokens in a text string with the default ratio.
    #[must_use]
    pub fn estimate_text(&self, text: &str) -> usize {
        estimate(text, self.chars_per_token)
    }

    /// Estimates the total token count for a slice of messages with the default ratio.
    #[must_use]
    pub fn estimate_messages(&self, messages: &[Message]) -> usize {
        sum_messages(messages, self.chars_per_token)
    }
}

impl TokenCounter for HeuristicCounter {
    fn count(&self, messages: &[Message], provider: &ProviderId) -> usize {
        sum_messages(messages, self.ratio_for(provider))
    }
}

fn usable_ratio(chars_per_token: f32) -> f32 {
    if chars_per_token.is_finite() && chars_per_token > 0.0 {
        chars_per_token
    } else {
        DEFAULT_CHARS_PER_TOKEN
    }
}

// `as usize` saturates, so a tiny ratio yields usize::MAX rather than wrapping.
fn estimate(text: &str, chars_per_token: f32) -> usize {
    (text.len() as f32 / chars_per_token).ceil() as usize
}

fn sum_messages(messages: &[Message], ratio: f32) -> usize {
    messages.iter().fold(0usize, |total, message| {
        let content = message.content.iter().fold(0usize, |sum, block| {
            sum.saturating_add(estimate_block(block, ratio))
        });
        total.saturating_add(ROLE_OVERHEAD.saturating_add(content))
    })
}

fn estimate_block(block: &ContentBlock, ratio: f32) -> usize {
    match block {
        ContentBlock::Text { text } => estimate(text, ratio),
        ContentBlock::ToolUse { name, input, .. } => {
            estimate(name, ratio).saturating_add(estimate(&input.to_string(), ratio))
        }
        ContentBlock::ToolResult { content, .. } => estimate(content, ratio),
        ContentBlock::Image { .. } => IMAGE_TOKENS,
    }
}

/// Charges a fixed number of tokens per message regardless of content.
///
/// Useful for budgeting by message count.
///
/// ```
/// use ctxwin::FixedCounter;
/// use ctxwin_types::{Message, ProviderId, TokenCounter};
///
/// let counter = FixedCounter::new(10);
/// let messages = vec![Message::user("a"), Message::user("b")];
/// assert_eq!(counter.count(&messages, &ProviderId::default()), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCounter {
    tokens_per_message: usize,
}

impl FixedCounter {
    /// Creates a counter charging `tokens_per_message` for every message.
    #[must_use]
    pub fn new(tokens_per_message: usize) -> Self {
        Self { tokens_per_message }
    }
}

impl TokenCounter for FixedCounter {
    fn count(&self, messages: &[Message], _provider: &ProviderId) -> usize {
        messages.len().saturating_mul(self.tokens_per_message)
    }
}
