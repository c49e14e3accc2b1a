//! Retention policies that fit a conversation into a token budget.
//!
//! Every policy reads a borrowed conversation and returns a new one; the
//! relative order of retained messages always matches the input.

use ctxwin_types::{Message, ProviderId, TokenCounter, TruncationError};
use serde::Deserialize;

use crate::fit::{fit_count, remaining_budget, suffix};

/// Default overlap for [`sliding_window`].
pub const DEFAULT_OVERLAP: usize = 2;

// ---- Options ----------------------------------------------------------------

/// Options for [`keep_recent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeepRecentOptions {
    /// Keep exactly this many recent messages instead of fitting the budget.
    pub count: Option<usize>,
}

/// Options for [`keep_bookends`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeepBookendsOptions {
    /// Keep at most this many recent non-system messages instead of fitting the budget.
    pub count: Option<usize>,
}

/// Options for [`sliding_window`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlidingWindowOptions {
    /// Window size; fitted to the budget when absent.
    pub count: Option<usize>,
    /// Must be smaller than the window count. Not used to shape the window.
    pub overlap: usize,
}

impl Default for SlidingWindowOptions {
    fn default() -> Self {
        Self {
            count: None,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Options for [`smart_truncate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmartTruncateOptions {
    /// Keep at most this many trailing messages after the preserved head
    /// instead of fitting the remaining budget.
    pub count: Option<usize>,
    /// Preserve everything up to and including the first user message.
    pub preserve_first: bool,
}

impl Default for SmartTruncateOptions {
    fn default() -> Self {
        Self {
            count: None,
            preserve_first: true,
        }
    }
}

// ---- Policies -----------------------------------------------------------------

/// Keeps the most recent messages regardless of role.
///
/// With an explicit `count` the last `count` messages are kept (the whole
/// conversation when `count` exceeds its length); otherwise as many trailing
/// messages as fit `budget`.
///
/// # Example
///
/// ```
/// use ctxwin::{FixedCounter, KeepRecentOptions, keep_recent};
/// use ctxwin_types::{Message, ProviderId};
///
/// let conversation: Vec<_> = (1..=6).map(|i| Message::user(format!("U{i}"))).collect();
/// let kept = keep_recent(
///     &conversation,
///     &FixedCounter::new(10),
///     &ProviderId::default(),
///     20,
///     &KeepRecentOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(kept, conversation[4..]);
/// ```
pub fn keep_recent<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    opts: &KeepRecentOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let count = match opts.count {
        Some(count) => count,
        None => fit_count(messages, counter, provider, remaining_budget(budget, 0)),
    };
    Ok(suffix(messages, count).to_vec())
}

/// Keeps every system message plus the most recent non-system messages.
///
/// System messages come first in their original order, followed by the
/// retained tail. The tail is fitted to whatever budget the system messages
/// leave; when they alone exceed it, no other message is kept.
pub fn keep_bookends<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    opts: &KeepBookendsOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let (system, other) = split_system(messages);

    let count = match opts.count {
        Some(count) => count.min(other.len()),
        None => {
            let system_tokens = counter.count(&system, provider);
            let available = remaining_budget(budget, system_tokens);
            warn_if_exhausted("keep_bookends", budget, system_tokens, available);
            fit_count(&other, counter, provider, available)
        }
    };

    let mut result = system;
    result.extend_from_slice(suffix(&other, count));
    Ok(result)
}

/// Keeps a single trailing window of messages.
///
/// `overlap` only gates the call: when the conversation is longer than the
/// window, `overlap` must be smaller than the window count or the call fails
/// with [`TruncationError::InvalidOverlap`]. A conversation that already fits
/// the window is returned unchanged without the check.
pub fn sliding_window<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    opts: &SlidingWindowOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let overlap = opts.overlap;
    let count = match opts.count {
        Some(count) => count,
        None => fit_count(messages, counter, provider, remaining_budget(budget, 0)),
    };

    if messages.len() <= count {
        return Ok(messages.to_vec());
    }
    if overlap >= count {
        tracing::debug!(overlap, count, "sliding window rejected overlap");
        return Err(TruncationError::InvalidOverlap { overlap, count });
    }
    Ok(suffix(messages, count).to_vec())
}

/// Keeps system messages, the opening of the conversation through the first
/// user message, and as many trailing messages as the remaining budget allows.
///
/// With `preserve_first` disabled it behaves like [`keep_bookends`] with a
/// fitted tail. If there is no user message at all, every non-system message
/// counts as the opening and is kept.
///
/// An explicit `count` replaces the fitted tail: exactly `count` trailing
/// messages (at most all of them) follow the opening, whatever the budget.
/// Callers wanting the budget-fitted tail must leave `count` unset.
pub fn smart_truncate<C>(
    messages: &[Message],
    counter: &C,
    provider: &ProviderId,
    budget: usize,
    opts: &SmartTruncateOptions,
) -> Result<Vec<Message>, TruncationError>
where
    C: TokenCounter + ?Sized,
{
    let (system, non_system) = split_system(messages);

    let split_at = if opts.preserve_first {
        non_system
            .iter()
            .position(|m| m.role.is_user())
            .map_or(non_system.len(), |first_user| first_user + 1)
    } else {
        0
    };
    let (first_segment, remaining) = non_system.split_at(split_at);

    let mut result = system;
    result.extend_from_slice(first_segment);

    let count = match opts.count {
        Some(count) => count.min(remaining.len()),
        None => {
            let preserved_tokens = counter.count(&result, provider);
            let available = remaining_budget(budget, preserved_tokens);
            warn_if_exhausted("smart_truncate", budget, preserved_tokens, available);
            fit_count(remaining, counter, provider, available)
        }
    };

    result.extend_from_slice(suffix(remaining, count));
    Ok(result)
}

/// Partitions into system and non-system messages, both in original order.
fn split_system(messages: &[Message]) -> (Vec<Message>, Vec<Message>) {
    messages.iter().cloned().partition(|m| m.role.is_system())
}

fn warn_if_exhausted(policy: &str, budget: usize, preserved: usize, available: i64) {
    if available < 0 {
        tracing::warn!(
            policy,
            budget,
            preserved_tokens = preserved,
            "preserved messages exceed the token budget; keeping no recent messages"
        );
    }
}
