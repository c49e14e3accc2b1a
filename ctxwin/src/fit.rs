//! Binary search for the longest suffix of a conversation that fits a budget.

use ctxwin_types::{Message, ProviderId, TokenCounter};

/// Returns the largest `c` in `0..=messages.len()` such that the last `c`
/// messages count to at most `budget` tokens.
///
/// Assumes the counter is monotonic. A negative budget yields `0`: the
/// search only advances past zero when a suffix fits, and nothing fits a
/// negative budget.
///
/// # Example
///
/// ```
/// use ctxwin::{FixedCounter, fit_count};
/// use ctxwin_types::{Message, ProviderId};
///
/// let messages: Vec<_> = (0..10).map(|i| Message::user(format!("m{i}"))).collect();
/// let provider = ProviderId::default();
/// assert_eq!(fit_count(&messages, &FixedCounter::new(10), &provider, 35), 3);
/// assert_eq!(fit_count(&messages, &FixedCounter::new(10), &provider, -1), 0);
/// ```
pub fn fit_count<C>(messages: &[Message], counter: &C, provider: &ProviderId, budget: i64) -> usize
where
    C: TokenCounter + ?Sized,
{
    let mut low = 0;
    let mut high = messages.len();

    while low < high {
        let mid = low + (high - low).div_ceil(2);
        let tokens = counter.count(suffix(messages, mid), provider);
        let fits = tokens_as_i64(tokens) <= budget;
        tracing::trace!(low, high, mid, tokens, budget, fits, "fit probe");
        if fits {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    tracing::debug!(total = messages.len(), budget, count = low, "fitted suffix");
    low
}

/// The last `count` messages, or all of them when `count` exceeds the length.
pub(crate) fn suffix(messages: &[Message], count: usize) -> &[Message] {
    &messages[messages.len().saturating_sub(count)..]
}

/// `budget - used` as a signed value; negative when `used` exceeds the budget.
#[must_use]
pub fn remaining_budget(budget: usize, used: usize) -> i64 {
    tokens_as_i64(budget).saturating_sub(tokens_as_i64(used))
}

fn tokens_as_i64(tokens: usize) -> i64 {
    i64::try_from(tokens).unwrap_or(i64::MAX)
}
