//! The token counting collaborator.

use crate::types::{Message, ProviderId};

/// Counts the tokens a sequence of messages costs for a given provider.
///
/// Implementations must be deterministic and monotonic: counting more
/// messages never yields a smaller total, and dropping a message from the
/// front of a suffix never increases the count of what remains. The budget
/// search relies on this.
///
/// Closures with the right signature are counters:
///
/// ```
/// use ctxwin_types::{Message, ProviderId, TokenCounter};
///
/// let unit = |messages: &[Message], _: &ProviderId| messages.len() * 10;
/// assert_eq!(unit.count(&[Message::user("hi")], &ProviderId::default()), 10);
/// ```
pub trait TokenCounter: Send + Sync {
    /// Token count of `messages` as seen by `provider`.
    fn count(&self, messages: &[Message], provider: &ProviderId) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&[Message], &ProviderId) -> usize + Send + Sync,
{
    fn count(&self, messages: &[Message], provider: &ProviderId) -> usize {
        self(messages, provider)
    }
}
