//! Property-based tests: retention policy invariants.

use ctxwin::{
    FixedCounter, HeuristicCounter, KeepBookendsOptions, KeepRecentOptions, Message, ProviderId,
    Role, TokenCounter, TruncationOptions, apply_strategy, fit_count, keep_bookends, keep_recent,
};
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::System),
        Just(Role::User),
        Just(Role::Assistant),
        Just(Role::Tool),
    ]
}

/// Messages tagged with their position so order can be checked after truncation.
fn arb_conversation() -> impl Strategy<Value = Vec<Message>> {
    proptest::collection::vec((arb_role(), "[a-z ]{0,80}"), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (role, text))| {
                Message::new(role, format!("{i:03}|{text}"))
            })
            .collect()
    })
}

fn arb_strategy() -> impl proptest::strategy::Strategy<Value = ctxwin::Strategy> {
    proptest::sample::select(ctxwin::Strategy::ALL.to_vec())
}

fn position(message: &Message) -> usize {
    message.text()[..3].parse().unwrap()
}

fn ascending(messages: &[&Message]) -> bool {
    messages.windows(2).all(|w| position(w[0]) < position(w[1]))
}

fn is_subsequence(kept: &[Message], original: &[Message]) -> bool {
    let mut rest = original.iter();
    kept.iter().all(|k| rest.any(|o| o == k))
}

proptest! {
    #[test]
    fn fit_is_maximal_and_within_budget(
        messages in arb_conversation(),
        budget in -50i64..2_000,
    ) {
        let counter = HeuristicCounter::new();
        let provider = ProviderId::default();
        let c = fit_count(&messages, &counter, &provider, budget);

        prop_assert!(c <= messages.len());
        if budget < 0 {
            prop_assert_eq!(c, 0);
        } else {
            let tokens = counter.count(&messages[messages.len() - c..], &provider);
            prop_assert!(tokens as i64 <= budget);
            if c < messages.len() {
                let next = counter.count(&messages[messages.len() - c - 1..], &provider);
                prop_assert!(next as i64 > budget);
            }
        }
    }

    #[test]
    fn every_policy_preserves_order(
        messages in arb_conversation(),
        budget in 0usize..1_500,
        strategy in arb_strategy(),
        count in proptest::option::of(0usize..50),
        overlap in 0usize..4,
        preserve_first in any::<bool>(),
    ) {
        let opts = TruncationOptions {
            count,
            overlap,
            preserve_first,
        };
        let counter = HeuristicCounter::new();
        let provider = ProviderId::default();

        if let Ok(kept) = apply_strategy(&messages, &counter, &provider, budget, strategy, &opts) {
            let (system, non_system): (Vec<&Message>, Vec<&Message>) =
                kept.iter().partition(|m| m.role.is_system());
            prop_assert!(ascending(&system));
            prop_assert!(ascending(&non_system));
            if matches!(
                strategy,
                ctxwin::Strategy::KeepRecent | ctxwin::Strategy::SlidingWindow
            ) {
                prop_assert!(is_subsequence(&kept, &messages));
            }
        }
    }

    #[test]
    fn bookends_keep_every_system_message_first(
        messages in arb_conversation(),
        budget in 0usize..1_500,
        count in proptest::option::of(0usize..50),
    ) {
        let kept = keep_bookends(
            &messages,
            &HeuristicCounter::new(),
            &ProviderId::default(),
            budget,
            &KeepBookendsOptions { count },
        )
        .unwrap();

        let system: Vec<&Message> = messages.iter().filter(|m| m.role.is_system()).collect();
        prop_assert!(kept.len() >= system.len());
        for (kept, original) in kept.iter().zip(&system) {
            prop_assert_eq!(kept, *original);
        }
        prop_assert!(kept[system.len()..].iter().all(|m| !m.role.is_system()));
    }

    #[test]
    fn keep_recent_with_oversized_count_is_identity(
        messages in arb_conversation(),
        extra in 0usize..10,
    ) {
        let opts = KeepRecentOptions {
            count: Some(messages.len() + extra),
        };
        let counter = FixedCounter::new(1);
        let kept = keep_recent(&messages, &counter, &ProviderId::default(), 0, &opts).unwrap();
        prop_assert_eq!(kept, messages);
    }
}
