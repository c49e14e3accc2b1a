//! Integration tests for smart_truncate.

mod common;

use common::*;
use ctxwin::{Message, SmartTruncateOptions, smart_truncate};

fn run(conversation: &[Message], budget: usize, opts: &SmartTruncateOptions) -> Vec<Message> {
    smart_truncate(conversation, &unit_counter(), &provider(), budget, opts)
        .expect("smart_truncate never fails")
}

#[test]
fn keeps_system_first_user_and_fitted_tail() {
    let conversation = system_and_users(20);

    let kept = run(&conversation, 5 * UNIT, &SmartTruncateOptions::default());

    assert_eq!(texts(&kept), ["S", "U1", "U18", "U19", "U20"]);
}

#[test]
fn first_user_survives_every_budget_that_admits_it() {
    let conversation = system_and_users(20);

    for budget in (2 * UNIT..=25 * UNIT).step_by(UNIT / 2) {
        let kept = run(&conversation, budget, &SmartTruncateOptions::default());
        assert_eq!(kept[1].text(), "U1", "budget {budget}");
        assert!(kept.len() * UNIT <= budget);
    }
}

#[test]
fn messages_before_first_user_are_preserved() {
    let conversation = vec![
        Message::system("S"),
        Message::assistant("greeting"),
        Message::user("U1"),
        Message::assistant("A1"),
        Message::user("U2"),
        Message::assistant("A2"),
    ];

    let kept = run(&conversation, 4 * UNIT, &SmartTruncateOptions::default());

    assert_eq!(texts(&kept), ["S", "greeting", "U1", "A2"]);
}

#[test]
fn opening_runs_through_first_user_message() {
    let conversation = vec![
        Message::system("S"),
        Message::tool_result("t0", "R0"),
        Message::assistant("A0"),
        Message::user("U1"),
        Message::tool_result("t1", "R1"),
        Message::assistant("A1"),
        Message::user("U2"),
    ];

    let kept = run(&conversation, 5 * UNIT, &SmartTruncateOptions::default());

    assert_eq!(texts(&kept), ["S", "", "A0", "U1", "U2"]);
    assert_eq!(kept[1], conversation[1]);
}

#[test]
fn without_user_message_everything_is_preserved() {
    let conversation = vec![
        Message::system("S"),
        Message::assistant("A1"),
        Message::assistant("A2"),
        Message::assistant("A3"),
    ];

    let kept = run(&conversation, UNIT, &SmartTruncateOptions::default());

    assert_eq!(kept, conversation);
}

#[test]
fn preserve_first_disabled_fits_tail_only() {
    let conversation = system_and_users(20);
    let opts = SmartTruncateOptions {
        count: None,
        preserve_first: false,
    };

    let kept = run(&conversation, 4 * UNIT, &opts);

    assert_eq!(texts(&kept), ["S", "U18", "U19", "U20"]);
}

#[test]
fn preserved_over_budget_drops_tail() {
    let conversation = system_and_users(20);

    let kept = run(&conversation, UNIT, &SmartTruncateOptions::default());

    assert_eq!(texts(&kept), ["S", "U1"]);
}

#[test]
fn explicit_count_overrides_fitted_tail() {
    let conversation = system_and_users(20);
    let opts = SmartTruncateOptions {
        count: Some(2),
        preserve_first: true,
    };

    let kept = run(&conversation, 0, &opts);

    assert_eq!(texts(&kept), ["S", "U1", "U19", "U20"]);
}
