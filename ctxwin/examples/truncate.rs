//! Example: build a conversation, check its token count, and run every strategy.
//!
//! Run with: `cargo run --example truncate -p ctxwin`

use ctxwin::{
    HeuristicCounter, Message, ProviderId, Strategy, TokenCounter, TruncationOptions,
    apply_strategy,
};

fn main() {
    let counter = HeuristicCounter::new();
    let provider = ProviderId::from("anthropic");

    let mut messages = vec![
        Message::system("You are a helpful coding assistant."),
        Message::user("I'm porting a service to Rust. Can you help along the way?"),
    ];
    for topic in ["HashMap", "BTreeMap", "VecDeque", "BinaryHeap", "HashSet"] {
        messages.push(Message::user(format!("When should I use a {topic}?")));
        messages.push(Message::assistant(format!(
            "Use a {topic} when its access pattern matches yours; it trades memory \
             and ordering guarantees differently from the other std collections."
        )));
    }

    let total = counter.count(&messages, &provider);
    let budget = total / 2;
    let opts = TruncationOptions::default();
    let len = messages.len();
    println!("{len} messages, ~{total} tokens, budget {budget}");

    for strategy in Strategy::ALL {
        match apply_strategy(&messages, &counter, &provider, budget, strategy, &opts) {
            Ok(kept) => println!(
                "{strategy:>15}: kept {} messages (~{} tokens)",
                kept.len(),
                counter.count(&kept, &provider)
            ),
            Err(err) => println!("{strategy:>15}: {err}"),
        }
    }
}
