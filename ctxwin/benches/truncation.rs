use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ctxwin::{
    HeuristicCounter, Message, ProviderId, Strategy, TruncationOptions, apply_strategy, fit_count,
};

fn make_conversation(n: usize) -> Vec<Message> {
    let mut messages = vec![Message::system("You are a careful assistant.")];
    messages.extend((0..n).map(|i| {
        let text = format!(
            "Message {i}: This is a moderately sized message with enough content \
             to be realistic for token counting benchmarks."
        );
        if i % 2 == 0 {
            Message::user(text)
        } else {
            Message::assistant(text)
        }
    }));
    messages
}

fn bench_fit(c: &mut Criterion) {
    let counter = HeuristicCounter::default();
    let provider = ProviderId::default();
    let mut group = c.benchmark_group("fit_count");
    for n in [100, 1000, 10000] {
        let msgs = make_conversation(n);
        group.bench_function(format!("{n}_messages"), |b| {
            b.iter(|| fit_count(black_box(&msgs), &counter, &provider, 8_000))
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let counter = HeuristicCounter::default();
    let provider = ProviderId::default();
    let msgs = make_conversation(5_000);
    let opts = TruncationOptions::default();
    let mut group = c.benchmark_group("apply");
    for strategy in Strategy::ALL {
        group.bench_function(strategy.as_str(), |b| {
            b.iter(|| {
                apply_strategy(
                    black_box(&msgs),
                    &counter,
                    &provider,
                    8_000,
                    strategy,
                    &opts,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fit, bench_strategies);
criterion_main!(benches);
