#![doc = include_str!("../README.md")]

pub mod config;
pub mod counter;
pub mod fit;
pub mod strategies;
pub mod strategy;
pub mod truncator;

pub use ctxwin_types::*;

pub use config::TruncationConfig;
pub use counter::{DEFAULT_CHARS_PER_TOKEN, FixedCounter, HeuristicCounter};
pub use fit::{fit_count, remaining_budget};
pub use strategies::{
    KeepBookendsOptions, KeepRecentOptions, SlidingWindowOptions, SmartTruncateOptions,
    keep_bookends, keep_recent, sliding_window, smart_truncate,
};
pub use strategy::{Strategy, TruncationOptions, apply, apply_strategy};
pub use truncator::Truncator;
