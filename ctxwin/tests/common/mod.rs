#![allow(dead_code)]

use ctxwin::{FixedCounter, Message, ProviderId};

/// Tokens charged per message by [`unit_counter`].
pub const UNIT: usize = 10;

pub fn unit_counter() -> FixedCounter {
    FixedCounter::new(UNIT)
}

pub fn provider() -> ProviderId {
    ProviderId::from("test")
}

/// `[system("S"), user("U1"), ..., user("U{turns}")]`
pub fn system_and_users(turns: usize) -> Vec<Message> {
    let mut messages = vec![Message::system("S")];
    messages.extend((1..=turns).map(|i| Message::user(format!("U{i}"))));
    messages
}

pub fn texts(messages: &[Message]) -> Vec<String> {
    messages.iter().map(Message::text).collect()
}
