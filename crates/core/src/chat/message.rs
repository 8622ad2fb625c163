use std::time::{SystemTime, UNIX_EPOCH};

/// Message identifier derived from submission time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    pub const WELCOME: Self = Self(1);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
        }
    }

    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Sender::User, text)
    }

    pub fn ai(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Sender::Ai, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Hands out strictly increasing ids, seeded from the wall clock.
#[derive(Debug, Clone)]
pub struct MessageIdAllocator {
    last: u64,
}

impl MessageIdAllocator {
    pub fn starting_after(last: MessageId) -> Self {
        Self { last: last.0 }
    }

    pub fn next(&mut self) -> MessageId {
        self.next_at(unix_now_millis())
    }

    /// Uses `now_millis` unless the clock stalled or went backwards.
    pub fn next_at(&mut self, now_millis: u64) -> MessageId {
        self.last = now_millis.max(self.last.saturating_add(1));
        MessageId(self.last)
    }
}

fn unix_now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}
