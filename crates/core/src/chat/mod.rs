pub mod adapter;
/// Message model and id allocation.
pub mod message;
/// Deterministic `Idle`/`Sending` transitions over the message history.
pub mod session;

pub use adapter::ChatSessionAdapter;
pub use message::{Message, MessageId, MessageIdAllocator, Sender};
pub use session::{
    ChatPhase, ChatSession, FALLBACK_REPLY, PendingTurn, ResolveRejection, SubmitRejection,
};
