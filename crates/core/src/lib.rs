#![deny(unsafe_code)]

/// Registered usernames persisted in the key-value store.
pub mod account;
/// Register/login form state and validation.
pub mod auth;
/// Chat message history and the request state machine.
pub mod chat;
pub mod config;
/// Static sidebar history entries.
pub mod history;
/// Remembered-user session.
pub mod session;
pub mod shell;
pub mod theme;
pub mod username;

pub use account::{AccountError, AccountResult, AccountStore};
pub use auth::{AuthError, AuthForm, AuthMode};
pub use chat::{
    ChatPhase, ChatSession, ChatSessionAdapter, FALLBACK_REPLY, Message, MessageId, PendingTurn,
    ResolveRejection, Sender, SubmitRejection,
};
pub use config::{AppConfig, ConfigError, ProviderSettings};
pub use history::{ChatHistoryEntry, filter_history, seeded_history};
pub use session::{SessionController, SessionError, SessionState};
pub use shell::ChatShellState;
pub use theme::{ThemeMode, ThemeTokens};
pub use username::{MIN_USERNAME_LEN, Username, UsernameError};
