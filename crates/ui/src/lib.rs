#![deny(unsafe_code)]

/// Window root switching between the auth screen and the chat view.
pub mod app;
pub mod auth;
/// Chat screen components.
pub mod chat;
/// Config-driven construction of the store and provider.
pub mod services;
pub mod theme;
