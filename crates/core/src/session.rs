use std::sync::Arc;

use aura_storage::{CURRENT_USER_KEY, KeyValueStore, StorageError};
use snafu::{ResultExt, Snafu};

use crate::username::Username;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SessionError {
    #[snafu(display("session storage failed on `{stage}`: {source}"))]
    SessionStorage {
        stage: &'static str,
        source: StorageError,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Username),
}

/// Tracks which user, if any, is logged in. The persisted name is the whole credential.
pub struct SessionController {
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
}

impl SessionController {
    /// Restores the remembered user, if any.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let state = match store.get(CURRENT_USER_KEY) {
            Ok(Some(raw)) => match Username::from_persisted(&raw) {
                Some(user) => {
                    tracing::info!(username = %user, "restored remembered session");
                    SessionState::LoggedIn(user)
                }
                None => SessionState::LoggedOut,
            },
            Ok(None) => SessionState::LoggedOut,
            Err(error) => {
                tracing::error!(error = %error, "failed to read remembered session");
                SessionState::LoggedOut
            }
        };

        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn current_user(&self) -> Option<&Username> {
        match &self.state {
            SessionState::LoggedIn(user) => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    pub fn login(&mut self, user: Username) -> SessionResult<()> {
        self.store
            .set(CURRENT_USER_KEY, user.as_str())
            .context(SessionStorageSnafu {
                stage: "persist-current-user",
            })?;
        tracing::info!(username = %user, "logged in");
        self.state = SessionState::LoggedIn(user);
        Ok(())
    }

    /// Always leaves the controller logged out; a failed removal is still reported.
    pub fn logout(&mut self) -> SessionResult<()> {
        if let SessionState::LoggedIn(user) = std::mem::take(&mut self.state) {
            tracing::info!(username = %user, "logged out");
        }
        self.store
            .remove(CURRENT_USER_KEY)
            .context(SessionStorageSnafu {
                stage: "clear-current-user",
            })
    }
}
