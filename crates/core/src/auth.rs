use snafu::{ResultExt, Snafu};

use crate::account::{AccountError, AccountStore};
use crate::session::{SessionController, SessionError};
use crate::username::{Username, UsernameError};

pub const STORAGE_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Welcome Back",
            Self::Register => "Create Account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Login => "Log in to continue.",
            Self::Register => "Get started with your new account.",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? ",
            Self::Register => "Already have an account? ",
        }
    }

    /// Label of the link that switches to the other mode.
    pub fn toggle_label(self) -> &'static str {
        self.toggled().submit_label()
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AuthError {
    #[snafu(display("{source}"))]
    InvalidUsername { source: UsernameError },
    #[snafu(display("Username already exists. Please login."))]
    UsernameTaken { username: String },
    #[snafu(display("User not found. Please register."))]
    UserNotFound { username: String },
    #[snafu(display("account lookup failed on `{stage}`: {source}"))]
    Accounts {
        stage: &'static str,
        source: AccountError,
    },
    #[snafu(display("Account created. Please login."))]
    RegisteredNotLoggedIn {
        username: String,
        source: SessionError,
    },
    #[snafu(display("session update failed on `{stage}`: {source}"))]
    Session {
        stage: &'static str,
        source: SessionError,
    },
}

impl AuthError {
    /// Text shown inline under the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUsername { .. }
            | Self::UsernameTaken { .. }
            | Self::UserNotFound { .. }
            | Self::RegisteredNotLoggedIn { .. } => self.to_string(),
            Self::Accounts { .. } | Self::Session { .. } => STORAGE_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Register/login form. There is no password check.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    error: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    /// Validates `raw`, then registers or looks up the user and logs them in.
    ///
    /// On failure the inline error is recorded on the form. Only one failure leaves
    /// a write behind: a registration whose login then fails keeps the new account,
    /// and the form switches to login mode so the retry can succeed.
    pub fn submit(
        &mut self,
        raw: &str,
        accounts: &AccountStore,
        session: &mut SessionController,
    ) -> Result<Username, AuthError> {
        match self.try_submit(raw, accounts, session) {
            Ok(user) => {
                self.error = None;
                Ok(user)
            }
            Err(error) => {
                match &error {
                    AuthError::Accounts { .. } | AuthError::Session { .. } => {
                        tracing::error!(mode = ?self.mode, error = %error, "authentication failed");
                    }
                    AuthError::RegisteredNotLoggedIn { username, source } => {
                        tracing::error!(
                            username = %username,
                            error = %source,
                            "registered user but could not log in"
                        );
                        self.mode = AuthMode::Login;
                    }
                    _ => {
                        tracing::debug!(mode = ?self.mode, error = %error, "authentication rejected");
                    }
                }
                self.error = Some(error.user_message());
                Err(error)
            }
        }
    }

    fn try_submit(
        &self,
        raw: &str,
        accounts: &AccountStore,
        session: &mut SessionController,
    ) -> Result<Username, AuthError> {
        let user = Username::parse(raw).context(InvalidUsernameSnafu)?;

        match self.mode {
            AuthMode::Register => match accounts.register(&user) {
                Ok(()) => {
                    session.login(user.clone()).context(RegisteredNotLoggedInSnafu {
                        username: user.as_str(),
                    })?;
                    return Ok(user);
                }
                Err(AccountError::AlreadyExists { username }) => {
                    return UsernameTakenSnafu { username }.fail();
                }
                Err(source) => {
                    return Err(AuthError::Accounts {
                        stage: "register-user",
                        source,
                    });
                }
            },
            AuthMode::Login => {
                let known = accounts.exists(&user).context(AccountsSnafu {
                    stage: "lookup-user",
                })?;
                if !known {
                    return UserNotFoundSnafu {
                        username: user.as_str(),
                    }
                    .fail();
                }
            }
        }

        session.login(user.clone()).context(SessionSnafu {
            stage: "login-after-auth",
        })?;
        Ok(user)
    }
}
