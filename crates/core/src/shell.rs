use std::sync::Arc;

use aura_llm::LlmProvider;

use crate::chat::ChatSessionAdapter;
use crate::history::{ChatHistoryEntry, filter_history, seeded_history};
use crate::theme::{ThemeMode, ThemeTokens};
use crate::username::Username;

/// Everything the chat screen renders besides widget state: the signed-in user,
/// the live conversation, the sidebar list and its query, and the theme.
pub struct ChatShellState {
    user: Username,
    chat: ChatSessionAdapter,
    theme: ThemeMode,
    history: Vec<ChatHistoryEntry>,
    search_query: String,
    sidebar_open: bool,
}

impl ChatShellState {
    pub fn new(user: Username, provider: Arc<dyn LlmProvider>, welcome_message: &str) -> Self {
        Self {
            user,
            chat: ChatSessionAdapter::mount(provider, welcome_message),
            theme: ThemeMode::default(),
            history: seeded_history(),
            search_query: String::new(),
            sidebar_open: true,
        }
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    pub fn chat(&self) -> &ChatSessionAdapter {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSessionAdapter {
        &mut self.chat
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn tokens(&self) -> &'static ThemeTokens {
        self.theme.tokens()
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        tracing::debug!(dark = self.theme.is_dark(), "toggled theme");
        self.theme
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn visible_history(&self) -> Vec<&ChatHistoryEntry> {
        filter_history(&self.history, &self.search_query)
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Shows or hides the sidebar. The search query survives while it is hidden.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }
}

#[cfg(test)]
mod tests {
    use aura_llm::UnavailableProvider;
    use aura_storage::{KeyValueStore, MemoryStore};

    use super::*;
    use crate::account::AccountStore;
    use crate::session::SessionController;
    use crate::theme::{DARK_TOKENS, LIGHT_TOKENS};

    #[tokio::test]
    async fn toggling_theme_leaves_chat_session_and_accounts_alone() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let accounts = AccountStore::new(store.clone());
        let mut session = SessionController::restore(store.clone());
        let user = Username::parse("alice").unwrap();
        accounts.register(&user).unwrap();
        session.login(user.clone()).unwrap();

        let provider = Arc::new(UnavailableProvider::new("offline", "test-model"));
        let mut shell = ChatShellState::new(user.clone(), provider, "Hi");
        shell.chat_mut().submit("hello").await;
        let messages_before = shell.chat().messages().to_vec();

        assert_eq!(shell.tokens(), &DARK_TOKENS);
        assert_eq!(shell.toggle_theme(), ThemeMode::Light);
        assert_eq!(shell.tokens(), &LIGHT_TOKENS);

        assert_eq!(shell.chat().messages(), messages_before.as_slice());
        assert_eq!(session.current_user(), Some(&user));
        assert_eq!(accounts.known_users().unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn search_query_narrows_visible_history() {
        let provider = Arc::new(UnavailableProvider::new("offline", "test-model"));
        let mut shell = ChatShellState::new(Username::parse("bob").unwrap(), provider, "Hi");

        assert_eq!(shell.visible_history().len(), 3);
        shell.set_search_query("COPY");

        let visible = shell.visible_history();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Marketing copy ideas");
    }

    #[test]
    fn hiding_sidebar_keeps_query_and_conversation() {
        let provider = Arc::new(UnavailableProvider::new("offline", "test-model"));
        let mut shell = ChatShellState::new(Username::parse("dana").unwrap(), provider, "Hi");
        shell.set_search_query("react");

        assert!(shell.sidebar_open());
        assert!(!shell.toggle_sidebar());
        assert!(shell.toggle_sidebar());

        assert_eq!(shell.search_query(), "react");
        assert_eq!(shell.visible_history().len(), 1);
        assert_eq!(shell.chat().messages().len(), 1);
    }
}
