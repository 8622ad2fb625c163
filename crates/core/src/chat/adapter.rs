use std::future::Future;
use std::sync::Arc;

use aura_llm::{ConversationHandle, LlmProvider, ProviderResult, Reply};

use super::message::Message;
use super::session::{ChatSession, PendingTurn, ResolveRejection};

/// One chat view's history bound to a single remote conversation.
///
/// The conversation handle is opened once at mount and reused for every turn,
/// so the remote side sees the whole exchange as one conversation.
pub struct ChatSessionAdapter {
    session: ChatSession,
    provider: Arc<dyn LlmProvider>,
    conversation: ConversationHandle,
}

impl ChatSessionAdapter {
    pub fn mount(provider: Arc<dyn LlmProvider>, welcome_message: impl Into<String>) -> Self {
        let conversation = ConversationHandle::open(provider.as_ref());
        tracing::debug!(
            conversation_id = conversation.id().0,
            provider_id = %provider.id(),
            model_id = %conversation.model_id(),
            "opened chat conversation"
        );

        Self {
            session: ChatSession::new(welcome_message),
            provider,
            conversation,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn conversation(&self) -> &ConversationHandle {
        &self.conversation
    }

    /// Appends the user message and enters `Sending`, or returns `None` when the
    /// text is blank or a turn is already in flight.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingTurn> {
        match self.session.submit(text) {
            Ok(turn) => Some(turn),
            Err(rejection) => {
                tracing::debug!(?rejection, "ignored chat submission");
                None
            }
        }
    }

    /// Builds the remote call for `turn`. The future owns everything it needs so it
    /// can run on another runtime.
    pub fn request(
        &self,
        turn: &PendingTurn,
    ) -> impl Future<Output = ProviderResult<Reply>> + Send + 'static {
        let provider = self.provider.clone();
        let conversation = self.conversation.clone();
        let text = turn.text.clone();
        async move { conversation.send(provider.as_ref(), text).await }
    }

    /// Appends the reply, or the fallback message on any failure, and returns to `Idle`.
    pub fn finish(
        &mut self,
        turn: &PendingTurn,
        outcome: ProviderResult<Reply>,
    ) -> Result<&Message, ResolveRejection> {
        match outcome {
            Ok(reply) => self.session.complete_turn(turn.user_message_id, reply.text),
            Err(error) => {
                tracing::error!(
                    conversation_id = self.conversation.id().0,
                    provider_id = %self.provider.id(),
                    error = %error,
                    "chat request failed"
                );
                self.session.fail_turn(turn.user_message_id)
            }
        }
    }

    /// Runs one full turn inline: submit, remote call, resolution.
    pub async fn submit(&mut self, text: &str) -> Option<&Message> {
        let turn = self.begin_submit(text)?;
        let outcome = self.request(&turn).await;
        self.finish(&turn, outcome).ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use aura_llm::{BoxFuture, CompletionRequest, ProviderError, UnavailableProvider};

    use super::*;
    use crate::chat::message::Sender;
    use crate::chat::session::FALLBACK_REPLY;

    const WELCOME: &str = "Hi, I'm Aura. How can I help you today?";

    #[derive(Default)]
    struct ScriptedProvider {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl LlmProvider for ScriptedProvider {
        fn id(&self) -> &str {
            "scripted"
        }

        fn name(&self) -> &str {
            "Scripted"
        }

        fn default_model(&self) -> &str {
            "scripted-model"
        }

        fn complete<'a>(
            &'a self,
            request: CompletionRequest,
        ) -> BoxFuture<'a, ProviderResult<Reply>> {
            Box::pin(async move {
                let prompt = request.prompt.clone();
                self.requests.lock().unwrap().push(request);
                if prompt == "x" {
                    return Err(ProviderError::Unavailable {
                        stage: "scripted",
                        reason: "network down".to_string(),
                    });
                }
                Ok(Reply::new(format!("reply to {prompt}")))
            })
        }
    }

    fn transcript(adapter: &ChatSessionAdapter) -> Vec<(Sender, String)> {
        adapter
            .messages()
            .iter()
            .map(|message| (message.sender, message.text.clone()))
            .collect()
    }

    #[tokio::test]
    async fn hello_round_trip_orders_history_and_brackets_loading() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut adapter = ChatSessionAdapter::mount(provider.clone(), WELCOME);
        assert_eq!(transcript(&adapter), vec![(Sender::Ai, WELCOME.to_string())]);
        assert!(!adapter.is_loading());

        let turn = adapter.begin_submit("hello").unwrap();
        assert!(adapter.is_loading());
        assert_eq!(adapter.messages().len(), 2);

        let outcome = adapter.request(&turn).await;
        assert!(adapter.is_loading());

        adapter.finish(&turn, outcome).unwrap();
        assert!(!adapter.is_loading());
        assert_eq!(
            transcript(&adapter),
            vec![
                (Sender::Ai, WELCOME.to_string()),
                (Sender::User, "hello".to_string()),
                (Sender::Ai, "reply to hello".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn second_submission_while_pending_is_ignored() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut adapter = ChatSessionAdapter::mount(provider.clone(), WELCOME);

        let turn = adapter.begin_submit("first").unwrap();
        assert!(adapter.begin_submit("second").is_none());
        assert_eq!(adapter.messages().len(), 2);

        let outcome = adapter.request(&turn).await;
        adapter.finish(&turn, outcome).unwrap();

        assert_eq!(provider.requests.lock().unwrap().len(), 1);
        assert!(adapter.begin_submit("second").is_some());
    }

    #[tokio::test]
    async fn remote_failure_shows_fallback_reply() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut adapter = ChatSessionAdapter::mount(provider, WELCOME);

        let reply = adapter.submit("x").await.unwrap();
        assert_eq!(reply.text, FALLBACK_REPLY);

        assert!(!adapter.is_loading());
        assert_eq!(
            transcript(&adapter)[1..],
            [
                (Sender::User, "x".to_string()),
                (Sender::Ai, FALLBACK_REPLY.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn one_conversation_carries_context_across_turns() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut adapter = ChatSessionAdapter::mount(provider.clone(), WELCOME);
        let conversation_id = adapter.conversation().id();

        adapter.submit("one").await.unwrap();
        adapter.submit("x").await.unwrap();
        adapter.submit("two").await.unwrap();

        assert_eq!(adapter.conversation().id(), conversation_id);
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].model_id, "scripted-model");
        // The failed "x" turn is not replayed.
        assert_eq!(requests[2].history.len(), 2);
        assert_eq!(requests[2].history[0].content, "one");
    }

    #[tokio::test]
    async fn unavailable_provider_still_lets_the_chat_run() {
        let provider = Arc::new(UnavailableProvider::new("missing API key", "gpt-4o-mini"));
        let mut adapter = ChatSessionAdapter::mount(provider, WELCOME);

        let reply = adapter.submit("hello").await.unwrap();

        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(adapter.messages().len(), 3);
    }

    #[tokio::test]
    async fn blank_submission_does_not_reach_the_provider() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut adapter = ChatSessionAdapter::mount(provider.clone(), WELCOME);

        assert!(adapter.submit("   ").await.is_none());
        assert!(provider.requests.lock().unwrap().is_empty());
        assert_eq!(adapter.messages().len(), 1);
    }
}
