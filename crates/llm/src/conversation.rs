use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use snafu::ensure;
use tokio::sync::Mutex;

use super::provider::{
    CompletionRequest, EmptyPromptSnafu, LlmProvider, ProviderMessage, ProviderResult, Reply,
};

static NEXT_CONVERSATION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for one conversation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(pub u64);

impl ConversationId {
    fn next() -> Self {
        Self(NEXT_CONVERSATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque multi-turn chat state, created once per chat view and passed to every send.
///
/// Clones share the same transcript. Only exchanges that produced a reply are committed,
/// so a failed turn is never replayed as context.
#[derive(Debug, Clone)]
pub struct ConversationHandle {
    id: ConversationId,
    model_id: String,
    preamble: Option<String>,
    turns: Arc<Mutex<Vec<ProviderMessage>>>,
}

impl ConversationHandle {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            id: ConversationId::next(),
            model_id: model_id.into(),
            preamble: None,
            turns: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Opens a handle using the provider's default model and preamble.
    pub fn open(provider: &dyn LlmProvider) -> Self {
        let handle = Self::new(provider.default_model());
        match provider.preamble() {
            Some(preamble) => handle.with_preamble(preamble),
            None => handle,
        }
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn transcript(&self) -> Vec<ProviderMessage> {
        self.turns.lock().await.clone()
    }

    /// Sends one user turn with all committed turns as context.
    ///
    /// The transcript lock is held for the whole call, so concurrent sends on one
    /// handle run one after another.
    pub async fn send(
        &self,
        provider: &dyn LlmProvider,
        text: impl Into<String>,
    ) -> ProviderResult<Reply> {
        let text = text.into();
        ensure!(
            !text.trim().is_empty(),
            EmptyPromptSnafu {
                stage: "conversation-send"
            }
        );

        let mut turns = self.turns.lock().await;
        let request = CompletionRequest::new(self.model_id.clone(), text.clone())
            .with_history(turns.clone())
            .with_preamble(self.preamble.clone());

        tracing::debug!(
            conversation_id = self.id.0,
            provider_id = %provider.id(),
            model_id = %self.model_id,
            history_len = turns.len(),
            "sending conversation turn"
        );

        let reply = provider.complete(request).await?;
        turns.push(ProviderMessage::user(text));
        turns.push(ProviderMessage::assistant(reply.text.clone()));
        Ok(reply)
    }
}
