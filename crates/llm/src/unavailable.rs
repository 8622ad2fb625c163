use super::provider::{BoxFuture, CompletionRequest, LlmProvider, ProviderError, ProviderResult, Reply};

/// Placeholder backend used when no real provider could be created.
///
/// Every completion fails, so the chat shows its fallback reply instead of
/// refusing to open.
pub struct UnavailableProvider {
    reason: String,
    model_id: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            model_id: model_id.into(),
        }
    }
}

impl LlmProvider for UnavailableProvider {
    fn id(&self) -> &str {
        "unavailable"
    }

    fn name(&self) -> &str {
        "Unavailable"
    }

    fn default_model(&self) -> &str {
        &self.model_id
    }

    fn complete<'a>(&'a self, _request: CompletionRequest) -> BoxFuture<'a, ProviderResult<Reply>> {
        let reason = self.reason.clone();
        Box::pin(async move {
            Err(ProviderError::Unavailable {
                stage: "unavailable-complete",
                reason,
            })
        })
    }
}
