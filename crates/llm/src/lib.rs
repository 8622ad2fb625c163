use std::sync::Arc;

mod conversation;
mod provider;
mod rig_adapter;
mod unavailable;

pub use conversation::{ConversationHandle, ConversationId};
pub use provider::{
    BoxFuture, CompletionRequest, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, LlmProvider,
    ProviderConfig, ProviderError, ProviderMessage, ProviderResult, Reply, Role,
};
pub use rig_adapter::{RIG_OPENAI_PROVIDER_ID, RigProviderAdapter};
pub use unavailable::UnavailableProvider;

pub fn create_provider(mut config: ProviderConfig) -> ProviderResult<Arc<dyn LlmProvider>> {
    if config.provider_id.trim().is_empty() {
        config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
    }

    match config.provider_id.as_str() {
        "openai" | "rig-openai" => {
            config.provider_id = RIG_OPENAI_PROVIDER_ID.to_string();
            Ok(Arc::new(RigProviderAdapter::new(config)?))
        }
        _ => Err(ProviderError::UnsupportedProvider {
            stage: "create-provider",
            provider_id: config.provider_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_provider_id_resolves_to_openai() {
        let provider = create_provider(ProviderConfig::new("", "sk-test", "", "")).unwrap();
        assert_eq!(provider.id(), RIG_OPENAI_PROVIDER_ID);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let error = create_provider(ProviderConfig::new("gemini", "key", "", ""))
            .err()
            .unwrap();
        assert!(matches!(error, ProviderError::UnsupportedProvider { .. }));
    }

    #[tokio::test]
    async fn unavailable_provider_always_fails() {
        let provider = UnavailableProvider::new("no API key configured", "gpt-4o-mini");
        let handle = ConversationHandle::open(&provider);

        let error = handle.send(&provider, "hello").await.unwrap_err();

        assert!(matches!(error, ProviderError::Unavailable { .. }));
        assert!(handle.transcript().await.is_empty());
    }
}
