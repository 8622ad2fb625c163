use futures::StreamExt;
use rig::completion::{CompletionModel, Message as RigMessage};
use rig::prelude::CompletionClient;
use rig::providers::openai;
use rig::streaming::StreamedAssistantContent;
use snafu::{ResultExt, ensure};

use super::provider::{
    BoxFuture, CompletionRequest, CompletionsFailedSnafu, DEFAULT_OPENAI_MODEL, EmptyPromptSnafu,
    EmptyReplySnafu, HttpClientSnafu, LlmProvider, MissingApiKeySnafu, ProviderConfig,
    ProviderMessage, ProviderResult, Reply, Role,
};

pub const RIG_OPENAI_PROVIDER_ID: &str = "openai";

/// OpenAI-compatible chat backend driven through rig.
pub struct RigProviderAdapter {
    config: ProviderConfig,
}

impl RigProviderAdapter {
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        ensure!(
            !config.api_key.is_empty(),
            MissingApiKeySnafu {
                stage: "rig-adapter-new",
                provider_id: config.provider_id.clone(),
            }
        );

        Ok(Self { config })
    }

    fn build_client(config: &ProviderConfig) -> ProviderResult<openai::Client> {
        let mut builder = openai::Client::builder().api_key(config.api_key.as_str());
        if !config.base_url.is_empty() {
            builder = builder.base_url(config.base_url.as_str());
        }
        builder.build().context(HttpClientSnafu {
            stage: "build-client",
        })
    }

    fn to_rig_message(message: &ProviderMessage) -> RigMessage {
        match message.role {
            Role::User => RigMessage::user(message.content.clone()),
            Role::Assistant => RigMessage::assistant(message.content.clone()),
        }
    }

    async fn run_completion(
        config: &ProviderConfig,
        request: CompletionRequest,
    ) -> ProviderResult<Reply> {
        ensure!(
            !request.prompt.trim().is_empty(),
            EmptyPromptSnafu {
                stage: "run-completion"
            }
        );

        let client = Self::build_client(config)?;
        let model = client.completion_model(request.model_id.clone());
        let history = request
            .history
            .iter()
            .map(Self::to_rig_message)
            .collect::<Vec<_>>();

        let mut builder = model
            .completion_request(RigMessage::user(request.prompt.clone()))
            .messages(history);

        if let Some(preamble) = request.preamble.as_ref()
            && !preamble.trim().is_empty()
        {
            builder = builder.preamble(preamble.clone());
        }

        let mut stream = builder.stream().await.context(CompletionsFailedSnafu {
            stage: "open-stream",
        })?;

        // Replies are shown whole, so text deltas are gathered until the stream ends.
        let mut text = String::new();
        while let Some(item) = stream.next().await {
            let item = item.context(CompletionsFailedSnafu {
                stage: "stream-chunk",
            })?;
            if let StreamedAssistantContent::Text(chunk) = item {
                text.push_str(&chunk.text);
            }
        }

        if text.trim().is_empty() {
            tracing::warn!(
                provider_id = %config.provider_id,
                model_id = %request.model_id,
                "provider stream finished without any text"
            );
            return EmptyReplySnafu {
                stage: "collect-stream",
                model_id: request.model_id,
            }
            .fail();
        }

        Ok(Reply::new(text))
    }
}

impl LlmProvider for RigProviderAdapter {
    fn id(&self) -> &str {
        &self.config.provider_id
    }

    fn name(&self) -> &str {
        "Rig OpenAI"
    }

    fn default_model(&self) -> &str {
        if self.config.model_id.is_empty() {
            DEFAULT_OPENAI_MODEL
        } else {
            &self.config.model_id
        }
    }

    fn preamble(&self) -> Option<&str> {
        self.config.preamble.as_deref()
    }

    fn complete<'a>(&'a self, request: CompletionRequest) -> BoxFuture<'a, ProviderResult<Reply>> {
        Box::pin(async move {
            let model_id = request.model_id.clone();
            let result = Self::run_completion(&self.config, request).await;
            if let Err(error) = &result {
                tracing::error!(
                    provider_id = %self.config.provider_id,
                    model_id = %model_id,
                    error = %error,
                    "completion request failed"
                );
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;

    #[test]
    fn blank_api_key_is_rejected() {
        let config = ProviderConfig::new("openai", "  ", "", "");
        let error = RigProviderAdapter::new(config).err().unwrap();
        assert!(matches!(error, ProviderError::MissingApiKey { .. }));
    }

    #[test]
    fn blank_model_falls_back_to_default() {
        let config = ProviderConfig::new("openai", "sk-test", "", " ");
        let adapter = RigProviderAdapter::new(config).unwrap();
        assert_eq!(adapter.default_model(), DEFAULT_OPENAI_MODEL);
    }
}
