//! Adapter from a provider client to the tournament's content generator.

use super::{ChatMessage, CompletionOptions, ModelProviderClient, ProviderConfig, ProviderFactory};
use crate::error::TourneyError;
use crate::tournament::{ContentGenerator, GenerationOptions};
use async_trait::async_trait;
use tracing::debug;

pub struct ProviderGenerator {
    client: Box<dyn ModelProviderClient>,
    max_tokens: Option<u32>,
}

impl ProviderGenerator {
    pub fn new(client: Box<dyn ModelProviderClient>, max_tokens: Option<u32>) -> Self {
        Self { client, max_tokens }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, TourneyError> {
        let provider = config
            .to_model_provider()
            .map_err(TourneyError::ProviderNotConfigured)?;
        let client = ProviderFactory::create_client(&provider)?;
        Ok(Self::new(client, config.max_tokens))
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[async_trait]
impl ContentGenerator for ProviderGenerator {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, TourneyError> {
        let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        let response = self
            .client
            .complete(
                messages,
                CompletionOptions {
                    temperature: Some(options.temperature),
                    max_tokens: self.max_tokens,
                },
            )
            .await?;
        debug!(
            provider = self.client.provider_name(),
            model = %response.model,
            temperature = options.temperature,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Provider completion received"
        );
        Ok(response.content)
    }
}
