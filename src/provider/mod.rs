//! Generative text provider trait and the OpenAI implementation.

pub mod http;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::types::{FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a generative text provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by generative text services.
///
/// Implementations report usage-plan exhaustion as
/// [`PlannerError::QuotaExceeded`] and every other service failure as
/// [`PlannerError::GenerationService`].
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate text (non-streaming). One round trip, no retries.
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, PlannerError>;
}

#[async_trait]
impl<T: ModelProvider + ?Sized> ModelProvider for Arc<T> {
    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, PlannerError> {
        (**self).generate_text(request).await
    }
}

/// Create the configured provider.
pub fn create_provider(config: &PlannerConfig) -> Result<Box<dyn ModelProvider>, PlannerError> {
    Ok(Box::new(openai::OpenAiProvider::from_config(config)?))
}
