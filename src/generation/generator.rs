//! Turns a meal plan request into an ordered list of meal names.

use tracing::{debug, error, info, warn};

use crate::error::{PlannerError, Result};
use crate::provider::{ModelProvider, ProviderRequest};
use crate::types::{FinishReason, GenerationSettings, MealName, MealPlanRequest, ModelMessage};

use super::extract::parse_meal_names;
use super::prompt::{build_prompt, SYSTEM_PROMPT};

/// First pipeline stage: one model call per request, no retries.
pub struct PlanGenerator {
    provider: Box<dyn ModelProvider>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    pub fn new(provider: Box<dyn ModelProvider>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Ask the model for a day's meals and validate the answer.
    ///
    /// Quota exhaustion and other service failures are returned as reported
    /// by the provider; unusable output fails with `InvalidGenerationFormat`.
    pub async fn generate(&self, request: &MealPlanRequest) -> Result<Vec<MealName>> {
        let provider_request = ProviderRequest {
            messages: vec![
                ModelMessage::system(SYSTEM_PROMPT),
                ModelMessage::user(build_prompt(request)),
            ],
            settings: self.settings.clone(),
        };

        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_id(),
            day = request.day,
            "requesting meal plan"
        );
        let response = self.provider.generate_text(&provider_request).await?;

        let raw = response.text.trim();
        info!(
            raw_response = raw,
            total_tokens = response.usage.total_tokens,
            "model response received"
        );

        let truncated = response.finish_reason == Some(FinishReason::Length);
        if truncated {
            warn!(
                max_tokens = ?self.settings.max_tokens,
                "model response stopped at the token limit"
            );
        }

        parse_meal_names(raw)
            .map_err(|e| match e {
                PlannerError::InvalidGenerationFormat { reason, raw } if truncated => {
                    PlannerError::InvalidGenerationFormat {
                        reason: format!("{reason}; response was cut off at the token limit"),
                        raw,
                    }
                }
                other => other,
            })
            .inspect_err(|e| {
                error!(error = %e, "failed to parse model response as a JSON array");
            })
    }
}
