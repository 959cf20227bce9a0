//! OpenAI Chat Completions API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::models::OpenAiModel;
use crate::types::*;

use super::http::{bearer_headers, build_client, status_to_error, transport_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct OpenAiProvider {
    model: OpenAiModel,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        model: OpenAiModel,
        api_key: String,
        base_url: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            model,
            api_key,
            base_url,
            client,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self::new(
            config.model().clone(),
            config.openai_api_key().to_string(),
            config.openai_base_url().to_string(),
            build_client(config.http_timeout())?,
        ))
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.text() }))
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model.as_str(),
            "messages": messages,
        });

        if let Some(obj) = body.as_object_mut() {
            let settings = &request.settings;
            if let Some(max) = settings.max_tokens {
                obj.insert("max_tokens".into(), max.into());
            }
            if let Some(temp) = settings.temperature {
                obj.insert("temperature".into(), temp.into());
            }
            if let Some(seed) = settings.seed {
                obj.insert("seed".into(), seed.into());
            }
            if let Some(ref user) = settings.user {
                obj.insert("user".into(), user.clone().into());
            }
        }

        body
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, PlannerError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = self.model.as_str(), "OpenAI generate_text");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await.map_err(transport_error)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::GenerationService {
                status: None,
                message: "No choices in OpenAI response".into(),
            })?;

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
        })
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
