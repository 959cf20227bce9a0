//! Process configuration: credentials, endpoints and pipeline policy.
//!
//! Built once at startup and passed by reference into the generator and the
//! resolver. Construction fails fast when either credential is missing.

use std::fmt;
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::models::OpenAiModel;
use crate::nutrition::LookupFailurePolicy;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const USDA_API_KEY_VAR: &str = "USDA_API_KEY";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Immutable planner configuration.
#[derive(Clone)]
pub struct PlannerConfig {
    openai_api_key: String,
    usda_api_key: String,
    openai_base_url: String,
    usda_base_url: String,
    model: OpenAiModel,
    lookup_policy: LookupFailurePolicy,
    http_timeout: Duration,
}

impl fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("openai_api_key", &"<redacted>")
            .field("usda_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("usda_base_url", &self.usda_base_url)
            .field("model", &self.model)
            .field("lookup_policy", &self.lookup_policy)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn require(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PlannerError::MissingCredential {
            name: name.to_string(),
        }),
    }
}

impl PlannerConfig {
    /// Create a config from both credentials, with default endpoints and policy.
    pub fn new(openai_api_key: impl Into<String>, usda_api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            openai_api_key: require(OPENAI_API_KEY_VAR, Some(openai_api_key.into()))?,
            usda_api_key: require(USDA_API_KEY_VAR, Some(usda_api_key.into()))?,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            usda_base_url: DEFAULT_USDA_BASE_URL.to_string(),
            model: OpenAiModel::default(),
            lookup_policy: LookupFailurePolicy::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        })
    }

    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_api_key = require(OPENAI_API_KEY_VAR, get(OPENAI_API_KEY_VAR))?;
        let usda_api_key = require(USDA_API_KEY_VAR, get(USDA_API_KEY_VAR))?;
        let mut config = Self::new(openai_api_key, usda_api_key)?;

        if let Some(url) = get("OPENAI_BASE_URL") {
            config = config.with_openai_base_url(url);
        }
        if let Some(url) = get("USDA_BASE_URL") {
            config = config.with_usda_base_url(url);
        }
        if let Some(model) = get("MEAL_PLAN_MODEL") {
            // OpenAiModel parsing is infallible: unknown IDs become `Custom`.
            config.model = model.parse().unwrap_or_default();
        }
        if let Some(policy) = get("NUTRIENT_LOOKUP_POLICY") {
            config.lookup_policy = policy.parse().map_err(|_| {
                PlannerError::Configuration(format!(
                    "NUTRIENT_LOOKUP_POLICY must be 'degrade' or 'abort', got '{policy}'"
                ))
            })?;
        }
        if let Some(secs) = get("HTTP_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| {
                    PlannerError::Configuration(format!(
                        "HTTP_TIMEOUT_SECS must be a positive whole number of seconds, got '{secs}'"
                    ))
                })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_usda_base_url(mut self, url: impl Into<String>) -> Self {
        self.usda_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_lookup_policy(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn usda_api_key(&self) -> &str {
        &self.usda_api_key
    }

    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    pub fn usda_base_url(&self) -> &str {
        &self.usda_base_url
    }

    pub fn model(&self) -> &OpenAiModel {
        &self.model
    }

    pub fn lookup_policy(&self) -> LookupFailurePolicy {
        self.lookup_policy
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn both_credentials_yield_defaults() {
        let config =
            PlannerConfig::from_vars(vars(&[("OPENAI_API_KEY", "sk-1"), ("USDA_API_KEY", "u-1")]))
                .unwrap();
        assert_eq!(config.openai_api_key(), "sk-1");
        assert_eq!(config.usda_api_key(), "u-1");
        assert_eq!(config.openai_base_url(), DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.usda_base_url(), DEFAULT_USDA_BASE_URL);
        assert_eq!(config.model(), &OpenAiModel::Gpt4o);
        assert_eq!(config.lookup_policy(), LookupFailurePolicy::DegradeToEmpty);
        assert_eq!(config.http_timeout(), DEFAULT_HTTP_TIMEOUT);
    }

    #[test]
    fn missing_openai_key_is_fatal() {
        let err = PlannerConfig::from_vars(vars(&[("USDA_API_KEY", "u-1")])).unwrap_err();
        match err {
            PlannerError::MissingCredential { name } => assert_eq!(name, "OPENAI_API_KEY"),
            other => panic!("expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn blank_usda_key_is_fatal() {
        let err = PlannerConfig::from_vars(vars(&[("OPENAI_API_KEY", "sk-1"), ("USDA_API_KEY", "  ")]))
            .unwrap_err();
        match err {
            PlannerError::MissingCredential { name } => assert_eq!(name, "USDA_API_KEY"),
            other => panic!("expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn overrides_are_applied() {
        let config = PlannerConfig::from_vars(vars(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("USDA_API_KEY", "u-1"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("USDA_BASE_URL", "http://localhost:9001"),
            ("MEAL_PLAN_MODEL", "gpt-4o-mini"),
            ("NUTRIENT_LOOKUP_POLICY", "abort"),
            ("HTTP_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.openai_base_url(), "http://localhost:9000/v1");
        assert_eq!(config.usda_base_url(), "http://localhost:9001");
        assert_eq!(config.model(), &OpenAiModel::Gpt4oMini);
        assert_eq!(config.lookup_policy(), LookupFailurePolicy::AbortAll);
        assert_eq!(config.http_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn bad_policy_is_a_configuration_error() {
        let err = PlannerConfig::from_vars(vars(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("USDA_API_KEY", "u-1"),
            ("NUTRIENT_LOOKUP_POLICY", "retry"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PlannerError::Configuration(_)));
    }

    #[test]
    fn zero_or_garbage_timeout_is_a_configuration_error() {
        for value in ["0", "-5", "soon"] {
            let err = PlannerConfig::from_vars(vars(&[
                ("OPENAI_API_KEY", "sk-1"),
                ("USDA_API_KEY", "u-1"),
                ("HTTP_TIMEOUT_SECS", value),
            ]))
            .unwrap_err();
            assert!(matches!(err, PlannerError::Configuration(_)), "value {value}");
        }
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = PlannerConfig::new("sk-secret", "usda-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("usda-secret"));
    }
}
