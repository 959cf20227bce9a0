//! Error types for the meal planner.

pub mod unified;

pub use unified::{ErrorCode, ErrorKind};

use thiserror::Error;

/// Message rendered to users when the generative service refuses on quota.
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "OpenAI API quota exceeded. Please check your OpenAI account or upgrade your plan.";

/// Primary error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Missing credential: {name} is not set")]
    MissingCredential { name: String },

    #[error("Generative service quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Generative service error{}: {message}", status_suffix(.status))]
    GenerationService {
        status: Option<u16>,
        message: String,
    },

    #[error("Model response is not a JSON array of meal names ({reason}); raw response: {raw}")]
    InvalidGenerationFormat { reason: String, raw: String },

    #[error("Nutrient lookup failed for '{meal}': {message}")]
    LookupService { meal: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PlannerError {
    /// Create a generative-service error carrying the HTTP status.
    pub fn generation(status: u16, message: impl Into<String>) -> Self {
        Self::GenerationService {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an invalid-format error, keeping the raw model text.
    pub fn invalid_format(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::InvalidGenerationFormat {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Create a nutrient-lookup error for one meal.
    pub fn lookup(meal: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupService {
            meal: meal.into(),
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Self::GenerationService { .. } => ErrorKind::GenerationService,
            Self::InvalidGenerationFormat { .. } => ErrorKind::InvalidGenerationFormat,
            Self::LookupService { .. } => ErrorKind::LookupService,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Configuration(_) | Self::Network(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status used when this error crosses the HTTP boundary.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::QuotaExceeded => 429,
            ErrorKind::InvalidRequest => 422,
            _ => 500,
        }
    }

    /// Raw model output attached to a format error, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::InvalidGenerationFormat { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PlannerError>;
