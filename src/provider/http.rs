//! Shared HTTP client construction and error mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{ErrorCode, PlannerError};

/// Build a reqwest client with a transport-level timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, PlannerError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success response from the generative service to an error.
///
/// Quota exhaustion is recognised from the structured `error.code` /
/// `error.type` fields, falling back to a plain substring match on the body.
pub fn status_to_error(status: u16, body: &str) -> PlannerError {
    let parsed = parse_error_body(body);
    let quota = parsed
        .as_ref()
        .is_some_and(|e| e.code.as_ref().is_some_and(ErrorCode::is_quota_exhausted))
        || body.contains("insufficient_quota");

    let message = parsed
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.to_string());

    if quota {
        PlannerError::QuotaExceeded { message }
    } else {
        PlannerError::generation(status, message)
    }
}

/// Map a transport failure while talking to the generative service.
pub fn transport_error(err: reqwest::Error) -> PlannerError {
    PlannerError::GenerationService {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

struct ProviderErrorBody {
    code: Option<ErrorCode>,
    message: Option<String>,
}

fn parse_error_body(body: &str) -> Option<ProviderErrorBody> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    let field = |name: &str| error.get(name).and_then(|v| v.as_str());
    let code = field("code")
        .or_else(|| field("type"))
        .and_then(|c| c.parse::<ErrorCode>().ok());
    Some(ProviderErrorBody {
        code,
        message: field("message").map(str::to_string),
    })
}
