//! Error classification shared by the HTTP surface and callers.

use strum::{Display, EnumString};

/// Machine-readable error code reported by the generative service.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    InvalidApiKey,
    InsufficientQuota,
    RateLimitExceeded,
    ModelNotFound,
    InvalidRequestError,
    ServerError,
    #[strum(default)]
    Other(String),
}

impl ErrorCode {
    /// Whether this code means the account's usage plan is exhausted.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::InsufficientQuota)
    }
}

/// Broad error kind, one per outcome a caller must be able to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    QuotaExceeded,
    GenerationService,
    InvalidGenerationFormat,
    LookupService,
    InvalidRequest,
    Internal,
}
