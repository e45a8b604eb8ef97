//! Error types for generation-service operations
//!
//! Every failure coming back from the external text-generation service is
//! classified into one of five service-level kinds (see [`ErrorKind`]), so the
//! fallback loops can decide what to absorb and what to surface.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Service-level classification of a failed generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredential,
    QuotaExceeded,
    RateLimited,
    ModelUnavailable,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::InvalidCredential => "invalid-credential",
            ErrorKind::QuotaExceeded => "quota-exceeded",
            ErrorKind::RateLimited => "rate-limited",
            ErrorKind::ModelUnavailable => "model-unavailable",
            ErrorKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Main error type for LLM operations
#[derive(Debug, Error)]
pub enum LLMError {
    /// API key is missing from the environment
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// API key was rejected by the service
    #[error("Invalid API credential: {message}")]
    InvalidCredential { message: String },

    /// Account quota is used up
    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// Too many requests in a short window
    #[error("Rate limit exceeded: {message}. Retry after {retry_after:?}")]
    RateLimited { message: String, retry_after: Option<Duration> },

    /// Model not found or temporarily overloaded
    #[error("Model '{model}' not found or not available")]
    ModelUnavailable { model: String },

    /// Network error occurred
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Response body could not be understood
    #[error("Parsing error: {message}")]
    ParseError { message: String },

    /// API returned an error that fits no other class
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Generic error with context
    #[error("{context}: {message}")]
    Other { context: String, message: String },
}

impl LLMError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// Create an invalid credential error
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential { message: message.into() }
    }

    /// Create a quota error
    pub fn quota(message: impl Into<String>) -> Self {
        Self::QuotaExceeded { message: message.into() }
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimited { message: message.into(), retry_after }
    }

    /// Create a model unavailable error
    pub fn model_unavailable(model: impl Into<String>) -> Self {
        Self::ModelUnavailable { model: model.into() }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError { message: message.into() }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError { status, message: message.into() }
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other { context: context.into(), message: message.into() }
    }

    /// Map onto the five service-level classes
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredential { .. } | Self::ConfigurationError { .. } => {
                ErrorKind::InvalidCredential
            }
            Self::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            Self::NetworkError { .. }
            | Self::ParseError { .. }
            | Self::ApiError { .. }
            | Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Configuration errors are fatal and never retried
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }

    /// Human-readable remedy, where one is known
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationError { .. } | Self::InvalidCredential { .. } => Some(
                "Create an API key at https://aistudio.google.com/app/apikey and export it, \
                 e.g. `export GEMINI_API_KEY=...` (or set api.api_key_env in blogsmith.toml)",
            ),
            Self::QuotaExceeded { .. } => {
                Some("Check your plan and billing limits, or wait for the quota to reset")
            }
            Self::RateLimited { .. } => Some("Wait a minute before retrying"),
            Self::ModelUnavailable { .. } => {
                Some("Try again later or configure a different model chain")
            }
            Self::NetworkError { .. } => Some("Check your network connection"),
            _ => None,
        }
    }
}

/// Classify a non-success HTTP response from the generation service
pub fn classify_response(status: u16, body: &str, model: &str) -> LLMError {
    let lower = body.to_lowercase();

    if status == 401
        || status == 403
        || lower.contains("api key not valid")
        || lower.contains("api_key_invalid")
    {
        return LLMError::invalid_credential(truncate(body));
    }

    if status == 429 {
        if lower.contains("quota") {
            return LLMError::quota(truncate(body));
        }
        return LLMError::rate_limit(truncate(body), None);
    }

    if status == 404 || status == 503 || lower.contains("overloaded") {
        return LLMError::model_unavailable(model);
    }

    LLMError::api(status, truncate(body))
}

fn truncate(body: &str) -> String {
    body.chars().take(300).collect()
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LLMError::invalid_credential("API key not valid");
        assert_eq!(err.to_string(), "Invalid API credential: API key not valid");

        let err = LLMError::model_unavailable("gemini-9");
        assert_eq!(err.to_string(), "Model 'gemini-9' not found or not available");
    }

    #[test]
    fn test_classify_response() {
        assert_eq!(classify_response(403, "forbidden", "m").kind(), ErrorKind::InvalidCredential);
        assert_eq!(
            classify_response(400, "API key not valid. Please pass a valid API key.", "m").kind(),
            ErrorKind::InvalidCredential
        );
        assert_eq!(
            classify_response(429, "You exceeded your current quota", "m").kind(),
            ErrorKind::QuotaExceeded
        );
        assert_eq!(classify_response(429, "slow down", "m").kind(), ErrorKind::RateLimited);
        assert_eq!(classify_response(404, "not found", "m").kind(), ErrorKind::ModelUnavailable);
        assert_eq!(
            classify_response(503, "The model is overloaded", "m").kind(),
            ErrorKind::ModelUnavailable
        );
        assert_eq!(classify_response(500, "boom", "m").kind(), ErrorKind::Other);
    }

    #[test]
    fn test_remedy_and_fatal() {
        let err = LLMError::config("GEMINI_API_KEY is not set");
        assert!(err.is_fatal());
        assert!(err.remedy().unwrap().contains("GEMINI_API_KEY"));
        assert!(!LLMError::quota("x").is_fatal());
        assert!(LLMError::other("ctx", "msg").remedy().is_none());

        let err = LLMError::network("connection reset");
        assert!(!err.is_fatal());
        assert_eq!(err.remedy(), Some("Check your network connection"));
    }
}
