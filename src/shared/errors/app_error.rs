use serde::Serialize;
use thiserror::Error;

/// Message used when a failure carries no usable error value (e.g. a panicking producer).
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Unknown(String),
}

impl AppError {
    /// The generic error a non-error failure is normalized into.
    pub fn unknown() -> Self {
        AppError::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
    }

    /// Message without the variant prefix, for user-facing rendering.
    pub fn message(&self) -> &str {
        match self {
            AppError::StoreError(msg)
            | AppError::ApiError(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::InternalError(msg)
            | AppError::RateLimitError(msg)
            | AppError::SerializationError(msg)
            | AppError::ValidationError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::ConfigError(msg)
            | AppError::Unknown(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                401 | 403 => {
                    AppError::Unauthorized("Not authorized to access external service".to_string())
                }
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else if err.is_decode() {
            AppError::SerializationError(err.to_string())
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidInput(format!("Invalid date/time: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

// Producers written against anyhow keep their context chain in the message.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app_error) => app_error,
            Err(other) => AppError::InternalError(format!("{:#}", other)),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_error_has_generic_message() {
        let err = AppError::unknown();
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn message_strips_variant_prefix() {
        let err = AppError::ApiError("Failed to fetch movies: Not Found".to_string());
        assert_eq!(err.to_string(), "API error: Failed to fetch movies: Not Found");
        assert_eq!(err.message(), "Failed to fetch movies: Not Found");
    }

    #[test]
    fn anyhow_errors_keep_app_error_identity() {
        let wrapped = anyhow::Error::new(AppError::NotFound("movie 7".to_string()));
        assert_eq!(AppError::from(wrapped), AppError::NotFound("movie 7".to_string()));

        let plain = anyhow::anyhow!("socket closed").context("loading trending");
        assert_eq!(
            AppError::from(plain),
            AppError::InternalError("loading trending: socket closed".to_string())
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(AppError::StoreError("offline".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "StoreError", "message": "offline"}));
    }
}
