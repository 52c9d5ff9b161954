//! Error taxonomy of the client.
//!
//! Every public operation returns [`ClientError`]. Its variants keep the
//! failure classes apart: input rejected before any request was made
//! ([`ClientError::Validation`]), the server answered with an error
//! ([`ClientError::Api`]), the server could not be reached
//! ([`ClientError::Transport`]), or a response did not match the expected
//! domain shape ([`ClientError::Decode`]).

use http::StatusCode;

use abacatepay_types::{DecodeError, ValidationError};

use crate::config::ConfigError;

/// The API answered with an error envelope or an unrecognized response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API request failed with status code {status_code}: {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }

    /// The status code as an [`http::StatusCode`], if it is a valid one.
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status_code).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("HTTP error: {context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header value: {context}")]
    InvalidHeader {
        context: &'static str,
        #[source]
        source: http::header::InvalidHeaderValue,
    },
    /// A successful response carried no payload where one was expected.
    #[error("empty response where {expected} was expected")]
    EmptyResponse { expected: &'static str },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// `true` if the request never left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// The API error, if the server answered with one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new(StatusCode::UNAUTHORIZED, "Invalid API key");
        assert_eq!(
            err.to_string(),
            "API request failed with status code 401: Invalid API key"
        );
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_client_error_wraps_api_error_transparently() {
        let err = ClientError::from(ApiError::new(StatusCode::NOT_FOUND, "Billing not found"));
        assert_eq!(
            err.to_string(),
            "API request failed with status code 404: Billing not found"
        );
        assert_eq!(err.api_error().map(|e| e.status_code), Some(404));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_client_error_from_validation() {
        let err = ClientError::from(ValidationError::missing("amount"));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "invalid parameter `amount`: is required");
    }
}
