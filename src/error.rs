//! Error types for the Feedly client.

use crate::response::Rate;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type for Feedly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Feedly client.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be built.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Network or HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local I/O failed: the response cache or a raw byte sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A non-empty response body was not valid JSON for the target type.
    #[error("Failed to decode response: {source}")]
    Decode {
        /// Underlying JSON error
        source: serde_json::Error,
        /// Rate-limit state of the response that failed to decode
        rate: Rate,
    },

    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message
        message: String,
        /// Rate-limit state of the response
        rate: Rate,
    },

    /// Access forbidden.
    #[error("Access forbidden: {message}")]
    Forbidden {
        /// Error message
        message: String,
        /// Rate-limit state of the response
        rate: Rate,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Error message
        message: String,
        /// Rate-limit state of the response
        rate: Rate,
    },

    /// Rate limit exceeded.
    #[error("Rate limited: {message}")]
    RateLimit {
        /// Error message
        message: String,
        /// Rate-limit state, including when the window resets
        rate: Rate,
    },

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Feedly error id, useful when reporting problems
        error_id: Option<String>,
        /// Rate-limit state of the response
        rate: Rate,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an error from a non-success response body.
    pub(crate) fn from_response(status: StatusCode, body: &[u8], rate: Rate) -> Self {
        let (message, error_id) = match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(err) => (
                err.error_message.unwrap_or_else(|| "Unknown error".into()),
                err.error_id,
            ),
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    ("Unknown error".into(), None)
                } else {
                    (text, None)
                }
            }
        };

        match status.as_u16() {
            401 => Error::Authentication { message, rate },
            403 => Error::Forbidden { message, rate },
            404 => Error::NotFound { message, rate },
            429 => Error::RateLimit { message, rate },
            status => Error::Api {
                status,
                message,
                error_id,
                rate,
            },
        }
    }

    /// Rate-limit state attached to the error, if the server responded at all.
    pub fn rate(&self) -> Option<&Rate> {
        match self {
            Error::Decode { rate, .. }
            | Error::Authentication { rate, .. }
            | Error::Forbidden { rate, .. }
            | Error::NotFound { rate, .. }
            | Error::RateLimit { rate, .. }
            | Error::Api { rate, .. } => Some(rate),
            Error::MalformedRequest(_) | Error::Http(_) | Error::Io(_) | Error::Config(_) => None,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_id: Option<String>,
    error_message: Option<String>,
}
