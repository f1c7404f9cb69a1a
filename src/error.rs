//! Client error types with HTTP status code mapping.
//!
//! [`ClientError`] is the single error type of the crate. Protocol
//! violations on the SSR link, scene-state conflicts, transport failures
//! and local API validation errors all end up here. Each variant maps to a
//! numeric code and, for the local API, an HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SourceId;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "source \"vocals\" does not exist"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status               |
/// |-----------|-------------------|---------------------------|
/// | 1000–1999 | Protocol / input  | 400 Bad Request           |
/// | 2000–2999 | Scene state       | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Link / runtime    | 500 / 502                 |
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Inbound text was not valid JSON.
    #[error("unable to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Message has the wrong overall shape (e.g. not a JSON array).
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A command name was the last element of the message.
    #[error("no data for \"{0}\" command")]
    MissingPayload(String),

    /// The command name is not part of the vocabulary.
    #[error("unknown command: \"{0}\"")]
    UnknownCommand(String),

    /// A recognized attribute carried a malformed value.
    #[error("invalid value for \"{attribute}\": {reason}")]
    InvalidAttribute {
        /// Attribute (or payload) name as it appears on the wire.
        attribute: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Local API request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// `new-src` for an id that is already live.
    #[error("source \"{0}\" already exists")]
    SourceExists(SourceId),

    /// `mod-src`, `del-src` or a gesture for an id that is not live.
    #[error("source \"{0}\" does not exist")]
    SourceNotFound(SourceId),

    /// The loudspeaker set was already created.
    #[error("loudspeakers already exist")]
    LoudspeakersExist,

    /// WebSocket failure on the SSR link.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Fetching the remote configuration failed.
    #[error("config fetch failed: {0}")]
    ConfigFetch(#[from] reqwest::Error),

    /// Local configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Shorthand for [`ClientError::InvalidAttribute`].
    pub fn invalid_attribute(attribute: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Json(_) => 1000,
            Self::InvalidMessage(_) => 1001,
            Self::MissingPayload(_) => 1002,
            Self::UnknownCommand(_) => 1003,
            Self::InvalidAttribute { .. } => 1004,
            Self::InvalidRequest(_) => 1005,
            Self::SourceExists(_) => 2001,
            Self::SourceNotFound(_) => 2002,
            Self::LoudspeakersExist => 2003,
            Self::Transport(_) => 3001,
            Self::ConfigFetch(_) => 3002,
            Self::Config(_) => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Json(_)
            | Self::InvalidMessage(_)
            | Self::MissingPayload(_)
            | Self::UnknownCommand(_)
            | Self::InvalidAttribute { .. }
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SourceNotFound(_) => StatusCode::NOT_FOUND,
            Self::SourceExists(_) | Self::LoudspeakersExist => StatusCode::CONFLICT,
            Self::Transport(_) | Self::ConfigFetch(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_source_maps_to_not_found() {
        let err = ClientError::SourceNotFound(SourceId::from("vocals"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2002);
        assert_eq!(err.to_string(), "source \"vocals\" does not exist");
    }

    #[test]
    fn conflicts_map_to_409() {
        assert_eq!(
            ClientError::SourceExists(SourceId::from("a")).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ClientError::LoudspeakersExist.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn protocol_errors_are_bad_requests() {
        let err = ClientError::invalid_attribute("pos", "expected 2 or 3 numbers");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "invalid value for \"pos\": expected 2 or 3 numbers"
        );
    }

    #[test]
    fn into_response_carries_status() {
        let response = ClientError::MissingPayload("state".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
