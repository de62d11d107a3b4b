//! Client error types

use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend refused to validate the credential at all; the session has
    /// been cleared and no retry was attempted
    #[error("Credentials rejected: {0}")]
    CredentialsRejected(String),

    /// The silent refresh failed; the session has been cleared
    #[error("Session expired: {0}")]
    SessionExpired(#[source] Box<ClientError>),

    /// Authentication failed (after the retry, or on a request that does not
    /// take part in session recovery)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Payload failed backend validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and the raw response body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = message_from_body(status, body);
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::CredentialsRejected(_) | Self::AuthenticationFailed(_) => Some(401),
            Self::SessionExpired(inner) => inner.status(),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the error belongs to the authentication family
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::CredentialsRejected(_) | Self::SessionExpired(_) | Self::AuthenticationFailed(_)
        )
    }

    /// Whether the session was torn down and the user has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::CredentialsRejected(_) | Self::SessionExpired(_))
    }

    /// The backend's own message for business errors, or the display string
    pub fn detail(&self) -> String {
        match self {
            Self::CredentialsRejected(message)
            | Self::AuthenticationFailed(message)
            | Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message)
            | Self::ServerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Message suitable for inline display in a form or page
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::CredentialsRejected(_) | Self::SessionExpired(_) => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::Serialization(_) => "The server sent an unexpected response.".to_string(),
            other => other.detail(),
        }
    }
}

/// Extract a human readable message from an error response body.
///
/// The backend reports errors as `{"detail": ...}` where `detail` is either a
/// string or a list of validation entries carrying a `msg` field.
pub fn message_from_body(status: StatusCode, body: &str) -> String {
    if let Some(detail) = detail_from_body(body) {
        return detail;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| status.to_string(), ToString::to_string)
    } else {
        trimmed.to_string()
    }
}

/// The `detail` field of a JSON error body, flattened to a single line
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        JsonValue::String(detail) => Some(detail.clone()),
        JsonValue::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .map(|entry| match entry.get("msg").and_then(JsonValue::as_str) {
                    Some(msg) => msg.to_string(),
                    None => entry.to_string(),
                })
                .collect();
            Some(messages.join("; "))
        }
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_extracted() {
        let body = r#"{"detail":"Incorrect username or password"}"#;
        let err = ClientError::from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ClientError::BadRequest(ref m) if m == "Incorrect username or password"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_validation_detail_is_flattened() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required","type":"value_error.missing"},{"loc":["body","phone"],"msg":"field required"}]}"#;
        let err = ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.detail(), "field required; field required");
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.detail(), "boom");

        let err = ClientError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.detail(), "Not Found");
    }

    #[test]
    fn test_auth_classification() {
        let rejected = ClientError::CredentialsRejected("Could not validate credentials".into());
        assert!(rejected.is_auth_failure());
        assert!(rejected.requires_login());

        let expired = ClientError::SessionExpired(Box::new(ClientError::AuthenticationFailed(
            "Refresh token missing".into(),
        )));
        assert!(expired.requires_login());
        assert_eq!(expired.status(), Some(401));

        let failed = ClientError::AuthenticationFailed("nope".into());
        assert!(failed.is_auth_failure());
        assert!(!failed.requires_login());
    }
}
