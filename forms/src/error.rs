//! Error types shared across the crate.

use thiserror::Error;

/// Misuse of a form's declared fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no field named `{0}` is declared by this form")]
    UnknownField(String),
    #[error("field `{field}` holds a {expected} value, got a {found} value")]
    KindMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field `{0}` is not a file field")]
    NotAFileField(String),
    #[error("files of `{0}` must be replaced through a file selection")]
    FilesNeedSelection(String),
}

/// Failure to complete an HTTP exchange with the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("could not reach the server: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("attachment `{name}` cannot be sent: {reason}")]
    InvalidPart { name: String, reason: String },
    #[error("could not build the HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self::Connect(err.to_string());
        }
        Self::Request(err.to_string())
    }
}

/// Failure of the durable token storage behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    #[error("token storage rejected the write: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        assert_eq!(
            FormError::UnknownField("budget".to_owned()).to_string(),
            "no field named `budget` is declared by this form"
        );
        assert_eq!(
            FormError::KindMismatch {
                field: "privacyAccepted".to_owned(),
                expected: "boolean",
                found: "text",
            }
            .to_string(),
            "field `privacyAccepted` holds a boolean value, got a text value"
        );
    }

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::Timeout.to_string(), "request timed out");
        assert_eq!(
            ClientError::InvalidPart {
                name: "plan.pdf".to_owned(),
                reason: "bad mime".to_owned(),
            }
            .to_string(),
            "attachment `plan.pdf` cannot be sent: bad mime"
        );
    }
}
