//! Error type shared by every Mailpit operation.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for all Mailpit client operations.
///
/// Every transport failure is normalized into one of these four kinds before it
/// reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a status other than `200 OK`.
    ///
    /// `body` holds the response body serialized as JSON: JSON bodies are
    /// re-serialized, plain-text bodies become a JSON string.
    #[error("Mailpit API Error: {status} {status_text}: {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },
    /// The request went out but no response came back (connection refused,
    /// reset, or timed out).
    #[error("Mailpit API Error: No response received from server.")]
    NoResponse(#[source] reqwest::Error),
    /// The request could not be built or dispatched.
    #[error("Mailpit API Error: {0}")]
    Request(String),
    /// Anything else, such as a 200 response whose body does not decode.
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl Error {
    /// HTTP status code of a rejected request, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an [`Error::Api`] from a rejected response's status and raw body.
    pub(crate) fn api(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(body.to_string()),
        };

        Error::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: detail.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Request(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            Error::NoResponse(err)
        } else {
            Error::Unexpected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reserializes_json_body() {
        let err = Error::api(StatusCode::BAD_REQUEST, r#"{ "Error": "invalid ID" }"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            r#"Mailpit API Error: 400 Bad Request: {"Error":"invalid ID"}"#
        );
    }

    #[test]
    fn api_error_quotes_text_body() {
        let err = Error::api(StatusCode::NOT_FOUND, "message not found");
        assert_eq!(
            err.to_string(),
            r#"Mailpit API Error: 404 Not Found: "message not found""#
        );
    }

    #[test]
    fn non_api_errors_have_no_status() {
        let err = Error::Unexpected("boom".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Unexpected Error: boom");

        let err = Error::Request("relative URL without a base".into());
        assert_eq!(err.to_string(), "Mailpit API Error: relative URL without a base");
    }
}
