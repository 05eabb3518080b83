//! Error types for the Postmark client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during Postmark operations.
///
/// Exactly one variant is produced per failed call. Use [`Error::as_api`] or
/// [`Error::as_http`] to branch on the failure kind instead of matching on
/// the rendered message.
#[derive(Debug, Error)]
pub enum Error {
    /// The server parsed the request and rejected it with a structured body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered with a non-success status that carried no structured error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A successful response body did not match the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A credential or caller-supplied header is not a valid header value.
    #[error("invalid value for header `{name}`")]
    InvalidHeader {
        /// Name of the offending header.
        name: String,
    },
}

impl Error {
    /// The structured API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// The generic HTTP error, if this is one.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(err) => Some(err),
            _ => None,
        }
    }

    /// The transport failure, if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` for [`Error::Api`].
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Returns `true` for [`Error::Http`].
    pub fn is_http(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns `true` for [`Error::Transport`].
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns `true` for [`Error::Decode`].
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// HTTP status of the response that caused this error, when there was one.
    ///
    /// Structured API errors are only ever produced for
    /// `422 Unprocessable Entity`, so they report that status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(_) => Some(StatusCode::UNPROCESSABLE_ENTITY.as_u16()),
            Error::Http(err) => Some(err.status_code),
            _ => None,
        }
    }
}

/// Structured rejection returned by the API with status 422.
///
/// Wire shape: `{"ErrorCode": 402, "Message": "Invalid JSON"}`. The error
/// code is Postmark's own numbering and unrelated to the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("API error {error_code}: {message}")]
pub struct ApiError {
    /// Postmark-specific error code.
    #[serde(rename = "ErrorCode")]
    pub error_code: i64,
    /// Human-readable explanation.
    #[serde(rename = "Message")]
    pub message: String,
}

/// Any non-success response that did not decode into an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP status {status_code}")]
pub struct HttpError {
    /// Numeric HTTP status.
    pub status_code: u16,
    /// Raw response body, kept for diagnostics.
    pub body: String,
}

impl HttpError {
    /// The status as a typed [`StatusCode`].
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// The HTTP exchange could not be completed.
#[derive(Debug, Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    #[source]
    source: BoxError,
    timeout: bool,
    connect: bool,
}

impl TransportError {
    /// Wrap an arbitrary transport-level failure.
    ///
    /// Custom [`Transport`](crate::Transport) implementations use this to
    /// report errors from their own HTTP stack.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
            timeout: false,
            connect: false,
        }
    }

    /// Mark this failure as a timeout.
    pub fn with_timeout(mut self) -> Self {
        self.timeout = true;
        self
    }

    /// Mark this failure as a connection failure.
    pub fn with_connect(mut self) -> Self {
        self.connect = true;
        self
    }

    /// Whether the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        self.timeout
    }

    /// Whether the connection could not be established.
    pub fn is_connect(&self) -> bool {
        self.connect
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let timeout = err.is_timeout();
        let connect = err.is_connect();
        Self {
            source: Box::new(err),
            timeout,
            connect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn api_error_decodes_from_wire_shape() {
        let err: ApiError =
            serde_json::from_str(r#"{"ErrorCode": 402, "Message": "Invalid JSON"}"#).unwrap();
        assert_eq!(err.error_code, 402);
        assert_eq!(err.message, "Invalid JSON");
        assert_eq!(err.to_string(), "API error 402: Invalid JSON");
    }

    #[test]
    fn api_error_requires_both_fields() {
        assert!(serde_json::from_str::<ApiError>(r#"{"Message": "nope"}"#).is_err());
        assert!(serde_json::from_str::<ApiError>(r#"{"ErrorCode": 1}"#).is_err());
        assert!(serde_json::from_str::<ApiError>("null").is_err());
    }

    #[test]
    fn helpers_discriminate_variants() {
        let api = Error::from(ApiError {
            error_code: 300,
            message: "Invalid email request".to_string(),
        });
        assert!(api.is_api());
        assert!(!api.is_http());
        assert_eq!(api.as_api().map(|e| e.error_code), Some(300));
        assert!(api.as_http().is_none());
        assert_eq!(api.status_code(), Some(422));

        let http = Error::from(HttpError {
            status_code: 404,
            body: "not found".to_string(),
        });
        assert!(http.is_http());
        assert!(!http.is_api());
        assert_eq!(http.as_http().map(|e| e.status()), Some(StatusCode::NOT_FOUND));
        assert_eq!(http.status_code(), Some(404));
        assert_eq!(http.to_string(), "HTTP status 404");
    }

    #[test]
    fn transport_error_keeps_source_and_flags() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::from(TransportError::new(io).with_connect());

        assert!(err.is_transport());
        assert!(!err.is_http());
        assert_eq!(err.status_code(), None);

        let transport = err.as_transport().unwrap();
        assert!(transport.is_connect());
        assert!(!transport.is_timeout());
        assert!(transport.source().is_some());
        assert_eq!(err.to_string(), "transport failure: refused");
    }

    #[test]
    fn concrete_errors_downcast_from_boxed_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(HttpError {
            status_code: 500,
            body: String::new(),
        });
        assert_eq!(boxed.downcast_ref::<HttpError>().map(|e| e.status_code), Some(500));
        assert!(boxed.downcast_ref::<ApiError>().is_none());
    }
}
