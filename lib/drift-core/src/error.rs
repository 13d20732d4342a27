//! Error types for drift.

use std::collections::HashMap;

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Main error type for drift operations.
///
/// Every failed request resolves to exactly one variant: either the
/// transport never produced a response (`Connection`, `NoConnection`,
/// `Tls`, `Timeout`, `Auth`), the response arrived but carried a non-2xx
/// status (`Http`), or a 2xx response body was not in the expected shape
/// (`Parse`). The remaining variants cover request construction.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A response was received with a non-2xx status code.
    ///
    /// Headers are kept because error classification inspects
    /// `Content-Type` to distinguish JSON error bodies from HTML pages.
    #[display("HTTP error {status}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response headers, as delivered by the transport.
        #[error(not(source))]
        headers: HashMap<String, String>,
        /// Raw response body.
        #[error(not(source))]
        body: Bytes,
    },

    /// Network-level failure after a connection was established.
    #[display("network error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// A connection could not be established at all.
    #[display("no connection: {_0}")]
    #[from(skip)]
    NoConnection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The server answered with a success status but the body could not
    /// be decoded in the expected shape.
    ///
    /// Django REST Framework returns an empty body on a successful
    /// DELETE, which surfaces here when a JSON body was expected.
    #[display("parse error: {_0}")]
    #[from(skip)]
    Parse(#[error(not(source))] String),

    /// Authentication failure raised by the client side itself, e.g. the
    /// auth middleware could not attach credentials.
    ///
    /// Distinct from a server-reported 401/403, which arrives as `Http`.
    /// `body` carries any response bytes that accompanied the failure and
    /// may be empty.
    #[display("auth failure: {message}")]
    #[from(skip)]
    Auth {
        /// Human-readable failure description.
        message: String,
        /// Response bytes accompanying the failure, possibly empty.
        #[error(not(source))]
        body: Bytes,
    },

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from a received non-2xx response.
    #[must_use]
    pub fn http(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self::Http {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a no-connection error.
    #[must_use]
    pub fn no_connection(message: impl Into<String>) -> Self {
        Self::NoConnection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a client-side auth failure without response bytes.
    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            body: Bytes::new(),
        }
    }

    /// Create a client-side auth failure carrying response bytes.
    #[must_use]
    pub fn auth_with_body(message: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::Auth {
            message: message.into(),
            body: body.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a network error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a no-connection error.
    #[must_use]
    pub const fn is_no_connection(&self) -> bool {
        matches!(self, Self::NoConnection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this error carries one.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } | Self::Auth { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the error body as a typed value.
    ///
    /// Returns `Some(Ok(value))` if the error carries a body that
    /// deserializes successfully, `Some(Err(error))` if the body exists
    /// but deserialization fails, or `None` if there is no body.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::http(404, HashMap::new(), Bytes::new());
        assert_eq!(err.to_string(), "HTTP error 404");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("connection reset");
        assert_eq!(err.to_string(), "network error: connection reset");

        let err = Error::no_connection("failed to connect");
        assert_eq!(err.to_string(), "no connection: failed to connect");

        let err = Error::auth("token store unavailable");
        assert_eq!(err.to_string(), "auth failure: token store unavailable");
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, HashMap::new(), Bytes::new());
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = Error::http(500, HashMap::new(), Bytes::new());
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_client_error());
        assert!(err.is_server_error());

        let err = Error::Timeout;
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn error_is_not_found() {
        assert!(Error::http(404, HashMap::new(), Bytes::new()).is_not_found());
        assert!(!Error::http(400, HashMap::new(), Bytes::new()).is_not_found());
        assert!(!Error::Timeout.is_not_found());
    }

    #[test]
    fn error_body() {
        let body = Bytes::from(r#"{"detail": "not found"}"#);
        let err = Error::http(404, HashMap::new(), body.clone());
        assert_eq!(err.body(), Some(&body));

        let err = Error::auth_with_body("denied", body.clone());
        assert_eq!(err.body(), Some(&body));

        assert!(Error::Timeout.body().is_none());
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Detail {
            detail: String,
        }

        let body = Bytes::from(r#"{"detail": "not found"}"#);
        let err = Error::http(404, HashMap::new(), body);

        let decoded = err.decode_body::<Detail>();
        let result = decoded.expect("should have body");
        assert_eq!(
            result.expect("should decode"),
            Detail {
                detail: "not found".to_string()
            }
        );

        // Non-HTTP error carries no body
        assert!(Error::Timeout.decode_body::<Detail>().is_none());
    }
}
