//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Content type for request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// HTML content type (`text/html`).
    Html,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Html => "text/html",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use drift_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { username: String }
///
/// let user = User { username: "alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"username":"alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so a decode failure names the exact field
/// that did not match (e.g. `results[2].owner`). Failures surface as
/// [`crate::Error::Parse`]: a body the server declared successful but
/// that does not have the expected shape.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use drift_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { username: String }
///
/// let bytes = br#"{"username":"alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { username: "alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let path = e.path().to_string();
        let inner = e.inner();
        if path.is_empty() || path == "." {
            crate::Error::parse(inner.to_string())
        } else {
            crate::Error::parse(format!("{inner} (at {path})"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(ContentType::Html.as_str(), "text/html");
        assert_eq!(ContentType::PlainText.as_str(), "text/plain");
        assert_eq!(ContentType::OctetStream.as_str(), "application/octet-stream");
    }

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Json.to_string(), "application/json");
    }

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct Credentials {
            username: String,
            password: String,
        }

        let credentials = Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };

        let bytes = to_json(&credentials).expect("serialize");
        assert_eq!(
            bytes.as_ref(),
            br#"{"username":"alice","password":"secret"}"#
        );
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Token {
            token: String,
        }

        let bytes = br#"{"token":"abc"}"#;
        let token: Token = from_json(bytes).expect("deserialize");
        assert_eq!(
            token,
            Token {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn from_json_syntax_error_is_parse_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Token {
            #[allow(dead_code)]
            token: String,
        }

        let result: Result<Token> = from_json(b"not json");
        let err = result.expect_err("should fail");
        assert!(matches!(err, crate::Error::Parse(_)), "got: {err}");
    }

    #[test]
    fn from_json_missing_field_error_names_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Profile {
            #[allow(dead_code)]
            mobile: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            profile: Profile,
        }

        let result: Result<User> = from_json(br#"{"profile":{}}"#);
        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("profile"), "expected path in error: {msg}");
        assert!(msg.contains("mobile"), "expected field in error: {msg}");
    }
}
