//! Error classification for Django REST Framework responses.
//!
//! [`classify`] turns a finished [`Error`] into exactly one of eighteen
//! terminal categories, extracting the most useful message fragment from
//! the response body along the way. DRF error bodies consistently carry a
//! `detail` field (and sometimes `data`); HTML bodies come from
//! misconfigured deployments where Django answers with a debug page.
//!
//! Classification is a pure function over the error value: no I/O, no
//! shared state, safe to call from any number of concurrent completions.
//!
//! # Example
//!
//! ```ignore
//! match client.get("/users/42").await {
//!     Ok(response) => { /* ... */ }
//!     Err(err) => match classify(&err) {
//!         Classified::NotFound(msg) => eprintln!("gone: {msg}"),
//!         other => other.dispatch(&mut handler),
//!     },
//! }
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::{DrfErrorHandler, Error};

/// Default messages for DRF error bodies that omit a usable `detail`.
const MSG_HTML_BAD_REQUEST: &str = "Server configuration has some error.";
const MSG_HTML_NOT_FOUND: &str = "API Endpoint not found.";
const MSG_METHOD_NOT_ALLOWED: &str = "Invalid method used in request.";
const MSG_NOT_FOUND: &str = "Object with provided detail does not exists.";
const MSG_FORBIDDEN: &str = "You're not allowed to make this request.";
const MSG_UNSUPPORTED_MEDIA: &str = "Request sent in invalid format.";
const MSG_AUTH_FORBIDDEN: &str = "Couldn't perform task because of permission error.";

/// The eighteen terminal classifications.
///
/// Every [`classify`] call resolves to exactly one category; the
/// `*Body` variants mark the cases where the payload is the whole parsed
/// JSON object rather than a flattened message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Network-level failure after a connection was established.
    NetworkError,
    /// Auth failure raised by the client side itself.
    AuthFailure,
    /// Request deadline elapsed.
    Timeout,
    /// No connection could be established.
    NoConnection,
    /// 2xx response with a malformed body.
    ParseError,
    /// 405 with a JSON body.
    MethodNotAllowed,
    /// 404, JSON or HTML body.
    NotFound,
    /// 400 with a flattenable message.
    BadRequest,
    /// 400 carrying field-level validation errors.
    BadRequestBody,
    /// 401 or 403 reported by the server.
    Forbidden,
    /// 422 with a flattenable message.
    UnprocessableEntity,
    /// 422 carrying field-level validation errors.
    UnprocessableEntityBody,
    /// 415 with a JSON body.
    UnsupportedMediaType,
    /// 4xx body that is neither valid JSON nor HTML-tagged.
    NonJson,
    /// 4xx JSON body with an unhandled status code.
    DefaultJson,
    /// 4xx HTML body with an unhandled status code.
    DefaultHtml,
    /// 5xx response.
    ServerError,
    /// Anything not matched above.
    Default,
}

/// A classification outcome: one category plus its extracted payload.
///
/// String categories carry the flattened human-readable message; the
/// structured categories carry the entire parsed JSON object, preserving
/// DRF's per-field validation errors (`{"field": ["message"], ...}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// Network-level failure; payload is the transport message.
    Network(String),
    /// Client-side auth failure with a non-JSON (or absent) body.
    AuthFailure(String),
    /// Timeout; payload is the transport message.
    Timeout(String),
    /// No connection; payload is the transport message.
    NoConnection(String),
    /// Malformed 2xx body; payload is the decode message.
    Parse(String),
    /// 405 Method Not Allowed.
    MethodNotAllowed(String),
    /// 404 Not Found.
    NotFound(String),
    /// 400 Bad Request with a `detail` message.
    BadRequest(String),
    /// 400 Bad Request with field-level validation errors.
    BadRequestBody(Map<String, Value>),
    /// 401/403, or a client-side auth failure with a JSON body.
    Forbidden(String),
    /// 422 Unprocessable Entity with a `data` or `detail` message.
    UnprocessableEntity(String),
    /// 422 Unprocessable Entity with field-level validation errors.
    UnprocessableEntityBody(Map<String, Value>),
    /// 415 Unsupported Media Type.
    UnsupportedMediaType(String),
    /// Body that is neither valid JSON nor HTML-tagged.
    NonJson(String),
    /// JSON error body with an unhandled 4xx status.
    DefaultJson(Map<String, Value>),
    /// HTML error body with an unhandled 4xx status.
    DefaultHtml(String),
    /// 5xx response; payload is the raw body text.
    Server(String),
    /// Uncategorized failure; payload is the error or body text.
    Default(String),
}

impl Classified {
    /// The terminal category of this outcome.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Network(_) => Category::NetworkError,
            Self::AuthFailure(_) => Category::AuthFailure,
            Self::Timeout(_) => Category::Timeout,
            Self::NoConnection(_) => Category::NoConnection,
            Self::Parse(_) => Category::ParseError,
            Self::MethodNotAllowed(_) => Category::MethodNotAllowed,
            Self::NotFound(_) => Category::NotFound,
            Self::BadRequest(_) => Category::BadRequest,
            Self::BadRequestBody(_) => Category::BadRequestBody,
            Self::Forbidden(_) => Category::Forbidden,
            Self::UnprocessableEntity(_) => Category::UnprocessableEntity,
            Self::UnprocessableEntityBody(_) => Category::UnprocessableEntityBody,
            Self::UnsupportedMediaType(_) => Category::UnsupportedMediaType,
            Self::NonJson(_) => Category::NonJson,
            Self::DefaultJson(_) => Category::DefaultJson,
            Self::DefaultHtml(_) => Category::DefaultHtml,
            Self::Server(_) => Category::ServerError,
            Self::Default(_) => Category::Default,
        }
    }

    /// Invoke the matching handler slot, exactly one per call.
    pub fn dispatch(&self, handler: &mut impl DrfErrorHandler) {
        match self {
            Self::Network(msg) => handler.on_network_error(msg),
            Self::AuthFailure(msg) => handler.on_auth_failure(msg),
            Self::Timeout(msg) => handler.on_timeout(msg),
            Self::NoConnection(msg) => handler.on_no_connection(msg),
            Self::Parse(msg) => handler.on_parse_error(msg),
            Self::MethodNotAllowed(msg) => handler.on_method_not_allowed(msg),
            Self::NotFound(msg) => handler.on_not_found(msg),
            Self::BadRequest(msg) => handler.on_bad_request(msg),
            Self::BadRequestBody(body) => handler.on_bad_request_body(body),
            Self::Forbidden(msg) => handler.on_forbidden(msg),
            Self::UnprocessableEntity(msg) => handler.on_unprocessable_entity(msg),
            Self::UnprocessableEntityBody(body) => handler.on_unprocessable_entity_body(body),
            Self::UnsupportedMediaType(msg) => handler.on_unsupported_media_type(msg),
            Self::NonJson(body) => handler.on_non_json_error(body),
            Self::DefaultJson(body) => handler.on_default_json_error(body),
            Self::DefaultHtml(body) => handler.on_default_html_error(body),
            Self::Server(body) => handler.on_server_error(body),
            Self::Default(body) => handler.on_default_error(body),
        }
    }
}

/// Classify a failed request outcome into exactly one terminal category.
///
/// Pure and total: every error value maps to one [`Classified`] variant,
/// JSON decode failures during body inspection are folded into
/// [`Classified::NonJson`] rather than propagated, and a missing
/// `Content-Type` header degrades to the non-HTML path.
#[must_use]
pub fn classify(error: &Error) -> Classified {
    match error {
        Error::Http {
            status,
            headers,
            body,
        } if (400..500).contains(status) => classify_client_error(*status, headers, body),
        Error::Http { status, body, .. } if (500..600).contains(status) => {
            Classified::Server(body_text(body))
        }
        Error::Timeout => Classified::Timeout(error.to_string()),
        Error::Parse(msg) => Classified::Parse(msg.clone()),
        Error::NoConnection(msg) => Classified::NoConnection(msg.clone()),
        Error::Connection(msg) | Error::Tls(msg) => Classified::Network(msg.clone()),
        Error::Auth { message, body } => classify_auth_failure(message, body),
        other => Classified::Default(other.to_string()),
    }
}

/// Classify and route in one step.
///
/// Exactly one handler slot fires, synchronously, on the calling thread.
pub fn dispatch(error: &Error, handler: &mut impl DrfErrorHandler) {
    classify(error).dispatch(handler);
}

/// A received response with a 4xx status: sub-classify by content type,
/// status code, and body shape.
fn classify_client_error(
    status: u16,
    headers: &HashMap<String, String>,
    body: &Bytes,
) -> Classified {
    let text = body_text(body);

    if is_html(headers) {
        return match status {
            400 => Classified::BadRequest(MSG_HTML_BAD_REQUEST.to_string()),
            404 => Classified::NotFound(MSG_HTML_NOT_FOUND.to_string()),
            _ => Classified::DefaultHtml(text),
        };
    }

    let Ok(fields) = serde_json::from_slice::<Map<String, Value>>(body) else {
        return Classified::NonJson(text);
    };

    match status {
        405 => Classified::MethodNotAllowed(
            string_field(&fields, "detail").unwrap_or_else(|| MSG_METHOD_NOT_ALLOWED.to_string()),
        ),
        404 => Classified::NotFound(
            string_field(&fields, "detail").unwrap_or_else(|| MSG_NOT_FOUND.to_string()),
        ),
        400 => match string_field(&fields, "detail") {
            Some(detail) => Classified::BadRequest(detail),
            None => Classified::BadRequestBody(fields),
        },
        401 | 403 => Classified::Forbidden(
            string_field(&fields, "detail").unwrap_or_else(|| MSG_FORBIDDEN.to_string()),
        ),
        422 => {
            // drf_user puts the interesting part under "data"
            if let Some(data) = string_field(&fields, "data") {
                Classified::UnprocessableEntity(data)
            } else if let Some(detail) = string_field(&fields, "detail") {
                Classified::UnprocessableEntity(detail)
            } else {
                Classified::UnprocessableEntityBody(fields)
            }
        }
        415 => Classified::UnsupportedMediaType(
            string_field(&fields, "detail").unwrap_or_else(|| MSG_UNSUPPORTED_MEDIA.to_string()),
        ),
        _ => Classified::DefaultJson(fields),
    }
}

/// Client-side auth failures sometimes wrap a server permission response;
/// a JSON body with a `detail` field is routed to the forbidden slot.
fn classify_auth_failure(message: &str, body: &Bytes) -> Classified {
    match serde_json::from_slice::<Map<String, Value>>(body) {
        Ok(fields) => Classified::Forbidden(
            string_field(&fields, "detail").unwrap_or_else(|| MSG_AUTH_FORBIDDEN.to_string()),
        ),
        Err(_) => Classified::AuthFailure(message.to_string()),
    }
}

/// `Content-Type: text/html`, with a case-insensitive header name lookup.
/// A missing header is not an error; it means the body is not HTML.
fn is_html(headers: &HashMap<String, String>) -> bool {
    headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("content-type") && value == "text/html")
}

/// Decode body bytes as text; invalid UTF-8 is replaced, never an error.
fn body_text(body: &Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Fetch a field as a string message.
///
/// `None` for an absent key and for an explicit JSON `null` — the 400 and
/// 422 branches hinge on that distinction. Non-string values are
/// stringified so a nested `data` object still yields a usable message.
fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
