//! Handler slots for classified request failures.
//!
//! [`DrfErrorHandler`] exposes one method per terminal [`Category`];
//! implement only the slots you care about, the rest default to no-ops.
//! Dispatch invokes exactly one slot per failure.
//!
//! [`Category`]: crate::Category

use serde_json::{Map, Value};

/// Per-category callbacks for failed requests.
///
/// String slots receive the extracted message; the three structured slots
/// receive the whole parsed JSON error body, preserving DRF's per-field
/// validation errors.
///
/// # Example
///
/// ```
/// use drift_core::DrfErrorHandler;
///
/// #[derive(Default)]
/// struct LoginScreen {
///     banner: Option<String>,
/// }
///
/// impl DrfErrorHandler for LoginScreen {
///     fn on_forbidden(&mut self, message: &str) {
///         self.banner = Some(message.to_string());
///     }
/// }
/// ```
pub trait DrfErrorHandler {
    /// Network-level failure after a connection was established.
    fn on_network_error(&mut self, message: &str) {
        let _ = message;
    }

    /// Auth failure raised by the client side, e.g. credentials could
    /// not be attached to the request.
    fn on_auth_failure(&mut self, message: &str) {
        let _ = message;
    }

    /// Request deadline elapsed.
    fn on_timeout(&mut self, message: &str) {
        let _ = message;
    }

    /// No connection could be established.
    fn on_no_connection(&mut self, message: &str) {
        let _ = message;
    }

    /// 2xx response with a malformed body.
    ///
    /// DRF sends a blank body on a successful DELETE; when no other
    /// signal accompanies it, treat this slot as benign.
    fn on_parse_error(&mut self, message: &str) {
        let _ = message;
    }

    /// 405 Method Not Allowed.
    fn on_method_not_allowed(&mut self, message: &str) {
        let _ = message;
    }

    /// 404 Not Found, from a JSON `detail` or the fixed HTML message.
    fn on_not_found(&mut self, message: &str) {
        let _ = message;
    }

    /// 400 Bad Request with a flattenable `detail` message.
    fn on_bad_request(&mut self, message: &str) {
        let _ = message;
    }

    /// 400 Bad Request carrying field-level validation errors, in DRF's
    /// `{"field": ["message"], ...}` shape.
    fn on_bad_request_body(&mut self, body: &Map<String, Value>) {
        let _ = body;
    }

    /// 401 or 403 reported by the server.
    ///
    /// The conventional place to log the user out and clear private
    /// data.
    fn on_forbidden(&mut self, message: &str) {
        let _ = message;
    }

    /// 422 Unprocessable Entity with a `data` or `detail` message.
    fn on_unprocessable_entity(&mut self, message: &str) {
        let _ = message;
    }

    /// 422 Unprocessable Entity carrying field-level validation errors.
    fn on_unprocessable_entity_body(&mut self, body: &Map<String, Value>) {
        let _ = body;
    }

    /// 415 Unsupported Media Type.
    fn on_unsupported_media_type(&mut self, message: &str) {
        let _ = message;
    }

    /// Error body that is neither valid JSON nor HTML-tagged.
    fn on_non_json_error(&mut self, body: &str) {
        let _ = body;
    }

    /// JSON error body with a status code no other slot handles.
    fn on_default_json_error(&mut self, body: &Map<String, Value>) {
        let _ = body;
    }

    /// HTML error body with a status code no other slot handles.
    fn on_default_html_error(&mut self, body: &str) {
        let _ = body;
    }

    /// 5xx response; payload is the raw body text.
    fn on_server_error(&mut self, body: &str) {
        let _ = body;
    }

    /// Anything not matched by the other slots.
    fn on_default_error(&mut self, body: &str) {
        let _ = body;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;

    use super::*;
    use crate::{Category, Error, dispatch};

    /// Records every slot invocation; used to assert single-shot dispatch.
    #[derive(Default)]
    struct Recorder {
        fired: Vec<(Category, String)>,
    }

    impl Recorder {
        fn record(&mut self, category: Category, payload: impl Into<String>) {
            self.fired.push((category, payload.into()));
        }
    }

    impl DrfErrorHandler for Recorder {
        fn on_network_error(&mut self, message: &str) {
            self.record(Category::NetworkError, message);
        }
        fn on_auth_failure(&mut self, message: &str) {
            self.record(Category::AuthFailure, message);
        }
        fn on_timeout(&mut self, message: &str) {
            self.record(Category::Timeout, message);
        }
        fn on_no_connection(&mut self, message: &str) {
            self.record(Category::NoConnection, message);
        }
        fn on_parse_error(&mut self, message: &str) {
            self.record(Category::ParseError, message);
        }
        fn on_method_not_allowed(&mut self, message: &str) {
            self.record(Category::MethodNotAllowed, message);
        }
        fn on_not_found(&mut self, message: &str) {
            self.record(Category::NotFound, message);
        }
        fn on_bad_request(&mut self, message: &str) {
            self.record(Category::BadRequest, message);
        }
        fn on_bad_request_body(&mut self, body: &Map<String, Value>) {
            self.record(Category::BadRequestBody, Value::Object(body.clone()).to_string());
        }
        fn on_forbidden(&mut self, message: &str) {
            self.record(Category::Forbidden, message);
        }
        fn on_unprocessable_entity(&mut self, message: &str) {
            self.record(Category::UnprocessableEntity, message);
        }
        fn on_unprocessable_entity_body(&mut self, body: &Map<String, Value>) {
            self.record(
                Category::UnprocessableEntityBody,
                Value::Object(body.clone()).to_string(),
            );
        }
        fn on_unsupported_media_type(&mut self, message: &str) {
            self.record(Category::UnsupportedMediaType, message);
        }
        fn on_non_json_error(&mut self, body: &str) {
            self.record(Category::NonJson, body);
        }
        fn on_default_json_error(&mut self, body: &Map<String, Value>) {
            self.record(Category::DefaultJson, Value::Object(body.clone()).to_string());
        }
        fn on_default_html_error(&mut self, body: &str) {
            self.record(Category::DefaultHtml, body);
        }
        fn on_server_error(&mut self, body: &str) {
            self.record(Category::ServerError, body);
        }
        fn on_default_error(&mut self, body: &str) {
            self.record(Category::Default, body);
        }
    }

    fn http(status: u16, body: &str) -> Error {
        Error::http(status, HashMap::new(), Bytes::from(body.to_string()))
    }

    #[test]
    fn exactly_one_slot_fires_per_dispatch() {
        let errors = [
            http(404, r#"{"detail": "gone"}"#),
            http(400, r#"{"name": ["required"]}"#),
            http(500, "boom"),
            Error::Timeout,
            Error::no_connection("refused"),
            Error::auth("no token"),
        ];
        for error in &errors {
            let mut recorder = Recorder::default();
            dispatch(error, &mut recorder);
            assert_eq!(recorder.fired.len(), 1, "error: {error}");
        }
    }

    #[test]
    fn dispatch_routes_to_matching_slot() {
        let mut recorder = Recorder::default();
        dispatch(&http(404, r#"{"detail": "gone"}"#), &mut recorder);
        assert_eq!(
            recorder.fired,
            vec![(Category::NotFound, "gone".to_string())]
        );

        let mut recorder = Recorder::default();
        dispatch(&http(422, r#"{"email": ["taken"]}"#), &mut recorder);
        assert_eq!(
            recorder.fired,
            vec![(
                Category::UnprocessableEntityBody,
                r#"{"email":["taken"]}"#.to_string()
            )]
        );
    }

    #[test]
    fn default_slots_are_no_ops() {
        struct Inert;
        impl DrfErrorHandler for Inert {}

        // Nothing implemented: dispatch must still resolve silently
        let mut handler = Inert;
        dispatch(&http(500, "boom"), &mut handler);
        dispatch(&Error::Timeout, &mut handler);
    }
}
