//! Django REST Framework request wrappers.
//!
//! [`DrfApi`] combines any [`HttpClient`] with a base URL and speaks the
//! JSON dialect DRF endpoints expect: JSON-object payloads out,
//! JSON-object or JSON-array bodies back. Failed exchanges surface as
//! [`drift_core::Error`] values ready for [`drift_core::classify`], and
//! the `*_with` variants route them straight to a handler set.

use bytes::Bytes;
use http::Method;
use serde_json::{Map, Value};
use url::Url;

use drift_core::{
    ContentType, DrfErrorHandler, Error, HttpClient, Request, Result, dispatch, from_json,
};

/// A client for one Django REST Framework API.
///
/// Wraps an [`HttpClient`] (typically a [`crate::HyperClient`] composed
/// with token auth and logging) with the API's base URL. Relative
/// endpoint paths are resolved against the base; DRF's trailing-slash
/// convention is the caller's concern.
///
/// # Example
///
/// ```ignore
/// use drift::{DrfApi, HyperClient};
///
/// let http = HyperClient::builder()
///     .with_token_auth(store)
///     .with_logging()
///     .build();
/// let api = DrfApi::new(http, "https://api.example.com/api/")?;
///
/// let user = api.object("users/me/", None).await?;
/// ```
#[derive(Debug)]
pub struct DrfApi<C> {
    client: C,
    base_url: Url,
}

impl<C: Clone> Clone for DrfApi<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C> DrfApi<C> {
    /// Create a new API client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?,
        })
    }

    /// Create a new API client with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The base URL endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        // Url::join drops the last path segment without this
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path.trim_start_matches('/'))
            .map_err(Error::InvalidUrl)
    }
}

impl<C: HttpClient> DrfApi<C> {
    /// Execute a JSON exchange and return the raw success body.
    ///
    /// A non-2xx response becomes [`Error::Http`] carrying status,
    /// headers, and body for classification.
    async fn execute_json(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Bytes> {
        let url = self.endpoint(path)?;
        let mut builder =
            Request::builder(method, url).header("Accept", ContentType::Json.as_str());
        if let Some(payload) = payload {
            builder = builder.json(payload)?;
        }

        let response = self.client.execute(builder.build()).await?;
        Ok(response.error_for_status()?.into_body())
    }

    /// Request an endpoint whose success body is a JSON object.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the server answers 2xx with a body that is
    /// not a JSON object — including the empty body DRF sends on a
    /// successful DELETE.
    pub async fn json_object(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Map<String, Value>> {
        let body = self.execute_json(method, path, payload).await?;
        from_json(&body)
    }

    /// Request an endpoint whose success body is a JSON array.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the server answers 2xx with a body that is
    /// not a JSON array.
    pub async fn json_array(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Vec<Value>> {
        let body = self.execute_json(method, path, payload).await?;
        from_json(&body)
    }

    /// [`DrfApi::json_object`] with the conventional method defaulting:
    /// GET without a payload, POST with one.
    pub async fn object(&self, path: &str, payload: Option<&Value>) -> Result<Map<String, Value>> {
        let method = if payload.is_none() {
            Method::GET
        } else {
            Method::POST
        };
        self.json_object(method, path, payload).await
    }

    /// [`DrfApi::json_array`] with the conventional method defaulting:
    /// GET without a payload, POST with one.
    pub async fn array(&self, path: &str, payload: Option<&Value>) -> Result<Vec<Value>> {
        let method = if payload.is_none() {
            Method::GET
        } else {
            Method::POST
        };
        self.json_array(method, path, payload).await
    }

    /// Like [`DrfApi::json_object`], but classify any failure and route
    /// it to exactly one slot of `handler`.
    pub async fn json_object_with(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        handler: &mut impl DrfErrorHandler,
    ) -> Option<Map<String, Value>> {
        match self.json_object(method, path, payload).await {
            Ok(body) => Some(body),
            Err(error) => {
                dispatch(&error, handler);
                None
            }
        }
    }

    /// Like [`DrfApi::json_array`], but classify any failure and route
    /// it to exactly one slot of `handler`.
    pub async fn json_array_with(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        handler: &mut impl DrfErrorHandler,
    ) -> Option<Vec<Value>> {
        match self.json_array(method, path, payload).await {
            Ok(body) => Some(body),
            Err(error) => {
                dispatch(&error, handler);
                None
            }
        }
    }
}
