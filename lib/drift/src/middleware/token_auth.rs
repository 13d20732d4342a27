//! Token authentication middleware.
//!
//! Reads the auth token from a [`CredentialStore`] at call time and adds
//! an `Authorization: Bearer <token>` header to outgoing requests while
//! a user is logged in. Header name and token prefix are per-instance
//! configuration.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::store::CredentialStore;
use crate::{Error, Request, Response, Result};

const DEFAULT_HEADER: &str = "Authorization";
const DEFAULT_PREFIX: &str = "Bearer ";

/// Layer that attaches the stored auth token to requests.
///
/// # Example
///
/// ```ignore
/// use drift::middleware::TokenAuthLayer;
///
/// let client = HyperClient::builder()
///     .layer(TokenAuthLayer::new(store))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TokenAuthLayer {
    store: Arc<CredentialStore>,
    header: Arc<str>,
    prefix: Arc<str>,
}

impl TokenAuthLayer {
    /// Create a token auth layer reading from the given store.
    #[must_use]
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            header: Arc::from(DEFAULT_HEADER),
            prefix: Arc::from(DEFAULT_PREFIX),
        }
    }

    /// Override the header the token is sent in.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header = Arc::from(name.into());
        self
    }

    /// Override the prefix in front of the token value.
    ///
    /// Token-auth DRF deployments use `"Token "` instead of the default
    /// `"Bearer "`.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Arc::from(prefix.into());
        self
    }
}

impl<S> Layer<S> for TokenAuthLayer {
    type Service = TokenAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TokenAuth {
            inner,
            store: Arc::clone(&self.store),
            header: Arc::clone(&self.header),
            prefix: Arc::clone(&self.prefix),
        }
    }
}

/// Service that attaches the stored auth token to requests.
#[derive(Debug, Clone)]
pub struct TokenAuth<S> {
    inner: S,
    store: Arc<CredentialStore>,
    header: Arc<str>,
    prefix: Arc<str>,
}

impl<S> Service<Request<Bytes>> for TokenAuth<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        if self.store.is_logged_in() {
            match self.store.token() {
                Some(token) => {
                    request
                        .headers_mut()
                        .insert(self.header.to_string(), format!("{}{token}", self.prefix));
                }
                // Logged-in check passed but the token vanished: the
                // credential channel itself failed
                None => {
                    return Box::pin(async {
                        Err(Error::auth("auth token disappeared from credential store"))
                    });
                }
            }
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
