//! Tower middleware layers for the drift HTTP client.
//!
//! Composable layers applied via [`crate::HyperClientBuilder::layer`].
//! Layers are applied in reverse order - the last layer added is the
//! first to process requests.
//!
//! # Available Layers
//!
//! - [`TokenAuthLayer`] - Attaches the stored auth token as an
//!   `Authorization` header while a user is logged in
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//! - [`ConcurrencyLimitLayer`] - Limits concurrent requests (tower)

mod logging;
mod token_auth;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use token_auth::{TokenAuth, TokenAuthLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

// Re-export tower middleware layers
pub use tower::limit::ConcurrencyLimitLayer;
