//! Async Rust client for Django REST Framework APIs.
//!
//! drift wraps an HTTP transport with the conventions a DRF backend
//! expects: JSON request wrappers, token authentication read from a
//! persistent credential store, and classification of every failed
//! exchange into one of eighteen terminal categories routed to
//! per-category handler slots.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use drift::prelude::*;
//!
//! struct Ui;
//!
//! impl DrfErrorHandler for Ui {
//!     fn on_forbidden(&mut self, message: &str) {
//!         eprintln!("logged out: {message}");
//!     }
//!     fn on_not_found(&mut self, message: &str) {
//!         eprintln!("missing: {message}");
//!     }
//! }
//!
//! let store = Arc::new(CredentialStore::open("/var/lib/myapp")?);
//! let http = HyperClient::builder()
//!     .with_token_auth(Arc::clone(&store))
//!     .with_logging()
//!     .build();
//! let api = DrfApi::new(http, "https://api.example.com/api/")?;
//!
//! let mut ui = Ui;
//! if let Some(user) = api.json_object_with(Method::GET, "users/me/", None, &mut ui).await {
//!     println!("{user:?}");
//! }
//! ```

mod api;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod store;

// Re-export client types
pub use api::DrfApi;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use store::{CredentialStore, PreferenceStore, StoreError, StoreResult};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use drift_core::{
    Category, Classified, ContentType, DrfErrorHandler, Error, HttpClient, HttpClientExt, Request,
    RequestBuilder, Response, Result, classify, dispatch, from_json, to_json,
};

// Re-export http types for methods, status codes and headers
pub use drift_core::{Method, StatusCode, header};
