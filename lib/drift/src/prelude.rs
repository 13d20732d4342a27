//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and
//! traits for easy glob importing:
//!
//! ```ignore
//! use drift::prelude::*;
//! ```

pub use crate::{
    Category, Classified, ClientConfig, ContentType, CredentialStore, DrfApi, DrfErrorHandler,
    Error, HttpClient, HttpClientExt, HyperClient, Method, PreferenceStore, Request,
    RequestBuilder, Response, Result, StatusCode, classify, dispatch, from_json, header, to_json,
};
pub use serde::{Deserialize, Serialize};
