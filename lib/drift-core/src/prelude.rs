//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use drift_core::prelude::*;
//! ```

pub use crate::{
    Category, Classified, ContentType, DrfErrorHandler, Error, HttpClient, HttpClientExt, Request,
    RequestBuilder, Response, Result, classify, dispatch, from_json, to_json,
};
