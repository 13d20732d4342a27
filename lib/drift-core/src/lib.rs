//! Core types for the drift Django REST Framework client.
//!
//! This crate provides the foundational types used by drift:
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Error`] and [`Result`] - Error handling, modeling the finished
//!   outcome of a request attempt
//! - [`classify`], [`Category`], [`Classified`] - Classification of a
//!   failed outcome into one of eighteen terminal categories
//! - [`DrfErrorHandler`] and [`dispatch`] - Per-category handler slots
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod body;
mod classify;
mod client;
mod error;
mod handler;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, from_json, to_json};
pub use classify::{Category, Classified, classify, dispatch};
pub use client::{HttpClient, HttpClientExt};
pub use error::{Error, Result};
pub use handler::DrfErrorHandler;
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for methods, status codes and headers
pub use http::{Method, StatusCode, header};
