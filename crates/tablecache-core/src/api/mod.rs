//! REST API client module for the restaurant reviews server.
//!
//! This module provides the `ApiClient` for reading the restaurant and
//! review collections and for posting reviews and favorite toggles. The
//! `RemoteSource` trait is the seam the data helper is generic over.
//!
//! Requests are never retried; callers decide what to do with failures.

pub mod client;
pub mod error;

pub use client::{ApiClient, RemoteSource, DEFAULT_BASE_URL};
pub use error::ApiError;
