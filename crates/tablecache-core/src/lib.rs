//! Core library for tablecache.
//!
//! Offline-first access to a restaurant reviews server:
//!
//! - [`api`]: HTTP client for the `/restaurants` and `/reviews` endpoints
//! - [`cache`]: per-collection local store keyed by record id
//! - [`helper`]: read-through reads, favorite toggling, deferred reviews and sync
//! - [`models`]: restaurant and review types
//! - [`config`]: user configuration and directory locations

pub mod api;
pub mod cache;
pub mod config;
pub mod helper;
pub mod models;

pub use api::{ApiClient, ApiError, RemoteSource};
pub use cache::{Collection, LocalStore};
pub use config::Config;
pub use helper::{DataHelper, FavoriteToggle, HelperError, SyncReport};
pub use models::{Restaurant, Review, ReviewDraft};
