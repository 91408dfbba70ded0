//! Local store for offline data access.
//!
//! This module provides the `LocalStore`, a set of named collections kept as
//! JSON files in the cache directory and keyed by record id:
//! - `restaurants`, `reviews`: read-through copies of the server collections
//! - `favorites`: restaurants the user has marked
//! - `reviews-stash`: reviews waiting to be delivered to the server
//!
//! When no cache directory is usable the store runs in unavailable mode and
//! every read is a miss.

pub mod collection;
pub mod store;

pub use collection::{Collection, Keyed};
pub use store::{CacheAges, CachedData, LocalStore};
