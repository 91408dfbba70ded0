//! Offline-first access to restaurants, reviews and favorites.
//!
//! `DataHelper` reads each collection through the local store: a non-empty
//! local copy is returned as is, an empty one is filled from the server
//! first. There is no expiry; local data stays authoritative until it is
//! cleared or rewritten by a mutating operation.
//!
//! Writes made while offline are staged in the `reviews-stash` collection
//! and delivered by [`DataHelper::sync`].

mod error;
mod favorites;
pub mod filter;
mod sync;

use std::future::Future;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, RemoteSource};
use crate::cache::{Collection, Keyed, LocalStore};
use crate::config::Config;
use crate::models::{Restaurant, Review};

pub use error::HelperError;
pub use favorites::FavoriteToggle;
pub use filter::{distinct, parse_filter, ALL};
pub use sync::SyncReport;

pub struct DataHelper<R = ApiClient> {
    store: LocalStore,
    remote: R,
}

impl DataHelper<ApiClient> {
    /// Build a helper talking to the configured server. Offline storage is
    /// skipped when disabled or when no cache directory can be found.
    pub fn from_config(config: &Config) -> Result<Self> {
        let remote = ApiClient::new(config.base_url(), config.request_timeout())?;

        let store = if !config.offline_storage {
            info!("Offline storage disabled, running network-only");
            LocalStore::unavailable()
        } else {
            match config.cache_dir() {
                Ok(dir) => LocalStore::open(dir),
                Err(e) => {
                    warn!(error = %e, "No cache directory, running network-only");
                    LocalStore::unavailable()
                }
            }
        };

        Ok(Self::new(store, remote))
    }
}

impl<R: RemoteSource> DataHelper<R> {
    pub fn new(store: LocalStore, remote: R) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Read a collection locally, falling back to the server on a miss and
    /// keeping what it returns.
    async fn read_through<T, F, Fut>(&self, collection: Collection, fetch: F) -> Result<Vec<T>, HelperError>
    where
        T: Serialize + DeserializeOwned + Keyed,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        match self.store.get_all::<T>(collection) {
            Ok(records) if !records.is_empty() => {
                debug!(collection = %collection, count = records.len(), "Serving from local store");
                return Ok(records);
            }
            Ok(_) => debug!(collection = %collection, "Local store miss"),
            Err(e) => {
                warn!(collection = %collection, error = %e, "Local store read failed, treating as empty")
            }
        }

        let records = fetch().await.map_err(|e| {
            warn!(collection = %collection, error = %e, "Remote fetch failed");
            e
        })?;

        if let Err(e) = self.store.put_many(collection, &records) {
            warn!(collection = %collection, error = %e, "Failed to persist fetched records");
        }

        debug!(collection = %collection, count = records.len(), "Fetched from server");
        Ok(records)
    }

    // ===== Collections =====

    pub async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, HelperError> {
        self.read_through(Collection::Restaurants, || self.remote.fetch_restaurants())
            .await
    }

    pub async fn fetch_reviews(&self) -> Result<Vec<Review>, HelperError> {
        self.read_through(Collection::Reviews, || self.remote.fetch_reviews())
            .await
    }

    pub async fn fetch_favorites(&self) -> Result<Vec<Restaurant>, HelperError> {
        self.read_through(Collection::Favorites, || {
            self.remote.fetch_favorite_restaurants()
        })
        .await
    }

    // ===== Lookups =====

    pub async fn fetch_restaurant_by_id(&self, id: u64) -> Result<Restaurant, HelperError> {
        self.fetch_restaurants()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(HelperError::NotFound(id))
    }

    pub async fn fetch_restaurants_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>, HelperError> {
        self.fetch_restaurants_by_cuisine_and_neighborhood(Some(cuisine), None)
            .await
    }

    pub async fn fetch_restaurants_by_neighborhood(
        &self,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>, HelperError> {
        self.fetch_restaurants_by_cuisine_and_neighborhood(None, Some(neighborhood))
            .await
    }

    /// `None` for either filter selects all values of that field.
    pub async fn fetch_restaurants_by_cuisine_and_neighborhood(
        &self,
        cuisine: Option<&str>,
        neighborhood: Option<&str>,
    ) -> Result<Vec<Restaurant>, HelperError> {
        let mut restaurants = self.fetch_restaurants().await?;
        restaurants.retain(|r| filter::matches(r, cuisine, neighborhood));
        Ok(restaurants)
    }

    pub async fn fetch_neighborhoods(&self) -> Result<Vec<String>, HelperError> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(distinct(restaurants.into_iter().map(|r| r.neighborhood)))
    }

    pub async fn fetch_cuisines(&self) -> Result<Vec<String>, HelperError> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(distinct(restaurants.into_iter().map(|r| r.cuisine_type)))
    }

    pub async fn fetch_restaurant_reviews(&self, restaurant_id: u64) -> Result<Vec<Review>, HelperError> {
        let mut reviews = self.fetch_reviews().await?;
        reviews.retain(|r| r.restaurant_id == restaurant_id);
        Ok(reviews)
    }
}

// ============================================================================
// Tests
// ============================================================================
