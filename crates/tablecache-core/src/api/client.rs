//! API client for the restaurant reviews REST server.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Restaurant, Review};

use super::ApiError;

/// Base URL of the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Read and write access to the canonical server-side data.
pub trait RemoteSource: Clone + Send + Sync + 'static {
    /// `GET /restaurants`
    fn fetch_restaurants(&self) -> impl Future<Output = Result<Vec<Restaurant>, ApiError>> + Send;

    /// `GET /restaurants/?is_favorite=true`
    fn fetch_favorite_restaurants(
        &self,
    ) -> impl Future<Output = Result<Vec<Restaurant>, ApiError>> + Send;

    /// `GET /reviews`
    fn fetch_reviews(&self) -> impl Future<Output = Result<Vec<Review>, ApiError>> + Send;

    /// `POST /reviews`
    fn post_review(&self, review: &Review) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /restaurants/{id}/?is_favorite={bool}`
    fn set_favorite(
        &self,
        restaurant_id: u64,
        is_favorite: bool,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// HTTP client for the reviews server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a new API client. Requests have no timeout unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn restaurants_url(&self) -> String {
        format!("{}/restaurants", self.base_url)
    }

    fn favorites_url(&self) -> String {
        format!("{}/restaurants/?is_favorite=true", self.base_url)
    }

    fn favorite_toggle_url(&self, restaurant_id: u64, is_favorite: bool) -> String {
        format!(
            "{}/restaurants/{}/?is_favorite={}",
            self.base_url, restaurant_id, is_favorite
        )
    }

    fn reviews_url(&self) -> String {
        format!("{}/reviews", self.base_url)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e)))
    }

    async fn post(&self, request: reqwest::RequestBuilder, url: &str) -> Result<(), ApiError> {
        debug!(url, "POST");
        let response = request.send().await?;
        Self::check_response(response).await?;
        Ok(())
    }
}

impl RemoteSource for ApiClient {
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.get(&self.restaurants_url()).await
    }

    async fn fetch_favorite_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.get(&self.favorites_url()).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, ApiError> {
        self.get(&self.reviews_url()).await
    }

    async fn post_review(&self, review: &Review) -> Result<(), ApiError> {
        let url = self.reviews_url();
        self.post(self.client.post(&url).json(review), &url).await
    }

    async fn set_favorite(&self, restaurant_id: u64, is_favorite: bool) -> Result<(), ApiError> {
        let url = self.favorite_toggle_url(restaurant_id, is_favorite);
        self.post(self.client.post(&url), &url).await
    }
}

// ============================================================================
// Tests
// ============================================================================
