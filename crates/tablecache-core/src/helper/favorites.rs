use std::slice;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::{ApiError, RemoteSource};
use crate::cache::Collection;

use super::{DataHelper, HelperError};

/// Outcome of a favorite toggle. The local state has already changed; the
/// server update runs in the background on `remote`.
#[derive(Debug)]
pub struct FavoriteToggle {
    pub restaurant_id: u64,
    pub is_favorite: bool,
    pub remote: JoinHandle<Result<(), ApiError>>,
}

impl FavoriteToggle {
    /// Wait for the server update and return the new favorite state.
    pub async fn confirm(self) -> Result<bool, HelperError> {
        self.remote.await??;
        Ok(self.is_favorite)
    }
}

impl<R: RemoteSource> DataHelper<R> {
    /// Flip the favorite state of a restaurant.
    ///
    /// The check-then-flip is not atomic against a concurrent toggle of the
    /// same restaurant, and a failed server update is not reconciled: local
    /// and remote state stay diverged until the local copy is refetched.
    pub async fn toggle_favorite(&self, restaurant_id: u64) -> Result<FavoriteToggle, HelperError> {
        let mut restaurant = self.fetch_restaurant_by_id(restaurant_id).await?;

        let was_favorite = match self.fetch_favorites().await {
            Ok(favorites) => favorites.iter().any(|r| r.id == restaurant_id),
            Err(e) => {
                warn!(restaurant_id, error = %e, "Could not read favorites, using the restaurant's own flag");
                restaurant.is_favorite
            }
        };
        let is_favorite = !was_favorite;
        restaurant.is_favorite = is_favorite;

        let marked = if is_favorite {
            self.store
                .put_many(Collection::Favorites, slice::from_ref(&restaurant))
        } else {
            self.store.delete_many(Collection::Favorites, &[restaurant_id])
        };
        if let Err(e) = marked {
            warn!(restaurant_id, error = %e, "Failed to update local favorites");
        }
        if let Err(e) = self
            .store
            .put_many(Collection::Restaurants, slice::from_ref(&restaurant))
        {
            warn!(restaurant_id, error = %e, "Failed to update local restaurant");
        }

        let remote = self.remote.clone();
        let handle = tokio::spawn(async move {
            let result = remote.set_favorite(restaurant_id, is_favorite).await;
            if let Err(ref e) = result {
                warn!(restaurant_id, is_favorite, error = %e, "Favorite update not delivered");
            }
            result
        });

        info!(restaurant_id, is_favorite, "Favorite toggled");
        Ok(FavoriteToggle {
            restaurant_id,
            is_favorite,
            remote: handle,
        })
    }
}
