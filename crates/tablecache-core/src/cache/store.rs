use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{Collection, Keyed};

/// Records of one collection, keyed by id.
type Records = BTreeMap<u64, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// File-backed collections keyed by id.
///
/// A store without a root directory is "unavailable": reads return nothing
/// and writes succeed without doing anything.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: Option<PathBuf>,
}

impl LocalStore {
    /// Open the store rooted at `dir`, falling back to unavailable mode if
    /// the directory cannot be created.
    pub fn open(dir: PathBuf) -> Self {
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                debug!(?dir, "Local store opened");
                Self { root: Some(dir) }
            }
            Err(e) => {
                warn!(?dir, error = %e, "Cannot create cache directory, running without local store");
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self { root: None }
    }

    pub fn is_available(&self) -> bool {
        self.root.is_some()
    }

    /// Directory holding the collection files, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn collection_path(&self, collection: Collection) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.json", collection.name())))
    }

    fn load(&self, collection: Collection) -> Result<Option<CachedData<Records>>> {
        let Some(path) = self.collection_path(collection) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read collection: {}", collection))?;

        let cached: CachedData<Records> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse collection: {}", collection))?;

        Ok(Some(cached))
    }

    /// Write the whole collection at once; the rename makes each batch land
    /// completely or not at all.
    fn save(&self, collection: Collection, records: &Records) -> Result<()> {
        let Some(path) = self.collection_path(collection) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&CachedData::new(records))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write collection: {}", collection))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace collection: {}", collection))?;
        Ok(())
    }

    /// All records of a collection ordered by id. Empty if never written.
    pub fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let Some(cached) = self.load(collection)? else {
            return Ok(Vec::new());
        };

        cached
            .data
            .into_values()
            .map(|value| {
                serde_json::from_value(value)
                    .with_context(|| format!("Malformed record in collection: {}", collection))
            })
            .collect()
    }

    /// Upsert records by id. Later records win over earlier ones.
    pub fn put_many<T: Serialize + Keyed>(&self, collection: Collection, items: &[T]) -> Result<()> {
        if !self.is_available() || items.is_empty() {
            return Ok(());
        }

        let mut records = self.load(collection)?.map(|c| c.data).unwrap_or_default();
        for item in items {
            records.insert(item.key(), serde_json::to_value(item)?);
        }
        self.save(collection, &records)?;

        debug!(collection = %collection, count = items.len(), "Stored records");
        Ok(())
    }

    pub fn delete_many(&self, collection: Collection, ids: &[u64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let Some(mut cached) = self.load(collection)? else {
            return Ok(());
        };

        let before = cached.data.len();
        for id in ids {
            cached.data.remove(id);
        }
        if cached.data.len() != before {
            self.save(collection, &cached.data)?;
        }

        debug!(collection = %collection, removed = before - cached.data.len(), "Deleted records");
        Ok(())
    }

    pub fn clear(&self, collection: Collection) -> Result<()> {
        let Some(path) = self.collection_path(collection) else {
            return Ok(());
        };
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove collection: {}", collection))?;
        }
        Ok(())
    }

    /// Drop every cached server collection. The pending-review stash is kept
    /// so that undelivered reviews survive a reload.
    pub fn clear_cached(&self) -> Result<()> {
        for collection in Collection::ALL {
            if collection != Collection::ReviewsStash {
                self.clear(collection)?;
            }
        }
        Ok(())
    }

    fn load_age(&self, collection: Collection) -> Option<String> {
        match self.load(collection) {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(collection = %collection, error = %e, "Failed to load collection for age display");
                None
            }
        }
    }

    fn count(&self, collection: Collection) -> usize {
        match self.load(collection) {
            Ok(Some(cached)) => cached.data.len(),
            Ok(None) => 0,
            Err(e) => {
                debug!(collection = %collection, error = %e, "Failed to load collection for count");
                0
            }
        }
    }

    pub fn ages(&self) -> CacheAges {
        CacheAges {
            available: self.is_available(),
            restaurants: self.load_age(Collection::Restaurants),
            reviews: self.load_age(Collection::Reviews),
            favorites: self.load_age(Collection::Favorites),
            pending_reviews: self.count(Collection::ReviewsStash),
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub available: bool,
    pub restaurants: Option<String>,
    pub reviews: Option<String>,
    pub favorites: Option<String>,
    pub pending_reviews: usize,
}

impl CacheAges {
    /// Age of the most relevant cached collection
    pub fn last_updated(&self) -> String {
        [&self.restaurants, &self.reviews, &self.favorites]
            .into_iter()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "never".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
