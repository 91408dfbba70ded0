use std::fmt;

use crate::models::{Restaurant, Review};

/// A named collection in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Restaurants,
    Reviews,
    Favorites,
    ReviewsStash,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Restaurants,
        Collection::Reviews,
        Collection::Favorites,
        Collection::ReviewsStash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Restaurants => "restaurants",
            Collection::Reviews => "reviews",
            Collection::Favorites => "favorites",
            Collection::ReviewsStash => "reviews-stash",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records stored in a collection are keyed by their id.
pub trait Keyed {
    fn key(&self) -> u64;
}

impl Keyed for Restaurant {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for Review {
    fn key(&self) -> u64 {
        self.id
    }
}
