//! In-memory filtering over fetched collections.

use crate::models::Restaurant;

/// Filter value meaning "do not filter on this field".
pub const ALL: &str = "all";

/// Map a user-facing filter value to `None` when it selects everything.
pub fn parse_filter(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value)
    }
}

/// Remove duplicates, keeping the first occurrence of each value in order.
pub fn distinct<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut unique = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

pub(crate) fn matches(restaurant: &Restaurant, cuisine: Option<&str>, neighborhood: Option<&str>) -> bool {
    cuisine.map_or(true, |c| restaurant.cuisine_type == c)
        && neighborhood.map_or(true, |n| restaurant.neighborhood == n)
}
