//! Plain-text rendering of restaurants, reviews and sync results.

use std::fmt::Write;

use tablecache_core::cache::CacheAges;
use tablecache_core::{Config, Restaurant, Review, SyncReport};

use crate::utils::{format_date, rating_stars, truncate_string};

/// Width of the day column in the hours table.
const DAY_COLUMN_WIDTH: usize = 10;

/// Maximum comment length shown in the pending review list.
const PREVIEW_LENGTH: usize = 60;

fn favorite_marker(restaurant: &Restaurant) -> &'static str {
    if restaurant.is_favorite {
        "★"
    } else {
        "☆"
    }
}

pub fn restaurant_line(restaurant: &Restaurant) -> String {
    format!(
        "{} {:>3}  {} - {}, {}",
        favorite_marker(restaurant),
        restaurant.id,
        restaurant.name,
        restaurant.cuisine_type,
        restaurant.neighborhood
    )
}

pub fn restaurant_list(restaurants: &[Restaurant]) -> String {
    if restaurants.is_empty() {
        return "No restaurants found.".to_string();
    }
    restaurants
        .iter()
        .map(restaurant_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn review_block(review: &Review) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  ({})", review.name, format_date(review.last_modified()));
    let _ = write!(out, "Rating: {} {}", review.rating, rating_stars(review.rating));
    // Reviews without comments (just ratings) are allowed
    if let Some(comments) = &review.comments {
        let _ = write!(out, "\n{}", comments);
    }
    out
}

/// Oldest first; undated reviews (not yet seen by the server) go last.
fn ordered_by_date(reviews: &[Review]) -> Vec<&Review> {
    let mut ordered: Vec<&Review> = reviews.iter().collect();
    ordered.sort_by_key(|r| (r.created_at.is_none(), r.created_at, r.id));
    ordered
}

pub fn restaurant_detail(restaurant: &Restaurant, reviews: &[Review]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", favorite_marker(restaurant), restaurant.name);
    let _ = writeln!(out, "{}", restaurant.address);
    let _ = writeln!(out, "Cuisine: {}", restaurant.cuisine_type);
    let _ = writeln!(out, "Image: {} ({})", restaurant.image_url(), restaurant.image_alt());

    let hours = restaurant.hours_in_week_order();
    if !hours.is_empty() {
        let _ = writeln!(out, "\nHours");
        for (day, time) in hours {
            let _ = writeln!(out, "  {:<width$}{}", day, time, width = DAY_COLUMN_WIDTH);
        }
    }

    let _ = writeln!(out, "\nReviews");
    if reviews.is_empty() {
        let _ = write!(out, "No reviews yet!");
    } else {
        let blocks: Vec<String> = ordered_by_date(reviews).into_iter().map(review_block).collect();
        let _ = write!(out, "{}", blocks.join("\n\n"));
    }
    out
}

pub fn pending_list(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews waiting to be delivered.".to_string();
    }
    reviews
        .iter()
        .map(|r| {
            format!(
                "#{} for restaurant {} by {} ({}): {}",
                r.id,
                r.restaurant_id,
                r.name,
                r.rating,
                truncate_string(r.comments.as_deref().unwrap_or(""), PREVIEW_LENGTH)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sync_summary(report: &SyncReport) -> String {
    if report.attempted() == 0 {
        return "Nothing to sync.".to_string();
    }
    let mut out = format!("Delivered {} review(s).", report.delivered.len());
    if !report.discarded.is_empty() {
        let _ = write!(out, " Server rejected {:?}; they were dropped.", report.discarded);
    }
    if !report.retained.is_empty() {
        let _ = write!(out, " {:?} could not reach the server and stay queued.", report.retained);
    }
    out
}

pub fn status(base_url: &str, ages: &CacheAges) -> String {
    let age = |value: &Option<String>| value.clone().unwrap_or_else(|| "never".to_string());
    let mut out = String::new();
    let _ = writeln!(out, "Server:          {}", base_url);
    if !ages.available {
        let _ = write!(out, "Local store:     unavailable (network only)");
        return out;
    }
    let _ = writeln!(out, "Restaurants:     {}", age(&ages.restaurants));
    let _ = writeln!(out, "Reviews:         {}", age(&ages.reviews));
    let _ = writeln!(out, "Favorites:       {}", age(&ages.favorites));
    let _ = write!(out, "Pending reviews: {}", ages.pending_reviews);
    out
}

pub fn settings(path: &str, config: &Config) -> String {
    let timeout = match config.request_timeout_secs {
        Some(secs) => format!("{}s", secs),
        None => "none".to_string(),
    };
    let mut out = String::new();
    let _ = writeln!(out, "Config file:     {}", path);
    let _ = writeln!(out, "Server:          {}", config.base_url());
    let _ = writeln!(out, "Offline storage: {}", config.offline_storage);
    let _ = writeln!(out, "Timeout:         {}", timeout);
    let _ = write!(out, "Log to file:     {}", config.log_to_file);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use tablecache_core::models::LatLng;

    fn restaurant() -> Restaurant {
        let mut hours = BTreeMap::new();
        hours.insert("Monday".to_string(), "5:30 pm - 11:00 pm".to_string());
        hours.insert("Sunday".to_string(), "Closed".to_string());
        Restaurant {
            id: 1,
            name: "Mission Chinese Food".to_string(),
            neighborhood: "Manhattan".to_string(),
            photograph: None,
            address: "171 E Broadway, New York, NY 10002".to_string(),
            latlng: LatLng { lat: 40.713829, lng: -73.989667 },
            cuisine_type: "Asian".to_string(),
            operating_hours: Some(hours),
            is_favorite: true,
        }
    }

    fn review(id: u64, day: Option<u32>, comments: Option<&str>) -> Review {
        let date = day.map(|d| Utc.with_ymd_and_hms(2016, 10, d, 12, 0, 0).unwrap());
        Review {
            id,
            restaurant_id: 1,
            name: format!("Reviewer {}", id),
            rating: 4,
            comments: comments.map(str::to_string),
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_restaurant_line() {
        assert_eq!(
            restaurant_line(&restaurant()),
            "★   1  Mission Chinese Food - Asian, Manhattan"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(restaurant_list(&[]), "No restaurants found.");
    }

    #[test]
    fn test_detail_without_reviews() {
        let detail = restaurant_detail(&restaurant(), &[]);
        assert!(detail.contains("Image: /img/1.jpg (Photo of Mission Chinese Food in Manhattan.)"));
        assert!(detail.contains("  Monday    5:30 pm - 11:00 pm\n  Sunday    Closed"));
        assert!(detail.ends_with("No reviews yet!"));
    }

    #[test]
    fn test_detail_orders_reviews_by_date() {
        let reviews = vec![
            review(3, None, Some("staged offline")),
            review(2, Some(20), None),
            review(1, Some(5), Some("Great")),
        ];
        let detail = restaurant_detail(&restaurant(), &reviews);
        let first = detail.find("Reviewer 1").unwrap();
        let second = detail.find("Reviewer 2").unwrap();
        let third = detail.find("Reviewer 3").unwrap();
        assert!(first < second && second < third);
        assert!(detail.contains("Reviewer 1  (Oct 05, 2016)\nRating: 4 ★★★★☆\nGreat"));
    }

    #[test]
    fn test_review_without_comments() {
        let block = review_block(&review(2, Some(20), None));
        assert_eq!(block, "Reviewer 2  (Oct 20, 2016)\nRating: 4 ★★★★☆");
    }

    #[test]
    fn test_sync_summary() {
        assert_eq!(sync_summary(&SyncReport::default()), "Nothing to sync.");
        let report = SyncReport {
            delivered: vec![1],
            discarded: vec![],
            retained: vec![2],
        };
        assert_eq!(
            sync_summary(&report),
            "Delivered 1 review(s). [2] could not reach the server and stay queued."
        );
    }

    #[test]
    fn test_status_without_store() {
        let text = status("http://localhost:1337", &CacheAges::default());
        assert!(text.ends_with("unavailable (network only)"));
    }

    #[test]
    fn test_settings() {
        let text = settings("/tmp/config.json", &Config::default());
        assert!(text.contains("Server:          http://localhost:1337\n"));
        assert!(text.contains("Timeout:         none\n"));
        assert!(text.ends_with("Log to file:     false"));
    }
}
