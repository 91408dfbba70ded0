use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "de::number_or_string")]
    pub id: u64,
    #[serde(deserialize_with = "de::number_or_string")]
    pub restaurant_id: u64,
    pub name: String,
    #[serde(deserialize_with = "de::number_or_string")]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Most recent timestamp known for this review.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}

/// A review as entered by the user, before it gets an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub restaurant_id: u64,
    pub name: String,
    pub rating: u8,
    pub comments: Option<String>,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("reviewer name is required".to_string());
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, self.rating
            ));
        }
        Ok(())
    }

    pub fn into_review(self, id: u64, now: DateTime<Utc>) -> Review {
        // Reviews without comments are allowed (just ratings)
        let comments = self
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Review {
            id,
            restaurant_id: self.restaurant_id,
            name: self.name.trim().to_string(),
            rating: self.rating,
            comments,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(name: &str, rating: u8) -> ReviewDraft {
        ReviewDraft {
            restaurant_id: 1,
            name: name.to_string(),
            rating,
            comments: Some("  Great dumplings  ".to_string()),
        }
    }

    #[test]
    fn test_decodes_server_review() {
        let json = r#"{
            "id": 12,
            "restaurant_id": "4",
            "name": "Steve",
            "rating": "4",
            "comments": "Mission Chinese Food has grown up",
            "createdAt": 1504095567183,
            "updatedAt": 1504095567183
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.restaurant_id, 4);
        assert_eq!(review.rating, 4);
        assert_eq!(
            review.created_at,
            Some(Utc.timestamp_millis_opt(1504095567183).unwrap())
        );
    }

    #[test]
    fn test_rejects_rating_overflow() {
        let json = r#"{"id": 1, "restaurant_id": 1, "name": "x", "rating": 300}"#;
        assert!(serde_json::from_str::<Review>(json).is_err());
    }

    #[test]
    fn test_serializes_camel_case_timestamps() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let review = draft("Ana", 5).into_review(9, now);
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["createdAt"], 1_700_000_000_000i64);
        assert_eq!(value["comments"], "Great dumplings");
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft("Ana", 3).validate().is_ok());
        assert!(draft("   ", 3).validate().is_err());
        assert!(draft("Ana", 0).validate().is_err());
        assert!(draft("Ana", 6).validate().is_err());
    }

    #[test]
    fn test_blank_comments_are_dropped() {
        let mut d = draft("Ana", 4);
        d.comments = Some("   ".to_string());
        let review = d.into_review(1, Utc::now());
        assert!(review.comments.is_none());
    }
}
