use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::de;

/// Day names in the order they are listed to users.
const WEEK_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(deserialize_with = "de::number_or_string")]
    pub id: u64,
    pub name: String,
    pub neighborhood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,
    pub address: String,
    pub latlng: LatLng,
    pub cuisine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "de::bool_or_string")]
    pub is_favorite: bool,
}

impl Restaurant {
    /// Image path, falling back on the id when no photograph is set.
    pub fn image_url(&self) -> String {
        match self.photograph.as_deref() {
            Some(photo) if !photo.is_empty() => format!("/img/{}.jpg", photo),
            _ => format!("/img/{}.jpg", self.id),
        }
    }

    pub fn image_alt(&self) -> String {
        format!("Photo of {} in {}.", self.name, self.neighborhood)
    }

    /// Operating hours Monday through Sunday, then any unrecognised keys.
    pub fn hours_in_week_order(&self) -> Vec<(&str, &str)> {
        let Some(hours) = &self.operating_hours else {
            return Vec::new();
        };

        let mut ordered: Vec<(&str, &str)> = WEEK_ORDER
            .iter()
            .filter_map(|day| hours.get_key_value(*day))
            .map(|(day, time)| (day.as_str(), time.as_str()))
            .collect();

        ordered.extend(
            hours
                .iter()
                .filter(|(day, _)| !WEEK_ORDER.contains(&day.as_str()))
                .map(|(day, time)| (day.as_str(), time.as_str())),
        );
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 3,
        "name": "Kang Ho Dong Baekjeong",
        "neighborhood": "Manhattan",
        "photograph": "3",
        "address": "1 E 32nd St, New York, NY 10016",
        "latlng": { "lat": 40.747143, "lng": -73.985414 },
        "cuisine_type": "Asian",
        "operating_hours": {
            "Sunday": "11:30 am - 2:00 am",
            "Monday": "11:30 am - 2:00 am",
            "Tuesday": "11:30 am - 2:00 am"
        },
        "is_favorite": "true",
        "createdAt": 1504095563444
    }"#;

    #[test]
    fn test_decodes_string_favorite_flag() {
        let restaurant: Restaurant = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(restaurant.id, 3);
        assert!(restaurant.is_favorite);
        assert_eq!(restaurant.cuisine_type, "Asian");
    }

    #[test]
    fn test_missing_favorite_flag_is_false() {
        let json = r#"{"id": "7", "name": "Tu Lan", "neighborhood": "Queens",
            "address": "x", "latlng": {"lat": 0.0, "lng": 0.0}, "cuisine_type": "Pizza"}"#;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.id, 7);
        assert!(!restaurant.is_favorite);
        assert!(restaurant.operating_hours.is_none());
    }

    #[test]
    fn test_image_url_falls_back_to_id() {
        let mut restaurant: Restaurant = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(restaurant.image_url(), "/img/3.jpg");
        restaurant.photograph = Some("dumplings".to_string());
        assert_eq!(restaurant.image_url(), "/img/dumplings.jpg");
        restaurant.photograph = None;
        restaurant.id = 10;
        assert_eq!(restaurant.image_url(), "/img/10.jpg");
    }

    #[test]
    fn test_alt_text() {
        let restaurant: Restaurant = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            restaurant.image_alt(),
            "Photo of Kang Ho Dong Baekjeong in Manhattan."
        );
    }

    #[test]
    fn test_hours_in_week_order() {
        let restaurant: Restaurant = serde_json::from_str(SAMPLE).unwrap();
        let days: Vec<&str> = restaurant
            .hours_in_week_order()
            .into_iter()
            .map(|(day, _)| day)
            .collect();
        assert_eq!(days, vec!["Monday", "Tuesday", "Sunday"]);
    }
}
