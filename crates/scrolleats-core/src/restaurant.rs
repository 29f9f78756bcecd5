use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Price tier derived from the upstream 1–4 `price_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Budget,
    #[default]
    Moderate,
    Expensive,
    Luxury,
}

impl PriceRange {
    /// Maps an upstream price level; absent or unknown levels are `Moderate`.
    #[must_use]
    pub fn from_price_level(level: Option<u8>) -> Self {
        match level {
            Some(1) => Self::Budget,
            Some(3) => Self::Expensive,
            Some(4) => Self::Luxury,
            _ => Self::Moderate,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Moderate => "moderate",
            Self::Expensive => "expensive",
            Self::Luxury => "luxury",
        }
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized restaurant as handed to the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cuisine: String,
    pub price_range: PriceRange,
    pub rating: f64,
    pub review_count: u32,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub website: String,
    /// Day name to opening-hours text, e.g. `"Monday" -> "9:00 AM – 5:00 PM"`.
    pub hours: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub coordinates: Coordinates,
    /// Kilometres from the query origin; `None` when no origin was supplied.
    pub distance_km: Option<f64>,
    pub is_open: bool,
    pub delivery_available: bool,
    pub takeout_available: bool,
    pub dine_in_available: bool,
    pub features: Vec<String>,
    pub dietary_options: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// A restaurant with empty descriptive fields and dine-in enabled.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cuisine: "restaurant".to_string(),
            price_range: PriceRange::Moderate,
            rating: 0.0,
            review_count: 0,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            phone: String::new(),
            website: String::new(),
            hours: BTreeMap::new(),
            images: Vec::new(),
            tags: Vec::new(),
            coordinates,
            distance_km: None,
            is_open: false,
            delivery_available: false,
            takeout_available: false,
            dine_in_available: true,
            features: Vec::new(),
            dietary_options: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets `distance_km` relative to `origin`.
    pub fn annotate_distance(&mut self, origin: Coordinates) {
        self.distance_km = Some(origin.distance_to(self.coordinates));
    }

    /// Distance used for ordering; entries without one sort first, as zero.
    #[must_use]
    pub fn sort_distance(&self) -> f64 {
        self.distance_km.unwrap_or(0.0)
    }
}

/// Stable ascending sort by distance.
pub fn sort_by_distance(restaurants: &mut [Restaurant]) {
    restaurants.sort_by(|a, b| a.sort_distance().total_cmp(&b.sort_distance()));
}
