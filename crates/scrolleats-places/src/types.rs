//! Wire types for the places proxy.
//!
//! The proxy passes upstream JSON through unmodified, so these mirror the
//! upstream places API envelopes: a `status` string, a `results` array and,
//! for nearby search, an optional `next_page_token`.

use serde::{Deserialize, Serialize};

use scrolleats_core::Coordinates;

/// Envelope status reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacesStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    NotFound,
    UnknownError,
    #[serde(other)]
    Other,
}

impl PlacesStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other => "ERROR",
        }
    }
}

impl std::fmt::Display for PlacesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// nearby / text search
// ---------------------------------------------------------------------------

/// One page of nearby or text-search results.
#[derive(Debug, Deserialize)]
pub struct PlacesPage {
    pub status: PlacesStatus,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single upstream candidate before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    /// Ordinal 1–4; absent for many places.
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates::new(value.lat, value.lng)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    /// Lines such as `"Monday: 9:00 AM – 5:00 PM"`.
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

// ---------------------------------------------------------------------------
// details / reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: PlacesStatus,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Detail fields; every field is optional because callers request subsets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub relative_time_description: String,
    /// Unix seconds.
    #[serde(default)]
    pub time: i64,
}

// ---------------------------------------------------------------------------
// geocode / autocomplete
// ---------------------------------------------------------------------------

/// Error body the proxy returns with a 404 from `/geocode`.
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// What to geocode: a free-text address or an autocomplete place id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeQuery {
    Address(String),
    PlaceId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
    #[serde(default)]
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFormatting {
    #[serde(default)]
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_maps_to_other() {
        let page: PlacesPage =
            serde_json::from_str(r#"{"status":"SOMETHING_NEW","results":[]}"#).expect("parse");
        assert_eq!(page.status, PlacesStatus::Other);
    }

    #[test]
    fn minimal_place_parses_with_defaults() {
        let page: PlacesPage = serde_json::from_value(serde_json::json!({
            "status": "OK",
            "results": [{
                "place_id": "abc",
                "geometry": { "location": { "lat": 1.5, "lng": -2.5 } }
            }],
            "next_page_token": "tok"
        }))
        .expect("parse");
        let place = &page.results[0];
        assert_eq!(place.place_id, "abc");
        assert!(place.photos.is_empty());
        assert!(place.price_level.is_none());
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
        assert_eq!(Coordinates::from(place.geometry.location).longitude, -2.5);
    }

    #[test]
    fn request_denied_carries_message() {
        let page: PlacesPage = serde_json::from_str(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
        )
        .expect("parse");
        assert_eq!(page.status, PlacesStatus::RequestDenied);
        assert!(page.results.is_empty());
        assert_eq!(page.status.to_string(), "REQUEST_DENIED");
    }
}
