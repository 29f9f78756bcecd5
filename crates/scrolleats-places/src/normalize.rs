//! Conversion from upstream place records into [`Restaurant`].

use std::collections::BTreeMap;

use scrolleats_core::{extract_cuisine, parse_address, Coordinates, PriceRange, Restaurant};

use crate::types::{OpeningHours, PlaceDetails, PlaceResult};

/// Stock images used when a place has no photos.
pub const STOCK_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800",
    "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=800",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=800",
];

/// Single stock image for the detail view.
pub const DETAIL_STOCK_IMAGE: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=1200";

const LIST_PHOTO_COUNT: usize = 3;
const LIST_PHOTO_WIDTH: u32 = 800;
const DETAIL_PHOTO_COUNT: usize = 5;
const DETAIL_PHOTO_WIDTH: u32 = 1200;
const SEARCH_TAG_LIMIT: usize = 5;

/// Builds an image URL from a photo reference and a max width.
pub type PhotoUrlFn<'a> = &'a (dyn Fn(&str, u32) -> String + Send + Sync);

fn stock_images() -> Vec<String> {
    STOCK_IMAGES.iter().map(|s| (*s).to_owned()).collect()
}

fn photo_urls(
    photos: &[crate::types::Photo],
    count: usize,
    width: u32,
    photo_url: PhotoUrlFn<'_>,
) -> Vec<String> {
    photos
        .iter()
        .take(count)
        .map(|p| photo_url(&p.photo_reference, width))
        .collect()
}

/// Parses `"Monday: 9:00 AM – 5:00 PM"` lines into a day-to-hours map.
///
/// Lines without a `": "` separator are skipped.
#[must_use]
pub fn hours_from_weekday_text(opening_hours: Option<&OpeningHours>) -> BTreeMap<String, String> {
    opening_hours
        .map(|h| {
            h.weekday_text
                .iter()
                .filter_map(|line| line.split_once(": "))
                .map(|(day, hours)| (day.to_owned(), hours.to_owned()))
                .collect()
        })
        .unwrap_or_default()
}

/// Normalizes one nearby-search result.
#[must_use]
pub fn from_nearby(place: &PlaceResult, photo_url: PhotoUrlFn<'_>) -> Restaurant {
    let mut r = Restaurant::new(
        place.place_id.clone(),
        place.name.clone(),
        place.geometry.location.into(),
    );
    r.description = if place.types.is_empty() {
        "Restaurant".to_owned()
    } else {
        place.types.join(", ")
    };
    r.cuisine = place
        .types
        .first()
        .cloned()
        .unwrap_or_else(|| "restaurant".to_owned());
    r.price_range = PriceRange::from_price_level(place.price_level);
    r.rating = place.rating.unwrap_or(0.0);
    r.review_count = place.user_ratings_total.unwrap_or(0);
    r.address = place
        .vicinity
        .clone()
        .or_else(|| place.formatted_address.clone())
        .unwrap_or_default();
    let parts = parse_address(&r.address);
    r.city = parts.city;
    r.state = parts.state;
    r.zip_code = parts.zip;
    r.images = if place.photos.is_empty() {
        stock_images()
    } else {
        photo_urls(&place.photos, LIST_PHOTO_COUNT, LIST_PHOTO_WIDTH, photo_url)
    };
    r.tags.clone_from(&place.types);
    r.is_open = place
        .opening_hours
        .as_ref()
        .and_then(|h| h.open_now)
        .unwrap_or(false);
    r
}

/// Normalizes one text-search result, enriched by `details` when the
/// secondary lookup succeeded.
///
/// Without details the entry is degraded: stock images, no phone or
/// website, no hours, and `is_open = false`.
#[must_use]
pub fn from_text_search(
    place: &PlaceResult,
    details: Option<&PlaceDetails>,
    photo_url: PhotoUrlFn<'_>,
) -> Restaurant {
    let mut r = Restaurant::new(
        place.place_id.clone(),
        place.name.clone(),
        place.geometry.location.into(),
    );
    let address = place.formatted_address.clone().unwrap_or_default();
    let parts = parse_address(&address);
    r.description.clone_from(&address);
    r.address = address;
    r.city = parts.city;
    r.state = parts.state;
    r.zip_code = parts.zip;
    r.cuisine = extract_cuisine(&place.types);
    r.price_range = PriceRange::from_price_level(place.price_level);
    r.rating = place.rating.unwrap_or(0.0);
    r.review_count = place.user_ratings_total.unwrap_or(0);
    r.tags = place.types.iter().take(SEARCH_TAG_LIMIT).cloned().collect();
    r.images = stock_images();

    if let Some(details) = details {
        r.phone = details.formatted_phone_number.clone().unwrap_or_default();
        r.website = details.website.clone().unwrap_or_default();
        r.hours = hours_from_weekday_text(details.opening_hours.as_ref());
        r.is_open = details
            .opening_hours
            .as_ref()
            .and_then(|h| h.open_now)
            .unwrap_or(false);
        if !details.photos.is_empty() {
            r.images = photo_urls(&details.photos, LIST_PHOTO_COUNT, LIST_PHOTO_WIDTH, photo_url);
        }
    }
    r
}

/// Normalizes a full details lookup for `place_id`.
#[must_use]
pub fn from_details(
    place_id: &str,
    details: &PlaceDetails,
    photo_url: PhotoUrlFn<'_>,
) -> Restaurant {
    let coordinates = details
        .geometry
        .map_or_else(|| Coordinates::new(0.0, 0.0), |g| g.location.into());
    let mut r = Restaurant::new(
        place_id,
        details.name.clone().unwrap_or_default(),
        coordinates,
    );
    r.description = details.types.join(", ");
    r.cuisine = details
        .types
        .first()
        .cloned()
        .unwrap_or_else(|| "restaurant".to_owned());
    r.price_range = PriceRange::from_price_level(details.price_level);
    r.rating = details.rating.unwrap_or(0.0);
    r.review_count = details.user_ratings_total.unwrap_or(0);
    r.address = details.formatted_address.clone().unwrap_or_default();
    let parts = parse_address(&r.address);
    r.city = parts.city;
    r.state = parts.state;
    r.zip_code = parts.zip;
    r.phone = details.formatted_phone_number.clone().unwrap_or_default();
    r.website = details.website.clone().unwrap_or_default();
    r.hours = hours_from_weekday_text(details.opening_hours.as_ref());
    r.images = if details.photos.is_empty() {
        vec![DETAIL_STOCK_IMAGE.to_owned()]
    } else {
        photo_urls(&details.photos, DETAIL_PHOTO_COUNT, DETAIL_PHOTO_WIDTH, photo_url)
    };
    r.tags.clone_from(&details.types);
    r.is_open = details
        .opening_hours
        .as_ref()
        .and_then(|h| h.open_now)
        .unwrap_or(false);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlacesPage;

    fn fake_photo_url(reference: &str, width: u32) -> String {
        format!("photo://{reference}/{width}")
    }

    fn place(value: serde_json::Value) -> PlaceResult {
        let page: PlacesPage =
            serde_json::from_value(serde_json::json!({ "status": "OK", "results": [value] }))
                .expect("parse");
        page.results.into_iter().next().expect("one result")
    }

    #[test]
    fn nearby_place_with_photos_and_vicinity() {
        let p = place(serde_json::json!({
            "place_id": "p1",
            "name": "Corner Cafe",
            "vicinity": "12 Elm St, Springfield, IL 62701",
            "geometry": { "location": { "lat": 39.78, "lng": -89.65 } },
            "price_level": 1,
            "rating": 4.4,
            "user_ratings_total": 210,
            "types": ["cafe", "food"],
            "photos": [
                { "photo_reference": "a" }, { "photo_reference": "b" },
                { "photo_reference": "c" }, { "photo_reference": "d" }
            ],
            "opening_hours": { "open_now": true }
        }));
        let r = from_nearby(&p, &fake_photo_url);
        assert_eq!(r.id, "p1");
        assert_eq!(r.description, "cafe, food");
        assert_eq!(r.cuisine, "cafe");
        assert_eq!(r.price_range, PriceRange::Budget);
        assert_eq!(r.review_count, 210);
        assert_eq!(r.city, "Springfield");
        assert_eq!(r.state, "IL");
        assert_eq!(r.zip_code, "62701");
        assert_eq!(r.images, vec!["photo://a/800", "photo://b/800", "photo://c/800"]);
        assert!(r.is_open);
        assert!(r.dine_in_available);
    }

    #[test]
    fn nearby_place_without_photos_uses_stock_images() {
        let p = place(serde_json::json!({
            "place_id": "p2",
            "name": "Bare",
            "geometry": { "location": { "lat": 0.0, "lng": 0.0 } }
        }));
        let r = from_nearby(&p, &fake_photo_url);
        assert_eq!(r.images.len(), 3);
        assert_eq!(r.images[0], STOCK_IMAGES[0]);
        assert_eq!(r.description, "Restaurant");
        assert_eq!(r.cuisine, "restaurant");
        assert_eq!(r.price_range, PriceRange::Moderate);
        assert!(r.address.is_empty());
        assert!(!r.is_open);
    }

    #[test]
    fn text_search_without_details_is_degraded() {
        let p = place(serde_json::json!({
            "place_id": "s1",
            "name": "Noodle Bar",
            "formatted_address": "1 Main St, Austin, TX 78701, USA",
            "geometry": { "location": { "lat": 30.2, "lng": -97.7 } },
            "types": ["sushi_restaurant", "restaurant", "food", "point_of_interest", "establishment", "extra"]
        }));
        let r = from_text_search(&p, None, &fake_photo_url);
        assert_eq!(r.cuisine, "Sushi");
        assert_eq!(r.description, "1 Main St, Austin, TX 78701, USA");
        assert_eq!(r.tags.len(), 5);
        assert!(r.phone.is_empty());
        assert!(r.website.is_empty());
        assert!(!r.is_open);
        assert_eq!(r.images.len(), 3);
    }

    #[test]
    fn text_search_with_details_takes_photos_and_contact() {
        let p = place(serde_json::json!({
            "place_id": "s2",
            "name": "Taqueria",
            "formatted_address": "5 Oak Ave, Austin, TX 78702, USA",
            "geometry": { "location": { "lat": 30.2, "lng": -97.7 } },
            "types": ["mexican_restaurant"]
        }));
        let details: PlaceDetails = serde_json::from_value(serde_json::json!({
            "formatted_phone_number": "(512) 555-0100",
            "website": "https://taqueria.example",
            "opening_hours": { "open_now": true, "weekday_text": ["Monday: 8:00 AM – 9:00 PM"] },
            "photos": [{ "photo_reference": "x" }]
        }))
        .expect("details");
        let r = from_text_search(&p, Some(&details), &fake_photo_url);
        assert_eq!(r.phone, "(512) 555-0100");
        assert_eq!(r.website, "https://taqueria.example");
        assert_eq!(r.images, vec!["photo://x/800"]);
        assert_eq!(r.hours.get("Monday").map(String::as_str), Some("8:00 AM – 9:00 PM"));
        assert!(r.is_open);
    }

    #[test]
    fn details_use_large_photos_and_hours() {
        let details: PlaceDetails = serde_json::from_value(serde_json::json!({
            "name": "Bistro",
            "formatted_address": "9 Rue St, Portland, OR 97201, USA",
            "geometry": { "location": { "lat": 45.5, "lng": -122.6 } },
            "price_level": 4,
            "types": ["french_restaurant", "restaurant"],
            "photos": [
                { "photo_reference": "1" }, { "photo_reference": "2" }, { "photo_reference": "3" },
                { "photo_reference": "4" }, { "photo_reference": "5" }, { "photo_reference": "6" }
            ],
            "opening_hours": { "weekday_text": ["Monday: Closed", "Tuesday: 5:00 – 10:00 PM", "garbage"] }
        }))
        .expect("details");
        let r = from_details("d1", &details, &fake_photo_url);
        assert_eq!(r.id, "d1");
        assert_eq!(r.images.len(), 5);
        assert_eq!(r.images[4], "photo://5/1200");
        assert_eq!(r.price_range, PriceRange::Luxury);
        assert_eq!(r.hours.len(), 2);
        assert_eq!(r.hours["Monday"], "Closed");
        assert_eq!(r.coordinates.latitude, 45.5);
    }
}
