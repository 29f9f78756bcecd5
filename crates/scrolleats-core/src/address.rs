//! Heuristic parsing of free-text addresses and place type lists.
//!
//! Addresses are expected in the `"street, city, ST 12345, country"` shape the
//! places API returns. Parsing never fails: a field whose comma segment is
//! missing comes back as an empty string.

use std::sync::LazyLock;

use regex::Regex;

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5}").expect("valid zip regex"));

/// Place types that carry a cuisine, in no particular order.
const CUISINE_TYPES: &[&str] = &[
    "restaurant",
    "food",
    "meal_takeaway",
    "meal_delivery",
    "american_restaurant",
    "italian_restaurant",
    "chinese_restaurant",
    "japanese_restaurant",
    "mexican_restaurant",
    "indian_restaurant",
    "thai_restaurant",
    "vietnamese_restaurant",
    "korean_restaurant",
    "french_restaurant",
    "greek_restaurant",
    "mediterranean_restaurant",
    "pizza_restaurant",
    "burger_restaurant",
    "seafood_restaurant",
    "steakhouse",
    "barbecue_restaurant",
    "sushi_restaurant",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Splits `address` on commas and picks city, state and zip.
///
/// - city: the trimmed second segment
/// - state: the first whitespace-separated word of the third segment
/// - zip: the first run of five digits in the third segment
#[must_use]
pub fn parse_address(address: &str) -> AddressParts {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();

    let city = parts.get(1).map(ToString::to_string).unwrap_or_default();

    let (state, zip) = match parts.get(2) {
        Some(segment) => {
            let state = segment
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            let zip = ZIP_RE
                .find(segment)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (state, zip)
        }
        None => (String::new(), String::new()),
    };

    AddressParts { city, state, zip }
}

/// Picks the first known cuisine type and renders it for display,
/// e.g. `italian_restaurant` -> `Italian`, `meal_takeaway` -> `Meal Takeaway`.
///
/// Returns `"Restaurant"` when none of the types is a cuisine.
#[must_use]
pub fn extract_cuisine(types: &[String]) -> String {
    types
        .iter()
        .find(|t| CUISINE_TYPES.contains(&t.as_str()))
        .map_or_else(|| "Restaurant".to_string(), |t| display_cuisine(t))
}

fn display_cuisine(place_type: &str) -> String {
    place_type
        .replace("_restaurant", "")
        .split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
