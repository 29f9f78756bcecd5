use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_upstream_error, non_blank, AppState, ProxyError};

const MAX_RADIUS_METERS: u32 = 50_000;
const DEFAULT_NEARBY_RADIUS: u32 = 5_000;
const DEFAULT_SEARCH_RADIUS: u32 = 50_000;
const DEFAULT_TYPE: &str = "restaurant";
const DEFAULT_DETAIL_FIELDS: &str = "photos,formatted_phone_number,website,opening_hours";
const DEFAULT_PHOTO_WIDTH: &str = "800";

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    latitude: Option<String>,
    longitude: Option<String>,
    radius: Option<String>,
    #[serde(rename = "type")]
    place_type: Option<String>,
    pagetoken: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    query: Option<String>,
    location: Option<String>,
    radius: Option<String>,
    #[serde(rename = "type")]
    place_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailsQuery {
    fields: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AutocompleteQuery {
    input: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PhotoQuery {
    photoreference: Option<String>,
    maxwidth: Option<String>,
}

/// Parses a radius, falling back to `default` when absent or unparseable,
/// and caps it at the upstream maximum.
fn clamp_radius(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|r| r.trim().parse::<u32>().ok())
        .unwrap_or(default)
        .min(MAX_RADIUS_METERS)
}

pub(super) async fn nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let (Some(latitude), Some(longitude)) = (
        non_blank(query.latitude.as_deref()),
        non_blank(query.longitude.as_deref()),
    ) else {
        return Err(ProxyError::bad_request("Missing latitude or longitude"));
    };

    let location = format!("{latitude},{longitude}");
    let radius = clamp_radius(query.radius.as_deref(), DEFAULT_NEARBY_RADIUS).to_string();
    let place_type = non_blank(query.place_type.as_deref()).unwrap_or(DEFAULT_TYPE);

    let mut params = vec![
        ("location", location.as_str()),
        ("radius", radius.as_str()),
        ("type", place_type),
        ("opennow", "true"),
    ];
    if let Some(token) = non_blank(query.pagetoken.as_deref()) {
        params.push(("pagetoken", token));
    }

    tracing::info!(
        request_id = %req_id.0,
        %location,
        %radius,
        has_page_token = query.pagetoken.is_some(),
        "proxying nearby search"
    );

    let body = state
        .upstream
        .get_json("place/nearbysearch/json", &params)
        .await
        .map_err(|e| map_upstream_error(&req_id, "Failed to fetch places", &e))?;

    tracing::debug!(
        request_id = %req_id.0,
        status = body.get("status").and_then(|s| s.as_str()).unwrap_or("?"),
        results = body.get("results").and_then(|r| r.as_array()).map_or(0, Vec::len),
        has_next_page = body.get("next_page_token").is_some(),
        "nearby search answered"
    );

    Ok(Json(body))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let Some(text) = non_blank(query.query.as_deref()) else {
        return Err(ProxyError::bad_request("Query parameter is required"));
    };
    let place_type = non_blank(query.place_type.as_deref()).unwrap_or(DEFAULT_TYPE);
    let upstream_query = format!("{text} {place_type}");
    let radius = clamp_radius(query.radius.as_deref(), DEFAULT_SEARCH_RADIUS).to_string();

    let mut params = vec![("query", upstream_query.as_str()), ("type", place_type)];
    if let Some(location) = non_blank(query.location.as_deref()) {
        params.push(("location", location));
        params.push(("radius", radius.as_str()));
    }

    tracing::info!(request_id = %req_id.0, query = %text, "proxying text search");

    let body = state
        .upstream
        .get_json("place/textsearch/json", &params)
        .await
        .map_err(|e| map_upstream_error(&req_id, "Failed to search places", &e))?;
    Ok(Json(body))
}

pub(super) async fn details(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let fields = non_blank(query.fields.as_deref()).unwrap_or(DEFAULT_DETAIL_FIELDS);
    let body = state
        .upstream
        .get_json(
            "place/details/json",
            &[("place_id", place_id.as_str()), ("fields", fields)],
        )
        .await
        .map_err(|e| map_upstream_error(&req_id, "Failed to fetch place details", &e))?;
    Ok(Json(body))
}

pub(super) async fn reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let body = state
        .upstream
        .get_json(
            "place/details/json",
            &[("place_id", place_id.as_str()), ("fields", "reviews")],
        )
        .await
        .map_err(|e| map_upstream_error(&req_id, "Failed to fetch reviews", &e))?;
    Ok(Json(body))
}

/// Returns only the upstream `predictions` array, restricted to cities.
pub(super) async fn autocomplete(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let Some(input) = non_blank(query.input.as_deref()) else {
        return Err(ProxyError::bad_request("Input parameter is required"));
    };

    let mut body = state
        .upstream
        .get_json(
            "place/autocomplete/json",
            &[("input", input), ("types", "(cities)")],
        )
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "autocomplete failed");
            ProxyError::internal("Failed to fetch autocomplete suggestions")
        })?;

    let predictions = body
        .get_mut("predictions")
        .map_or_else(|| serde_json::Value::Array(Vec::new()), serde_json::Value::take);
    Ok(Json(predictions))
}

/// Streams photo bytes so clients never see a keyed upstream URL.
pub(super) async fn photo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PhotoQuery>,
) -> Result<impl IntoResponse, ProxyError> {
    let Some(reference) = non_blank(query.photoreference.as_deref()) else {
        return Err(ProxyError::bad_request("photoreference parameter is required"));
    };
    let width = query
        .maxwidth
        .as_deref()
        .map(str::trim)
        .filter(|w| w.parse::<u32>().is_ok())
        .unwrap_or(DEFAULT_PHOTO_WIDTH);

    let photo = state
        .upstream
        .get_bytes(
            "place/photo",
            &[("maxwidth", width), ("photoreference", reference)],
        )
        .await
        .map_err(|e| map_upstream_error(&req_id, "Failed to fetch photo", &e))?;

    let content_type = photo
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_owned());
    Ok(([(header::CONTENT_TYPE, content_type)], photo.body))
}

#[cfg(test)]
mod tests {
    use super::clamp_radius;

    #[test]
    fn radius_defaults_and_caps() {
        assert_eq!(clamp_radius(None, 5_000), 5_000);
        assert_eq!(clamp_radius(Some("1200"), 5_000), 1_200);
        assert_eq!(clamp_radius(Some("90000"), 5_000), 50_000);
        assert_eq!(clamp_radius(Some("wide"), 50_000), 50_000);
        assert_eq!(clamp_radius(Some("-3"), 5_000), 5_000);
    }
}
