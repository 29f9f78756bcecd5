use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{non_blank, AppState, ProxyError, ProxyErrorBody};

const NOT_FOUND_MESSAGE: &str = "Location not found. Please try a different search term.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeocodeQuery {
    address: Option<String>,
    place_id: Option<String>,
}

/// Resolves an address or place id to `{ lat, lng }`.
///
/// `placeId` wins when both are given. Anything other than an `OK` answer
/// with at least one result is a 404 carrying the upstream status.
pub(super) async fn geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let param = match (
        non_blank(query.place_id.as_deref()),
        non_blank(query.address.as_deref()),
    ) {
        (Some(place_id), _) => ("place_id", place_id),
        (None, Some(address)) => ("address", address),
        (None, None) => {
            return Err(ProxyError::bad_request(
                "Address or placeId parameter is required",
            ))
        }
    };

    tracing::info!(request_id = %req_id.0, by = param.0, value = param.1, "geocoding");

    let mut body = state
        .upstream
        .get_json("geocode/json", &[param])
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "geocoding request failed");
            ProxyError::internal("Failed to fetch geocoding data")
        })?;

    let status = body
        .get("status")
        .and_then(|s| s.as_str())
        .unwrap_or("UNKNOWN")
        .to_owned();

    if status == "OK" {
        if let Some(location) = body.pointer_mut("/results/0/geometry/location") {
            return Ok(Json(location.take()));
        }
    }

    let error_message = body
        .get("error_message")
        .and_then(|m| m.as_str())
        .map(ToOwned::to_owned);
    tracing::warn!(
        request_id = %req_id.0,
        %status,
        error_message = error_message.as_deref().unwrap_or(""),
        "geocoding found nothing"
    );

    Err(ProxyError::not_found(ProxyErrorBody {
        details: Some(status),
        error_message,
        ..ProxyErrorBody::new(NOT_FOUND_MESSAGE)
    }))
}
