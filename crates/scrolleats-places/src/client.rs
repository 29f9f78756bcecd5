//! HTTP client for the local places proxy.
//!
//! The proxy holds the upstream key, so nothing here is secret. Every method
//! maps to one proxy route and returns the typed envelope; interpreting the
//! envelope `status` is left to the aggregator.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use scrolleats_core::Coordinates;

use crate::error::PlacesError;
use crate::types::{
    DetailsResponse, GeocodeErrorBody, GeocodeQuery, LatLng, PlacesPage, Prediction,
};

const DEFAULT_PROXY_URL: &str = "http://localhost:3001/api/";

/// Fixed category sent with text searches.
const TEXT_SEARCH_TYPE: &str = "restaurant";

/// Client for the places proxy.
///
/// Use [`PlacesClient::new`] for the default local proxy or
/// [`PlacesClient::with_base_url`] to point at another deployment or a mock
/// server in tests.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a client for the proxy on `localhost:3001`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(DEFAULT_PROXY_URL, timeout_secs)
    }

    /// Creates a client rooted at `base_url` (e.g. `http://host:3001/api`).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent("scrolleats/0.1 (restaurant-discovery)")
            .build()?;

        // Exactly one trailing slash; `build_url` pops the empty segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised)
            .map_err(|e| PlacesError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one page of nearby results.
    ///
    /// `radius_meters` is sent as given; callers clamp it.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a places envelope.
    pub async fn nearby_page(
        &self,
        origin: Coordinates,
        radius_meters: u32,
        category: &str,
        page_token: Option<&str>,
    ) -> Result<PlacesPage, PlacesError> {
        let latitude = origin.latitude.to_string();
        let longitude = origin.longitude.to_string();
        let radius = radius_meters.to_string();
        let mut params = vec![
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("radius", radius.as_str()),
            ("type", category),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let url = self.build_url(&["places", "nearby"], &params)?;
        self.get_json(&url, "places/nearby").await
    }

    /// Runs a free-text search, optionally biased towards `origin`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a places envelope.
    pub async fn text_search(
        &self,
        query: &str,
        origin: Option<Coordinates>,
        radius_meters: i64,
    ) -> Result<PlacesPage, PlacesError> {
        let radius = radius_meters.to_string();
        let location = origin.map(Coordinates::to_query_value);
        let mut params = vec![
            ("query", query),
            ("type", TEXT_SEARCH_TYPE),
            ("radius", radius.as_str()),
        ];
        if let Some(location) = &location {
            params.push(("location", location.as_str()));
        }

        let url = self.build_url(&["places", "search"], &params)?;
        self.get_json(&url, "places/search").await
    }

    /// Looks up `fields` (comma separated) for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a details envelope.
    pub async fn details(
        &self,
        place_id: &str,
        fields: &str,
    ) -> Result<DetailsResponse, PlacesError> {
        let url = self.build_url(&["places", "details", place_id], &[("fields", fields)])?;
        self.get_json(&url, "places/details").await
    }

    /// Fetches the reviews for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a details envelope.
    pub async fn reviews(&self, place_id: &str) -> Result<DetailsResponse, PlacesError> {
        let url = self.build_url(&["places", "reviews", place_id], &[])?;
        self.get_json(&url, "places/reviews").await
    }

    /// Resolves an address or place id to coordinates.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Validation`] for a blank query (no request is sent).
    /// - [`PlacesError::LocationNotFound`] when the proxy answers 404.
    /// - [`PlacesError::Http`] on network failure or any other non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not `{lat, lng}`.
    pub async fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinates, PlacesError> {
        let (key, value) = match query {
            GeocodeQuery::Address(address) => ("address", address.trim()),
            GeocodeQuery::PlaceId(place_id) => ("placeId", place_id.trim()),
        };
        if value.is_empty() {
            return Err(PlacesError::Validation(format!("{key} must not be blank")));
        }

        let url = self.build_url(&["geocode"], &[(key, value)])?;
        let response = self.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            let body: GeocodeErrorBody = response.json().await.unwrap_or_default();
            return Err(PlacesError::LocationNotFound {
                details: body.details.unwrap_or_else(|| "NOT_FOUND".to_owned()),
                message: body
                    .error_message
                    .or(body.error)
                    .unwrap_or_else(|| "Location not found".to_owned()),
            });
        }

        let response = response.error_for_status()?;
        let body = response.text().await?;
        let location: LatLng =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: "geocode".to_owned(),
                source: e,
            })?;
        Ok(location.into())
    }

    /// City-level autocomplete predictions for `input`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a prediction array.
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>, PlacesError> {
        let url = self.build_url(&["places", "autocomplete"], &[("input", input)])?;
        self.get_json(&url, "places/autocomplete").await
    }

    /// URL of the proxied photo for `photo_reference`, scaled to `max_width`.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        let width = max_width.to_string();
        self.build_url(
            &["places", "photo"],
            &[("maxwidth", width.as_str()), ("photoreference", photo_reference)],
        )
        .map(String::from)
        .unwrap_or_default()
    }

    /// Appends percent-encoded path `segments` and query `params` to the base URL.
    fn build_url(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| PlacesError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
