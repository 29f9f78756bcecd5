use std::sync::Arc;

use scrolleats_core::{Coordinates, Restaurant};

use super::SearchAggregator;
use crate::error::PlacesError;
use crate::normalize;
use crate::types::{GeocodeQuery, PlacesStatus, Prediction, Review};

/// Fields requested for the full detail view.
const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,website,\
opening_hours,rating,user_ratings_total,photos,types,price_level,geometry";

impl SearchAggregator {
    /// Full detail record for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Validation`] for a blank id.
    /// - [`PlacesError::Upstream`] if the envelope status is not `OK`.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] from the client.
    pub async fn place_details(&self, place_id: &str) -> Result<Restaurant, PlacesError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(PlacesError::Validation("place id must not be blank".to_owned()));
        }

        let key = format!("details:{place_id}");
        if let Some(hit) = self.details_cache.get(&key).await {
            return Ok(hit);
        }

        let response = self.client.details(place_id, DETAIL_FIELDS).await?;
        let details = match (response.status, response.result) {
            (PlacesStatus::Ok, Some(details)) => details,
            (status, _) => {
                return Err(PlacesError::Upstream {
                    status: status.to_string(),
                    message: response
                        .error_message
                        .unwrap_or_else(|| format!("no details for {place_id}")),
                });
            }
        };

        let photo_url = |reference: &str, width: u32| self.photo_url(reference, width);
        let restaurant = normalize::from_details(place_id, &details, &photo_url);
        self.details_cache.insert(key, restaurant.clone()).await;
        Ok(restaurant)
    }

    /// Reviews for one place; empty when the lookup fails.
    pub async fn place_reviews(&self, place_id: &str) -> Arc<[Review]> {
        let key = format!("reviews:{place_id}");
        if let Some(hit) = self.reviews_cache.get(&key).await {
            return hit;
        }

        match self.client.reviews(place_id).await {
            Ok(response) if response.status == PlacesStatus::Ok => {
                let reviews: Arc<[Review]> = response
                    .result
                    .map(|r| r.reviews)
                    .unwrap_or_default()
                    .into();
                self.reviews_cache.insert(key, Arc::clone(&reviews)).await;
                reviews
            }
            Ok(response) => {
                tracing::warn!(place_id, status = %response.status, "reviews lookup not OK");
                Vec::<Review>::new().into()
            }
            Err(e) => {
                tracing::warn!(place_id, error = %e, "reviews lookup failed");
                Vec::<Review>::new().into()
            }
        }
    }

    /// Resolves an address or place id to coordinates.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::geocode`](crate::PlacesClient::geocode).
    pub async fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinates, PlacesError> {
        self.client.geocode(query).await
    }

    /// City suggestions for `input`; empty for blank input or on failure.
    pub async fn autocomplete(&self, input: &str) -> Vec<Prediction> {
        let input = input.trim();
        if input.is_empty() {
            return Vec::new();
        }
        self.client.autocomplete(input).await.unwrap_or_else(|e| {
            tracing::warn!(input, error = %e, "autocomplete failed");
            Vec::new()
        })
    }
}
