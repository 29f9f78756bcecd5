use std::sync::Arc;

use futures::future::join_all;

use scrolleats_core::{sort_by_distance, Coordinates, Restaurant};

use super::{SearchAggregator, DEFAULT_SEARCH_RADIUS_METERS};
use crate::error::PlacesError;
use crate::normalize;
use crate::types::{PlaceDetails, PlaceResult, PlacesStatus};

/// Fields requested for each text-search candidate.
const SEARCH_DETAIL_FIELDS: &str = "photos,formatted_phone_number,website,opening_hours";

impl SearchAggregator {
    /// Free-text restaurant search, optionally biased towards `origin`.
    ///
    /// Each candidate gets its own detail lookup; a failed lookup degrades
    /// only that entry. With an origin, entries are annotated with their
    /// distance and sorted nearest first. A failed or empty upstream search
    /// yields an empty list, never the fallback set.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] if `query` is blank or `origin` is
    /// not a valid coordinate pair.
    pub async fn search(
        &self,
        query: &str,
        origin: Option<Coordinates>,
        radius_meters: Option<i64>,
    ) -> Result<Arc<[Restaurant]>, PlacesError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PlacesError::Validation(
                "search query must not be blank".to_owned(),
            ));
        }
        let origin = origin
            .map(Coordinates::validate)
            .transpose()
            .map_err(|e| PlacesError::Validation(e.to_string()))?;
        let radius = radius_meters.unwrap_or(DEFAULT_SEARCH_RADIUS_METERS);

        let location = origin.map_or_else(|| "global".to_owned(), Coordinates::to_query_value);
        let key = format!("search:{query}:{location}:{radius}");
        if let Some(hit) = self.results_cache.get(&key).await {
            tracing::debug!(%key, count = hit.len(), "search cache hit");
            return Ok(hit);
        }

        let page = match self.client.text_search(query, origin, radius).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, query, "text search failed");
                return Ok(Vec::<Restaurant>::new().into());
            }
        };
        if page.status != PlacesStatus::Ok || page.results.is_empty() {
            tracing::info!(status = %page.status, query, "text search returned no results");
            return Ok(Vec::<Restaurant>::new().into());
        }

        let details = join_all(page.results.iter().map(|p| self.search_details(p))).await;

        let photo_url = |reference: &str, width: u32| self.photo_url(reference, width);
        let mut restaurants: Vec<Restaurant> = page
            .results
            .iter()
            .zip(details)
            .map(|(place, details)| normalize::from_text_search(place, details.as_ref(), &photo_url))
            .collect();

        if let Some(origin) = origin {
            for r in &mut restaurants {
                r.annotate_distance(origin);
            }
            sort_by_distance(&mut restaurants);
        }

        tracing::info!(count = restaurants.len(), query, "text search complete");
        let restaurants: Arc<[Restaurant]> = restaurants.into();
        self.results_cache.insert(key, Arc::clone(&restaurants)).await;
        Ok(restaurants)
    }

    async fn search_details(&self, place: &PlaceResult) -> Option<PlaceDetails> {
        match self
            .client
            .details(&place.place_id, SEARCH_DETAIL_FIELDS)
            .await
        {
            Ok(response) if response.status == PlacesStatus::Ok => response.result,
            Ok(response) => {
                tracing::warn!(
                    place_id = %place.place_id,
                    status = %response.status,
                    "details lookup not OK; using basic entry"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    place_id = %place.place_id,
                    error = %e,
                    "details lookup failed; using basic entry"
                );
                None
            }
        }
    }
}
