use std::collections::HashSet;
use std::sync::Arc;

use scrolleats_core::{sort_by_distance, Coordinates, Restaurant};

use super::{clamp_radius, SearchAggregator};
use crate::error::PlacesError;
use crate::fallback::fallback_restaurants;
use crate::normalize;
use crate::sequencer::Tracked;
use crate::types::{PlaceResult, PlacesStatus};

impl SearchAggregator {
    /// Restaurants around `origin`, nearest first.
    ///
    /// Fetches up to `max_pages` nearby pages sequentially, waiting
    /// `page_delay` before each continuation. Results are deduplicated by
    /// place id (first occurrence wins), annotated with their distance from
    /// `origin`, sorted ascending, and cached.
    ///
    /// Network failures, denied keys, unexpected upstream statuses and empty
    /// result sets all resolve to the synthetic fallback set, which is never
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] if `origin` is not a valid
    /// coordinate pair. No request is sent in that case.
    pub async fn fetch_nearby(
        &self,
        origin: Coordinates,
        radius_meters: i64,
        category: Option<&str>,
    ) -> Result<Arc<[Restaurant]>, PlacesError> {
        let origin = origin
            .validate()
            .map_err(|e| PlacesError::Validation(e.to_string()))?;
        let radius = clamp_radius(radius_meters);
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.options.default_category.as_str());

        let key = format!(
            "nearby:{},{}:{radius}:{category}",
            origin.latitude, origin.longitude
        );
        if let Some(hit) = self.results_cache.get(&key).await {
            tracing::debug!(%key, count = hit.len(), "nearby cache hit");
            return Ok(hit);
        }

        match self.collect_pages(origin, radius, category).await {
            Ok(places) => {
                let restaurants = self.merge_nearby(origin, &places);
                if restaurants.is_empty() {
                    tracing::info!(radius, category, "no nearby results; serving fallback set");
                    return Ok(fallback_restaurants(origin).into());
                }
                tracing::info!(count = restaurants.len(), radius, category, "nearby search complete");
                let restaurants: Arc<[Restaurant]> = restaurants.into();
                self.results_cache.insert(key, Arc::clone(&restaurants)).await;
                Ok(restaurants)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    reason = e.fallback_reason(),
                    "nearby search failed; serving fallback set"
                );
                Ok(fallback_restaurants(origin).into())
            }
        }
    }

    /// [`fetch_nearby`](Self::fetch_nearby) tagged with a fresh request
    /// ticket, so the caller can discard it if a newer query has started.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_nearby`](Self::fetch_nearby).
    pub async fn fetch_nearby_tracked(
        &self,
        origin: Coordinates,
        radius_meters: i64,
        category: Option<&str>,
    ) -> Result<Tracked<Arc<[Restaurant]>>, PlacesError> {
        let ticket = self.begin_request();
        let value = self.fetch_nearby(origin, radius_meters, category).await?;
        Ok(Tracked { ticket, value })
    }

    /// Walks the nearby pages. Any status other than `OK` or `ZERO_RESULTS`
    /// aborts the walk and discards what was gathered.
    async fn collect_pages(
        &self,
        origin: Coordinates,
        radius: u32,
        category: &str,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let mut places = Vec::new();
        let mut page_token: Option<String> = None;

        for page_index in 0..self.options.max_pages {
            let page = self
                .client
                .nearby_page(origin, radius, category, page_token.as_deref())
                .await?;

            match page.status {
                PlacesStatus::Ok => {}
                PlacesStatus::ZeroResults => {
                    tracing::debug!(page = page_index + 1, "nearby page returned zero results");
                    break;
                }
                status => {
                    return Err(PlacesError::Upstream {
                        status: status.to_string(),
                        message: page
                            .error_message
                            .unwrap_or_else(|| "Unknown error".to_owned()),
                    });
                }
            }

            tracing::debug!(
                page = page_index + 1,
                results = page.results.len(),
                "fetched nearby page"
            );
            places.extend(page.results);

            page_token = page.next_page_token.filter(|t| !t.is_empty());
            if page_token.is_none() {
                break;
            }
            if page_index + 1 < self.options.max_pages {
                tokio::time::sleep(self.options.page_delay).await;
            }
        }

        Ok(places)
    }

    fn merge_nearby(&self, origin: Coordinates, places: &[PlaceResult]) -> Vec<Restaurant> {
        let photo_url = |reference: &str, width: u32| self.photo_url(reference, width);
        let mut seen = HashSet::new();
        let mut restaurants: Vec<Restaurant> = places
            .iter()
            .filter(|p| seen.insert(p.place_id.as_str()))
            .map(|p| {
                let mut r = normalize::from_nearby(p, &photo_url);
                r.annotate_distance(origin);
                r
            })
            .collect();
        sort_by_distance(&mut restaurants);
        restaurants
    }
}
