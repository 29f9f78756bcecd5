//! Discovery commands backed by the places aggregator.

use clap::Args;
use scrolleats_core::{AppConfig, Coordinates};
use scrolleats_places::{GeocodeQuery, PlacesClient, SearchAggregator};
use serde::Serialize;

/// An origin given either as coordinates or as an address to geocode.
#[derive(Debug, Clone, Args)]
pub(crate) struct OriginArgs {
    /// Latitude of the search origin
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,
    /// Longitude of the search origin
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,
    /// Free-text address to geocode instead of coordinates
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub near: Option<String>,
}

impl OriginArgs {
    /// Resolves the origin, geocoding `--near` when given.
    pub(crate) async fn resolve(
        &self,
        aggregator: &SearchAggregator,
    ) -> anyhow::Result<Option<Coordinates>> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            return Ok(Some(Coordinates::new(lat, lng).validate()?));
        }
        match &self.near {
            Some(address) => {
                let coords = aggregator
                    .geocode(&GeocodeQuery::Address(address.clone()))
                    .await?;
                Ok(Some(coords))
            }
            None => Ok(None),
        }
    }
}

pub(crate) fn build_aggregator(config: &AppConfig) -> anyhow::Result<SearchAggregator> {
    let client = PlacesClient::with_base_url(&config.proxy_base_url, config.request_timeout_secs)?;
    Ok(SearchAggregator::new(client))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_nearby(
    aggregator: &SearchAggregator,
    origin: Coordinates,
    radius: i64,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let restaurants = aggregator.fetch_nearby(origin, radius, category).await?;
    if restaurants.iter().any(scrolleats_places::is_fallback) {
        tracing::warn!("places service unavailable; showing sample restaurants");
    }
    print_json(&*restaurants)
}

pub(crate) async fn run_search(
    aggregator: &SearchAggregator,
    query: &str,
    origin: Option<Coordinates>,
    radius: Option<i64>,
) -> anyhow::Result<()> {
    let restaurants = aggregator.search(query, origin, radius).await?;
    tracing::info!(query, count = restaurants.len(), "search finished");
    print_json(&*restaurants)
}

pub(crate) async fn run_details(aggregator: &SearchAggregator, place_id: &str) -> anyhow::Result<()> {
    let restaurant = aggregator.place_details(place_id).await?;
    print_json(&restaurant)
}

pub(crate) async fn run_reviews(aggregator: &SearchAggregator, place_id: &str) -> anyhow::Result<()> {
    let reviews = aggregator.place_reviews(place_id).await;
    print_json(&*reviews)
}

pub(crate) async fn run_geocode(
    aggregator: &SearchAggregator,
    query: GeocodeQuery,
) -> anyhow::Result<()> {
    let coords = aggregator.geocode(&query).await?;
    print_json(&coords)
}

pub(crate) async fn run_autocomplete(
    aggregator: &SearchAggregator,
    input: &str,
) -> anyhow::Result<()> {
    let predictions = aggregator.autocomplete(input).await;
    print_json(&predictions)
}
