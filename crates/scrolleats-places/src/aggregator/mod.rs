//! Search aggregation over the places proxy.
//!
//! [`SearchAggregator`] turns paginated nearby results and text searches into
//! deduplicated, distance-sorted [`Restaurant`] lists, with a short-lived
//! response cache in front of every lookup.

mod details;
mod nearby;
mod search;

use std::sync::Arc;
use std::time::Duration;

use scrolleats_core::Restaurant;

use crate::cache::{Clock, SystemClock, TtlCache, DEFAULT_TTL};
use crate::client::PlacesClient;
use crate::sequencer::{RequestSequencer, RequestTicket};
use crate::types::Review;

/// Upper bound for the nearby search radius, in metres.
pub const MAX_RADIUS_METERS: u32 = 50_000;

/// Radius used by text search when the caller gives none.
pub const DEFAULT_SEARCH_RADIUS_METERS: i64 = 50_000;

/// Radius used by nearby search when the caller gives none.
pub const DEFAULT_NEARBY_RADIUS_METERS: i64 = 5_000;

/// Tunables for [`SearchAggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// Maximum nearby pages fetched per query.
    pub max_pages: usize,
    /// Wait between consecutive page requests; the upstream rejects
    /// continuation tokens used sooner than about two seconds.
    pub page_delay: Duration,
    pub cache_ttl: Duration,
    pub default_category: String,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            max_pages: 5,
            page_delay: Duration::from_secs(2),
            cache_ttl: DEFAULT_TTL,
            default_category: "restaurant".to_owned(),
        }
    }
}

/// Clamps a requested radius into `[0, MAX_RADIUS_METERS]`.
#[must_use]
pub fn clamp_radius(radius_meters: i64) -> u32 {
    u32::try_from(radius_meters.clamp(0, i64::from(MAX_RADIUS_METERS)))
        .unwrap_or(MAX_RADIUS_METERS)
}

/// Merges, normalizes, and caches restaurant searches.
#[derive(Debug)]
pub struct SearchAggregator {
    client: PlacesClient,
    options: AggregatorOptions,
    results_cache: TtlCache<Arc<[Restaurant]>>,
    details_cache: TtlCache<Restaurant>,
    reviews_cache: TtlCache<Arc<[Review]>>,
    sequencer: RequestSequencer,
}

impl SearchAggregator {
    #[must_use]
    pub fn new(client: PlacesClient) -> Self {
        Self::with_options(client, AggregatorOptions::default())
    }

    #[must_use]
    pub fn with_options(client: PlacesClient, options: AggregatorOptions) -> Self {
        Self::with_clock(client, options, Arc::new(SystemClock))
    }

    /// Builds an aggregator whose caches read time from `clock`.
    #[must_use]
    pub fn with_clock(client: PlacesClient, options: AggregatorOptions, clock: Arc<dyn Clock>) -> Self {
        let ttl = options.cache_ttl;
        Self {
            client,
            options,
            results_cache: TtlCache::with_clock(ttl, Arc::clone(&clock)),
            details_cache: TtlCache::with_clock(ttl, Arc::clone(&clock)),
            reviews_cache: TtlCache::with_clock(ttl, clock),
            sequencer: RequestSequencer::new(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &PlacesClient {
        &self.client
    }

    #[must_use]
    pub fn options(&self) -> &AggregatorOptions {
        &self.options
    }

    /// Starts a tracked request; results carrying an older ticket are stale.
    pub fn begin_request(&self) -> RequestTicket {
        self.sequencer.issue()
    }

    /// Whether `ticket` is still the newest request.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sequencer.is_current(ticket)
    }

    /// Drops expired entries from every cache.
    pub async fn purge_expired(&self) -> usize {
        self.results_cache.purge_expired().await
            + self.details_cache.purge_expired().await
            + self.reviews_cache.purge_expired().await
    }

    fn photo_url(&self, reference: &str, max_width: u32) -> String {
        self.client.photo_url(reference, max_width)
    }
}
