//! Places search for `ScrollEats`.
//!
//! [`PlacesClient`] talks to the local places proxy; [`SearchAggregator`]
//! layers pagination, deduplication, distance ordering, caching, and the
//! offline fallback set on top of it.

pub mod aggregator;
pub mod cache;
pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod sequencer;
pub mod types;

pub use aggregator::{
    clamp_radius, AggregatorOptions, SearchAggregator, DEFAULT_NEARBY_RADIUS_METERS,
    DEFAULT_SEARCH_RADIUS_METERS, MAX_RADIUS_METERS,
};
pub use cache::{Clock, ManualClock, SystemClock, TtlCache, DEFAULT_TTL};
pub use client::PlacesClient;
pub use error::PlacesError;
pub use fallback::{fallback_restaurants, is_fallback, FALLBACK_LEN};
pub use sequencer::{RequestSequencer, RequestTicket, Tracked};
pub use types::{GeocodeQuery, PlacesStatus, Prediction, Review};
