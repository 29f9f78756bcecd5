//! Single-item vertical viewport for swiping through restaurants.
//!
//! [`ScrollController`] is framework-neutral: it owns the item list and the
//! cursor, and adapters feed it raw input plus a millisecond timestamp.

pub mod controller;
pub mod gesture;

pub use controller::{
    IndexObserver, ScrollController, ScrollState, ACCEPT_INTERVAL_MS, SETTLE_DELAY_MS,
};
pub use gesture::{
    direction_for_key, wheel_direction, Direction, InputEvent, TouchTracker,
    SWIPE_MAX_DURATION_MS, SWIPE_MIN_DISTANCE_PX, WHEEL_THRESHOLD,
};
