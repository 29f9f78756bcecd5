//! Interpretation of raw wheel, touch and keyboard input.

use serde::{Deserialize, Serialize};

/// Wheel deltas smaller than this are treated as noise.
pub const WHEEL_THRESHOLD: f64 = 30.0;

/// Minimum vertical travel, in pixels, for a touch to count as a swipe.
pub const SWIPE_MIN_DISTANCE_PX: f64 = 30.0;

/// A touch held longer than this is not a swipe.
pub const SWIPE_MAX_DURATION_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Maps a wheel delta to a direction; positive deltas scroll forward.
#[must_use]
pub fn wheel_direction(delta_y: f64) -> Option<Direction> {
    if !delta_y.is_finite() || delta_y.abs() < WHEEL_THRESHOLD {
        return None;
    }
    Some(if delta_y > 0.0 {
        Direction::Next
    } else {
        Direction::Previous
    })
}

/// Maps a key name (DOM `KeyboardEvent.key` spelling) to a direction.
#[must_use]
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowDown" | "PageDown" => Some(Direction::Next),
        "ArrowUp" | "PageUp" => Some(Direction::Previous),
        _ => None,
    }
}

/// Tracks one touch from start to end and decides whether it was a swipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    start: Option<(f64, u64)>,
}

impl TouchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, y: f64, at_ms: u64) {
        self.start = Some((y, at_ms));
    }

    /// Finishes the touch. Returns a direction only for a fast, long enough
    /// vertical swipe; a finger moving up means [`Direction::Next`].
    pub fn end(&mut self, y: f64, at_ms: u64) -> Option<Direction> {
        let (start_y, started_at) = self.start.take()?;
        let delta = start_y - y;
        let elapsed = at_ms.saturating_sub(started_at);

        if delta.abs() <= SWIPE_MIN_DISTANCE_PX || elapsed >= SWIPE_MAX_DURATION_MS {
            return None;
        }
        Some(if delta > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        })
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// Raw input the host forwards to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InputEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Key { key: String },
    /// A tap on a position indicator.
    IndicatorTap { index: usize },
}
