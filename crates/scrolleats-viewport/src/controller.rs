use serde::Serialize;

use crate::gesture::{direction_for_key, wheel_direction, Direction, InputEvent, TouchTracker};

/// Minimum time between two accepted moves.
pub const ACCEPT_INTERVAL_MS: u64 = 150;

/// How long a committed move blocks further moves while it settles.
pub const SETTLE_DELAY_MS: u64 = 200;

/// Called with the new cursor after every accepted move.
pub type IndexObserver = Box<dyn FnMut(usize) + Send>;

/// Snapshot of the controller for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    pub cursor: usize,
    pub item_count: usize,
    pub is_transitioning: bool,
}

/// A one-item-at-a-time viewport over a list.
///
/// The controller holds no timers. Adapters pass the current time in
/// milliseconds with every call; the settle gate is lifted once `now_ms`
/// reaches the deadline, or explicitly via [`ScrollController::tick`].
///
/// A move is accepted only if
/// - the controller is not settling from the previous move,
/// - at least [`ACCEPT_INTERVAL_MS`] passed since the previous accepted move,
/// - the target index lies inside the list (no wrap-around).
///
/// Rejected moves are dropped, not queued.
pub struct ScrollController<T> {
    items: Vec<T>,
    cursor: usize,
    settle_deadline_ms: Option<u64>,
    last_accepted_at: Option<u64>,
    touch: TouchTracker,
    observer: Option<IndexObserver>,
    disposed: bool,
}

impl<T> ScrollController<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: 0,
            settle_deadline_ms: None,
            last_accepted_at: None,
            touch: TouchTracker::new(),
            observer: None,
            disposed: false,
        }
    }

    /// Registers the index-changed callback, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(usize) + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(usize) + Send + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The item under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    pub fn is_transitioning(&self, now_ms: u64) -> bool {
        self.settle_deadline_ms.is_some_and(|deadline| now_ms < deadline)
    }

    pub fn state(&self, now_ms: u64) -> ScrollState {
        ScrollState {
            cursor: self.cursor,
            item_count: self.items.len(),
            is_transitioning: self.is_transitioning(now_ms),
        }
    }

    /// Clears an elapsed settle deadline. Returns `true` if this call ended
    /// a transition.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.settle_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.settle_deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Moves one step in `direction`. Returns the new cursor if the move was
    /// accepted.
    pub fn request_move(&mut self, direction: Direction, now_ms: u64) -> Option<usize> {
        let target = match direction {
            Direction::Next => self.cursor.checked_add(1)?,
            Direction::Previous => self.cursor.checked_sub(1)?,
        };
        self.commit(target, now_ms)
    }

    /// Moves straight to `index`. Returns the new cursor if accepted.
    pub fn jump_to(&mut self, index: usize, now_ms: u64) -> Option<usize> {
        self.commit(index, now_ms)
    }

    /// Routes raw input through gesture interpretation.
    pub fn handle(&mut self, event: &InputEvent, now_ms: u64) -> Option<usize> {
        match event {
            InputEvent::Wheel { delta_y } => {
                let direction = wheel_direction(*delta_y)?;
                self.request_move(direction, now_ms)
            }
            InputEvent::TouchStart { y } => {
                self.touch.begin(*y, now_ms);
                None
            }
            InputEvent::TouchEnd { y } => {
                let direction = self.touch.end(*y, now_ms)?;
                self.request_move(direction, now_ms)
            }
            InputEvent::Key { key } => {
                let direction = direction_for_key(key)?;
                self.request_move(direction, now_ms)
            }
            InputEvent::IndicatorTap { index } => self.jump_to(*index, now_ms),
        }
    }

    /// Swaps in a new list and puts the cursor back at the start.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor = 0;
        self.settle_deadline_ms = None;
    }

    /// Appends more items without moving the cursor.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Whether the cursor is within `threshold` items of the last one.
    pub fn near_end(&self, threshold: usize) -> bool {
        !self.items.is_empty() && self.cursor.saturating_add(threshold) >= self.items.len() - 1
    }

    /// One flag per item, `true` for the current position.
    pub fn indicators(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.items.len()).map(move |i| i == self.cursor)
    }

    /// Drops the observer and any pending settle deadline; later input is
    /// ignored.
    pub fn dispose(&mut self) {
        self.observer = None;
        self.settle_deadline_ms = None;
        self.disposed = true;
    }

    fn commit(&mut self, target: usize, now_ms: u64) -> Option<usize> {
        if self.disposed || target >= self.items.len() {
            return None;
        }
        if self.is_transitioning(now_ms) {
            tracing::trace!(index = target, "move dropped: settling");
            return None;
        }
        if let Some(last) = self.last_accepted_at {
            if now_ms.saturating_sub(last) < ACCEPT_INTERVAL_MS {
                tracing::trace!(index = target, "move dropped: throttled");
                return None;
            }
        }

        self.cursor = target;
        self.last_accepted_at = Some(now_ms);
        if let Some(observer) = self.observer.as_mut() {
            observer(target);
        }
        self.settle_deadline_ms = Some(now_ms + SETTLE_DELAY_MS);
        Some(target)
    }
}

impl<T> std::fmt::Debug for ScrollController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollController")
            .field("len", &self.items.len())
            .field("cursor", &self.cursor)
            .field("settle_deadline_ms", &self.settle_deadline_ms)
            .field("last_accepted_at", &self.last_accepted_at)
            .field("has_observer", &self.observer.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn controller(len: usize) -> (ScrollController<usize>, Arc<Mutex<Vec<usize>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let c = ScrollController::new((0..len).collect())
            .with_observer(move |i| sink.lock().expect("lock").push(i));
        (c, seen)
    }

    #[test]
    fn next_then_previous() {
        let (mut c, seen) = controller(3);
        assert_eq!(c.request_move(Direction::Next, 1_000), Some(1));
        assert_eq!(c.request_move(Direction::Previous, 1_300), Some(0));
        assert_eq!(*seen.lock().expect("lock"), vec![1, 0]);
    }

    #[test]
    fn second_move_inside_settle_window_is_dropped() {
        let (mut c, seen) = controller(10);
        assert_eq!(c.request_move(Direction::Next, 1_000), Some(1));
        assert!(c.is_transitioning(1_100));
        assert_eq!(c.request_move(Direction::Next, 1_199), None);
        assert_eq!(c.cursor(), 1);
        assert_eq!(c.request_move(Direction::Next, 1_200), Some(2));
        assert_eq!(seen.lock().expect("lock").len(), 2);
    }

    #[test]
    fn throttle_applies_even_after_settle_is_cleared() {
        let (mut c, _) = controller(10);
        c.request_move(Direction::Next, 1_000);
        // Force-clear the settle gate; the 150ms throttle still holds.
        c.settle_deadline_ms = None;
        assert_eq!(c.request_move(Direction::Next, 1_100), None);
        assert_eq!(c.request_move(Direction::Next, 1_150), Some(2));
    }

    #[test]
    fn fast_wheel_spin_advances_one_step_per_window() {
        let (mut c, _) = controller(100);
        let mut now = 0;
        while now < 1_000 {
            c.handle(&InputEvent::Wheel { delta_y: 120.0 }, now);
            now += 10;
        }
        // Accepted at 0, 200, 400, 600, 800.
        assert_eq!(c.cursor(), 5);
    }

    #[test]
    fn moves_clamp_at_both_ends() {
        let (mut c, seen) = controller(2);
        assert_eq!(c.request_move(Direction::Previous, 0), None);
        assert_eq!(c.request_move(Direction::Next, 1_000), Some(1));
        assert_eq!(c.request_move(Direction::Next, 2_000), None);
        assert_eq!(c.cursor(), 1);
        assert_eq!(*seen.lock().expect("lock"), vec![1]);
    }

    #[test]
    fn rejected_boundary_move_does_not_arm_gates() {
        let (mut c, _) = controller(3);
        assert_eq!(c.request_move(Direction::Previous, 1_000), None);
        assert!(!c.is_transitioning(1_000));
        assert_eq!(c.request_move(Direction::Next, 1_001), Some(1));
    }

    #[test]
    fn jump_to_respects_bounds_and_gates() {
        let (mut c, seen) = controller(5);
        assert_eq!(c.jump_to(5, 0), None);
        assert_eq!(c.jump_to(3, 0), Some(3));
        assert_eq!(c.jump_to(1, 50), None);
        assert_eq!(c.handle(&InputEvent::IndicatorTap { index: 4 }, 500), Some(4));
        assert_eq!(*seen.lock().expect("lock"), vec![3, 4]);
    }

    #[test]
    fn empty_list_ignores_everything() {
        let (mut c, seen) = controller(0);
        assert_eq!(c.request_move(Direction::Next, 0), None);
        assert_eq!(c.jump_to(0, 0), None);
        assert!(c.current().is_none());
        assert!(!c.near_end(1));
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn touch_swipe_drives_moves() {
        let (mut c, _) = controller(3);
        c.handle(&InputEvent::TouchStart { y: 600.0 }, 0);
        assert_eq!(c.handle(&InputEvent::TouchEnd { y: 400.0 }, 200), Some(1));

        c.handle(&InputEvent::TouchStart { y: 400.0 }, 1_000);
        assert_eq!(c.handle(&InputEvent::TouchEnd { y: 410.0 }, 1_100), None);
    }

    #[test]
    fn keys_drive_moves() {
        let (mut c, _) = controller(3);
        let key = |k: &str| InputEvent::Key { key: k.to_owned() };
        assert_eq!(c.handle(&key("PageDown"), 0), Some(1));
        assert_eq!(c.handle(&key("Enter"), 1_000), None);
        assert_eq!(c.handle(&key("ArrowUp"), 1_000), Some(0));
    }

    #[test]
    fn replace_items_resets_cursor() {
        let (mut c, _) = controller(5);
        c.jump_to(4, 0);
        c.replace_items(vec![10, 11]);
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.current(), Some(&10));
        assert!(!c.is_transitioning(1));
    }

    #[test]
    fn append_keeps_cursor_and_near_end_tracks_tail() {
        let (mut c, _) = controller(3);
        c.jump_to(2, 0);
        assert!(c.near_end(0));
        c.append_items([3, 4, 5]);
        assert_eq!(c.cursor(), 2);
        assert!(!c.near_end(2));
        assert!(c.near_end(3));
    }

    #[test]
    fn near_end_saturates_huge_threshold() {
        let (mut c, _) = controller(5);
        c.jump_to(2, 0);
        assert!(c.near_end(usize::MAX));
        assert!(c.near_end(usize::MAX - 1));
    }

    #[test]
    fn tick_reports_settle() {
        let (mut c, _) = controller(3);
        c.request_move(Direction::Next, 0);
        assert!(!c.tick(199));
        assert!(c.state(199).is_transitioning);
        assert!(c.tick(200));
        assert_eq!(
            c.state(200),
            ScrollState {
                cursor: 1,
                item_count: 3,
                is_transitioning: false
            }
        );
    }

    #[test]
    fn indicators_mark_current() {
        let (mut c, _) = controller(3);
        c.jump_to(1, 0);
        assert_eq!(c.indicators().collect::<Vec<_>>(), vec![false, true, false]);
    }

    #[test]
    fn dispose_silences_controller() {
        let (mut c, seen) = controller(3);
        c.dispose();
        assert_eq!(c.request_move(Direction::Next, 0), None);
        assert!(seen.lock().expect("lock").is_empty());
        assert!(format!("{c:?}").contains("disposed: true"));
    }
}
