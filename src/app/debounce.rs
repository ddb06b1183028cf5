//! Deadline-based debouncing for the search input.
//!
//! Zellij timers cannot be cancelled, so the debouncer never relies on a timer being
//! the "right" one. Each call moves the deadline forward and asks the caller to
//! schedule a fresh timer; when any timer fires, [`Debouncer::poll`] releases the
//! pending value only if the current deadline has passed. Timers from superseded calls
//! find the deadline still in the future and release nothing.

use std::time::{Duration, Instant};

/// Extra delay added to scheduled timers so they never fire a hair before the deadline.
pub const TIMER_SLACK: Duration = Duration::from_millis(20);

/// Holds the most recent value until it has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period from `now`.
    ///
    /// Returns how long the caller should wait before calling [`Self::poll`].
    pub fn call(&mut self, value: T, now: Instant) -> Duration {
        self.pending = Some((value, now + self.delay));
        self.delay + TIMER_SLACK
    }

    /// Takes the pending value if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn rapid_calls_release_only_the_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let mut released = Vec::new();
        let mut timers = Vec::new();

        for (i, term) in ["a", "ar", "arr", "arro", "arroz"].into_iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            let wait = debouncer.call(term, now);
            timers.push(now + wait);
        }

        for fired_at in timers {
            released.extend(debouncer.poll(fired_at));
        }

        assert_eq!(released, vec!["arroz"]);
        assert_eq!(debouncer.poll(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn value_is_held_until_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.call(1, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(499)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some(1));
        assert_eq!(debouncer.poll(start + DELAY), None);
    }

    #[test]
    fn calls_in_separate_windows_each_release() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        let first_wait = debouncer.call("x", start);
        let first = debouncer.poll(start + first_wait);
        let later = start + Duration::from_secs(2);
        let second_wait = debouncer.call("y", later);
        let second = debouncer.poll(later + second_wait);

        assert_eq!((first, second), (Some("x"), Some("y")));
    }
}
