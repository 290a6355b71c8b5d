// Debounce and throttle helpers for poll-driven event loops.

use std::time::{Duration, Instant};

/// Emits the latest value once input has been quiet for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if it has been quiet long enough.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if !ready {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Admits at most one event per `limit` window.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    pub fn allow(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_emits_last_of_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(400));

        debouncer.push("o", start);
        debouncer.push("oc", start + Duration::from_millis(100));
        debouncer.push("oct", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), Some("oct"));
        // Emitted once
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.push(1, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_throttle_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_secs(2));

        assert!(throttle.allow(start));
        assert!(!throttle.allow(start + Duration::from_millis(500)));
        assert!(!throttle.allow(start + Duration::from_millis(1999)));
        assert!(throttle.allow(start + Duration::from_secs(2)));
    }
}
