//! Clock and random implementations.

use chrono::{DateTime, Duration, Utc};

use crate::application::ports::outbound::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn pick_index(&self, n: usize) -> usize {
        use rand::Rng;
        rand::thread_rng().gen_range(0..n)
    }
}

/// Manually advanced clock for tests: hand out a handle, travel time from
/// the test body while the engine keeps reading through the port.
#[derive(Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = to;
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Fixed random for tests - always picks the given index (clamped).
pub struct FixedRandom(pub usize);

impl RandomPort for FixedRandom {
    fn pick_index(&self, n: usize) -> usize {
        self.0.min(n.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let t0 = Utc::now();
        let clock = ManualClock::starting_at(t0);
        assert_eq!(clock.now(), t0);
        clock.advance(Duration::seconds(61));
        assert_eq!(clock.now(), t0 + Duration::seconds(61));
    }

    #[test]
    fn test_system_random_in_range() {
        let random = SystemRandom::new();
        for _ in 0..100 {
            assert!(random.pick_index(5) < 5);
        }
    }
}
