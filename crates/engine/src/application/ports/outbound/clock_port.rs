//! Clock and randomness ports - injected so expiry math and sampling are
//! deterministic under test.

use chrono::{DateTime, Utc};

/// Port for reading wall-clock time.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Port for randomness.
pub trait RandomPort: Send + Sync {
    /// Uniform index in `0..n`. `n` must be non-zero.
    fn pick_index(&self, n: usize) -> usize;
}
