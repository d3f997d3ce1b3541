//! Value objects - immutable, identity-free domain values.

mod detection;
mod difficulty;
mod target_counts;

pub use detection::{DetectionSet, Label, DEFAULT_CONFIDENCE_THRESHOLD};
pub use difficulty::Difficulty;
pub use target_counts::TargetCounts;
