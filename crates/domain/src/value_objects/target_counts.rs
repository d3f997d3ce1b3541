//! Requested sample sizes per difficulty tier.

use serde::{Deserialize, Serialize};

use crate::value_objects::Difficulty;

/// How many objects to draw from each tier when building a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl TargetCounts {
    pub fn new(easy: usize, medium: usize, hard: usize) -> Self {
        Self { easy, medium, hard }
    }

    /// Count requested for one tier.
    pub fn for_difficulty(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl Default for TargetCounts {
    fn default() -> Self {
        Self::new(3, 2, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let counts = TargetCounts::default();
        assert_eq!(counts.easy, 3);
        assert_eq!(counts.medium, 2);
        assert_eq!(counts.hard, 1);
        assert_eq!(counts.total(), 6);
    }
}
