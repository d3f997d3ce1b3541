//! Difficulty tiers and their fixed point values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How hard an object is to spot. Closed enumeration; every catalog object
/// carries exactly one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded for finding an object of this tier.
    ///
    /// Total, fixed mapping - scoring must never depend on anything else.
    pub fn points(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 25,
            Self::Hard => 50,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// All tiers, in ascending order.
    pub fn all() -> [Difficulty; 3] {
        [Self::Easy, Self::Medium, Self::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::validation(format!(
                "Unknown difficulty: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_mapping_is_fixed() {
        assert_eq!(Difficulty::Easy.points(), 10);
        assert_eq!(Difficulty::Medium.points(), 25);
        assert_eq!(Difficulty::Hard.points(), 50);
    }

    #[test]
    fn test_parse_roundtrip() {
        for tier in Difficulty::all() {
            let parsed: Difficulty = tier.to_string().parse().expect("parse");
            assert_eq!(parsed, tier);
        }
        assert!("legendary".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).expect("serialize");
        assert_eq!(json, "\"medium\"");
    }
}
