//! Engine configuration - hard defaults overridable from the environment.

use std::path::PathBuf;

use snaphunt_domain::{TargetCounts, DEFAULT_CONFIDENCE_THRESHOLD};

const DEFAULT_CHALLENGE_MINUTES: u32 = 30;
const DEFAULT_DATA_DIR: &str = "./snaphunt-data";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Challenge duration in minutes
    pub challenge_minutes: u32,
    /// Objects drawn per difficulty tier when sampling a challenge
    pub target_counts: TargetCounts,
    /// Minimum classifier confidence for a label to count
    pub confidence_threshold: f32,
    /// Root directory for snapshots and image blobs
    pub data_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            challenge_minutes: DEFAULT_CHALLENGE_MINUTES,
            target_counts: TargetCounts::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `SNAPHUNT_*` environment variables. Unparsable
    /// values fall back to the default silently, matching how the rest of
    /// the engine treats configuration as best-effort.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            challenge_minutes: env_parse("SNAPHUNT_CHALLENGE_MINUTES")
                .unwrap_or(default.challenge_minutes),
            target_counts: TargetCounts::new(
                env_parse("SNAPHUNT_EASY_COUNT").unwrap_or(default.target_counts.easy),
                env_parse("SNAPHUNT_MEDIUM_COUNT").unwrap_or(default.target_counts.medium),
                env_parse("SNAPHUNT_HARD_COUNT").unwrap_or(default.target_counts.hard),
            ),
            confidence_threshold: env_parse("SNAPHUNT_CONFIDENCE_THRESHOLD")
                .unwrap_or(default.confidence_threshold),
            data_dir: std::env::var("SNAPHUNT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}
