//! Domain Events
//!
//! Coarse-grained events representing significant state changes in the game.
//! The engine publishes these on its event bus; presentation layers subscribe
//! instead of observing engine state directly.

use serde::{Deserialize, Serialize};

use crate::{ChallengeId, ObjectId};

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameEvent {
    ChallengeStarted {
        challenge_id: ChallengeId,
        object_count: usize,
        duration_minutes: u32,
    },
    ObjectFound {
        challenge_id: ChallengeId,
        object_id: ObjectId,
        object_name: String,
        points: u32,
        progress: f64,
    },
    ChallengeCompleted {
        challenge_id: ChallengeId,
        total_score: u64,
    },
    ChallengeExpired {
        challenge_id: ChallengeId,
        found: usize,
        total: usize,
    },
    /// Finish or cancel; `completed` distinguishes messaging only.
    ChallengeEnded {
        challenge_id: ChallengeId,
        completed: bool,
    },
    SessionReset,
}
