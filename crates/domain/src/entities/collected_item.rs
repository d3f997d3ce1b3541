//! CollectedItem entity - one entry in the player's gallery of finds.
//!
//! Created exactly once per successful find and never deleted. The AI
//! description and quiz bonus are append-only enrichments layered on later;
//! they are not part of the core scoring contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChallengeId, CollectedItemId, ImageId};
use crate::GameObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedItem {
    id: CollectedItemId,
    object: GameObject,
    /// Blob-store handle for the capture photo; absent when image storage
    /// failed (the find still counts).
    image_id: Option<ImageId>,
    captured_at: DateTime<Utc>,
    challenge_id: ChallengeId,
    ai_description: Option<String>,
    quiz_bonus_points: Option<u32>,
}

impl CollectedItem {
    pub fn new(
        object: GameObject,
        image_id: Option<ImageId>,
        challenge_id: ChallengeId,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CollectedItemId::new(),
            object,
            image_id,
            captured_at,
            challenge_id,
            ai_description: None,
            quiz_bonus_points: None,
        }
    }

    pub fn id(&self) -> CollectedItemId {
        self.id
    }

    pub fn object(&self) -> &GameObject {
        &self.object
    }

    pub fn image_id(&self) -> Option<ImageId> {
        self.image_id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn challenge_id(&self) -> ChallengeId {
        self.challenge_id
    }

    pub fn ai_description(&self) -> Option<&str> {
        self.ai_description.as_deref()
    }

    pub fn quiz_bonus_points(&self) -> Option<u32> {
        self.quiz_bonus_points
    }

    /// Attach the generated description. Set-once; later calls are ignored.
    pub fn set_ai_description(&mut self, description: impl Into<String>) -> bool {
        if self.ai_description.is_some() {
            return false;
        }
        self.ai_description = Some(description.into());
        true
    }

    /// Record the quiz bonus earned for this item. Set-once so the bonus can
    /// be awarded to the session score exactly once.
    pub fn set_quiz_bonus(&mut self, points: u32) -> bool {
        if self.quiz_bonus_points.is_some() {
            return false;
        }
        self.quiz_bonus_points = Some(points);
        true
    }
}
