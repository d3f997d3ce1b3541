//! Game session aggregate - the single owned composite of challenge, gallery,
//! and running totals.
//!
//! Everything that must stay mutually consistent (found objects, collected
//! items, total score) mutates through this aggregate in one call, so any
//! snapshot taken between calls is a valid point-in-time view. The engine
//! actor owns exactly one `GameSession`; there is no shared-memory access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectedItemId, ImageId};
use crate::{Challenge, CollectedItem, GameObject};

/// Cross-challenge running totals. Monotone except for `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    total_score: u64,
    completed_challenges: u32,
}

impl SessionStats {
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn completed_challenges(&self) -> u32 {
        self.completed_challenges
    }

    pub fn award(&mut self, points: u32) {
        self.total_score += u64::from(points);
    }

    pub fn record_finished(&mut self) {
        self.completed_challenges += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether a challenge is currently running.
///
/// A tagged variant instead of a bare `Option` so call sites match
/// exhaustively rather than sprinkling nil-checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "challenge")]
pub enum SessionState {
    #[default]
    Idle,
    Active(Challenge),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn as_active(&self) -> Option<&Challenge> {
        match self {
            Self::Idle => None,
            Self::Active(challenge) => Some(challenge),
        }
    }

    pub fn as_active_mut(&mut self) -> Option<&mut Challenge> {
        match self {
            Self::Idle => None,
            Self::Active(challenge) => Some(challenge),
        }
    }

    /// Dispose of the current challenge, leaving the session idle.
    pub fn take(&mut self) -> Option<Challenge> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Active(challenge) => Some(challenge),
        }
    }
}

/// Outcome of crediting a find against the session.
#[derive(Debug, Clone, PartialEq)]
pub struct FindCredit {
    pub item_id: CollectedItemId,
    pub points: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    state: SessionState,
    items: Vec<CollectedItem>,
    stats: SessionStats,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn items(&self) -> &[CollectedItem] {
        &self.items
    }

    pub fn item(&self, id: CollectedItemId) -> Option<&CollectedItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Begin a new challenge, replacing any prior one outright. The replaced
    /// challenge is returned so the caller can log it; its finds and score
    /// already awarded are kept, but it no longer counts as finished.
    pub fn start_challenge(&mut self, challenge: Challenge) -> Option<Challenge> {
        let previous = self.state.take();
        self.state = SessionState::Active(challenge);
        previous
    }

    /// Credit a found object: mark it on the challenge, append a gallery
    /// item, and award points - all or nothing, exactly once per object.
    ///
    /// Returns None when there is no active challenge, the challenge is
    /// terminal, the object is not a pending target, or it was already found.
    pub fn credit_find(
        &mut self,
        object: &GameObject,
        image_id: Option<ImageId>,
        now: DateTime<Utc>,
    ) -> Option<FindCredit> {
        let challenge = self.state.as_active_mut()?;
        if !challenge.mark_found(object) {
            return None;
        }

        let completed = challenge.is_completed();
        let challenge_id = challenge.id();
        let item = CollectedItem::new(object.clone(), image_id, challenge_id, now);
        let item_id = item.id();
        self.items.push(item);

        let points = object.points();
        self.stats.award(points);

        Some(FindCredit {
            item_id,
            points,
            completed,
        })
    }

    /// Run the expiry check against the active challenge. Returns true only
    /// on the Active -> Expired transition.
    pub fn check_expiration(&mut self, now: DateTime<Utc>) -> bool {
        match self.state.as_active_mut() {
            Some(challenge) => challenge.check_expiration(now),
            None => false,
        }
    }

    /// Dispose of the current challenge and count it as finished - both
    /// completed and expired outcomes count (observed product behavior).
    pub fn finish_challenge(&mut self) -> Option<Challenge> {
        let challenge = self.state.take()?;
        self.stats.record_finished();
        Some(challenge)
    }

    /// Dispose of the current challenge without counting it.
    pub fn cancel_challenge(&mut self) -> Option<Challenge> {
        self.state.take()
    }

    /// Attach an AI description to a collected item. Set-once.
    pub fn describe_item(&mut self, id: CollectedItemId, description: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => item.set_ai_description(description),
            None => false,
        }
    }

    /// Record a quiz bonus on a collected item and award it to the total
    /// score. The set-once item field guarantees the award happens once.
    pub fn add_quiz_bonus(&mut self, id: CollectedItemId, points: u32) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id() == id) else {
            return false;
        };
        if !item.set_quiz_bonus(points) {
            return false;
        }
        self.stats.award(points);
        true
    }

    /// Full, irreversible wipe: challenge, gallery, and totals.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.items.clear();
        self.stats.reset();
    }

    /// Immutable point-in-time copy for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            challenge: self.state.as_active().cloned(),
            items: self.items.clone(),
            total_score: self.stats.total_score,
            completed_challenges: self.stats.completed_challenges,
        }
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            state: match snapshot.challenge {
                Some(challenge) => SessionState::Active(challenge),
                None => SessionState::Idle,
            },
            items: snapshot.items,
            stats: SessionStats {
                total_score: snapshot.total_score,
                completed_challenges: snapshot.completed_challenges,
            },
        }
    }
}

/// A complete, consistent copy of persisted game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub challenge: Option<Challenge>,
    pub items: Vec<CollectedItem>,
    pub total_score: u64,
    pub completed_challenges: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Difficulty;

    fn object(name: &str, difficulty: Difficulty) -> GameObject {
        GameObject::new(name, "Road", difficulty)
    }

    fn session_with(objects: Vec<GameObject>, minutes: u32) -> GameSession {
        let mut session = GameSession::new();
        let challenge = Challenge::new(objects, minutes, Utc::now()).expect("valid challenge");
        session.start_challenge(challenge);
        session
    }

    #[test]
    fn test_credit_find_awards_exactly_once() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let sign = object("Stop Sign", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone(), sign], 30);

        let credit = session
            .credit_find(&cone, None, Utc::now())
            .expect("credited");
        assert_eq!(credit.points, 10);
        assert!(!credit.completed);
        assert_eq!(session.stats().total_score(), 10);
        assert_eq!(session.items().len(), 1);

        // Second capture of the same object changes nothing
        assert!(session.credit_find(&cone, None, Utc::now()).is_none());
        assert_eq!(session.stats().total_score(), 10);
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn test_credit_find_sets_completed_on_last_object() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone()], 30);

        let credit = session
            .credit_find(&cone, None, Utc::now())
            .expect("credited");
        assert!(credit.completed);
        assert!(session
            .state()
            .as_active()
            .expect("still current until finished")
            .is_completed());
    }

    #[test]
    fn test_credit_find_requires_active_challenge() {
        let mut session = GameSession::new();
        let cow = object("Cow", Difficulty::Medium);
        assert!(session.credit_find(&cow, None, Utc::now()).is_none());
        assert_eq!(session.stats().total_score(), 0);
    }

    #[test]
    fn test_start_replaces_prior_challenge() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone], 30);
        let first_id = session.state().as_active().expect("active").id();

        let next = Challenge::new(
            vec![object("Church", Difficulty::Hard)],
            30,
            Utc::now(),
        )
        .expect("valid challenge");
        let replaced = session.start_challenge(next).expect("previous returned");

        assert_eq!(replaced.id(), first_id);
        assert_ne!(session.state().as_active().expect("active").id(), first_id);
        // Replacement is not a finish
        assert_eq!(session.stats().completed_challenges(), 0);
    }

    #[test]
    fn test_finish_counts_expired_and_completed_alike() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone()], 1);

        // Expired outcome
        let t0 = session.state().as_active().expect("active").start_time();
        session.check_expiration(t0 + chrono::Duration::minutes(2));
        session.finish_challenge().expect("finished");
        assert_eq!(session.stats().completed_challenges(), 1);

        // Completed outcome
        let challenge =
            Challenge::new(vec![cone.clone()], 30, Utc::now()).expect("valid challenge");
        session.start_challenge(challenge);
        session.credit_find(&cone, None, Utc::now()).expect("credited");
        session.finish_challenge().expect("finished");
        assert_eq!(session.stats().completed_challenges(), 2);
    }

    #[test]
    fn test_cancel_does_not_count() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone], 30);
        session.cancel_challenge().expect("cancelled");
        assert_eq!(session.stats().completed_challenges(), 0);
        assert!(!session.state().is_active());
    }

    #[test]
    fn test_quiz_bonus_awarded_once() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone()], 30);
        let credit = session
            .credit_find(&cone, None, Utc::now())
            .expect("credited");

        assert!(session.add_quiz_bonus(credit.item_id, 15));
        assert!(!session.add_quiz_bonus(credit.item_id, 15));
        assert_eq!(session.stats().total_score(), 25);
    }

    #[test]
    fn test_reset_wipes_everything() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone()], 30);
        session.credit_find(&cone, None, Utc::now()).expect("credited");
        session.finish_challenge().expect("finished");

        session.reset();
        assert!(!session.state().is_active());
        assert!(session.items().is_empty());
        assert_eq!(session.stats(), SessionStats::default());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let cone = object("Traffic Cone", Difficulty::Easy);
        let sign = object("Stop Sign", Difficulty::Easy);
        let mut session = session_with(vec![cone.clone(), sign], 30);
        session
            .credit_find(&cone, Some(crate::ImageId::new()), Utc::now())
            .expect("credited");

        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let decoded: SessionSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, snapshot);

        let restored = GameSession::from_snapshot(decoded);
        assert_eq!(restored, session);
    }

    #[test]
    fn test_empty_snapshot_roundtrip() {
        let snapshot = GameSession::new().snapshot();
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let decoded: SessionSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, snapshot);
        assert!(decoded.challenge.is_none());
    }
}
