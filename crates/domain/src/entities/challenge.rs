//! Challenge entity - one timed round with a fixed target-object list.
//!
//! The challenge is the state machine at the heart of the game:
//! `Active -> {Completed, Expired}`, both terminal. All mutation goes
//! through `mark_found` and `check_expiration`; both are total and absorb
//! invalid calls as no-ops so the engine stays race-tolerant. Completion
//! takes precedence over expiry when both conditions hold in the same
//! consistent snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ChallengeId, ObjectId};
use crate::value_objects::DetectionSet;
use crate::GameObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    id: ChallengeId,
    /// Fixed at creation; no duplicates by id. Capture evaluation walks this
    /// list in order, so it also fixes the deterministic credit order.
    objects_to_find: Vec<GameObject>,
    /// Grows by insertion order; always a subset of `objects_to_find`.
    found_objects: Vec<GameObject>,
    start_time: DateTime<Utc>,
    duration_minutes: u32,
    is_completed: bool,
    is_expired: bool,
}

impl Challenge {
    /// Create a fresh active challenge starting now.
    ///
    /// Duplicate target ids are dropped, keeping the first occurrence.
    pub fn new(
        objects_to_find: Vec<GameObject>,
        duration_minutes: u32,
        start_time: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if objects_to_find.is_empty() {
            return Err(DomainError::invalid_config(
                "challenge requires at least one target object",
            ));
        }
        if duration_minutes == 0 {
            return Err(DomainError::invalid_config(
                "challenge duration must be positive",
            ));
        }

        let mut seen: Vec<ObjectId> = Vec::with_capacity(objects_to_find.len());
        let mut targets = Vec::with_capacity(objects_to_find.len());
        for object in objects_to_find {
            if !seen.contains(&object.id()) {
                seen.push(object.id());
                targets.push(object);
            }
        }

        Ok(Self {
            id: ChallengeId::new(),
            objects_to_find: targets,
            found_objects: Vec::new(),
            start_time,
            duration_minutes,
            is_completed: false,
            is_expired: false,
        })
    }

    // === Accessors ===

    pub fn id(&self) -> ChallengeId {
        self.id
    }

    pub fn objects_to_find(&self) -> &[GameObject] {
        &self.objects_to_find
    }

    pub fn found_objects(&self) -> &[GameObject] {
        &self.found_objects
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired
    }

    /// Completed or expired - no further transitions permitted.
    pub fn is_terminal(&self) -> bool {
        self.is_completed || self.is_expired
    }

    // === Derived state ===

    /// Wall-clock time left, clamped at zero.
    pub fn remaining_time(&self, now: DateTime<Utc>) -> Duration {
        let total = Duration::minutes(i64::from(self.duration_minutes));
        let elapsed = now - self.start_time;
        (total - elapsed).max(Duration::zero())
    }

    /// Fraction of targets found, in [0, 1]. Monotone over the challenge
    /// lifetime since found objects are never removed.
    pub fn progress(&self) -> f64 {
        if self.objects_to_find.is_empty() {
            return 0.0;
        }
        self.found_objects.len() as f64 / self.objects_to_find.len() as f64
    }

    pub fn is_object_found(&self, id: ObjectId) -> bool {
        self.found_objects.iter().any(|o| o.id() == id)
    }

    /// Targets not yet found, in `objects_to_find` order.
    pub fn pending_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects_to_find
            .iter()
            .filter(|o| !self.is_object_found(o.id()))
    }

    /// First target not yet found that the detections match, walking
    /// `objects_to_find` in order. At most one object is credited per
    /// capture, so one photo can never complete the whole challenge.
    ///
    /// Pure; returns None on terminal challenges.
    pub fn first_pending_match(
        &self,
        detections: &DetectionSet,
        threshold: f32,
    ) -> Option<&GameObject> {
        if self.is_terminal() {
            return None;
        }
        self.pending_objects()
            .find(|o| detections.matches(o.name(), threshold))
    }

    // === Transitions ===

    /// Mark a target object as found. Returns true only when the object was
    /// newly credited.
    ///
    /// Idempotent: re-marking an already-found object is a no-op. Objects
    /// outside the target list and any call after a terminal flag is set are
    /// absorbed silently - keeping this total is what makes concurrent
    /// tick/capture races safe to apply in arrival order.
    pub fn mark_found(&mut self, object: &GameObject) -> bool {
        if self.is_terminal() {
            return false;
        }
        if self.is_object_found(object.id()) {
            return false;
        }
        if !self.objects_to_find.iter().any(|o| o.id() == object.id()) {
            return false;
        }

        self.found_objects.push(object.clone());

        if self.found_objects.len() == self.objects_to_find.len() {
            self.is_completed = true;
        }
        true
    }

    /// Expire the challenge if its deadline has passed. Returns true only on
    /// the Active -> Expired transition.
    ///
    /// Never flips a completed challenge: a capture that finishes the last
    /// object at the deadline wins over the expiry check in the same snapshot.
    pub fn check_expiration(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_terminal() {
            return false;
        }
        if self.remaining_time(now) <= Duration::zero() {
            self.is_expired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Difficulty;

    fn easy(name: &str) -> GameObject {
        GameObject::new(name, "Road", Difficulty::Easy)
    }

    fn start() -> DateTime<Utc> {
        Utc::now()
    }

    fn three_object_challenge(t0: DateTime<Utc>) -> Challenge {
        Challenge::new(
            vec![easy("Traffic Cone"), easy("Traffic Light"), easy("Stop Sign")],
            1,
            t0,
        )
        .expect("valid challenge")
    }

    #[test]
    fn test_new_rejects_empty_targets() {
        let err = Challenge::new(vec![], 30, start()).expect_err("must fail");
        assert!(matches!(err, DomainError::InvalidChallengeConfig(_)));
    }

    #[test]
    fn test_new_rejects_zero_duration() {
        let err = Challenge::new(vec![easy("Cow")], 0, start()).expect_err("must fail");
        assert!(matches!(err, DomainError::InvalidChallengeConfig(_)));
    }

    #[test]
    fn test_new_deduplicates_targets_by_id() {
        let cone = easy("Traffic Cone");
        let challenge =
            Challenge::new(vec![cone.clone(), cone.clone(), easy("Stop Sign")], 30, start())
                .expect("valid challenge");
        assert_eq!(challenge.objects_to_find().len(), 2);
    }

    #[test]
    fn test_mark_found_is_idempotent() {
        let t0 = start();
        let mut challenge = three_object_challenge(t0);
        let cone = challenge.objects_to_find()[0].clone();

        assert!(challenge.mark_found(&cone));
        assert!(!challenge.mark_found(&cone));
        assert_eq!(challenge.found_objects().len(), 1);
    }

    #[test]
    fn test_mark_found_rejects_non_target() {
        let mut challenge = three_object_challenge(start());
        let stranger = easy("Fire Hydrant");
        assert!(!challenge.mark_found(&stranger));
        assert!(challenge.found_objects().is_empty());
    }

    #[test]
    fn test_completion_when_all_found() {
        let mut challenge = three_object_challenge(start());
        for object in challenge.objects_to_find().to_vec() {
            assert!(!challenge.is_completed());
            challenge.mark_found(&object);
        }
        assert!(challenge.is_completed());
        assert!(!challenge.is_expired());
        assert_eq!(challenge.progress(), 1.0);
    }

    // Scenario A: expiry with targets still pending.
    #[test]
    fn test_expires_when_deadline_passes() {
        let t0 = start();
        let mut challenge = three_object_challenge(t0);
        let first = challenge.objects_to_find()[0].clone();
        let second = challenge.objects_to_find()[1].clone();

        assert!(challenge.mark_found(&first));
        assert!(challenge.mark_found(&second));

        // Not expired at t=30s
        assert!(!challenge.check_expiration(t0 + Duration::seconds(30)));
        // Expired at t=61s with one object pending
        assert!(challenge.check_expiration(t0 + Duration::seconds(61)));
        assert!(challenge.is_expired());
        assert!(!challenge.is_completed());
    }

    // Scenario B: completion before the deadline; later expiry check is a no-op.
    #[test]
    fn test_completed_challenge_never_expires() {
        let t0 = start();
        let mut challenge = three_object_challenge(t0);
        for object in challenge.objects_to_find().to_vec() {
            challenge.mark_found(&object);
        }
        assert!(challenge.is_completed());

        assert!(!challenge.check_expiration(t0 + Duration::seconds(61)));
        assert!(!challenge.is_expired());
    }

    // Completion precedence: last find lands exactly at the deadline.
    #[test]
    fn test_completion_wins_tie_at_deadline() {
        let t0 = start();
        let mut challenge = Challenge::new(vec![easy("Stop Sign")], 1, t0).expect("valid");
        let target = challenge.objects_to_find()[0].clone();

        // Find is applied first in the single consistent snapshot
        assert!(challenge.mark_found(&target));
        assert!(!challenge.check_expiration(t0 + Duration::seconds(60)));

        assert!(challenge.is_completed());
        assert!(!challenge.is_expired());
    }

    #[test]
    fn test_no_mutation_after_expiry() {
        let t0 = start();
        let mut challenge = three_object_challenge(t0);
        let target = challenge.objects_to_find()[0].clone();

        assert!(challenge.check_expiration(t0 + Duration::minutes(2)));
        assert!(!challenge.mark_found(&target));
        assert!(challenge.found_objects().is_empty());
        assert!(!challenge.check_expiration(t0 + Duration::minutes(3)));
    }

    #[test]
    fn test_remaining_time_clamps_at_zero() {
        let t0 = start();
        let challenge = three_object_challenge(t0);
        assert_eq!(
            challenge.remaining_time(t0 + Duration::seconds(30)),
            Duration::seconds(30)
        );
        assert_eq!(
            challenge.remaining_time(t0 + Duration::minutes(5)),
            Duration::zero()
        );
    }

    #[test]
    fn test_progress_is_monotone() {
        let mut challenge = three_object_challenge(start());
        let mut last = challenge.progress();
        for object in challenge.objects_to_find().to_vec() {
            challenge.mark_found(&object);
            let progress = challenge.progress();
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    // Scenario C: detections matching two pending targets credit only the
    // first in objects_to_find order.
    #[test]
    fn test_first_pending_match_picks_one_in_target_order() {
        use crate::value_objects::Label;

        let mut challenge = three_object_challenge(start());
        let detections: DetectionSet = [
            Label::new("stop sign", 0.9),
            Label::new("traffic light", 0.8),
        ]
        .into_iter()
        .collect();

        let matched = challenge
            .first_pending_match(&detections, 0.5)
            .cloned()
            .expect("one match");
        assert_eq!(matched.name(), "Traffic Light");

        challenge.mark_found(&matched);
        let next = challenge
            .first_pending_match(&detections, 0.5)
            .cloned()
            .expect("next match");
        assert_eq!(next.name(), "Stop Sign");
    }

    #[test]
    fn test_first_pending_match_none_on_terminal() {
        use crate::value_objects::Label;

        let t0 = start();
        let mut challenge = three_object_challenge(t0);
        challenge.check_expiration(t0 + Duration::minutes(2));

        let detections: DetectionSet = [Label::new("traffic cone", 0.9)].into_iter().collect();
        assert!(challenge.first_pending_match(&detections, 0.5).is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut challenge = three_object_challenge(start());
        let first = challenge.objects_to_find()[0].clone();
        challenge.mark_found(&first);

        let json = serde_json::to_string(&challenge).expect("serialize");
        let back: Challenge = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, challenge);
    }
}
