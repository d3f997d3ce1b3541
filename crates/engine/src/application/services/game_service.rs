//! Game service - the single-writer actor owning the challenge state machine.
//!
//! Two asynchronous producers race to mutate the same session: the 1 Hz
//! expiry tick and capture evaluations coming back from the (slow)
//! classifier. Instead of sharing the session behind a lock, one actor task
//! owns it exclusively and both producers send commands over an mpsc
//! channel. Commands are applied in arrival order against current state, so
//! no mutation is ever based on a stale read and the completed-vs-expired
//! race resolves deterministically.
//!
//! Detection runs in the caller's task, never inside the actor, so inference
//! latency cannot stall ticks. A capture result carries the challenge id it
//! was submitted against and is re-validated on arrival; results for a
//! finished, cancelled, or replaced challenge are discarded harmlessly.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use snaphunt_domain::{
    Challenge, ChallengeId, CollectedItemId, DetectionSet, DomainError, GameEvent, GameObject,
    GameSession, SessionSnapshot,
};

use crate::application::ports::outbound::{
    BlobStorePort, ClockPort, DetectionPort, EventBusPort, ImageBuffer, SnapshotStorePort,
};
use crate::error::EngineError;

const COMMAND_BUFFER: usize = 64;

/// What a single capture produced, as seen by the camera layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// No challenge is running
    NoChallenge,
    /// The challenge this capture was taken for is no longer current
    /// (cancelled, finished, or replaced while detection was in flight)
    Stale,
    /// The challenge reached a terminal state before the result arrived
    ChallengeOver { expired: bool },
    /// Detections did not match any pending target
    NotFound { detections: DetectionSet },
    /// Exactly one object credited
    Found {
        object: GameObject,
        item_id: CollectedItemId,
        points: u32,
        completed: bool,
        detections: DetectionSet,
    },
}

enum Command {
    Start {
        objects: Vec<GameObject>,
        duration_minutes: u32,
        reply: oneshot::Sender<Result<Challenge, DomainError>>,
    },
    ApplyCapture {
        challenge_id: ChallengeId,
        detections: DetectionSet,
        image: Option<Vec<u8>>,
        reply: oneshot::Sender<CaptureOutcome>,
    },
    Tick,
    Finish {
        reply: oneshot::Sender<Option<Challenge>>,
    },
    Cancel {
        reply: oneshot::Sender<Option<Challenge>>,
    },
    DescribeItem {
        id: CollectedItemId,
        description: String,
        reply: oneshot::Sender<bool>,
    },
    AddQuizBonus {
        id: CollectedItemId,
        points: u32,
        reply: oneshot::Sender<bool>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    RemainingTime {
        reply: oneshot::Sender<Option<chrono::Duration>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// The actor task. Owns the `GameSession`; nothing else touches it.
pub struct GameService {
    session: GameSession,
    confidence_threshold: f32,
    clock: Arc<dyn ClockPort>,
    snapshot_store: Arc<dyn SnapshotStorePort>,
    blob_store: Arc<dyn BlobStorePort>,
    event_bus: Arc<dyn EventBusPort<GameEvent>>,
}

impl GameService {
    /// Spawn the actor around an initial session (fresh or restored from a
    /// snapshot) and return a clonable handle.
    pub fn spawn(
        session: GameSession,
        confidence_threshold: f32,
        detector: Arc<dyn DetectionPort>,
        clock: Arc<dyn ClockPort>,
        snapshot_store: Arc<dyn SnapshotStorePort>,
        blob_store: Arc<dyn BlobStorePort>,
        event_bus: Arc<dyn EventBusPort<GameEvent>>,
    ) -> (GameHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let service = Self {
            session,
            confidence_threshold,
            clock,
            snapshot_store,
            blob_store,
            event_bus,
        };
        let task = tokio::spawn(service.run(rx));
        (
            GameHandle {
                commands: tx,
                detector,
            },
            task,
        )
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Start {
                    objects,
                    duration_minutes,
                    reply,
                } => {
                    let _ = reply.send(self.handle_start(objects, duration_minutes).await);
                }
                Command::ApplyCapture {
                    challenge_id,
                    detections,
                    image,
                    reply,
                } => {
                    let outcome = self.handle_capture(challenge_id, detections, image).await;
                    let _ = reply.send(outcome);
                }
                Command::Tick => self.handle_tick().await,
                Command::Finish { reply } => {
                    let _ = reply.send(self.handle_finish().await);
                }
                Command::Cancel { reply } => {
                    let _ = reply.send(self.handle_cancel().await);
                }
                Command::DescribeItem {
                    id,
                    description,
                    reply,
                } => {
                    let changed = self.session.describe_item(id, &description);
                    if changed {
                        self.persist();
                    }
                    let _ = reply.send(changed);
                }
                Command::AddQuizBonus { id, points, reply } => {
                    let changed = self.session.add_quiz_bonus(id, points);
                    if changed {
                        self.persist();
                    }
                    let _ = reply.send(changed);
                }
                Command::Reset { reply } => {
                    self.session.reset();
                    self.publish(GameEvent::SessionReset).await;
                    self.persist();
                    let _ = reply.send(());
                }
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.session.snapshot());
                }
                Command::RemainingTime { reply } => {
                    let now = self.clock.now();
                    let remaining = self
                        .session
                        .state()
                        .as_active()
                        .map(|c| c.remaining_time(now));
                    let _ = reply.send(remaining);
                }
                Command::Shutdown { reply } => {
                    self.flush().await;
                    let _ = reply.send(());
                    break;
                }
            }
        }
        debug!("game service stopped");
    }

    async fn handle_start(
        &mut self,
        objects: Vec<GameObject>,
        duration_minutes: u32,
    ) -> Result<Challenge, DomainError> {
        let challenge = Challenge::new(objects, duration_minutes, self.clock.now())?;
        if let Some(previous) = self.session.start_challenge(challenge.clone()) {
            info!(
                previous = %previous.id(),
                "replacing unfinished challenge with a new one"
            );
        }
        info!(
            challenge = %challenge.id(),
            objects = challenge.objects_to_find().len(),
            minutes = duration_minutes,
            "challenge started"
        );
        self.publish(GameEvent::ChallengeStarted {
            challenge_id: challenge.id(),
            object_count: challenge.objects_to_find().len(),
            duration_minutes,
        })
        .await;
        self.persist();
        Ok(challenge)
    }

    async fn handle_capture(
        &mut self,
        challenge_id: ChallengeId,
        detections: DetectionSet,
        image: Option<Vec<u8>>,
    ) -> CaptureOutcome {
        let Some(current) = self.session.state().as_active() else {
            debug!("capture result arrived with no active challenge; discarded");
            return CaptureOutcome::NoChallenge;
        };
        if current.id() != challenge_id {
            debug!(
                submitted = %challenge_id,
                current = %current.id(),
                "capture result for a replaced challenge; discarded"
            );
            return CaptureOutcome::Stale;
        }
        if current.is_terminal() {
            return CaptureOutcome::ChallengeOver {
                expired: current.is_expired(),
            };
        }

        let Some(object) = current
            .first_pending_match(&detections, self.confidence_threshold)
            .cloned()
        else {
            return CaptureOutcome::NotFound { detections };
        };

        // Store the photo only for credited finds. A failed write costs the
        // gallery image, not the find.
        let image_id = match image {
            Some(bytes) => match self.blob_store.put(&bytes).await {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(error = %err, "image blob write failed; find kept without photo");
                    None
                }
            },
            None => None,
        };

        let now = self.clock.now();
        let Some(credit) = self.session.credit_find(&object, image_id, now) else {
            // mark_found raced nothing here (we hold the only reference);
            // this arm only guards against a non-target slipping through.
            return CaptureOutcome::NotFound { detections };
        };

        let challenge = self
            .session
            .state()
            .as_active()
            .map(|c| (c.progress(), c.id()));
        let (progress, challenge_id) = challenge.unwrap_or((1.0, challenge_id));

        info!(
            object = object.name(),
            points = credit.points,
            completed = credit.completed,
            "object found"
        );
        self.publish(GameEvent::ObjectFound {
            challenge_id,
            object_id: object.id(),
            object_name: object.name().to_string(),
            points: credit.points,
            progress,
        })
        .await;
        if credit.completed {
            self.publish(GameEvent::ChallengeCompleted {
                challenge_id,
                total_score: self.session.stats().total_score(),
            })
            .await;
        }
        self.persist();

        CaptureOutcome::Found {
            object,
            item_id: credit.item_id,
            points: credit.points,
            completed: credit.completed,
            detections,
        }
    }

    async fn handle_tick(&mut self) {
        let now = self.clock.now();
        if self.session.check_expiration(now) {
            let (challenge_id, found, total) = match self.session.state().as_active() {
                Some(challenge) => (
                    challenge.id(),
                    challenge.found_objects().len(),
                    challenge.objects_to_find().len(),
                ),
                None => return,
            };
            info!(challenge = %challenge_id, found, total, "challenge expired");
            self.publish(GameEvent::ChallengeExpired {
                challenge_id,
                found,
                total,
            })
            .await;
            self.persist();
        }
    }

    async fn handle_finish(&mut self) -> Option<Challenge> {
        let challenge = self.session.finish_challenge()?;
        info!(
            challenge = %challenge.id(),
            completed = challenge.is_completed(),
            "challenge finished"
        );
        self.publish(GameEvent::ChallengeEnded {
            challenge_id: challenge.id(),
            completed: challenge.is_completed(),
        })
        .await;
        self.persist();
        Some(challenge)
    }

    async fn handle_cancel(&mut self) -> Option<Challenge> {
        let challenge = self.session.cancel_challenge()?;
        info!(challenge = %challenge.id(), "challenge cancelled");
        self.publish(GameEvent::ChallengeEnded {
            challenge_id: challenge.id(),
            completed: challenge.is_completed(),
        })
        .await;
        self.persist();
        Some(challenge)
    }

    /// Copy-then-write: the snapshot is cloned synchronously while the actor
    /// holds the state, then written off-task. The values written are always
    /// one consistent point-in-time view; a failed write is retried by the
    /// next save trigger.
    fn persist(&self) {
        let snapshot = self.session.snapshot();
        let store = Arc::clone(&self.snapshot_store);
        tokio::spawn(async move {
            if let Err(err) = store.save(&snapshot).await {
                warn!(error = %err, "snapshot save failed; retrying on next save");
            }
        });
    }

    /// Synchronous final save on shutdown.
    async fn flush(&self) {
        let snapshot = self.session.snapshot();
        if let Err(err) = self.snapshot_store.save(&snapshot).await {
            warn!(error = %err, "final snapshot save failed");
        }
    }

    async fn publish(&self, event: GameEvent) {
        if let Err(err) = self.event_bus.publish(event).await {
            warn!(error = %err, "event publish failed");
        }
    }
}

/// Clonable handle to the game actor.
#[derive(Clone)]
pub struct GameHandle {
    commands: mpsc::Sender<Command>,
    detector: Arc<dyn DetectionPort>,
}

impl GameHandle {
    /// Start a new challenge, replacing any active one.
    ///
    /// The only operation that surfaces validation errors; everything else
    /// is total.
    pub async fn start_challenge(
        &self,
        objects: Vec<GameObject>,
        duration_minutes: u32,
    ) -> Result<Challenge, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Start {
            objects,
            duration_minutes,
            reply,
        })
        .await?;
        Ok(rx.await.map_err(|_| EngineError::Stopped)??)
    }

    /// Classify a captured image and apply the result to the current
    /// challenge.
    ///
    /// Detection runs here, in the caller's task; the actor only sees the
    /// finished result, tagged with the challenge it was submitted against.
    pub async fn evaluate_capture(&self, image: ImageBuffer) -> Result<CaptureOutcome, EngineError> {
        let Some(challenge) = self.current_challenge().await? else {
            return Ok(CaptureOutcome::NoChallenge);
        };

        let detections = match self.detector.detect(&image).await {
            Ok(detections) => detections,
            Err(err) => {
                // DetectionUnavailable policy: no detections, gameplay continues
                warn!(error = %err, "detection failed; treating as no detections");
                DetectionSet::empty()
            }
        };

        let (reply, rx) = oneshot::channel();
        self.send(Command::ApplyCapture {
            challenge_id: challenge.id(),
            detections,
            image: Some(image.into_bytes()),
            reply,
        })
        .await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Run one expiry check. Driven externally at ~1 Hz.
    pub async fn tick(&self) -> Result<(), EngineError> {
        self.send(Command::Tick).await
    }

    /// Dispose of the current challenge and count it as finished.
    pub async fn finish_challenge(&self) -> Result<Option<Challenge>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Finish { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Dispose of the current challenge without counting it.
    pub async fn cancel_challenge(&self) -> Result<Option<Challenge>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Cancel { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Attach an AI-generated description to a gallery item (set-once).
    pub async fn describe_item(
        &self,
        id: CollectedItemId,
        description: impl Into<String>,
    ) -> Result<bool, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::DescribeItem {
            id,
            description: description.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Record a quiz bonus on a gallery item; awarded to the score once.
    pub async fn add_quiz_bonus(
        &self,
        id: CollectedItemId,
        points: u32,
    ) -> Result<bool, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::AddQuizBonus { id, points, reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Full, irreversible wipe of the session.
    pub async fn reset(&self) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Reset { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Point-in-time copy of the whole session.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    pub async fn current_challenge(&self) -> Result<Option<Challenge>, EngineError> {
        Ok(self.snapshot().await?.challenge)
    }

    /// Time left on the active challenge, clamped at zero; None when idle.
    pub async fn remaining_time(&self) -> Result<Option<chrono::Duration>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::RemainingTime { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    /// Flush the final snapshot and stop the actor.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Shutdown { reply }).await?;
        rx.await.map_err(|_| EngineError::Stopped)
    }

    async fn send(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::Stopped)
    }
}
