//! SnapHunt domain - core types and invariants for the scavenger-hunt game.
//!
//! Pure and synchronous: no IO, no clocks, no randomness. Time always comes
//! in as a parameter and RNG is injected where sampling needs it, so every
//! invariant here is testable without the engine.

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::{FindCredit, GameSession, SessionSnapshot, SessionState, SessionStats};
pub use catalog::ObjectCatalog;
pub use entities::{Challenge, CollectedItem, GameObject};
pub use error::DomainError;
pub use events::GameEvent;
pub use ids::{ChallengeId, CollectedItemId, ImageId, ObjectId};
pub use value_objects::{
    DetectionSet, Difficulty, Label, TargetCounts, DEFAULT_CONFIDENCE_THRESHOLD,
};
