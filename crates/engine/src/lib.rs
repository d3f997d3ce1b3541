//! SnapHunt Engine - the challenge state machine and its adapters.
//!
//! The camera/UI layer talks to a [`GameHandle`]; a single actor task owns
//! the session state and serializes timer ticks, capture evaluations, and
//! user actions. See [`app::Game`] for composition.

pub mod app;
pub mod application;
pub mod error;
pub mod infrastructure;

pub use app::Game;
pub use application::ports::outbound::{
    BlobStorePort, ClockPort, DetectionError, DetectionPort, EventBusError, EventBusPort,
    ImageBuffer, PersistenceError, RandomPort, SnapshotStorePort,
};
pub use application::services::{CaptureOutcome, GameHandle, GameService};
pub use error::EngineError;
pub use infrastructure::settings::GameConfig;
