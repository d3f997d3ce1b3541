//! Application services.

mod game_service;

pub use game_service::{CaptureOutcome, GameHandle, GameService};
