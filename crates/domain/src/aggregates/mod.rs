//! Aggregates - consistency boundaries around groups of entities.

mod session;

pub use session::{FindCredit, GameSession, SessionSnapshot, SessionState, SessionStats};
