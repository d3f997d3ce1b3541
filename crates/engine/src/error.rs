//! Engine-level error type.

use thiserror::Error;

use snaphunt_domain::DomainError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Domain validation surfaced to the caller (bad challenge config,
    /// insufficient catalog)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The actor task has stopped; no further commands can be processed
    #[error("Engine stopped: command channel closed")]
    Stopped,
}
