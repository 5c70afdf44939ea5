//! The top-level error enum an HTTP adapter would match on to pick a
//! status code.

use duelrank_durability::DurabilityError;
use duelrank_engine::EngineError;
use thiserror::Error;

/// Errors returned by [`crate::SessionController`].
///
/// `NumericDegenerate` from the component design's error taxonomy is
/// deliberately not a variant here: it is swallowed inside the engine
/// (the moment-matching update's numeric guards leave α unchanged) and
/// is only observable via a `warn!` log line, never as a returned error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A mutating or read call was made while the session is not ACTIVE.
    #[error("session is not active")]
    NotStarted,

    /// `start` or `resume` was called while the session is already ACTIVE.
    #[error("session is already active")]
    AlreadyStarted,

    /// `submit` named a pair the calling judge does not currently own.
    #[error("judge does not own the requested pair")]
    JudgeDoesNotOwnPair,

    /// `submit`'s winner was not one of the compared pair, or the pair's
    /// two entities were equal.
    #[error("invalid pair: winner must be one of the compared entities")]
    InvalidPair,

    /// A durable log append or snapshot write failed.
    #[error("durable write failed: {0}")]
    PersistenceFailure(#[from] DurabilityError),

    /// Defensive propagation from the engine for a path that bypassed
    /// the controller's own validation.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// The supplied [`crate::SessionConfig`] can never produce a working
    /// session (e.g. `max_snapshots == 0`).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
