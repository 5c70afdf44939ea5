//! Operation-log event shapes, shared between the durability layer (which
//! persists and replays them) and the session layer (which is the only
//! thing that knows how to re-apply one to the Strength Engine).

use crate::types::{EntityId, JudgeId, MonotonicNanos, Sequence};
use serde::{Deserialize, Serialize};

/// One durable record of a mutating request handled by the session
/// controller.
///
/// `PairIssued` carries only the judge id: its purpose on replay is purely
/// to consume one step of the engine's RNG (and advance frequency) in the
/// same order it did live, not to re-derive the pair that was returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEvent {
    /// A pair was drawn and assigned to `judge_id`.
    PairIssued {
        /// The judge the pair was assigned to.
        judge_id: JudgeId,
    },
    /// A judge submitted a winner for a pair they owned.
    Submitted {
        /// The judge who submitted.
        judge_id: JudgeId,
        /// The compared pair, in the order it was issued.
        pair: (EntityId, EntityId),
        /// Which of `pair` won.
        winner: EntityId,
    },
}

/// A [`LogEvent`] together with its position in the total order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Strictly increasing position within the operation log.
    pub sequence: Sequence,
    /// When the event was appended.
    pub timestamp: MonotonicNanos,
    /// The event itself.
    pub event: LogEvent,
}
