//! Errors raised by the Strength Engine.

use duelrank_core::EntityId;
use thiserror::Error;

/// Errors raised directly by [`crate::StrengthState`] operations.
///
/// Numeric degeneracy in the moment-matching update (§4.1's guards) is
/// deliberately *not* a variant here: per the specification, those guards
/// leave α unchanged and are only observable via a logged warning, never
/// as a returned error.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// `get_next_pair` was called with fewer than 2 entities, or
    /// `submit_comparison` was given out-of-range or equal indices.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl EngineError {
    /// Build an [`EngineError::InvalidState`] for a too-small entity count.
    pub fn too_few_entities(k: usize) -> Self {
        Self::InvalidState(format!("at least 2 entities are required, got {k}"))
    }

    /// Build an [`EngineError::InvalidState`] for an out-of-range index.
    pub fn index_out_of_range(id: EntityId, k: usize) -> Self {
        Self::InvalidState(format!("entity id {id} is out of range for K={k}"))
    }

    /// Build an [`EngineError::InvalidState`] for `i == j`.
    pub fn equal_indices(id: EntityId) -> Self {
        Self::InvalidState(format!("pair indices must differ, both were {id}"))
    }

    /// Build an [`EngineError::InvalidState`] for a winner outside the pair.
    pub fn winner_not_in_pair(winner: EntityId, i: EntityId, j: EntityId) -> Self {
        Self::InvalidState(format!(
            "winner {winner} is not one of the compared pair ({i}, {j})"
        ))
    }
}
