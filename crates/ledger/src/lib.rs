//! Assignment Ledger — tracks which judge currently owns which pair.
//!
//! The ledger enforces at most one outstanding pair per judge and is the
//! sole source of truth for "does this judge own this pair" ownership
//! checks. It is kept purely in memory here: the session layer rebuilds it
//! from operation-log replay on recovery (assign on `PairIssued`, release
//! on `Submitted`), rather than this crate maintaining its own durable
//! copy — see the workspace's `DESIGN.md` for why that's the chosen
//! resolution of the two acceptable designs the specification allows.

#![warn(missing_docs)]

use duelrank_core::{EntityId, JudgeId, MonotonicNanos};
use std::collections::HashMap;
use thiserror::Error;

/// Errors returned by [`AssignmentLedger`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// `release` was called for a judge with no outstanding assignment.
    #[error("judge {0} has no outstanding assignment")]
    NoAssignment(JudgeId),
}

/// An outstanding `{a, b}` pair assigned to one judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The unordered pair, stored in the order it was issued.
    pub pair: (EntityId, EntityId),
    /// When the pair was issued.
    pub issued_at: MonotonicNanos,
}

impl Assignment {
    fn matches(&self, x: EntityId, y: EntityId) -> bool {
        let (a, b) = self.pair;
        (a == x && b == y) || (a == y && b == x)
    }
}

/// In-memory `judge_id -> outstanding pair` map.
#[derive(Debug, Default)]
pub struct AssignmentLedger {
    assignments: HashMap<JudgeId, Assignment>,
}

impl AssignmentLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            assignments: HashMap::new(),
        }
    }

    /// Assign `pair` to `judge_id`, overwriting any existing entry for that
    /// judge (a forced re-issue).
    pub fn assign(&mut self, judge_id: JudgeId, pair: (EntityId, EntityId), issued_at: MonotonicNanos) {
        self.assignments.insert(judge_id, Assignment { pair, issued_at });
    }

    /// Remove `judge_id`'s outstanding assignment.
    ///
    /// # Errors
    /// Returns [`LedgerError::NoAssignment`] if the judge has none.
    pub fn release(&mut self, judge_id: &JudgeId) -> Result<Assignment, LedgerError> {
        self.assignments
            .remove(judge_id)
            .ok_or_else(|| LedgerError::NoAssignment(judge_id.clone()))
    }

    /// True iff `judge_id` currently owns the unordered pair `{x, y}`.
    ///
    /// Order between `x` and `y` is irrelevant.
    pub fn verify(&self, judge_id: &JudgeId, x: EntityId, y: EntityId) -> bool {
        self.assignments
            .get(judge_id)
            .is_some_and(|a| a.matches(x, y))
    }

    /// Current outstanding pair for `judge_id`, if any.
    pub fn current(&self, judge_id: &JudgeId) -> Option<(EntityId, EntityId)> {
        self.assignments.get(judge_id).map(|a| a.pair)
    }

    /// Number of outstanding assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True iff there are no outstanding assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Drop every outstanding assignment, e.g. on a fresh `start()`.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}
