//! Shared identifier and ordering types used across the duelrank workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of an entity within a session's fixed `[0, K)` range.
///
/// `EntityId` is a thin `u32` wrapper rather than a bare integer so that
/// entity indices can't be silently confused with judge counts, sequence
/// numbers, or anything else that happens to be a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Construct an `EntityId` from a zero-based `usize` index.
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// This id's zero-based index, for use as a `Vec`/slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for EntityId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<EntityId> for usize {
    fn from(id: EntityId) -> Self {
        id.index()
    }
}

/// Opaque judge identifier, supplied per request by an external caller.
///
/// Authentication of judges is out of scope here (see the specification's
/// Non-goals) — a `JudgeId` is trusted once it reaches this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JudgeId(pub String);

impl fmt::Display for JudgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JudgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JudgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Strictly increasing position of a [`crate::event::LogEvent`] within the
/// operation log. Doubles as the snapshot horizon: a snapshot taken after
/// applying the event at `Sequence(n)` is recorded with horizon `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sequence(pub u64);

impl Sequence {
    /// The sequence value immediately before any event has been appended.
    pub const ZERO: Sequence = Sequence(0);

    /// The next sequence number after this one.
    pub fn next(self) -> Sequence {
        Sequence(self.0 + 1)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nanosecond-precision monotonic timestamp, independent of wall-clock time.
///
/// Built from [`std::time::Instant`] relative to an arbitrary process-local
/// epoch rather than `SystemTime`, so ordering is never disturbed by clock
/// adjustments. Only relative ordering and the raw nanosecond count are
/// ever relied upon — never calendar meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonotonicNanos(pub u128);

impl fmt::Display for MonotonicNanos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of monotonic timestamps, threaded through so tests can supply a
/// deterministic clock instead of the real one.
pub trait Clock: Send + Sync {
    /// Returns a timestamp guaranteed to be `>=` every previously returned
    /// value from the same `Clock` instance.
    fn now(&self) -> MonotonicNanos;
}

/// `Clock` backed by [`std::time::Instant`], anchored at construction time.
pub struct SystemClock {
    epoch: std::time::Instant,
}

impl SystemClock {
    /// Create a new clock anchored to the current instant.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> MonotonicNanos {
        MonotonicNanos(self.epoch.elapsed().as_nanos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_round_trips_through_usize() {
        let id = EntityId::new(7);
        assert_eq!(usize::from(id), 7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn sequence_next_is_strictly_increasing() {
        let s = Sequence::ZERO;
        assert_eq!(s.next(), Sequence(1));
        assert!(s.next() > s);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
