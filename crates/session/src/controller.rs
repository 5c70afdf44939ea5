//! Session Controller — the FRESH/ACTIVE/STOPPED state machine, the
//! request handlers an external adapter would drive, and boot-time
//! crash recovery.

use crate::config::SessionConfig;
use crate::error::SessionError;
use duelrank_core::{Clock, EntityId, JudgeId, LogEvent, Sequence, SystemClock};
use duelrank_durability::{read_blob, write_blob, OperationLog, SessionPaths, SnapshotStore};
use duelrank_engine::StrengthState;
use duelrank_entities::{Entity, EntityDraft, EntityStore};
use duelrank_ledger::AssignmentLedger;
use parking_lot::{Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Fresh,
    Active,
    Stopped,
}

#[derive(Default)]
struct SnapshotGate {
    pending: u32,
}

/// Owns one session's state machine and every request handler an
/// external adapter (HTTP or otherwise) would call.
///
/// Locking discipline (see the component design's concurrency model):
/// the engine mutex is always acquired before the ledger mutex, which
/// is always acquired before the snapshot mutex. `lifecycle` is its own
/// short-lived lock, never held across an engine/ledger/snapshot
/// acquisition.
pub struct SessionController {
    config: SessionConfig,
    paths: SessionPaths,
    log: OperationLog,
    snapshots: SnapshotStore,
    lifecycle: Mutex<Lifecycle>,
    entities: RwLock<Option<EntityStore>>,
    engine: Mutex<Option<StrengthState>>,
    ledger: Mutex<AssignmentLedger>,
    snapshot_gate: Mutex<SnapshotGate>,
    clock: Box<dyn Clock>,
}

impl SessionController {
    /// Open the durable store at `config.data_dir`, recovering from the
    /// latest snapshot and replaying the log if a prior session exists.
    pub fn open(config: SessionConfig) -> Result<Self, SessionError> {
        Self::open_with_clock(config, Box::new(SystemClock::new()))
    }

    /// As [`Self::open`], with an injectable clock for deterministic tests.
    pub fn open_with_clock(config: SessionConfig, clock: Box<dyn Clock>) -> Result<Self, SessionError> {
        config.validate()?;

        let paths = SessionPaths::new(config.data_dir.clone());
        paths
            .create_directories()
            .map_err(|e| SessionError::PersistenceFailure(duelrank_core::Error::Io(e).into()))?;

        let log = OperationLog::open(paths.log_file())?;
        let snapshots = SnapshotStore::new(paths.snapshots_dir(), config.max_snapshots);

        let entities = match read_blob(&paths.entities_file())? {
            Some(bytes) => {
                let decoded: Vec<Entity> =
                    bincode::deserialize(&bytes).map_err(duelrank_core::Error::from)?;
                Some(EntityStore::from_entities(decoded))
            }
            None => None,
        };

        let controller = Self {
            config,
            paths,
            log,
            snapshots,
            lifecycle: Mutex::new(Lifecycle::Fresh),
            entities: RwLock::new(entities),
            engine: Mutex::new(None),
            ledger: Mutex::new(AssignmentLedger::new()),
            snapshot_gate: Mutex::new(SnapshotGate::default()),
            clock,
        };

        controller.recover()?;
        Ok(controller)
    }

    fn recover(&self) -> Result<(), SessionError> {
        if self.entities.read().is_none() {
            return Ok(());
        }

        let Some((horizon, payload)) = self.snapshots.latest()? else {
            return Ok(());
        };

        let mut state: StrengthState =
            bincode::deserialize(&payload).map_err(duelrank_core::Error::from)?;

        let events = self.log.replay_since(horizon)?;
        let mut ledger = AssignmentLedger::new();
        let mut replayed = 0usize;

        for logged in &events {
            match &logged.event {
                LogEvent::PairIssued { judge_id } => {
                    let pair = state.get_next_pair(self.config.default_temperature)?;
                    ledger.assign(judge_id.clone(), pair, logged.timestamp);
                }
                LogEvent::Submitted { judge_id, pair, winner } => {
                    state.submit_comparison(pair.0, pair.1, *winner)?;
                    if ledger.release(judge_id).is_err() {
                        tracing::warn!(
                            judge = %judge_id,
                            "replayed submit for a judge with no outstanding assignment"
                        );
                    }
                }
            }
            replayed += 1;
        }

        *self.engine.lock() = Some(state);
        *self.ledger.lock() = ledger;
        *self.lifecycle.lock() = Lifecycle::Active;

        tracing::info!(
            horizon = horizon.0,
            replayed,
            "recovered session from snapshot and log replay"
        );
        Ok(())
    }

    /// Start a fresh session over `drafts`, discarding any prior
    /// snapshots, log, and assignments.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyStarted`] if the session is ACTIVE.
    pub fn start(&self, drafts: Vec<EntityDraft>) -> Result<(), SessionError> {
        {
            let lifecycle = self.lifecycle.lock();
            if *lifecycle == Lifecycle::Active {
                return Err(SessionError::AlreadyStarted);
            }
        }

        let store = EntityStore::new(drafts);
        let payload = bincode::serialize(store.all()).map_err(duelrank_core::Error::from)?;
        write_blob(&self.paths.entities_file(), &payload)?;

        self.snapshots.clear()?;
        self.log.clear()?;

        let k = store.len();
        *self.engine.lock() = Some(StrengthState::new(k, self.config.rng_seed));
        self.ledger.lock().clear();
        *self.entities.write() = Some(store);
        self.snapshot_gate.lock().pending = 0;
        *self.lifecycle.lock() = Lifecycle::Active;

        tracing::info!(k, "session started");
        Ok(())
    }

    /// Transition ACTIVE → STOPPED without discarding state.
    ///
    /// # Errors
    /// Returns [`SessionError::NotStarted`] if the session is not ACTIVE.
    pub fn stop(&self) -> Result<(), SessionError> {
        let mut lifecycle = self.lifecycle.lock();
        if *lifecycle != Lifecycle::Active {
            return Err(SessionError::NotStarted);
        }
        *lifecycle = Lifecycle::Stopped;
        tracing::info!("session stopped");
        Ok(())
    }

    /// Transition back to ACTIVE without touching engine, ledger, or
    /// entity state.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyStarted`] if the session is ACTIVE.
    pub fn resume(&self) -> Result<(), SessionError> {
        let mut lifecycle = self.lifecycle.lock();
        if *lifecycle == Lifecycle::Active {
            return Err(SessionError::AlreadyStarted);
        }
        *lifecycle = Lifecycle::Active;
        tracing::info!("session resumed");
        Ok(())
    }

    /// Get `judge_id`'s pair, assigning a new one unless they already
    /// have one outstanding (idempotent) and `force` is false.
    ///
    /// # Errors
    /// Returns [`SessionError::NotStarted`] if the session is not ACTIVE.
    pub fn get_pair(&self, judge_id: JudgeId, force: bool) -> Result<(EntityId, EntityId), SessionError> {
        self.require_active()?;

        if !force {
            let ledger = self.ledger.lock();
            if let Some(pair) = ledger.current(&judge_id) {
                return Ok(pair);
            }
        }

        let mut engine_guard = self.engine.lock();
        let state = engine_guard.as_mut().ok_or(SessionError::NotStarted)?;
        let pair = state.get_next_pair(self.config.default_temperature)?;

        let issued_at = self.clock.now();
        self.ledger.lock().assign(judge_id.clone(), pair, issued_at);

        let logged = self
            .log
            .append(LogEvent::PairIssued { judge_id }, self.clock.as_ref())?;

        self.maybe_snapshot(state, logged.sequence)?;

        Ok(pair)
    }

    /// Record `judge_id`'s reported winner for the pair `(a, b)`.
    ///
    /// # Errors
    /// Returns [`SessionError::NotStarted`], [`SessionError::InvalidPair`],
    /// or [`SessionError::JudgeDoesNotOwnPair`] as appropriate.
    pub fn submit(&self, judge_id: JudgeId, a: EntityId, b: EntityId, winner: EntityId) -> Result<(), SessionError> {
        self.require_active()?;

        if a == b || (winner != a && winner != b) {
            return Err(SessionError::InvalidPair);
        }

        let mut engine_guard = self.engine.lock();
        let state = engine_guard.as_mut().ok_or(SessionError::NotStarted)?;

        {
            let ledger = self.ledger.lock();
            if !ledger.verify(&judge_id, a, b) {
                return Err(SessionError::JudgeDoesNotOwnPair);
            }
        }

        state.submit_comparison(a, b, winner)?;

        let logged = self.log.append(
            LogEvent::Submitted { judge_id: judge_id.clone(), pair: (a, b), winner },
            self.clock.as_ref(),
        )?;

        let _ = self.ledger.lock().release(&judge_id);

        self.maybe_snapshot(state, logged.sequence)?;

        Ok(())
    }

    /// Entities ordered by descending α.
    ///
    /// # Errors
    /// Returns [`SessionError::NotStarted`] if the session is not ACTIVE.
    pub fn rankings(&self) -> Result<Vec<Entity>, SessionError> {
        self.require_active()?;

        let order = {
            let engine_guard = self.engine.lock();
            let state = engine_guard.as_ref().ok_or(SessionError::NotStarted)?;
            state.get_rankings()
        };

        let entities = self.entities.read();
        let store = entities.as_ref().ok_or(SessionError::NotStarted)?;
        Ok(order
            .into_iter()
            .map(|id| store.get(id).expect("ranking ids are always in range").clone())
            .collect())
    }

    fn require_active(&self) -> Result<(), SessionError> {
        if *self.lifecycle.lock() == Lifecycle::Active {
            Ok(())
        } else {
            Err(SessionError::NotStarted)
        }
    }

    /// Called while still holding the engine mutex, matching the
    /// discipline that the mutation counter and the snapshot write
    /// itself share one critical section.
    fn maybe_snapshot(&self, state: &StrengthState, sequence: Sequence) -> Result<(), SessionError> {
        let mut gate = self.snapshot_gate.lock();
        gate.pending += 1;
        if gate.pending < self.config.snapshot_interval {
            return Ok(());
        }
        gate.pending = 0;

        let payload = bincode::serialize(state).map_err(duelrank_core::Error::from)?;
        self.snapshots.write(sequence, &payload)?;
        tracing::info!(sequence = sequence.0, "snapshot written");
        Ok(())
    }
}
