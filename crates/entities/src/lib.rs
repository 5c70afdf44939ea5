//! Entity Store — an immutable, indexed sequence of the K items a session
//! ranks.
//!
//! Entities are created once at session start and never mutated; the store
//! just owns them and answers `len`/`get`/`all` queries. On restart, the
//! store is repopulated from its persisted form before any log replay
//! begins, so its contents are identical across a crash.

#![warn(missing_docs)]

use duelrank_core::EntityId;
use serde::{Deserialize, Serialize};

/// A single competing item, identified by its zero-based position.
///
/// Display fields are carried verbatim from ingestion (CSV parsing is out
/// of scope for this crate — see the specification's Non-goals) and are
/// never interpreted by the ranking engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Zero-based position within the session's entity sequence.
    pub entity_id: EntityId,
    /// Display name (e.g. project title).
    pub name: String,
    /// External link (e.g. a submission URL).
    pub link: String,
    /// Physical locator (e.g. a table number); empty string if unknown.
    pub locator: String,
    /// Track/category tag; `"No Track"` if the source had none.
    pub track: String,
}

/// Fields needed to create an [`Entity`] before its `entity_id` is assigned.
///
/// An external ingestion adapter (CSV or otherwise) builds a `Vec<EntityDraft>`
/// and hands it to [`EntityStore::new`], which assigns ids as the zero-based
/// position within the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDraft {
    /// Display name.
    pub name: String,
    /// External link.
    pub link: String,
    /// Physical locator.
    pub locator: String,
    /// Track/category tag.
    pub track: String,
}

/// Immutable, indexed sequence of a session's entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    /// Build a store from drafts, assigning `entity_id` as the zero-based
    /// position within `drafts`.
    pub fn new(drafts: Vec<EntityDraft>) -> Self {
        let entities = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Entity {
                entity_id: EntityId::new(index),
                name: draft.name,
                link: draft.link,
                locator: draft.locator,
                track: draft.track,
            })
            .collect();
        Self { entities }
    }

    /// Rebuild a store from entities that already carry ids — used when
    /// restoring from the persisted `ENTITIES` file, where ids were
    /// assigned once at `start()` and must not be reassigned.
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Number of entities, i.e. K.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True iff the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by id.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// All entities in ascending id order.
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }
}
