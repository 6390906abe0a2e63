//! Parameter hand-off store.
//!
//! A configurable action cannot execute at submission time; the selection
//! context is stashed here, keyed by actor, and picked up again by the
//! parameter-collection step the actor is redirected to.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Selection context stashed for a configurable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterPayload {
    /// Encoded selection keys, submission order.
    pub selected: Vec<String>,

    /// Resource type of the listing the selection came from.
    pub resource_type: String,
}

/// Hands a selection off to a configurable action's parameter-collection
/// step. Keyed by actor id so concurrent submissions do not collide.
pub trait ParameterStore: Send + Sync {
    /// Stash a payload, replacing any previous one for the actor.
    fn put(&self, actor_id: &str, payload: ParameterPayload);

    /// Read the stored payload without consuming it.
    fn get(&self, actor_id: &str) -> Option<ParameterPayload>;

    /// Remove and return the stored payload.
    fn take(&self, actor_id: &str) -> Option<ParameterPayload>;
}

/// In-memory parameter store.
///
/// Suitable for single-process hosts; anything spanning processes brings
/// its own implementation.
#[derive(Default)]
pub struct MemoryParameterStore {
    entries: RwLock<HashMap<String, ParameterPayload>>,
}

impl MemoryParameterStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParameterStore for MemoryParameterStore {
    fn put(&self, actor_id: &str, payload: ParameterPayload) {
        tracing::debug!("Stashing selection of {} keys for actor '{}'", payload.selected.len(), actor_id);
        self.entries.write().insert(actor_id.to_string(), payload);
    }

    fn get(&self, actor_id: &str) -> Option<ParameterPayload> {
        self.entries.read().get(actor_id).cloned()
    }

    fn take(&self, actor_id: &str) -> Option<ParameterPayload> {
        self.entries.write().remove(actor_id)
    }
}
