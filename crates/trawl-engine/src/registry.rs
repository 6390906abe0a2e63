//! Action registry.
//!
//! Stores the bulk actions a host has registered. Registration order is
//! preserved: the catalog presents actions in the order their plugins
//! were registered.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::action::BulkAction;
use crate::catalog::CONFIGURABLE_PREFIX;

/// Storage for registered bulk actions.
#[derive(Default)]
pub struct ActionRegistry {
    /// Registered actions, registration order.
    actions: RwLock<Vec<Arc<dyn BulkAction>>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action.
    ///
    /// Returns an error if an action with the same id already exists or
    /// the id starts with the reserved configurable prefix.
    pub fn register(&self, action: Arc<dyn BulkAction>) -> Result<(), RegistryError> {
        let id = action.id().to_string();
        if id.starts_with(CONFIGURABLE_PREFIX) {
            return Err(RegistryError::ReservedPrefix(id));
        }

        let mut actions = self.actions.write();
        if actions.iter().any(|existing| existing.id() == id) {
            return Err(RegistryError::DuplicateAction(id));
        }
        actions.push(action);
        tracing::info!("Registered action: {}", id);
        Ok(())
    }

    /// Look up an action by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn BulkAction>> {
        let actions = self.actions.read();
        actions.iter().find(|action| action.id() == id).cloned()
    }

    /// All actions targeting the given resource type, registration order.
    pub fn definitions_for(&self, resource_type: &str) -> Vec<Arc<dyn BulkAction>> {
        let actions = self.actions.read();
        actions
            .iter()
            .filter(|action| action.resource_type() == resource_type)
            .cloned()
            .collect()
    }

    /// Number of registered actions.
    pub fn count(&self) -> usize {
        self.actions.read().len()
    }
}

/// Errors that can occur during action registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("action '{0}' already registered")]
    DuplicateAction(String),

    #[error("action id '{0}' starts with the reserved configurable prefix")]
    ReservedPrefix(String),
}
