//! Storage collaborator contract.

use trawl_core::{Item, SelectionKey};

#[cfg(test)]
use mockall::automock;

/// Loads live items for resolved selection keys.
///
/// `None` means the item no longer exists at resolution time; the engine
/// skips it with a diagnostic rather than failing the request.
#[cfg_attr(test, automock)]
pub trait Storage: Send + Sync {
    /// Load the current revision of an entity in the given locale.
    fn load(&self, id: &str, locale: &str) -> Option<Item>;

    /// Load a specific revision in the given locale.
    fn load_revision(&self, revision: &str, locale: &str) -> Option<Item>;
}

/// Resolve a selection key to a live item.
///
/// Dispatches on the presence of the revision field, mirroring how the
/// codec distinguishes 2- and 3-field tokens.
pub fn resolve_key(storage: &dyn Storage, key: &SelectionKey) -> Option<Item> {
    match &key.revision {
        Some(revision) => storage.load_revision(revision, &key.locale),
        None => storage.load(&key.id, &key.locale),
    }
}
