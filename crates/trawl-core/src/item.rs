//! Item and actor types.

use serde::{Deserialize, Serialize};

use crate::key::SelectionKey;

/// A loaded entity the engine can act on.
///
/// Everything the engine selects, authorizes, and executes against is an
/// item. The host's storage collaborator produces them; the engine never
/// looks past this surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Entity identifier, stable across pagination.
    pub id: String,

    /// Human-readable label used in diagnostics.
    pub label: String,

    /// Locale this item was loaded in.
    pub locale: String,

    /// Revision identifier, if the item is a specific revision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    /// Resource type, e.g. "node" or "invoice".
    pub resource_type: String,

    /// Arbitrary data for actions to consume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Item {
    /// Create a new item with required fields.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        locale: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            locale: locale.into(),
            revision: None,
            resource_type: resource_type.into(),
            data: None,
        }
    }

    /// Attach a revision identifier.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Attach opaque data for actions to consume.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Derive the selection key for this item's row.
    ///
    /// The revision field is included only when the listing declared
    /// revision addressing; the flag is queried once per request, not
    /// inferred per key.
    pub fn selection_key(&self, use_revision: bool) -> SelectionKey {
        match (&self.revision, use_revision) {
            (Some(revision), true) => {
                SelectionKey::with_revision(&self.locale, &self.id, revision)
            }
            _ => SelectionKey::new(&self.locale, &self.id),
        }
    }
}

/// The authenticated principal a submission runs as.
///
/// Threaded explicitly through every call; the engine keeps no ambient
/// notion of a current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier, also the parameter-store key.
    pub id: String,

    /// Display name.
    pub name: String,
}

impl Actor {
    /// Create a new actor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
