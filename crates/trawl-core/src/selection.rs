//! Selection scope and request types.

use serde::{Deserialize, Serialize};

/// Whether a bulk operation targets the displayed page or the entire
/// result set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    /// Only the keys the actor ticked on the current page.
    #[default]
    CurrentPage,
    /// Every row of the unpaginated result set; explicit picks are
    /// superseded by the re-query, not merged with it.
    AllPages,
}

/// One bulk submission: chosen action, selected keys, scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Chosen action identifier; configurable actions carry the reserved
    /// `#` prefix as submitted by the option list.
    pub action_id: String,

    /// Encoded selection keys, deduplicated, submission order preserved.
    keys: Vec<String>,

    /// Scope of the operation.
    #[serde(default)]
    pub scope: SelectionScope,

    /// Where to send the actor back to after a redirect step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl SelectionRequest {
    /// Create a request, dropping duplicate keys while preserving the
    /// first occurrence's position.
    pub fn new(
        action_id: impl Into<String>,
        keys: impl IntoIterator<Item = String>,
        scope: SelectionScope,
    ) -> Self {
        let mut deduped: Vec<String> = Vec::new();
        for key in keys {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        Self {
            action_id: action_id.into(),
            keys: deduped,
            scope,
            destination: None,
        }
    }

    /// Attach the route to return to after a redirect step.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// The selected keys, in submission order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
