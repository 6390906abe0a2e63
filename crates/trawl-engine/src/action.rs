//! The bulk action contract.

use trawl_core::{ActionError, Actor, Item, ParameterSchema};

/// An operation that can be applied to a set of selected items.
///
/// Implementations are registered once at startup and shared across
/// submissions as `Arc<dyn BulkAction>`. The engine treats them as opaque:
/// it authorizes per item via [`access`](Self::access) and hands the
/// surviving set to [`execute`](Self::execute).
pub trait BulkAction: Send + Sync {
    /// Unique identifier. May not start with the reserved `#` prefix;
    /// the registry rejects such ids.
    fn id(&self) -> &str;

    /// Human-readable label used in option lists and status messages.
    fn label(&self) -> &str;

    /// Resource type this action targets, matched against the listing's.
    fn resource_type(&self) -> &str;

    /// Per-item authorization check.
    fn access(&self, item: &Item, actor: &Actor) -> bool;

    /// Apply the action to the authorized items.
    fn execute(&self, items: &[Item]) -> Result<(), ActionError>;

    /// Route of a confirmation step to redirect to after execution.
    fn confirm_route(&self) -> Option<&str> {
        None
    }

    /// Parameter form for actions that need extra input before running.
    ///
    /// Returning `Some` marks the action configurable: submitting it
    /// stashes the selection in the parameter store and redirects to the
    /// configure route instead of executing.
    fn parameter_schema(&self) -> Option<ParameterSchema> {
        None
    }
}
