//! Per-item access filtering.

use trawl_core::{Actor, Diagnostic, Item};

use crate::action::BulkAction;

/// Outcome of filtering a set of items against an action's access check.
#[derive(Debug)]
pub struct AccessDecision {
    /// Items the actor may act on, original order preserved.
    pub authorized: Vec<Item>,
    /// Items dropped from the batch, each reported once.
    pub rejections: Vec<Rejection>,
}

/// One item the actor was not authorized to act on.
#[derive(Debug)]
pub struct Rejection {
    pub item: Item,
    pub diagnostic: Diagnostic,
}

/// Drop items the actor is not authorized to act on.
///
/// Each rejection is reported once; the rest of the batch proceeds with
/// whatever subset is authorized. A rejection never aborts the request.
pub fn filter_by_access(items: Vec<Item>, action: &dyn BulkAction, actor: &Actor) -> AccessDecision {
    let mut authorized = Vec::with_capacity(items.len());
    let mut rejections = Vec::new();

    for item in items {
        if action.access(&item, actor) {
            authorized.push(item);
        } else {
            tracing::warn!(
                "Actor '{}' denied '{}' on {} '{}'",
                actor.id,
                action.id(),
                item.resource_type,
                item.id
            );
            let diagnostic = Diagnostic::error(access_denied_message(action, &item));
            rejections.push(Rejection { item, diagnostic });
        }
    }

    AccessDecision {
        authorized,
        rejections,
    }
}

/// Message reported for one access rejection.
pub(crate) fn access_denied_message(action: &dyn BulkAction, item: &Item) -> String {
    format!(
        "No access to execute {} on the {} {}.",
        action.label(),
        item.resource_type,
        item.label
    )
}
