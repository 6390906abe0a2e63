//! Submission engine.
//!
//! Wires a [`SelectionRequest`] to the catalog, access filter, and either
//! the synchronous execution path or the batch job builder.

use std::sync::Arc;

use trawl_core::{
    Actor, BulkConfig, Diagnostic, RedirectDescriptor, SelectionKey, SelectionRequest, SubmitError,
};

use crate::access::filter_by_access;
use crate::action::BulkAction;
use crate::batch::{build_batch_job, BatchJob};
use crate::catalog::{ActionCatalog, ActionChoice};
use crate::listing::Listing;
use crate::registry::ActionRegistry;
use crate::storage::{resolve_key, Storage};
use crate::store::{ParameterPayload, ParameterStore};

/// Route prefix configurable actions redirect to for parameter collection.
/// The action id is appended as the final segment.
pub const CONFIGURE_ROUTE: &str = "bulk/configure";

/// Outcome of a submission.
#[derive(Debug)]
pub enum Submitted {
    /// Send the actor to a follow-up step (parameter collection or a
    /// confirmation form) instead of reporting completion.
    Redirect(RedirectDescriptor),

    /// Completed synchronously.
    Message {
        text: String,
        diagnostics: Vec<Diagnostic>,
    },

    /// Deferred to a batch job; hand it to a
    /// [`JobRunner`](crate::runner::JobRunner).
    Job(BatchJob),
}

/// The submission engine.
///
/// One engine serves many listings and actors; everything request-scoped
/// arrives as an argument.
pub struct BulkEngine {
    registry: Arc<ActionRegistry>,
    storage: Arc<dyn Storage>,
    parameters: Arc<dyn ParameterStore>,
    config: BulkConfig,
}

impl BulkEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        registry: Arc<ActionRegistry>,
        storage: Arc<dyn Storage>,
        parameters: Arc<dyn ParameterStore>,
        config: BulkConfig,
    ) -> Self {
        Self {
            registry,
            storage,
            parameters,
            config,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Options for a listing's action select widget.
    pub fn bulk_options(&self, resource_type: &str) -> Vec<(String, String)> {
        ActionCatalog::build(&self.registry, resource_type).display_options(&self.config.policy)
    }

    /// Reject empty selections before anything is resolved or loaded.
    pub fn validate(&self, request: &SelectionRequest) -> Result<(), SubmitError> {
        if request.is_empty() {
            return Err(SubmitError::EmptySelection);
        }
        Ok(())
    }

    /// Apply the chosen action to the selection.
    pub fn submit(
        &self,
        request: &SelectionRequest,
        listing: &dyn Listing,
        actor: &Actor,
    ) -> Result<Submitted, SubmitError> {
        self.validate(request)?;

        let catalog = ActionCatalog::build(&self.registry, listing.resource_type());
        let choice = catalog
            .resolve(&request.action_id)
            .ok_or_else(|| SubmitError::UnknownAction(request.action_id.clone()))?;

        match choice {
            ActionChoice::Configurable(action) => {
                Ok(self.defer_to_configuration(request, listing, actor, action.as_ref()))
            }
            ActionChoice::Direct(action) => {
                let (keys, diagnostics) = decode_keys(request.keys());
                if self.config.batching {
                    let job = build_batch_job(request, &keys, listing, action.as_ref(), actor);
                    return Ok(Submitted::Job(job));
                }
                self.execute_synchronously(action.as_ref(), &keys, actor, request, diagnostics)
            }
        }
    }

    /// Stash the selection and send the actor to the parameter form.
    fn defer_to_configuration(
        &self,
        request: &SelectionRequest,
        listing: &dyn Listing,
        actor: &Actor,
        action: &dyn BulkAction,
    ) -> Submitted {
        let payload = ParameterPayload {
            selected: request.keys().to_vec(),
            resource_type: listing.resource_type().to_string(),
        };
        self.parameters.put(&actor.id, payload);

        let mut redirect =
            RedirectDescriptor::new(format!("{}/{}", CONFIGURE_ROUTE, action.id()));
        redirect.destination = request.destination.clone();
        Submitted::Redirect(redirect)
    }

    /// Resolve every key, access-filter the whole set once, execute once.
    fn execute_synchronously(
        &self,
        action: &dyn BulkAction,
        keys: &[SelectionKey],
        actor: &Actor,
        request: &SelectionRequest,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Result<Submitted, SubmitError> {
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            match resolve_key(self.storage.as_ref(), key) {
                Some(item) => items.push(item),
                None => {
                    tracing::warn!("Selected item {} no longer exists, skipping", key.id);
                    diagnostics.push(Diagnostic::warning(format!(
                        "Selected item {} no longer exists.",
                        key.id
                    )));
                }
            }
        }

        let decision = filter_by_access(items, action, actor);
        diagnostics.extend(
            decision
                .rejections
                .into_iter()
                .map(|rejection| rejection.diagnostic),
        );

        let count = decision.authorized.len();
        if count > 0 {
            action
                .execute(&decision.authorized)
                .map_err(|source| SubmitError::ActionFault {
                    action: action.label().to_string(),
                    source,
                })?;
        }

        if let Some(route) = action.confirm_route() {
            let mut redirect = RedirectDescriptor::new(route);
            redirect.destination = request.destination.clone();
            return Ok(Submitted::Redirect(redirect));
        }

        Ok(Submitted::Message {
            text: applied_message(action.label(), count),
            diagnostics,
        })
    }
}

/// Decode submitted tokens, collecting a diagnostic per malformed key.
///
/// A malformed key never aborts the request; the remaining keys proceed.
fn decode_keys(tokens: &[String]) -> (Vec<SelectionKey>, Vec<Diagnostic>) {
    let mut keys = Vec::with_capacity(tokens.len());
    let mut diagnostics = Vec::new();
    for token in tokens {
        match SelectionKey::decode(token) {
            Ok(key) => keys.push(key),
            Err(err) => {
                tracing::warn!("Skipping malformed selection key: {}", err);
                diagnostics.push(Diagnostic::warning(err.to_string()));
            }
        }
    }
    (keys, diagnostics)
}

/// Pluralized completion message.
fn applied_message(label: &str, count: usize) -> String {
    if count == 1 {
        format!("{label} was applied to 1 item.")
    } else {
        format!("{label} was applied to {count} items.")
    }
}
