//! Action catalog.
//!
//! Snapshots the registered actions for one resource type, partitioned
//! into direct and configurable variants, and turns them into display
//! options and resolved choices.

use std::sync::Arc;

use trawl_core::DisplayPolicy;

use crate::action::BulkAction;
use crate::registry::ActionRegistry;

/// Reserved prefix tagging configurable actions in display keys.
///
/// Registered action ids may not start with it, so inspecting the first
/// character of a submitted choice is enough to tell the variants apart.
pub const CONFIGURABLE_PREFIX: char = '#';

/// A submitted action choice resolved to its variant.
///
/// The prefix convention is parsed exactly once, in
/// [`ActionCatalog::resolve`]; downstream dispatch matches on the variant.
#[derive(Clone)]
pub enum ActionChoice {
    /// Executes immediately on the selected items.
    Direct(Arc<dyn BulkAction>),
    /// Needs a parameter-gathering step before execution.
    Configurable(Arc<dyn BulkAction>),
}

impl ActionChoice {
    /// The underlying action, whichever the variant.
    pub fn action(&self) -> &Arc<dyn BulkAction> {
        match self {
            ActionChoice::Direct(action) | ActionChoice::Configurable(action) => action,
        }
    }
}

/// Snapshot of the actions available for one resource type.
pub struct ActionCatalog {
    direct: Vec<Arc<dyn BulkAction>>,
    configurable: Vec<Arc<dyn BulkAction>>,
}

impl ActionCatalog {
    /// Snapshot the registry for `resource_type`.
    ///
    /// An action is configurable iff it declares a parameter form. Both
    /// partitions keep registration order.
    pub fn build(registry: &ActionRegistry, resource_type: &str) -> Self {
        let mut direct = Vec::new();
        let mut configurable = Vec::new();
        for action in registry.definitions_for(resource_type) {
            if action.parameter_schema().is_some() {
                configurable.push(action);
            } else {
                direct.push(action);
            }
        }
        tracing::debug!(
            "Catalog for '{}': {} direct, {} configurable",
            resource_type,
            direct.len(),
            configurable.len()
        );
        Self {
            direct,
            configurable,
        }
    }

    /// `(key, label)` pairs for the action select widget.
    ///
    /// The policy applies to direct actions only. Configurable actions
    /// always pass and are appended after the direct ones, key prefixed
    /// with [`CONFIGURABLE_PREFIX`] and label suffixed with an ellipsis to
    /// signal the follow-up step.
    pub fn display_options(&self, policy: &DisplayPolicy) -> Vec<(String, String)> {
        let mut options: Vec<(String, String)> = self
            .direct
            .iter()
            .filter(|action| policy.allows(action.id()))
            .map(|action| (action.id().to_string(), action.label().to_string()))
            .collect();

        for action in &self.configurable {
            options.push((
                format!("{}{}", CONFIGURABLE_PREFIX, action.id()),
                format!("{}…", action.label()),
            ));
        }
        options
    }

    /// Resolve a submitted choice to its variant.
    pub fn resolve(&self, choice: &str) -> Option<ActionChoice> {
        match choice.strip_prefix(CONFIGURABLE_PREFIX) {
            Some(id) => self
                .configurable
                .iter()
                .find(|action| action.id() == id)
                .cloned()
                .map(ActionChoice::Configurable),
            None => self
                .direct
                .iter()
                .find(|action| action.id() == choice)
                .cloned()
                .map(ActionChoice::Direct),
        }
    }

    /// Whether no actions target the resource type at all.
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.configurable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trawl_core::{ActionError, Actor, Item, ParameterField, ParameterSchema};

    struct TestAction {
        id: String,
        label: String,
        configurable: bool,
    }

    impl TestAction {
        fn direct(id: &str, label: &str) -> Arc<dyn BulkAction> {
            Arc::new(Self {
                id: id.to_string(),
                label: label.to_string(),
                configurable: false,
            })
        }

        fn configurable(id: &str, label: &str) -> Arc<dyn BulkAction> {
            Arc::new(Self {
                id: id.to_string(),
                label: label.to_string(),
                configurable: true,
            })
        }
    }

    impl BulkAction for TestAction {
        fn id(&self) -> &str {
            &self.id
        }
        fn label(&self) -> &str {
            &self.label
        }
        fn resource_type(&self) -> &str {
            "node"
        }
        fn access(&self, _item: &Item, _actor: &Actor) -> bool {
            true
        }
        fn execute(&self, _items: &[Item]) -> Result<(), ActionError> {
            Ok(())
        }
        fn parameter_schema(&self) -> Option<ParameterSchema> {
            self.configurable
                .then(|| ParameterSchema::single(ParameterField::required("value", "Value")))
        }
    }

    fn catalog() -> ActionCatalog {
        let registry = ActionRegistry::new();
        registry.register(TestAction::direct("publish", "Publish")).unwrap();
        registry.register(TestAction::direct("unpublish", "Unpublish")).unwrap();
        registry
            .register(TestAction::configurable("retitle", "Change title"))
            .unwrap();
        ActionCatalog::build(&registry, "node")
    }

    #[test]
    fn test_exclude_nothing_lists_everything_in_order() {
        let options = catalog().display_options(&DisplayPolicy::default());
        assert_eq!(
            options,
            vec![
                ("publish".to_string(), "Publish".to_string()),
                ("unpublish".to_string(), "Unpublish".to_string()),
                ("#retitle".to_string(), "Change title…".to_string()),
            ]
        );
    }

    #[test]
    fn test_include_policy_keeps_only_listed_direct_actions() {
        let policy = DisplayPolicy::include(vec!["publish".to_string()]);
        let options = catalog().display_options(&policy);
        // Configurable actions are never subject to the policy.
        assert_eq!(
            options,
            vec![
                ("publish".to_string(), "Publish".to_string()),
                ("#retitle".to_string(), "Change title…".to_string()),
            ]
        );
    }

    #[test]
    fn test_exclude_policy_removes_listed_direct_actions() {
        let policy = DisplayPolicy::exclude(vec!["publish".to_string()]);
        let options = catalog().display_options(&policy);
        assert_eq!(
            options,
            vec![
                ("unpublish".to_string(), "Unpublish".to_string()),
                ("#retitle".to_string(), "Change title…".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_direct_and_configurable() {
        let catalog = catalog();

        assert!(matches!(
            catalog.resolve("publish"),
            Some(ActionChoice::Direct(_))
        ));
        assert!(matches!(
            catalog.resolve("#retitle"),
            Some(ActionChoice::Configurable(_))
        ));

        // Variants do not leak across the prefix boundary.
        assert!(catalog.resolve("retitle").is_none());
        assert!(catalog.resolve("#publish").is_none());
        assert!(catalog.resolve("delete").is_none());
    }

    #[test]
    fn test_catalog_scoped_to_resource_type() {
        let registry = ActionRegistry::new();
        registry.register(TestAction::direct("publish", "Publish")).unwrap();

        let catalog = ActionCatalog::build(&registry, "invoice");
        assert!(catalog.is_empty());
    }
}
