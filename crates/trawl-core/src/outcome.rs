//! Outcome value types surfaced to the orchestration layer.

use serde::{Deserialize, Serialize};

/// Where to send the actor next instead of a completion message.
///
/// Emitted for configurable actions (parameter collection) and for direct
/// actions that declare a confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectDescriptor {
    /// Target route.
    pub route: String,

    /// Route to return to afterwards, carried over from the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl RedirectDescriptor {
    /// Create a redirect with no return destination.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            destination: None,
        }
    }

    /// Attach the route to return to afterwards.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Status,
    Warning,
    Error,
}

/// A user-visible message accumulated during a submission or batch run.
///
/// Per-item conditions (missing items, access rejections) become
/// diagnostics rather than errors; the submission proceeds with whatever
/// subset remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// A neutral status message.
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Status,
            message: message.into(),
        }
    }

    /// A warning: something was skipped but the submission went on.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// An error scoped to one item or unit.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Declarative description of a configurable action's parameter form.
///
/// Returning one from an action marks it configurable; the parameter
/// collection step renders the fields and stores the gathered values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub fields: Vec<ParameterField>,
}

impl ParameterSchema {
    /// Schema with a single field, the common case.
    pub fn single(field: ParameterField) -> Self {
        Self {
            fields: vec![field],
        }
    }
}

/// One input field of a parameter form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterField {
    /// Machine name of the field.
    pub name: String,

    /// Display label.
    pub label: String,

    /// Whether the field must be filled before execution.
    #[serde(default)]
    pub required: bool,
}

impl ParameterField {
    /// Create a required field.
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: true,
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
        }
    }
}
