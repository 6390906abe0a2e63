//! Configuration types.
//!
//! Hosts usually embed a [`BulkConfig`] per listing; a default can also be
//! loaded from a TOML file in the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default title shown above the action select widget.
pub const DEFAULT_ACTION_TITLE: &str = "With selection";

/// Per-listing bulk form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Title shown above the action select widget.
    #[serde(default = "default_action_title")]
    pub action_title: String,

    /// Defer execution to a batch job instead of running synchronously.
    #[serde(default)]
    pub batching: bool,

    /// Which registered actions the listing offers.
    #[serde(default)]
    pub policy: DisplayPolicy,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            action_title: default_action_title(),
            batching: false,
            policy: DisplayPolicy::default(),
        }
    }
}

impl BulkConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the platform config directory, falling back to defaults
    /// when no file exists yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

fn default_action_title() -> String {
    DEFAULT_ACTION_TITLE.to_string()
}

/// Include/exclude allow-list over direct action ids.
///
/// Configurable actions are never subject to the policy; they always pass
/// through the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayPolicy {
    #[serde(default)]
    pub mode: PolicyMode,

    /// Action ids the mode applies to.
    #[serde(default)]
    pub selected: Vec<String>,
}

impl DisplayPolicy {
    /// Offer only the listed actions.
    pub fn include(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode: PolicyMode::Include,
            selected: ids.into_iter().collect(),
        }
    }

    /// Offer everything except the listed actions.
    pub fn exclude(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode: PolicyMode::Exclude,
            selected: ids.into_iter().collect(),
        }
    }

    /// Whether a direct action id survives the policy.
    pub fn allows(&self, id: &str) -> bool {
        let listed = self.selected.iter().any(|selected| selected == id);
        match self.mode {
            PolicyMode::Include => listed,
            PolicyMode::Exclude => !listed,
        }
    }
}

/// Policy mode for [`DisplayPolicy`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Only listed ids survive.
    Include,
    /// Listed ids are removed; unlisted ids always pass.
    #[default]
    Exclude,
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("trawl"))
}

/// Get the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("trawl.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BulkConfig::default();
        assert_eq!(config.action_title, DEFAULT_ACTION_TITLE);
        assert!(!config.batching);
        assert_eq!(config.policy.mode, PolicyMode::Exclude);
        assert!(config.policy.selected.is_empty());
    }

    #[test]
    fn test_policy_allows() {
        let exclude = DisplayPolicy::exclude(vec!["delete".to_string()]);
        assert!(!exclude.allows("delete"));
        assert!(exclude.allows("publish"));

        let include = DisplayPolicy::include(vec!["publish".to_string()]);
        assert!(include.allows("publish"));
        assert!(!include.allows("delete"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
action_title = "With these rows"
batching = true

[policy]
mode = "include"
selected = ["publish", "unpublish"]
"#
        )
        .unwrap();

        let config = BulkConfig::load(file.path()).unwrap();
        assert_eq!(config.action_title, "With these rows");
        assert!(config.batching);
        assert_eq!(config.policy.mode, PolicyMode::Include);
        assert_eq!(config.policy.selected, vec!["publish", "unpublish"]);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: BulkConfig = toml::from_str("batching = true").unwrap();
        assert!(config.batching);
        assert_eq!(config.action_title, DEFAULT_ACTION_TITLE);
        assert!(config.policy.allows("anything"));
    }
}
