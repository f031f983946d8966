//! Display configuration for the action menu.
//!
//! These options are handed to the rendering layer unchanged. Nothing in this
//! workspace interprets them beyond defaults and (de)serialization.

use serde::{Deserialize, Serialize};

/// How contextual actions are laid out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyling {
    /// Featured actions rendered inline next to the menu trigger.
    #[default]
    Inline,
    /// All actions collapsed into a dropdown.
    Dropdown,
}

/// What a featured action button shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextIcon {
    #[default]
    Text,
    Icon,
    TextAndIcon,
}

/// Options for contextual actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextualActionDisplayConfig {
    /// Number of featured contextual actions shown outside the menu.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    #[serde(default)]
    pub styling: ActionStyling,

    #[serde(default)]
    pub button_contents: TextIcon,
}

fn default_featured_count() -> usize {
    2
}

impl Default for ContextualActionDisplayConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
            styling: ActionStyling::Inline,
            button_contents: TextIcon::Text,
        }
    }
}

/// Top-level display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDisplayConfig {
    #[serde(default)]
    pub contextual: ContextualActionDisplayConfig,
}
