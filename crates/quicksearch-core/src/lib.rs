//! Core types for quick search.
//!
//! This crate contains the data structures shared by every quick search crate:
//! - The generic action tree (`ActionItem`) and its classification
//! - Display configuration consumed by the rendering layer
//! - The translation seam
//! - Configuration and error types

mod action;
mod config;
mod display;
mod error;
mod i18n;

pub use action::{
    available_leaves, filter_available, find_action, flatten_leaves, ActionItem, ActionPath,
    ActionType, Availability, Handler,
};
pub use config::{config_dir, config_path, AppConfig, HotkeyConfig, SearchConfig};
pub use display::{ActionDisplayConfig, ActionStyling, ContextualActionDisplayConfig, TextIcon};
pub use error::ConfigError;
pub use i18n::{
    MapTranslator, Substitution, Translator, DEFAULT_ACTION_SEARCH_SECTION_HEADER_PREFIX,
};
