//! Quick search API.
//!
//! This crate provides the moving parts around an action catalog:
//! - `ActionSearchProvider` exposing a catalog to quick search
//! - `QuickSearchService`, the shared provider registry
//! - Selection state that forwards every write to its provider
//! - A chord keybinder with an overridable stop callback
//! - `ActionMenuSearch`, the component that mounts all of the above

pub mod catalog;
pub mod component;
pub mod error;
pub mod keymap;
pub mod provider;
pub mod registry;
pub mod selection;
pub mod spotlight;

// Re-export commonly used types
pub use catalog::{example_catalog, initial_selection, HandlerData, PausableRecord, Record};
pub use component::ActionMenuSearch;
pub use error::{KeymapError, ProviderError, ProviderResult};
pub use keymap::{
    command_aware_stop_callback, default_stop_callback, Chord, EventTarget, KeyCallback,
    KeyDispatch, KeyEvent, Keybinder, Modifiers, Platform, StopCallback,
};
pub use provider::{ActionSearchProvider, ProviderId, SearchProvider, SearchResult};
pub use registry::{QuickSearchService, SearchSection};
pub use selection::{SelectionSink, SelectionState};
pub use spotlight::{SpotlightFlag, SpotlightState};

// Re-export quicksearch_core types for convenience
pub use quicksearch_core::{ActionItem, ActionPath, ActionType, AppConfig, Translator};
