//! Action menu search component.
//!
//! Ties the pieces together for one host component:
//!
//! ```text
//! mount()                                   unmount()
//!   │                                          │
//!   ├─► Keybinder (command-aware stop)         ├─► drop Keybinder
//!   │     └─► "mod+." ─► SpotlightFlag         │
//!   ├─► provider.actions / selection / name    │
//!   └─► QuickSearchService::register_provider  └─► unregister_provider (same Arc)
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use quicksearch_core::{
    ActionDisplayConfig, ActionItem, AppConfig, ConfigError, Translator,
    DEFAULT_ACTION_SEARCH_SECTION_HEADER_PREFIX,
};

use crate::catalog::{example_catalog, HandlerData, PausableRecord};
use crate::keymap::{command_aware_stop_callback, KeyDispatch, KeyEvent, Keybinder, Platform};
use crate::provider::{ActionSearchProvider, SearchProvider};
use crate::registry::QuickSearchService;
use crate::selection::SelectionState;
use crate::spotlight::SpotlightFlag;

/// Host component for the action catalog and its spotlight shortcut.
pub struct ActionMenuSearch<R, T> {
    service: Arc<QuickSearchService>,
    translator: Arc<dyn Translator>,
    kbd_shortcut: String,
    provider_name: String,
    platform: Platform,
    display_config: ActionDisplayConfig,
    spotlight: SpotlightFlag,
    actions: Vec<ActionItem<R, T>>,
    selection: SelectionState<R>,
    provider: Arc<ActionSearchProvider<R, T>>,
    /// Same allocation as `provider`, as the registry stores it.
    handle: Arc<dyn SearchProvider>,
    keybinder: Option<Keybinder>,
}

impl<R, T> ActionMenuSearch<R, T>
where
    R: PausableRecord,
    T: From<HandlerData> + Serialize + Clone + Send + Sync + 'static,
{
    /// Build the component. Nothing is registered until [`Self::mount`].
    pub fn new(
        service: Arc<QuickSearchService>,
        translator: Arc<dyn Translator>,
        config: &AppConfig,
        initial_selection: Vec<R>,
    ) -> Self {
        let provider = Arc::new(ActionSearchProvider::new(translator.clone()));
        let selection = SelectionState::new(initial_selection);
        selection.link(&provider);
        let actions = example_catalog(&selection);
        let handle: Arc<dyn SearchProvider> = provider.clone();

        Self {
            service,
            translator,
            kbd_shortcut: config.hotkey.spotlight.clone(),
            provider_name: config.search.provider_name.clone(),
            platform: Platform::current(),
            display_config: config.display.clone(),
            spotlight: SpotlightFlag::new(),
            actions,
            selection,
            provider,
            handle,
            keybinder: None,
        }
    }

    /// Resolve `mod` for `platform` instead of the host platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Bind the shortcut, fill the provider and register it.
    ///
    /// Mounting twice is a no-op. Fails only if the configured chord is invalid.
    pub fn mount(&mut self) -> Result<(), ConfigError> {
        if self.keybinder.is_some() {
            tracing::debug!("Action menu search already mounted");
            return Ok(());
        }

        let keybinder = Keybinder::with_platform(self.platform);
        let original = keybinder.stop_callback();
        keybinder.set_stop_callback(command_aware_stop_callback(original));

        let spotlight = self.spotlight.clone();
        keybinder
            .bind(&self.kbd_shortcut, move |_, _| {
                spotlight.request_open();
                false
            })
            .map_err(|e| ConfigError::InvalidHotkey(e.to_string()))?;

        self.provider.set_actions(self.actions.clone());
        self.provider
            .set_selected_entities(&self.selection.selected_entities());
        self.provider.set_section_name(self.translator.translate(
            DEFAULT_ACTION_SEARCH_SECTION_HEADER_PREFIX,
            &[HashMap::from([(
                "actionProviderName".to_string(),
                self.provider_name.clone(),
            )])],
        ));

        self.service.register_provider(self.provider_handle());
        self.keybinder = Some(keybinder);
        tracing::info!(
            "Action menu search mounted (shortcut: {}, provider: {})",
            self.kbd_shortcut,
            self.provider.id()
        );
        Ok(())
    }

    /// Unregister the provider and drop the shortcut.
    ///
    /// Returns `true` if the provider was registered. Safe to repeat.
    pub fn unmount(&mut self) -> bool {
        self.release()
    }

    pub fn is_mounted(&self) -> bool {
        self.keybinder.is_some()
    }

    /// Feed a key event to the shortcut. Unmounted components ignore it.
    pub fn handle_key(&self, event: &KeyEvent) -> KeyDispatch {
        match &self.keybinder {
            Some(keybinder) => keybinder.handle(event),
            None => KeyDispatch::default(),
        }
    }

    pub fn spotlight(&self) -> &SpotlightFlag {
        &self.spotlight
    }

    pub fn spotlight_open(&self) -> bool {
        self.spotlight.is_open()
    }

    pub fn selected_entities(&self) -> Vec<R> {
        self.selection.selected_entities()
    }

    /// Copy `records` in and forward them to the provider.
    pub fn set_selected_entities(&self, records: &[R]) {
        self.selection.set_selected_entities(records);
    }

    pub fn actions(&self) -> &[ActionItem<R, T>] {
        &self.actions
    }

    pub fn provider(&self) -> &Arc<ActionSearchProvider<R, T>> {
        &self.provider
    }

    /// The provider as the registry sees it.
    pub fn provider_handle(&self) -> Arc<dyn SearchProvider> {
        self.handle.clone()
    }

    pub fn display_config(&self) -> &ActionDisplayConfig {
        &self.display_config
    }

    pub fn kbd_shortcut(&self) -> &str {
        &self.kbd_shortcut
    }
}

impl<R, T> ActionMenuSearch<R, T> {
    fn release(&mut self) -> bool {
        self.keybinder = None;
        let removed = self.service.unregister_provider(&self.handle);
        if removed {
            tracing::info!("Action menu search unmounted");
        }
        removed
    }
}

impl<R, T> Drop for ActionMenuSearch<R, T> {
    fn drop(&mut self) {
        self.release();
    }
}
