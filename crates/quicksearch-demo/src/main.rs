//! Quick search demo - main entry point.
//!
//! Mounts the example action menu against a fresh registry, presses the
//! spotlight shortcut, runs a search, stops the selected entity and unmounts.

use std::sync::Arc;

use quicksearch_api::{
    initial_selection, ActionMenuSearch, EventTarget, HandlerData, KeyEvent, Modifiers, Platform,
    QuickSearchService, Record, SearchSection,
};
use quicksearch_core::{AppConfig, MapTranslator};

// =============================================================================
// Configuration
// =============================================================================

/// Load config.toml, falling back to defaults when it can't be read.
fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Built-in strings plus any overrides from the config file.
fn build_translator(config: &AppConfig) -> MapTranslator {
    let mut translator = MapTranslator::with_defaults();
    translator.extend(config.translations.clone());
    translator
}

// =============================================================================
// Output
// =============================================================================

fn print_sections(label: &str, sections: &[SearchSection]) {
    println!("{}:", label);
    if sections.is_empty() {
        println!("  (no results)");
    }
    for section in sections {
        println!("  [{}]", section.name);
        for result in &section.results {
            println!("    {} ({:?}) at {}", result.text, result.action_type, result.path);
        }
    }
}

fn print_selection(records: &[Record]) {
    for record in records {
        println!("  {} (paused: {})", record.value, record.paused);
    }
}

/// The key event the configured shortcut expects on this platform.
fn shortcut_event(platform: Platform) -> KeyEvent {
    let modifiers = match platform {
        Platform::MacOs => Modifiers::META,
        Platform::Other => Modifiers::CTRL,
    };
    KeyEvent::new(".", modifiers, EventTarget::body())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Quick search demo starting...");

    let config = load_config();
    let translator = Arc::new(build_translator(&config));
    let service = Arc::new(QuickSearchService::new());

    let mut component: ActionMenuSearch<Record, HandlerData> =
        ActionMenuSearch::new(service.clone(), translator, &config, initial_selection());

    if let Err(e) = component.mount() {
        tracing::error!("Failed to mount action menu search: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let dispatch = component.handle_key(&shortcut_event(Platform::current()));
    println!(
        "Pressed {}: spotlight open = {} ({} callbacks)",
        component.kbd_shortcut(),
        component.spotlight_open(),
        dispatch.fired
    );

    println!("Selection:");
    print_selection(&component.selected_entities());
    print_sections("All actions", &service.search(""));

    let stop = service
        .search("stop")
        .into_iter()
        .flat_map(|section| section.results)
        .next();
    match stop {
        Some(result) => {
            if let Err(e) = service.activate(&result) {
                tracing::error!("Failed to run '{}': {}", result.text, e);
            }
        }
        None => tracing::warn!("No 'Stop' action available"),
    }

    println!("Selection after Stop:");
    print_selection(&component.selected_entities());
    print_sections("Matching 'st'", &service.search("st"));

    component.spotlight().close();
    component.unmount();
    tracing::info!("Registered providers left: {}", service.provider_count());
}
