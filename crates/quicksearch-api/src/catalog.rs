//! The example action catalog.
//!
//! Six top-level entries covering every [`ActionType`], a handler payload, a
//! power submenu whose handlers write the selection back, and an empty group.

use serde::{Deserialize, Serialize};

use quicksearch_core::{ActionItem, ActionType};

use crate::selection::SelectionState;

/// Records the power actions can start and stop.
pub trait PausableRecord: Clone + Send + Sync + 'static {
    fn value(&self) -> &str;
    fn is_paused(&self) -> bool;
    fn set_paused(&mut self, paused: bool);
}

/// The record shape used by the demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub value: String,
    pub paused: bool,
}

impl Record {
    pub fn new(value: impl Into<String>, paused: bool) -> Self {
        Self {
            value: value.into(),
            paused,
        }
    }
}

impl PausableRecord for Record {
    fn value(&self) -> &str {
        &self.value
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

/// Payload attached to "Static 1".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerData {
    pub foo: String,
    pub bar: String,
}

impl Default for HandlerData {
    fn default() -> Self {
        Self {
            foo: "foo".to_string(),
            bar: "bar".to_string(),
        }
    }
}

/// The selection a freshly built component starts with.
pub fn initial_selection() -> Vec<Record> {
    vec![Record::new("Selected entity", false)]
}

fn single_with_paused<R: PausableRecord>(records: &[R], paused: bool) -> bool {
    matches!(records, [only] if only.is_paused() == paused)
}

fn set_power<R: PausableRecord>(records: &mut [R], paused: bool, selection: &SelectionState<R>) {
    if let Some(first) = records.first_mut() {
        if paused {
            tracing::info!("Stopping {}", first.value());
        } else {
            tracing::info!("Starting {}", first.value());
        }
        first.set_paused(paused);
    }
    selection.set_selected_entities(records);
}

/// Build the catalog. Power handlers write their result into `selection`.
pub fn example_catalog<R, T>(selection: &SelectionState<R>) -> Vec<ActionItem<R, T>>
where
    R: PausableRecord,
    T: From<HandlerData> + Serialize + Clone + Send + Sync + 'static,
{
    let start_selection = selection.clone();
    let stop_selection = selection.clone();

    vec![
        ActionItem::new("Static Featured 1")
            .translatable(false)
            .with_action_type(ActionType::StaticFeatured)
            .with_availability(|_, _| true)
            .with_handler(|_, _| tracing::info!("Static Featured 1")),
        ActionItem::new("Static 1")
            .translatable(false)
            .with_action_type(ActionType::Static)
            .with_handler_data(T::from(HandlerData::default()))
            .with_availability(|_, _| true)
            .with_handler(|_, data: Option<&T>| {
                let json = data
                    .and_then(|d| serde_json::to_string(d).ok())
                    .unwrap_or_default();
                tracing::info!("Static 1 with custom handler data: {}", json);
            }),
        ActionItem::new("Contextual 1")
            .translatable(false)
            .with_availability(|records: &[R], _| records.len() == 1)
            .with_handler(|_, _| tracing::info!("Contextual 1")),
        ActionItem::new("Contextual featured")
            .translatable(false)
            .with_action_type(ActionType::ContextualFeatured)
            .with_handler(|_, _| tracing::info!("Contextual featured")),
        ActionItem::group(
            "power.actions",
            vec![
                ActionItem::new("Start")
                    .translatable(false)
                    .with_action_type(ActionType::ContextualFeatured)
                    .with_class("start")
                    .with_availability(|records: &[R], _| single_with_paused(records, true))
                    .with_handler(move |records, _| set_power(records, false, &start_selection)),
                ActionItem::new("Stop")
                    .translatable(false)
                    .with_action_type(ActionType::ContextualFeatured)
                    .with_class("stop")
                    .with_availability(|records: &[R], _| single_with_paused(records, false))
                    .with_handler(move |records, _| set_power(records, true, &stop_selection)),
            ],
        ),
        ActionItem::group("No children action", vec![]).with_action_type(ActionType::Contextual),
    ]
}
