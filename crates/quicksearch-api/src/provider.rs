//! Action search provider.
//!
//! An [`ActionSearchProvider`] exposes an action catalog to the quick search
//! registry. The host component fills its three fields (actions, selection,
//! section name) and the overlay queries it through [`SearchProvider`].
//!
//! ## Invocation
//!
//! Handlers run on a copy of the provider's selection with no lock held, so a
//! handler may write the selection back (which lands here again through
//! [`SelectionSink`]).

use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use quicksearch_core::{
    available_leaves, filter_available, find_action, ActionItem, ActionPath, ActionType,
    Translator,
};

use crate::error::{ProviderError, ProviderResult};
use crate::selection::SelectionSink;

/// Stable identity of a provider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProviderId(Uuid);

impl ProviderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProviderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One matching action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub provider: ProviderId,
    pub path: ActionPath,
    pub text: String,
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// What the quick search registry needs from a provider.
pub trait SearchProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Header shown above this provider's results.
    fn section_name(&self) -> String;

    /// Invocable actions whose label contains `query` (case-insensitive).
    /// An empty query matches everything.
    fn search(&self, query: &str) -> Vec<SearchResult>;

    /// Activate the action at `path` against the current selection.
    fn invoke(&self, path: &ActionPath) -> ProviderResult<()>;
}

/// Search provider backed by an [`ActionItem`] tree.
pub struct ActionSearchProvider<R, T> {
    id: ProviderId,
    translator: Arc<dyn Translator>,
    actions: RwLock<Arc<Vec<ActionItem<R, T>>>>,
    selected_entities: RwLock<Vec<R>>,
    section_name: RwLock<String>,
}

impl<R, T> ActionSearchProvider<R, T>
where
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty provider.
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            id: ProviderId::new(),
            translator,
            actions: RwLock::new(Arc::new(Vec::new())),
            selected_entities: RwLock::new(Vec::new()),
            section_name: RwLock::new(String::new()),
        }
    }

    /// Snapshot of the catalog.
    pub fn actions(&self) -> Arc<Vec<ActionItem<R, T>>> {
        self.actions.read().clone()
    }

    pub fn set_actions(&self, actions: Vec<ActionItem<R, T>>) {
        tracing::debug!("Provider {} now has {} top-level actions", self.id, actions.len());
        *self.actions.write() = Arc::new(actions);
    }

    pub fn selected_entities(&self) -> Vec<R> {
        self.selected_entities.read().clone()
    }

    /// Store a copy of `records`.
    pub fn set_selected_entities(&self, records: &[R]) {
        *self.selected_entities.write() = records.to_vec();
    }

    pub fn set_section_name(&self, name: impl Into<String>) {
        *self.section_name.write() = name.into();
    }

    /// The catalog filtered against the current selection.
    pub fn available_actions(&self) -> Vec<ActionItem<R, T>> {
        let records = self.selected_entities();
        filter_available(&self.actions(), &records)
    }

    /// Whether the leaf at `path` would be offered right now.
    pub fn is_available(&self, path: &ActionPath) -> bool {
        let records = self.selected_entities();
        let actions = self.actions();
        available_leaves(&actions, &records)
            .iter()
            .any(|(leaf_path, _)| leaf_path == path)
    }
}

impl<R, T> SearchProvider for ActionSearchProvider<R, T>
where
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> ProviderId {
        self.id
    }

    fn section_name(&self) -> String {
        self.section_name.read().clone()
    }

    fn search(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        let records = self.selected_entities();
        let actions = self.actions();

        available_leaves(&actions, &records)
            .into_iter()
            .filter(|(_, action)| action.handler.is_some())
            .filter_map(|(path, action)| {
                let text = action.display_text(self.translator.as_ref());
                if !needle.is_empty() && !text.to_lowercase().contains(&needle) {
                    return None;
                }
                Some(SearchResult {
                    provider: self.id,
                    path,
                    text,
                    action_type: action.effective_type(),
                    class: action.class.clone(),
                })
            })
            .collect()
    }

    fn invoke(&self, path: &ActionPath) -> ProviderResult<()> {
        let actions = self.actions();
        let action =
            find_action(&actions, path).ok_or_else(|| ProviderError::ActionNotFound(path.clone()))?;

        if action.handler.is_none() {
            return Err(ProviderError::NotInvocable(action.text_key.clone()));
        }

        let mut records = self.selected_entities();
        if !self.is_available(path) {
            return Err(ProviderError::Unavailable(action.text_key.clone()));
        }

        tracing::debug!("Invoking '{}' ({}) with {} records", action.text_key, path, records.len());
        action.invoke(&mut records);
        Ok(())
    }
}

impl<R, T> SelectionSink<R> for ActionSearchProvider<R, T>
where
    R: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn receive_selection(&self, records: Vec<R>) {
        *self.selected_entities.write() = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksearch_core::MapTranslator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Item = ActionItem<u32, ()>;

    fn provider() -> ActionSearchProvider<u32, ()> {
        let translator = MapTranslator::new().with_entry("files.open", "Open File");
        ActionSearchProvider::new(Arc::new(translator))
    }

    #[test]
    fn test_fields_round_trip() {
        let provider = provider();
        provider.set_actions(vec![Item::new("a"), Item::new("b")]);
        provider.set_selected_entities(&[1, 2]);
        provider.set_section_name("Section");

        assert_eq!(provider.actions().len(), 2);
        assert_eq!(provider.selected_entities(), vec![1, 2]);
        assert_eq!(provider.section_name(), "Section");
    }

    #[test]
    fn test_search_filters_by_availability_and_query() {
        let provider = provider();
        provider.set_actions(vec![
            Item::new("files.open").with_handler(|_, _| {}),
            Item::new("Delete")
                .translatable(false)
                .with_availability(|rec, _| !rec.is_empty())
                .with_handler(|_, _| {}),
            Item::new("Heading without handler"),
            Item::group(
                "group",
                vec![Item::new("Open nested")
                    .translatable(false)
                    .with_action_type(ActionType::StaticFeatured)
                    .with_class("nested")
                    .with_handler(|_, _| {})],
            ),
        ]);

        let all: Vec<String> = provider.search("").into_iter().map(|r| r.text).collect();
        assert_eq!(all, vec!["Open File", "Open nested"]);

        provider.set_selected_entities(&[1]);
        let open = provider.search("  OPEN ");
        assert_eq!(open.len(), 2);
        assert_eq!(open[1].path, ActionPath(vec![3, 0]));
        assert_eq!(open[1].action_type, ActionType::StaticFeatured);
        assert_eq!(open[1].class.as_deref(), Some("nested"));
        assert_eq!(open[1].provider, provider.id());

        assert_eq!(provider.search("delete").len(), 1);
    }

    #[test]
    fn test_invoke_runs_handler_on_copy() {
        let provider = provider();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        provider.set_actions(vec![Item::new("bump").with_handler(move |rec, _| {
            rec[0] += 1;
            seen.fetch_add(1, Ordering::SeqCst);
        })]);
        provider.set_selected_entities(&[1]);

        provider.invoke(&ActionPath::root(0)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Without a write-back the provider's selection is untouched.
        assert_eq!(provider.selected_entities(), vec![1]);
    }

    #[test]
    fn test_invoke_errors() {
        let provider = provider();
        provider.set_actions(vec![
            Item::new("no handler"),
            Item::new("never")
                .with_availability(|_, _| false)
                .with_handler(|_, _| {}),
        ]);

        assert!(matches!(
            provider.invoke(&ActionPath::root(7)),
            Err(ProviderError::ActionNotFound(_))
        ));
        assert!(matches!(
            provider.invoke(&ActionPath::root(0)),
            Err(ProviderError::NotInvocable(_))
        ));
        assert!(matches!(
            provider.invoke(&ActionPath::root(1)),
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[test]
    fn test_available_actions_follow_selection() {
        use crate::catalog::{example_catalog, initial_selection, HandlerData, Record};
        use crate::selection::SelectionState;

        let provider: Arc<ActionSearchProvider<Record, HandlerData>> =
            Arc::new(ActionSearchProvider::new(Arc::new(MapTranslator::new())));
        let selection = SelectionState::new(initial_selection());
        selection.link(&provider);
        provider.set_actions(example_catalog(&selection));
        provider.set_selected_entities(&selection.selected_entities());

        let children = |actions: &[ActionItem<Record, HandlerData>], key: &str| {
            actions
                .iter()
                .find(|a| a.text_key == key)
                .and_then(|a| a.children.as_ref())
                .map(|c| c.iter().map(|a| a.text_key.clone()).collect::<Vec<_>>())
        };

        let available = provider.available_actions();
        let keys: Vec<&str> = available.iter().map(|a| a.text_key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "Static Featured 1",
                "Static 1",
                "Contextual 1",
                "Contextual featured",
                "power.actions",
                "No children action",
            ]
        );
        assert_eq!(
            children(available.as_slice(), "power.actions"),
            Some(vec!["Stop".to_string()])
        );
        assert_eq!(
            children(available.as_slice(), "No children action"),
            Some(Vec::new())
        );

        provider.invoke(&ActionPath(vec![4, 1])).unwrap();

        let available = provider.available_actions();
        assert_eq!(
            children(available.as_slice(), "power.actions"),
            Some(vec!["Start".to_string()])
        );
        assert_eq!(
            selection.selected_entities(),
            vec![Record::new("Selected entity", true)]
        );
    }

    #[test]
    fn test_receive_selection() {
        let provider = provider();
        provider.receive_selection(vec![4, 5]);
        assert_eq!(provider.selected_entities(), vec![4, 5]);
    }
}
