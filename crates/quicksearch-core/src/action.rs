//! The action tree.
//!
//! An action catalog is an ordered tree of [`ActionItem`] nodes. Leaves carry a
//! handler, groups carry children. Both may carry an availability predicate
//! evaluated against the current selection.
//!
//! `R` is the record shape of the selection, `T` is the caller-defined handler
//! payload. The two are independent.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::i18n::Translator;

/// Grouping and prominence of an action in the rendered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Static,
    StaticFeatured,
    Contextual,
    ContextualFeatured,
}

impl ActionType {
    /// Featured actions are shown outside the menu.
    pub fn is_featured(self) -> bool {
        matches!(self, Self::StaticFeatured | Self::ContextualFeatured)
    }

    /// Contextual actions depend on the selection.
    pub fn is_contextual(self) -> bool {
        matches!(self, Self::Contextual | Self::ContextualFeatured)
    }
}

/// Predicate deciding whether an action is shown for the current selection.
pub type Availability<R, T> = Arc<dyn Fn(&[R], Option<&T>) -> bool + Send + Sync>;

/// Callback run when an action is activated.
pub type Handler<R, T> = Arc<dyn Fn(&mut [R], Option<&T>) + Send + Sync>;

/// Position of a node in the tree: child indices from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionPath(pub Vec<usize>);

impl ActionPath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<usize>> for ActionPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// A node in the action tree.
pub struct ActionItem<R, T> {
    /// Display label or i18n key.
    pub text_key: String,

    /// Resolve `text_key` through the translator.
    pub is_translatable: bool,

    /// `None` classifies as [`ActionType::Contextual`].
    pub action_type: Option<ActionType>,

    /// `None` means always available.
    pub availability: Option<Availability<R, T>>,

    pub handler: Option<Handler<R, T>>,

    /// Passed unchanged to `availability` and `handler`.
    pub handler_data: Option<T>,

    /// Submenu. `Some(vec![])` is an empty group and stays that way.
    pub children: Option<Vec<ActionItem<R, T>>>,

    /// Styling hook for the renderer.
    pub class: Option<String>,
}

impl<R, T> ActionItem<R, T> {
    /// Create a leaf with no handler.
    pub fn new(text_key: impl Into<String>) -> Self {
        Self {
            text_key: text_key.into(),
            is_translatable: true,
            action_type: None,
            availability: None,
            handler: None,
            handler_data: None,
            children: None,
            class: None,
        }
    }

    /// Create a group node.
    pub fn group(text_key: impl Into<String>, children: Vec<ActionItem<R, T>>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(text_key)
        }
    }

    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    pub fn with_availability<F>(mut self, availability: F) -> Self
    where
        F: Fn(&[R], Option<&T>) -> bool + Send + Sync + 'static,
    {
        self.availability = Some(Arc::new(availability));
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut [R], Option<&T>) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn with_handler_data(mut self, data: T) -> Self {
        self.handler_data = Some(data);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn translatable(mut self, is_translatable: bool) -> Self {
        self.is_translatable = is_translatable;
        self
    }

    /// A node with a children sequence, even an empty one.
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    pub fn effective_type(&self) -> ActionType {
        self.action_type.unwrap_or(ActionType::Contextual)
    }

    /// Evaluate the availability predicate against `records`.
    pub fn is_available(&self, records: &[R]) -> bool {
        match &self.availability {
            Some(availability) => availability(records, self.handler_data.as_ref()),
            None => true,
        }
    }

    /// Run the handler, if any. Returns whether a handler ran.
    pub fn invoke(&self, records: &mut [R]) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(records, self.handler_data.as_ref());
                true
            }
            None => false,
        }
    }

    /// Label as it should be shown to the user.
    pub fn display_text(&self, translator: &dyn Translator) -> String {
        if self.is_translatable {
            translator.translate(&self.text_key, &[])
        } else {
            self.text_key.clone()
        }
    }
}

impl<R, T: Clone> Clone for ActionItem<R, T> {
    fn clone(&self) -> Self {
        Self {
            text_key: self.text_key.clone(),
            is_translatable: self.is_translatable,
            action_type: self.action_type,
            availability: self.availability.clone(),
            handler: self.handler.clone(),
            handler_data: self.handler_data.clone(),
            children: self.children.clone(),
            class: self.class.clone(),
        }
    }
}

impl<R, T> fmt::Debug for ActionItem<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("text_key", &self.text_key)
            .field("is_translatable", &self.is_translatable)
            .field("action_type", &self.action_type)
            .field("has_availability", &self.availability.is_some())
            .field("has_handler", &self.handler.is_some())
            .field("has_handler_data", &self.handler_data.is_some())
            .field("children", &self.children)
            .field("class", &self.class)
            .finish()
    }
}

/// Keep the nodes available for `records`, recursing into groups.
///
/// A group that passes its own predicate is kept even when none of its
/// children do; the renderer decides how empty groups look.
pub fn filter_available<R, T: Clone>(
    actions: &[ActionItem<R, T>],
    records: &[R],
) -> Vec<ActionItem<R, T>> {
    actions
        .iter()
        .filter(|action| action.is_available(records))
        .map(|action| {
            let mut kept = action.clone();
            if let Some(children) = &action.children {
                kept.children = Some(filter_available(children, records));
            }
            kept
        })
        .collect()
}

/// Depth-first list of leaves (nodes without a children sequence).
pub fn flatten_leaves<R, T>(actions: &[ActionItem<R, T>]) -> Vec<(ActionPath, &ActionItem<R, T>)> {
    fn walk<'a, R, T>(
        actions: &'a [ActionItem<R, T>],
        parent: Option<&ActionPath>,
        out: &mut Vec<(ActionPath, &'a ActionItem<R, T>)>,
    ) {
        for (index, action) in actions.iter().enumerate() {
            let path = match parent {
                Some(parent) => parent.child(index),
                None => ActionPath::root(index),
            };
            match &action.children {
                Some(children) => walk(children, Some(&path), out),
                None => out.push((path, action)),
            }
        }
    }

    let mut out = Vec::new();
    walk(actions, None, &mut out);
    out
}

/// Available leaves in depth-first order, keyed by their path in `actions`.
///
/// Children of an unavailable group are skipped along with the group.
pub fn available_leaves<'a, R, T>(
    actions: &'a [ActionItem<R, T>],
    records: &[R],
) -> Vec<(ActionPath, &'a ActionItem<R, T>)> {
    fn walk<'a, R, T>(
        actions: &'a [ActionItem<R, T>],
        records: &[R],
        parent: Option<&ActionPath>,
        out: &mut Vec<(ActionPath, &'a ActionItem<R, T>)>,
    ) {
        for (index, action) in actions.iter().enumerate() {
            if !action.is_available(records) {
                continue;
            }
            let path = match parent {
                Some(parent) => parent.child(index),
                None => ActionPath::root(index),
            };
            match &action.children {
                Some(children) => walk(children, records, Some(&path), out),
                None => out.push((path, action)),
            }
        }
    }

    let mut out = Vec::new();
    walk(actions, records, None, &mut out);
    out
}

/// Look up a node by path.
pub fn find_action<'a, R, T>(
    actions: &'a [ActionItem<R, T>],
    path: &ActionPath,
) -> Option<&'a ActionItem<R, T>> {
    let (first, rest) = path.0.split_first()?;
    let mut node = actions.get(*first)?;
    for index in rest {
        node = node.children.as_ref()?.get(*index)?;
    }
    Some(node)
}
