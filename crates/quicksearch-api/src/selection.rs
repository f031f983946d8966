//! Selection state.
//!
//! Every write stores a fresh copy of the caller's records and forwards that
//! copy to the linked provider before returning, so readers never observe a
//! stale selection and nobody shares a buffer with the caller.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Receives selection updates.
pub trait SelectionSink<R>: Send + Sync {
    fn receive_selection(&self, records: Vec<R>);
}

/// Shared selection handle.
///
/// Clones share the same records and the same sink. The sink is held weakly:
/// the provider owns handlers that own this state.
pub struct SelectionState<R> {
    records: Arc<RwLock<Vec<R>>>,
    sink: Arc<RwLock<Option<Weak<dyn SelectionSink<R>>>>>,
}

impl<R: Clone + Send + Sync + 'static> SelectionState<R> {
    pub fn new(initial: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(initial)),
            sink: Arc::new(RwLock::new(None)),
        }
    }

    /// Forward future writes to `sink`.
    pub fn link<S: SelectionSink<R> + 'static>(&self, sink: &Arc<S>) {
        let sink: Arc<dyn SelectionSink<R>> = sink.clone();
        *self.sink.write() = Some(Arc::downgrade(&sink));
    }

    /// Replace the selection with a copy of `records` and forward it.
    pub fn set_selected_entities(&self, records: &[R]) {
        let copy = records.to_vec();
        *self.records.write() = copy.clone();

        let sink = self.sink.read().as_ref().and_then(Weak::upgrade);
        match sink {
            Some(sink) => sink.receive_selection(copy),
            None => tracing::debug!("Selection updated with no linked provider"),
        }
    }

    /// Copy of the current selection.
    pub fn selected_entities(&self) -> Vec<R> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<R> Clone for SelectionState<R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            sink: self.sink.clone(),
        }
    }
}
