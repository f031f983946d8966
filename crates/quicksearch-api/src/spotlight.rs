//! Spotlight open state.
//!
//! The keybinding only ever requests the overlay to open. Closing belongs to
//! the overlay, which calls [`SpotlightFlag::close`] when it is dismissed.

use parking_lot::RwLock;
use std::sync::Arc;

/// Whether the spotlight overlay has been asked to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpotlightState {
    #[default]
    Idle,
    RequestedOpen,
}

/// Shared handle to the spotlight state.
///
/// Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SpotlightFlag {
    state: Arc<RwLock<SpotlightState>>,
}

impl SpotlightFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SpotlightState {
        *self.state.read()
    }

    pub fn is_open(&self) -> bool {
        self.state() == SpotlightState::RequestedOpen
    }

    /// Move to `RequestedOpen`. Already open stays open.
    pub fn request_open(&self) {
        let mut state = self.state.write();
        if *state == SpotlightState::Idle {
            tracing::debug!("Spotlight open requested");
        }
        *state = SpotlightState::RequestedOpen;
    }

    /// Called by the overlay once it has been dismissed.
    pub fn close(&self) {
        *self.state.write() = SpotlightState::Idle;
    }
}
