//! Keybinding bridge.
//!
//! A [`Keybinder`] maps chords such as `"mod+."` to callbacks and decides,
//! through an overridable stop callback, whether a key event should be
//! swallowed because of where it came from.
//!
//! ## Dispatch
//!
//! ```text
//! KeyEvent ──► matching bindings ──► stop_callback(event, target, chord)
//!                                        │
//!                           true ◄───────┴───────► false
//!                        (suppressed)          callback(event, chord)
//! ```
//!
//! The default stop callback suppresses chords typed into text fields. Use
//! [`command_aware_stop_callback`] to let modifier chords through regardless.

use bitflags::bitflags;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::KeymapError;

// =============================================================================
// Chords
// =============================================================================

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Platform used to resolve the `mod` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// `mod` is command on macOS and ctrl everywhere else.
    fn primary_modifier(self) -> Modifiers {
        match self {
            Self::MacOs => Modifiers::META,
            Self::Other => Modifiers::CTRL,
        }
    }
}

/// A parsed chord: modifiers plus one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: Modifiers,
    pub key: String,
}

impl Chord {
    /// Parse a chord like `"mod+."`, `"command+shift+k"` or `"ctrl+plus"`.
    pub fn parse(spec: &str, platform: Platform) -> Result<Self, KeymapError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(KeymapError::EmptyChord);
        }

        let tokens: Vec<String> = spec.split('+').map(|t| t.trim().to_lowercase()).collect();
        let (key, modifier_tokens) = match tokens.split_last() {
            Some((key, rest)) if !key.is_empty() => (key, rest),
            _ => return Err(KeymapError::MissingKey(spec.to_string())),
        };

        let mut modifiers = Modifiers::empty();
        for token in modifier_tokens {
            modifiers |= match token.as_str() {
                "mod" => platform.primary_modifier(),
                "command" | "cmd" | "meta" => Modifiers::META,
                "ctrl" | "control" => Modifiers::CTRL,
                "alt" | "option" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                _ => {
                    return Err(KeymapError::UnknownModifier {
                        chord: spec.to_string(),
                        modifier: token.clone(),
                    })
                }
            };
        }

        let key = if key == "plus" { "+".to_string() } else { key.clone() };
        Ok(Self { modifiers, key })
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.modifiers == event.modifiers && self.key.eq_ignore_ascii_case(&event.key)
    }
}

// =============================================================================
// Events
// =============================================================================

/// The element a key event originated from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    /// Lowercase tag name, e.g. "input".
    pub tag_name: String,
    pub content_editable: bool,
    pub classes: Vec<String>,
}

impl EventTarget {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn body() -> Self {
        Self::new("body")
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Text entry elements.
    pub fn accepts_text(&self) -> bool {
        self.content_editable || matches!(self.tag_name.as_str(), "input" | "select" | "textarea")
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
    pub target: EventTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers, target: EventTarget) -> Self {
        Self {
            key: key.into(),
            modifiers,
            target,
        }
    }
}

// =============================================================================
// Callbacks
// =============================================================================

/// Decides whether an event should be swallowed: `(event, target, chord)`.
pub type StopCallback = Arc<dyn Fn(&KeyEvent, &EventTarget, &str) -> bool + Send + Sync>;

/// Bound callback. Returning `false` asks the host to prevent the default.
pub type KeyCallback = Arc<dyn Fn(&KeyEvent, &str) -> bool + Send + Sync>;

/// Origin-based suppression.
///
/// Targets carrying the `mousetrap` class always let chords through. Text
/// entry targets swallow them so typed characters reach the field.
pub fn default_stop_callback(_event: &KeyEvent, target: &EventTarget, _chord: &str) -> bool {
    if target.has_class("mousetrap") {
        return false;
    }
    target.accepts_text()
}

/// Chords naming `command` are never suppressed; everything else goes to `original`.
pub fn command_aware_stop_callback(original: StopCallback) -> StopCallback {
    Arc::new(move |event, target, chord| {
        if ["command"].iter().any(|key| chord.contains(key)) {
            return false;
        }
        original(event, target, chord)
    })
}

// =============================================================================
// Keybinder
// =============================================================================

struct Binding {
    spec: String,
    chord: Chord,
    callback: KeyCallback,
}

/// Outcome of [`Keybinder::handle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDispatch {
    /// Callbacks that ran.
    pub fired: usize,
    /// Matching bindings the stop callback swallowed.
    pub suppressed: usize,
    /// At least one callback returned `false`.
    pub prevent_default: bool,
}

impl KeyDispatch {
    pub fn handled(&self) -> bool {
        self.fired > 0
    }
}

/// Chord-to-callback bindings with an overridable stop callback.
pub struct Keybinder {
    platform: Platform,
    bindings: RwLock<Vec<Binding>>,
    stop_callback: RwLock<StopCallback>,
}

impl Keybinder {
    /// Create a keybinder for the current platform.
    pub fn new() -> Self {
        Self::with_platform(Platform::current())
    }

    pub fn with_platform(platform: Platform) -> Self {
        let stop: StopCallback = Arc::new(default_stop_callback);
        Self {
            platform,
            bindings: RwLock::new(Vec::new()),
            stop_callback: RwLock::new(stop),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Bind `spec` to `callback`. Rebinding the same spec replaces it.
    pub fn bind<F>(&self, spec: &str, callback: F) -> Result<(), KeymapError>
    where
        F: Fn(&KeyEvent, &str) -> bool + Send + Sync + 'static,
    {
        let chord = Chord::parse(spec, self.platform)?;
        let binding = Binding {
            spec: spec.to_string(),
            chord,
            callback: Arc::new(callback),
        };

        let mut bindings = self.bindings.write();
        match bindings.iter_mut().find(|b| b.spec == spec) {
            Some(existing) => *existing = binding,
            None => bindings.push(binding),
        }
        tracing::debug!("Bound chord '{}'", spec);
        Ok(())
    }

    /// Remove the binding for `spec`.
    ///
    /// Returns `true` if a binding was removed.
    pub fn unbind(&self, spec: &str) -> bool {
        let mut bindings = self.bindings.write();
        let before = bindings.len();
        bindings.retain(|b| b.spec != spec);
        bindings.len() != before
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.read().len()
    }

    /// The stop callback currently in effect.
    pub fn stop_callback(&self) -> StopCallback {
        self.stop_callback.read().clone()
    }

    /// Replace the stop callback. Wrap [`Self::stop_callback`] to delegate.
    pub fn set_stop_callback(&self, callback: StopCallback) {
        *self.stop_callback.write() = callback;
    }

    /// Run every binding whose chord matches `event`.
    pub fn handle(&self, event: &KeyEvent) -> KeyDispatch {
        // Callbacks may touch the keybinder, so release the lock before running them.
        let matching: Vec<(String, KeyCallback)> = self
            .bindings
            .read()
            .iter()
            .filter(|b| b.chord.matches(event))
            .map(|b| (b.spec.clone(), b.callback.clone()))
            .collect();

        let stop = self.stop_callback();
        let mut dispatch = KeyDispatch::default();

        for (spec, callback) in matching {
            if stop(event, &event.target, &spec) {
                tracing::debug!("Chord '{}' suppressed from <{}>", spec, event.target.tag_name);
                dispatch.suppressed += 1;
                continue;
            }

            dispatch.fired += 1;
            if !callback(event, &spec) {
                dispatch.prevent_default = true;
            }
        }

        dispatch
    }
}

impl Default for Keybinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&KeyEvent, &str) -> bool + Send + Sync) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        (count, move |_: &KeyEvent, _: &str| {
            seen.fetch_add(1, Ordering::SeqCst);
            false
        })
    }

    #[test]
    fn test_parse_mod_per_platform() {
        let mac = Chord::parse("mod+.", Platform::MacOs).unwrap();
        assert_eq!(mac.modifiers, Modifiers::META);
        assert_eq!(mac.key, ".");

        let other = Chord::parse("mod+.", Platform::Other).unwrap();
        assert_eq!(other.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_parse_aliases() {
        let chord = Chord::parse("Command+Shift+K", Platform::Other).unwrap();
        assert_eq!(chord.modifiers, Modifiers::META | Modifiers::SHIFT);
        assert_eq!(chord.key, "k");

        let plus = Chord::parse("option+plus", Platform::Other).unwrap();
        assert_eq!(plus.modifiers, Modifiers::ALT);
        assert_eq!(plus.key, "+");

        let bare = Chord::parse(".", Platform::Other).unwrap();
        assert!(bare.modifiers.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Chord::parse("  ", Platform::Other), Err(KeymapError::EmptyChord));
        assert_eq!(
            Chord::parse("ctrl+", Platform::Other),
            Err(KeymapError::MissingKey("ctrl+".to_string()))
        );
        assert!(matches!(
            Chord::parse("hyper+k", Platform::Other),
            Err(KeymapError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn test_chord_matches_exact_modifiers() {
        let chord = Chord::parse("ctrl+k", Platform::Other).unwrap();
        assert!(chord.matches(&KeyEvent::new("K", Modifiers::CTRL, EventTarget::body())));
        assert!(!chord.matches(&KeyEvent::new("k", Modifiers::empty(), EventTarget::body())));
        assert!(!chord.matches(&KeyEvent::new(
            "k",
            Modifiers::CTRL | Modifiers::SHIFT,
            EventTarget::body()
        )));
    }

    #[test]
    fn test_default_stop_callback() {
        let event = KeyEvent::new(".", Modifiers::CTRL, EventTarget::body());
        assert!(!default_stop_callback(&event, &EventTarget::body(), "mod+."));
        assert!(default_stop_callback(&event, &EventTarget::input(), "mod+."));
        assert!(default_stop_callback(&event, &EventTarget::textarea(), "mod+."));
        assert!(default_stop_callback(&event, &EventTarget::new("SELECT"), "mod+."));
        assert!(default_stop_callback(&event, &EventTarget::new("div").editable(), "mod+."));
        assert!(!default_stop_callback(
            &event,
            &EventTarget::input().with_class("mousetrap"),
            "mod+."
        ));
    }

    #[test]
    fn test_command_chords_never_stop() {
        let stop = command_aware_stop_callback(Arc::new(|_, _, _| true));
        let event = KeyEvent::new("k", Modifiers::META, EventTarget::input());
        for target in [EventTarget::input(), EventTarget::textarea(), EventTarget::body()] {
            assert!(!stop(&event, &target, "command+k"));
        }
    }

    #[test]
    fn test_other_chords_delegate_to_original() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let original: StopCallback = Arc::new(move |event, target, chord| {
            seen.fetch_add(1, Ordering::SeqCst);
            default_stop_callback(event, target, chord)
        });
        let stop = command_aware_stop_callback(original);
        let event = KeyEvent::new(".", Modifiers::CTRL, EventTarget::input());

        assert!(stop(&event, &EventTarget::input(), "mod+."));
        assert!(!stop(&event, &EventTarget::body(), "mod+."));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handle_fires_and_suppresses() {
        let keybinder = Keybinder::with_platform(Platform::Other);
        assert_eq!(keybinder.platform(), Platform::Other);
        let (count, callback) = counter();
        keybinder.bind("mod+.", callback).unwrap();

        let from_body = keybinder.handle(&KeyEvent::new(".", Modifiers::CTRL, EventTarget::body()));
        assert!(from_body.handled());
        assert!(from_body.prevent_default);

        let from_input = keybinder.handle(&KeyEvent::new(".", Modifiers::CTRL, EventTarget::input()));
        assert!(!from_input.handled());
        assert_eq!(from_input.suppressed, 1);

        let unrelated = keybinder.handle(&KeyEvent::new("k", Modifiers::CTRL, EventTarget::body()));
        assert_eq!(unrelated, KeyDispatch::default());

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_uses_replaced_stop_callback() {
        let keybinder = Keybinder::with_platform(Platform::MacOs);
        assert_eq!(keybinder.platform(), Platform::MacOs);
        let original = keybinder.stop_callback();
        keybinder.set_stop_callback(command_aware_stop_callback(original));

        let (count, callback) = counter();
        keybinder.bind("command+k", callback).unwrap();

        let dispatch = keybinder.handle(&KeyEvent::new("k", Modifiers::META, EventTarget::input()));
        assert!(dispatch.handled());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bind_replaces_and_unbind() {
        let keybinder = Keybinder::with_platform(Platform::Other);
        keybinder.bind("ctrl+k", |_, _| true).unwrap();
        keybinder.bind("ctrl+k", |_, _| false).unwrap();
        assert_eq!(keybinder.binding_count(), 1);

        let dispatch = keybinder.handle(&KeyEvent::new("k", Modifiers::CTRL, EventTarget::body()));
        assert!(dispatch.prevent_default);

        assert!(keybinder.unbind("ctrl+k"));
        assert!(!keybinder.unbind("ctrl+k"));
        assert_eq!(keybinder.binding_count(), 0);
    }

    #[test]
    fn test_bind_rejects_bad_chord() {
        let keybinder = Keybinder::new();
        assert!(keybinder.bind("", |_, _| true).is_err());
        assert_eq!(keybinder.binding_count(), 0);
    }
}
