//! Key-chord dispatch table
//!
//! Callbacks are keyed by a physical key plus modifier state and receive the
//! scene, so they can be registered and exercised without a window.

use crate::scene::Scene;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Modifier keys held as part of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// A keyboard chord: one key plus the exact modifier set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl KeyChord {
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }
}

impl std::fmt::Display for KeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.mods.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.mods.shift {
            write!(f, "Shift+")?;
        }
        if self.mods.alt {
            write!(f, "Alt+")?;
        }
        write!(f, "{:?}", self.key)
    }
}

/// A bound callback. Returns true when it handled the event.
pub type Callback = Box<dyn FnMut(&mut Scene) -> bool>;

struct Binding {
    callback: Callback,
    usage: String,
}

/// Dispatch table mapping chords to callbacks
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyChord, Binding>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a chord, replacing any previous binding.
    /// `usage` is a short description shown in the on-screen help.
    pub fn bind<F>(&mut self, chord: KeyChord, usage: impl Into<String>, callback: F)
    where
        F: FnMut(&mut Scene) -> bool + 'static,
    {
        let usage = usage.into();
        if self
            .bindings
            .insert(
                chord,
                Binding {
                    callback: Box::new(callback),
                    usage,
                },
            )
            .is_some()
        {
            tracing::warn!(%chord, "replaced existing key binding");
        }
    }

    /// Invoke the callback bound to `chord`, if any.
    /// Returns true when a callback ran and reported the event handled.
    pub fn dispatch(&mut self, chord: KeyChord, scene: &mut Scene) -> bool {
        match self.bindings.get_mut(&chord) {
            Some(binding) => (binding.callback)(scene),
            None => false,
        }
    }

    /// Whether a chord has a binding
    pub fn contains(&self, chord: KeyChord) -> bool {
        self.bindings.contains_key(&chord)
    }

    /// Usage lines for all bindings, sorted by chord
    pub fn usage_lines(&self) -> Vec<String> {
        let mut lines: Vec<(String, &str)> = self
            .bindings
            .iter()
            .map(|(chord, binding)| (chord.to_string(), binding.usage.as_str()))
            .collect();
        lines.sort();
        lines
            .into_iter()
            .map(|(chord, usage)| format!("{}: {}", chord, usage))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointsurf_core::{Model, Point3f, PointCloud};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dispatch_runs_bound_callback() {
        let mut bindings = KeyBindings::new();
        let mut scene = Scene::new();
        let hits = Rc::new(Cell::new(0));

        let chord = KeyChord::new(KeyCode::KeyR, Modifiers::CTRL);
        let hits_in_cb = hits.clone();
        bindings.bind(chord, "test", move |_scene| {
            hits_in_cb.set(hits_in_cb.get() + 1);
            true
        });

        assert!(bindings.dispatch(chord, &mut scene));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unbound_chord_is_not_handled() {
        let mut bindings = KeyBindings::new();
        let mut scene = Scene::new();
        let chord = KeyChord::new(KeyCode::KeyQ, Modifiers::NONE);
        assert!(!bindings.dispatch(chord, &mut scene));
    }

    #[test]
    fn modifiers_distinguish_chords() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyChord::new(KeyCode::KeyR, Modifiers::CTRL), "x", |_| true);
        assert!(!bindings.contains(KeyChord::new(KeyCode::KeyR, Modifiers::NONE)));
        assert!(bindings.contains(KeyChord::new(KeyCode::KeyR, Modifiers::CTRL)));
    }

    #[test]
    fn callbacks_can_mutate_the_scene() {
        let mut bindings = KeyBindings::new();
        let mut scene = Scene::new();
        let chord = KeyChord::new(KeyCode::KeyA, Modifiers::NONE);
        bindings.bind(chord, "add", |scene| {
            scene.add_model(Model::PointCloud(PointCloud::from_points(vec![
                Point3f::origin(),
            ])));
            true
        });

        bindings.dispatch(chord, &mut scene);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn usage_lines_describe_bindings() {
        let mut bindings = KeyBindings::new();
        bindings.bind(
            KeyChord::new(KeyCode::KeyR, Modifiers::CTRL),
            "run reconstruction",
            |_| true,
        );
        let lines = bindings.usage_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Ctrl+"));
        assert!(lines[0].contains("run reconstruction"));
    }
}
