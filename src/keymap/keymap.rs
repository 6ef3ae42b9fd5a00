//! Keymap struct for storing and looking up shortcut bindings

use std::collections::HashMap;

use super::action::Action;
use super::types::Shortcut;

/// A single binding from a shortcut to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub shortcut: Shortcut,
    pub action: Action,
}

impl Binding {
    pub fn new(shortcut: Shortcut, action: Action) -> Self {
        Self { shortcut, action }
    }
}

/// The keymap stores all bindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// All registered bindings
    bindings: Vec<Binding>,
    /// Fast lookup (indices into bindings); first registered wins
    lookup: HashMap<Shortcut, usize>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Binding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding to the keymap
    pub fn add_binding(&mut self, binding: Binding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.shortcut).or_insert(idx);
        self.bindings.push(binding);
    }

    /// Rebind an action, replacing any existing shortcut for it
    pub fn rebind(&mut self, action: Action, shortcut: Shortcut) {
        let mut bindings: Vec<Binding> = self
            .bindings
            .iter()
            .copied()
            .filter(|b| b.action != action)
            .collect();
        bindings.push(Binding::new(shortcut, action));
        *self = Self::with_bindings(bindings);
    }

    /// Look up the action bound to a key chord
    pub fn lookup(&self, shortcut: &Shortcut) -> Option<Action> {
        self.lookup.get(shortcut).map(|&idx| self.bindings[idx].action)
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Get the shortcut for an action (first match)
    pub fn shortcut_for(&self, action: Action) -> Option<Shortcut> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.shortcut)
    }

    /// Get display string for an action's shortcut
    pub fn display_for(&self, action: Action) -> Option<String> {
        self.shortcut_for(action).map(|s| s.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::KeyCode;

    fn shift_enter() -> Shortcut {
        Shortcut::key(KeyCode::Enter).with_shift()
    }

    #[test]
    fn test_single_binding_lookup() {
        let keymap =
            Keymap::with_bindings(vec![Binding::new(shift_enter(), Action::AddTimestamp)]);

        assert_eq!(keymap.lookup(&shift_enter()), Some(Action::AddTimestamp));
        assert_eq!(keymap.lookup(&Shortcut::key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_first_binding_wins_on_conflict() {
        let keymap = Keymap::with_bindings(vec![
            Binding::new(Shortcut::char('p'), Action::AddTimestampAlt),
            Binding::new(Shortcut::char('p'), Action::PasteTimestamp),
        ]);
        assert_eq!(keymap.lookup(&Shortcut::char('p')), Some(Action::AddTimestampAlt));
    }

    #[test]
    fn test_rebind_replaces_action_shortcut() {
        let mut keymap =
            Keymap::with_bindings(vec![Binding::new(Shortcut::char('g'), Action::ToggleVisibility)]);
        keymap.rebind(Action::ToggleVisibility, Shortcut::char('h').with_ctrl());

        assert_eq!(keymap.lookup(&Shortcut::char('g')), None);
        assert_eq!(
            keymap.display_for(Action::ToggleVisibility).as_deref(),
            Some("Ctrl + H")
        );
    }
}
