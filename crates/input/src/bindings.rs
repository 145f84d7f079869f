use std::collections::BTreeMap;

use crate::action::Action;

/// A discrete key, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Space,
}

impl Key {
    /// Parse a key name as given on a command line: a single character,
    /// or one of `escape`, `enter`, `space`.
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c.to_ascii_lowercase()));
        }
        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Some(Key::Escape),
            "enter" | "return" => Some(Key::Enter),
            "space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Maps key presses to actions.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    bindings: BTreeMap<Key, Action>,
}

impl Default for KeyBindings {
    /// `s` returns to the solar-system view.
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert(Key::Char('s'), Action::ReturnToGlobal);
        Self { bindings }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.bindings.insert(key, action)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.bindings.remove(&key)
    }

    /// Action for a key press; unbound keys map to [`Action::Noop`].
    pub fn action_for(&self, key: Key) -> Action {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings.get(&key).cloned().unwrap_or(Action::Noop)
    }
}
