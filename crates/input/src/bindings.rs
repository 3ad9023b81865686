use crate::action::Action;
use std::fmt;

/// Keys the carousel reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    U,
    S,
    Escape,
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Key::Space => "SPACE",
            Key::U => "U",
            Key::S => "S",
            Key::Escape => "ESC",
            Key::Other => "?",
        };
        f.write_str(label)
    }
}

/// Stage of a key event as delivered by the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Press,
    Repeat,
    Release,
}

/// Key-to-action table.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: Vec<(Key, Action)>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            table: vec![
                (Key::U, Action::ToggleBob),
                (Key::Space, Action::ReverseRotation),
                (Key::S, Action::ToggleRotation),
                (Key::Escape, Action::Quit),
            ],
        }
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The action bound to `key`, if this event should fire it.
    ///
    /// Only [`KeyPhase::Release`] fires; holding a key never toggles repeatedly.
    pub fn action_for(&self, key: Key, phase: KeyPhase) -> Option<Action> {
        if phase != KeyPhase::Release {
            return None;
        }
        let action = self
            .table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, a)| *a);
        if let Some(a) = action {
            tracing::debug!(%key, ?a, "key bound");
        }
        action
    }

    /// Bound keys and what they do, in table order.
    pub fn entries(&self) -> impl Iterator<Item = (Key, Action)> + '_ {
        self.table.iter().copied()
    }

    /// One line per binding, e.g. `U - Toggle up/down motion`.
    pub fn help_text(&self) -> String {
        self.entries()
            .map(|(k, a)| format!("{k} - {}", a.describe()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
