use serde::{Deserialize, Serialize};

/// A high-level action produced from keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Swap the spin between clockwise and counterclockwise.
    ReverseRotation,
    /// Start or stop the riders bobbing up and down.
    ToggleBob,
    /// Start or freeze the spin.
    ToggleRotation,
    /// Close the window.
    Quit,
}

impl Action {
    /// Short description used in help text and logs.
    pub fn describe(self) -> &'static str {
        match self {
            Action::ReverseRotation => "Toggle rotation direction",
            Action::ToggleBob => "Toggle up/down motion",
            Action::ToggleRotation => "Toggle rotation",
            Action::Quit => "Quit",
        }
    }
}
