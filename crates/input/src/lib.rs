//! Keyboard input mapped to carousel toggle actions.
//!
//! # Invariants
//! - Only key releases produce actions; presses and auto-repeats are ignored.
//! - The scene consumes [`Action`]s, never raw key events, so any windowing
//!   backend can drive it.

pub mod action;
pub mod bindings;

pub use action::Action;
pub use bindings::{Bindings, Key, KeyPhase};

pub fn crate_info() -> &'static str {
    "carousel-input v0.1.0"
}
