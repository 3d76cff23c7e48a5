//! Keyboard actions.
//!
//! The viewer has no camera controls; keys only drive window-level
//! actions resolved through [`KeybindingOptions`](crate::options::KeybindingOptions).

use serde::{Deserialize, Serialize};

/// Discrete actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Close the window and exit the event loop.
    Quit,
}
