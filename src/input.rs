//! Keyboard state table
//!
//! The host sets and clears entries on key-down/key-up; the simulation only
//! ever reads a sampled [`TickInput`] from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Fire,
}

/// Key codes (`KeyboardEvent.code`) bound to each control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub left: String,
    pub right: String,
    pub fire: String,
    /// Codes whose default browser action (page scroll) is suppressed
    pub suppress_default: Vec<String>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
            fire: "KeyS".to_string(),
            suppress_default: ["Space", "KeyS", "ArrowUp", "ArrowDown"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Controls {
    /// Key code bound to a control
    pub fn code(&self, control: Control) -> &str {
        match control {
            Control::Left => &self.left,
            Control::Right => &self.right,
            Control::Fire => &self.fire,
        }
    }

    /// Whether the host must cancel the default action for this code
    pub fn suppresses_default(&self, code: &str) -> bool {
        self.suppress_default.iter().any(|c| c == code)
    }
}

/// Latest pressed/released state per key code
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.held.insert(code.to_string(), true);
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.insert(code.to_string(), false);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.get(code).copied().unwrap_or(false)
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Press or release the bound keys so they match `input`
    pub fn apply(&mut self, controls: &Controls, input: TickInput) {
        for (control, held) in [
            (Control::Left, input.left),
            (Control::Right, input.right),
            (Control::Fire, input.fire),
        ] {
            self.held.insert(controls.code(control).to_string(), held);
        }
    }

    /// Snapshot the bound controls for one tick
    pub fn sample(&self, controls: &Controls) -> TickInput {
        TickInput {
            left: self.is_held(controls.code(Control::Left)),
            right: self.is_held(controls.code(Control::Right)),
            fire: self.is_held(controls.code(Control::Fire)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_up() {
        let mut keys = KeyState::new();
        assert!(!keys.is_held("ArrowLeft"));
        keys.key_down("ArrowLeft");
        assert!(keys.is_held("ArrowLeft"));
        keys.key_up("ArrowLeft");
        assert!(!keys.is_held("ArrowLeft"));
    }

    #[test]
    fn test_sample_uses_bindings() {
        let controls = Controls::default();
        let mut keys = KeyState::new();
        keys.key_down("KeyS");
        keys.key_down("ArrowRight");
        keys.key_down("Space");

        let input = keys.sample(&controls);
        assert!(input.fire);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_rebound_fire_key() {
        let controls = Controls {
            fire: "Space".to_string(),
            ..Controls::default()
        };
        let mut keys = KeyState::new();
        keys.key_down("KeyS");
        assert!(!keys.sample(&controls).fire);
        keys.key_down("Space");
        assert!(keys.sample(&controls).fire);
    }

    #[test]
    fn test_scroll_suppression_codes() {
        let controls = Controls::default();
        for code in ["Space", "KeyS", "ArrowUp", "ArrowDown"] {
            assert!(controls.suppresses_default(code), "{code}");
        }
        assert!(!controls.suppresses_default("ArrowLeft"));
        assert!(!controls.suppresses_default("KeyA"));
    }

    #[test]
    fn test_apply_round_trips_through_sample() {
        let controls = Controls::default();
        let mut keys = KeyState::new();
        let input = TickInput {
            left: true,
            right: false,
            fire: true,
        };
        keys.apply(&controls, input);
        assert_eq!(keys.sample(&controls), input);
        keys.apply(&controls, TickInput::default());
        assert!(!keys.is_held("ArrowLeft"));
    }

    #[test]
    fn test_clear_releases_all() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowLeft");
        keys.key_down("KeyS");
        keys.clear();
        assert_eq!(keys.sample(&Controls::default()), TickInput::default());
    }
}
