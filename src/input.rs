//! Keyboard input handling
//!
//! Browser key names in, one [`TickInput`] per simulation step out. Movement keys are
//! held state; serve, restart and quit are one-shot and cleared once consumed.

use crate::sim::TickInput;

/// A game control bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Serve,
    Restart,
    Quit,
}

/// Map a `KeyboardEvent.key` value to a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "w" | "W" => Some(Control::LeftUp),
        "s" | "S" => Some(Control::LeftDown),
        "ArrowUp" => Some(Control::RightUp),
        "ArrowDown" => Some(Control::RightDown),
        " " | "Spacebar" => Some(Control::Serve),
        "r" | "R" => Some(Control::Restart),
        "Escape" => Some(Control::Quit),
        _ => None,
    }
}

/// Keyboard state accumulated between simulation steps
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: TickInput,
}

impl Controls {
    /// Returns true if the key is bound, so the caller can suppress browser defaults
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(control) = control_for_key(key) else {
            return false;
        };
        match control {
            Control::LeftUp => self.held.left_up = true,
            Control::LeftDown => self.held.left_down = true,
            Control::RightUp => self.held.right_up = true,
            Control::RightDown => self.held.right_down = true,
            Control::Serve => self.held.serve = true,
            Control::Restart => self.held.restart = true,
            Control::Quit => self.held.quit = true,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        let Some(control) = control_for_key(key) else {
            return false;
        };
        match control {
            Control::LeftUp => self.held.left_up = false,
            Control::LeftDown => self.held.left_down = false,
            Control::RightUp => self.held.right_up = false,
            Control::RightDown => self.held.right_down = false,
            // One-shots stay latched until the next step consumes them
            Control::Serve | Control::Restart | Control::Quit => {}
        }
        true
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }

    /// Input for the next step; one-shot actions are consumed
    pub fn take_input(&mut self) -> TickInput {
        let input = self.held;
        self.held.serve = false;
        self.held.restart = false;
        self.held.quit = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(control_for_key("w"), Some(Control::LeftUp));
        assert_eq!(control_for_key("S"), Some(Control::LeftDown));
        assert_eq!(control_for_key("ArrowDown"), Some(Control::RightDown));
        assert_eq!(control_for_key(" "), Some(Control::Serve));
        assert_eq!(control_for_key("Spacebar"), Some(Control::Serve));
        assert_eq!(control_for_key("Escape"), Some(Control::Quit));
        assert_eq!(control_for_key("x"), None);
    }

    #[test]
    fn test_movement_is_held_until_release() {
        let mut controls = Controls::default();
        controls.key_down("ArrowUp");

        assert!(controls.take_input().right_up);
        assert!(controls.take_input().right_up);

        controls.key_up("ArrowUp");
        assert!(!controls.take_input().right_up);
    }

    #[test]
    fn test_serve_fires_once() {
        let mut controls = Controls::default();
        controls.key_down(" ");
        controls.key_up(" ");

        assert!(controls.take_input().serve);
        assert!(!controls.take_input().serve);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut controls = Controls::default();
        assert!(!controls.key_down("Tab"));
        assert!(!controls.key_up("Tab"));
        assert_eq!(controls.take_input(), TickInput::default());
    }

    #[test]
    fn test_release_all() {
        let mut controls = Controls::default();
        controls.key_down("w");
        controls.key_down("ArrowDown");
        controls.release_all();
        assert_eq!(controls.take_input(), TickInput::default());
    }
}
