//! Keyboard input snapshot

use serde::{Deserialize, Serialize};

/// Held state of the four cursor keys for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub const IDLE: InputState = InputState {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn up() -> Self {
        Self {
            up: true,
            ..Self::IDLE
        }
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::IDLE
        }
    }

    /// Vertical direction: -1 up, 1 down, 0 when neither or both are held
    pub fn vertical(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Apply a DOM `KeyboardEvent.key` value; returns false for other keys
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowUp" => self.up = pressed,
            "ArrowDown" => self.down = pressed,
            "ArrowLeft" => self.left = pressed,
            "ArrowRight" => self.right = pressed,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_direction() {
        assert_eq!(InputState::IDLE.vertical(), 0.0);
        assert_eq!(InputState::up().vertical(), -1.0);
        assert_eq!(InputState::down().vertical(), 1.0);
        let both = InputState {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(both.vertical(), 0.0);
    }

    #[test]
    fn test_key_events() {
        let mut input = InputState::default();
        assert!(input.set_key("ArrowUp", true));
        assert!(input.set_key("ArrowLeft", true));
        assert!(!input.set_key("a", true));
        assert!(input.up && input.left && !input.down);
        input.set_key("ArrowUp", false);
        assert!(!input.up);
        // Horizontal keys never move the paddle
        assert_eq!(input.vertical(), 0.0);
    }
}
