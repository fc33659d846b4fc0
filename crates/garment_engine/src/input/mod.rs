//! Keyboard and pointer input understood by the viewer

use bitflags::bitflags;

/// Key codes the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow
    ArrowLeft,
    /// Right arrow
    ArrowRight,
    /// Up arrow
    ArrowUp,
    /// Down arrow
    ArrowDown,
    /// `+`
    Plus,
    /// `=` (unshifted `+` on most layouts)
    Equals,
    /// `-`
    Minus,
}

impl KeyCode {
    /// Map a DOM-style key name (`"ArrowLeft"`, `"+"`, ...) onto a key code
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(KeyCode::ArrowLeft),
            "ArrowRight" => Some(KeyCode::ArrowRight),
            "ArrowUp" => Some(KeyCode::ArrowUp),
            "ArrowDown" => Some(KeyCode::ArrowDown),
            "+" => Some(KeyCode::Plus),
            "=" => Some(KeyCode::Equals),
            "-" => Some(KeyCode::Minus),
            _ => None,
        }
    }

    /// Navigation flag of an arrow key
    pub fn nudge(self) -> Option<NudgeKeys> {
        match self {
            KeyCode::ArrowLeft => Some(NudgeKeys::LEFT),
            KeyCode::ArrowRight => Some(NudgeKeys::RIGHT),
            KeyCode::ArrowUp => Some(NudgeKeys::UP),
            KeyCode::ArrowDown => Some(NudgeKeys::DOWN),
            _ => None,
        }
    }
}

bitflags! {
    /// Set of navigation keys currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NudgeKeys: u8 {
        /// Orbit left
        const LEFT = 1 << 0;
        /// Orbit right
        const RIGHT = 1 << 1;
        /// Tilt towards the top view
        const UP = 1 << 2;
        /// Tilt towards the bottom view
        const DOWN = 1 << 3;
    }
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button (orbit)
    Left,
    /// Right button (panning, unsupported)
    Right,
    /// Middle button (dolly)
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_key_name("ArrowUp"), Some(KeyCode::ArrowUp));
        assert_eq!(KeyCode::from_key_name("="), Some(KeyCode::Equals));
        assert_eq!(KeyCode::from_key_name("Enter"), None);
    }

    #[test]
    fn test_only_arrows_nudge() {
        let mut held = NudgeKeys::empty();
        for key in [KeyCode::ArrowLeft, KeyCode::ArrowDown, KeyCode::Plus] {
            if let Some(flag) = key.nudge() {
                held.insert(flag);
            }
        }
        assert_eq!(held, NudgeKeys::LEFT | NudgeKeys::DOWN);
    }
}
