//! Per-frame player input.
//!
//! The game does not poll devices itself. Whatever owns the window feeds
//! button transitions and the aim position into an [`Input`], and the
//! session reads it once per frame.
//!
//! Fire acts while held. Bomb acts on release, once.
//!
//! ```
//! use danmaku::{Button, Input};
//!
//! let mut input = Input::new();
//! input.press(Button::Bomb);
//! assert!(!input.bomb());
//! input.release(Button::Bomb);
//! assert!(input.bomb());
//!
//! input.begin_frame();
//! assert!(!input.bomb());
//! ```

use glam::Vec2;
use std::collections::HashSet;

/// Logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary weapon (left mouse in the original layout).
    Fire,
    /// Screen-clearing bomb (right mouse).
    Bomb,
}

/// Button state and aim position for the current frame.
#[derive(Debug, Clone, Default)]
pub struct Input {
    held: HashSet<Button>,
    released: HashSet<Button>,
    aim: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget per-frame edges. Call once at the start of every frame,
    /// before feeding new events.
    pub fn begin_frame(&mut self) {
        self.released.clear();
    }

    pub fn press(&mut self, button: Button) {
        self.held.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        if self.held.remove(&button) {
            self.released.insert(button);
        }
    }

    pub fn set_aim(&mut self, aim: Vec2) {
        self.aim = aim;
    }

    pub fn held(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    pub fn released(&self, button: Button) -> bool {
        self.released.contains(&button)
    }

    /// Fire is held.
    pub fn fire(&self) -> bool {
        self.held(Button::Fire)
    }

    /// Bomb was released this frame.
    pub fn bomb(&self) -> bool {
        self.released(Button::Bomb)
    }

    /// Where the player ship should be, in field coordinates.
    pub fn aim(&self) -> Vec2 {
        self.aim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_while_held() {
        let mut input = Input::new();
        input.press(Button::Fire);
        assert!(input.fire());
        input.begin_frame();
        assert!(input.fire());
        input.release(Button::Fire);
        assert!(!input.fire());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = Input::new();
        input.release(Button::Bomb);
        assert!(!input.bomb());
    }

    #[test]
    fn test_aim() {
        let mut input = Input::new();
        input.set_aim(Vec2::new(12.0, 34.0));
        input.begin_frame();
        assert_eq!(input.aim(), Vec2::new(12.0, 34.0));
    }
}
