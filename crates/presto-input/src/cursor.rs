use serde::{Deserialize, Serialize};

/// The four input channels of a virtual cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorButton {
    LeftKey,
    RightKey,
    LeftMouse,
    RightMouse,
}

impl CursorButton {
    pub const ALL: [CursorButton; 4] = [
        CursorButton::LeftKey,
        CursorButton::RightKey,
        CursorButton::LeftMouse,
        CursorButton::RightMouse,
    ];
}

/// Shared button-state sink for one simulated player.
///
/// Written by exactly one input synthesizer per cursor instance and read by
/// the rendering/scoring collaborators once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualCursor {
    pub left_key: bool,
    pub right_key: bool,
    pub left_mouse: bool,
    pub right_mouse: bool,
}

impl VirtualCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release_all(&mut self) {
        self.left_key = false;
        self.right_key = false;
        self.left_mouse = false;
        self.right_mouse = false;
    }

    /// Combined left-side state (key or mouse), the view rulesets consume.
    pub fn left_button(&self) -> bool {
        self.left_key || self.left_mouse
    }

    /// Combined right-side state (key or mouse).
    pub fn right_button(&self) -> bool {
        self.right_key || self.right_mouse
    }

    pub fn is_pressed(&self, button: CursorButton) -> bool {
        match button {
            CursorButton::LeftKey => self.left_key,
            CursorButton::RightKey => self.right_key,
            CursorButton::LeftMouse => self.left_mouse,
            CursorButton::RightMouse => self.right_mouse,
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.left_key || self.right_key || self.left_mouse || self.right_mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_views() {
        let mut cursor = VirtualCursor::new();
        assert!(!cursor.left_button() && !cursor.right_button());

        cursor.left_mouse = true;
        assert!(cursor.left_button());
        assert!(!cursor.left_key);

        cursor.right_key = true;
        assert!(cursor.right_button());
    }

    #[test]
    fn release_all_clears_every_channel() {
        let mut cursor = VirtualCursor {
            left_key: true,
            right_key: true,
            left_mouse: true,
            right_mouse: true,
        };
        cursor.release_all();
        assert!(!cursor.any_pressed());
        for button in CursorButton::ALL {
            assert!(!cursor.is_pressed(button));
        }
    }
}
