use glam::Vec2;

/// Squared per-event movement (pixels²) above which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 1.0;

/// Result of releasing a mouse button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// The press turned into a drag; nothing to select.
    NoAction,
    /// Press and release without dragging.
    Click {
        /// Release position in pixels.
        x: f32,
        /// Release position in pixels.
        y: f32,
    },
}

/// Tracks mouse position and drag state between press and release.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputState {
    /// Last reported cursor position in pixels.
    pub(crate) mouse_pos: Vec2,
    /// Whether the current press has moved far enough to be a drag.
    pub(crate) is_dragging: bool,
    seen_cursor: bool,
}

impl InputState {
    /// Start tracking a press.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.is_dragging = false;
    }

    /// Update cursor position and return the movement since the last
    /// update. The first position ever reported yields zero movement.
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> Vec2 {
        let pos = Vec2::new(x, y);
        let delta = if self.seen_cursor {
            pos - self.mouse_pos
        } else {
            Vec2::ZERO
        };
        self.mouse_pos = pos;
        self.seen_cursor = true;
        delta
    }

    /// Record movement while pressed; large enough steps start a drag.
    pub(crate) fn track_drag(&mut self, delta: Vec2) {
        if delta.length_squared() > DRAG_THRESHOLD_SQ {
            self.is_dragging = true;
        }
    }

    /// Finish a press and classify it.
    pub(crate) fn process_mouse_up(&mut self) -> ClickResult {
        let was_dragging = self.is_dragging;
        self.is_dragging = false;
        if was_dragging {
            return ClickResult::NoAction;
        }
        ClickResult::Click {
            x: self.mouse_pos.x,
            y: self.mouse_pos.y,
        }
    }
}
