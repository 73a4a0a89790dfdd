//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (mouse tracking,
//! drag detection, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and the engine's
//! [`execute`](crate::IsleEngine::execute) method.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::engine::IsleCommand;

/// Maps physical key strings to [`IsleCommand`] variants.
///
/// Key strings use the DOM `KeyboardEvent.code` format:
/// `"ArrowRight"`, `"KeyD"`, `"Home"`, etc.
///
/// Only discrete commands make sense as key bindings. Parameterized
/// commands like `Pick` come from the mouse, not key lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the key-bindable subset of [`IsleCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Fly to the next stop.
    Next,
    /// Fly to the previous stop.
    Prev,
    /// Fly to the first stop.
    First,
}

impl KeyCommandTag {
    fn to_command(self) -> IsleCommand {
        match self {
            Self::Next => IsleCommand::Next,
            Self::Prev => IsleCommand::Prev,
            Self::First => IsleCommand::First,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("ArrowRight".into(), KeyCommandTag::Next),
            ("KeyD".into(), KeyCommandTag::Next),
            ("ArrowLeft".into(), KeyCommandTag::Prev),
            ("KeyA".into(), KeyCommandTag::Prev),
            ("Home".into(), KeyCommandTag::First),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<IsleCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

/// Converts raw window events into [`IsleCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd, &mut panel, now);
/// }
/// if let Some(cmd) = input.handle_key_press("ArrowRight") {
///     engine.execute(cmd, &mut panel, now);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    state: InputState,
    /// Button currently held, if any.
    pressed: Option<MouseButton>,
    shift_pressed: bool,
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Current cursor position in pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        (self.state.mouse_pos.x, self.state.mouse_pos.y)
    }

    /// Whether any mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<IsleCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<IsleCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(IsleCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::Resized { width, height } => {
                Some(IsleCommand::Resize { width, height })
            }
        }
    }

    /// Cursor moved: orbit or pan while a button is held.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<IsleCommand> {
        let delta = self.state.handle_mouse_position(x, y);
        let button = self.pressed?;
        self.state.track_drag(delta);

        if self.shift_pressed || button == MouseButton::Right {
            return Some(IsleCommand::PanCamera { delta });
        }
        Some(IsleCommand::RotateCamera { delta })
    }

    /// Left release without a drag is a click on the scene.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<IsleCommand> {
        if pressed {
            if self.pressed.is_none() {
                self.state.handle_mouse_down();
                self.pressed = Some(button);
            }
            return None;
        }

        if self.pressed != Some(button) {
            return None;
        }
        self.pressed = None;
        match self.state.process_mouse_up() {
            ClickResult::Click { x, y } if button == MouseButton::Left => {
                Some(IsleCommand::Pick { x, y })
            }
            _ => None,
        }
    }
}
