//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation (a key press, a mouse gesture, a button
//! in the page, a tour script step) is represented as an `IsleCommand`.
//! Consumers construct commands and pass them to
//! [`IsleEngine::execute`](super::IsleEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// The engine never cares *how* a command was triggered:
///
/// ```ignore
/// engine.execute(IsleCommand::Next, &mut panel, now)?;
/// engine.execute(IsleCommand::Zoom { delta: 1.0 }, &mut panel, now)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IsleCommand {
    // ── Navigation ──────────────────────────────────────────────────
    /// Fly to the next stop, wrapping after the last.
    Next,

    /// Fly to the previous stop, wrapping before the first.
    Prev,

    /// Fly to the first stop.
    First,

    /// Fly to a specific stop. Negative or too-large indices are
    /// rejected.
    Goto {
        /// Requested stop index.
        index: i64,
    },

    /// Cast a ray through a screen position and fly to the stop it hits,
    /// if any.
    Pick {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Viewport ────────────────────────────────────────────────────
    /// The viewport changed size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}
