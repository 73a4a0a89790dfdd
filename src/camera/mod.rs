//! Camera system for the island scene.
//!
//! Provides the perspective camera, eased timeline flights, and the orbit
//! controller used between flights.

/// Eased flights between two camera poses.
pub mod animator;
/// Orbit controller managing rotation, pan and zoom.
pub mod controller;
/// Core camera struct and pose type.
pub mod core;

pub use animator::{AnimatorState, CameraAnimation, CameraAnimator};
pub use controller::OrbitController;
pub use self::core::{Camera, CameraPose};
