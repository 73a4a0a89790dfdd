//! Shared utilities: easing curves and frame timing.

/// Easing curves for camera flights.
pub mod easing;
/// Fixed-step frame clock.
pub mod frame_timing;
