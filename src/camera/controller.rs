use glam::{Vec2, Vec3};

use super::core::CameraPose;
use crate::options::CameraOptions;

/// Smallest polar angle; keeps the eye off the pole where `look_at`
/// degenerates.
const MIN_POLAR: f32 = 1e-3;
/// Accumulated deltas below this are dropped.
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit camera controller: spherical coordinates around a focus point,
/// with damped rotation and pan, and clamped zoom.
///
/// Drag input accumulates into pending deltas; [`update`](Self::update)
/// applies a `damping` fraction of them each frame so the camera glides to
/// rest.
#[derive(Debug, Clone)]
pub struct OrbitController {
    focus_point: Vec3,
    distance: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    azimuth: f32,
    /// Angle down from +Y.
    polar: f32,

    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
    /// A pose set from outside is kept as-is, even past the limits, until
    /// the next orbit input.
    holding: bool,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    max_polar: f32,
}

impl OrbitController {
    /// Controller orbiting around `pose.target`, starting at `pose.eye`.
    #[must_use]
    pub fn new(pose: CameraPose, options: &CameraOptions) -> Self {
        let mut controller = Self {
            focus_point: pose.target,
            distance: 1.0,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
            holding: false,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping.clamp(0.0, 1.0),
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
            max_polar: options.max_polar_angle.clamp(MIN_POLAR, std::f32::consts::PI),
        };
        controller.set_pose(pose);
        controller
    }

    /// Current eye/target pair.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let offset = Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance;
        CameraPose::new(self.focus_point + offset, self.focus_point)
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current polar angle (radians down from +Y).
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        self.polar
    }

    /// Jump to `pose`, dropping any pending motion. The pose is held
    /// exactly, even outside the distance and polar limits; the limits
    /// apply again from the next rotate, pan or zoom.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.focus_point = pose.target;
        let offset = pose.eye - pose.target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            self.azimuth = offset.x.atan2(offset.z);
            self.polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        }
        self.distance = distance;
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.holding = true;
    }

    /// Queue a rotation from `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        self.holding = false;
        self.pending_azimuth -= delta.x * self.rotate_speed * 0.01;
        self.pending_polar -= delta.y * self.rotate_speed * 0.01;
    }

    /// Queue a pan from `delta` pixels of drag. Pan speed scales with
    /// distance so the focus tracks the cursor at any zoom.
    pub fn pan(&mut self, delta: Vec2) {
        self.holding = false;
        let pose = self.pose();
        let forward = (pose.target - pose.eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.pan_speed * 0.001 * self.distance;
        self.pending_pan += (right * -delta.x + up * delta.y) * scale;
    }

    /// Zoom (positive = in). Applied immediately, clamped to the distance
    /// limits.
    pub fn zoom(&mut self, delta: f32) {
        self.holding = false;
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.clamp();
    }

    /// Apply one frame of pending motion and return the resulting pose.
    pub fn update(&mut self) -> CameraPose {
        let step = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.azimuth += self.pending_azimuth * step;
        self.polar += self.pending_polar * step;
        self.focus_point += self.pending_pan * step;

        let decay = 1.0 - step;
        self.pending_azimuth *= decay;
        self.pending_polar *= decay;
        self.pending_pan *= decay;
        if self.pending_azimuth.abs() < SETTLE_EPSILON {
            self.pending_azimuth = 0.0;
        }
        if self.pending_polar.abs() < SETTLE_EPSILON {
            self.pending_polar = 0.0;
        }
        if self.pending_pan.length_squared() < SETTLE_EPSILON {
            self.pending_pan = Vec3::ZERO;
        }

        self.clamp();
        self.pose()
    }

    /// Whether queued motion remains to be applied.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth != 0.0
            || self.pending_polar != 0.0
            || self.pending_pan != Vec3::ZERO
    }

    fn clamp(&mut self) {
        if self.holding {
            return;
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(MIN_POLAR, self.max_polar);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(
            CameraPose::new(Vec3::new(0.0, 20.0, 20.0), Vec3::ZERO),
            &CameraOptions::default(),
        )
    }

    #[test]
    fn pose_round_trips_through_spherical() {
        let pose = CameraPose::new(Vec3::new(12.0, 10.0, -5.0), Vec3::new(1.0, 2.0, 3.0));
        let c = OrbitController::new(pose, &CameraOptions::default());
        let back = c.pose();
        assert!((back.eye - pose.eye).length() < 1e-3);
        assert_eq!(back.target, pose.target);
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom(1.0);
        }
        assert_eq!(c.distance(), CameraOptions::default().min_distance);
        for _ in 0..200 {
            c.zoom(-1.0);
        }
        assert_eq!(c.distance(), CameraOptions::default().max_distance);
    }

    #[test]
    fn polar_angle_never_passes_horizon() {
        let mut c = controller();
        c.rotate(Vec2::new(0.0, -100_000.0));
        for _ in 0..500 {
            let pose = c.update();
            assert!(pose.eye.y >= pose.target.y - 1e-3);
        }
        assert!(c.polar_angle() <= FRAC_PI_2 + 1e-6);
    }

    #[test]
    fn damped_rotation_converges_to_full_delta() {
        let mut c = controller();
        let before = c.pose();
        c.rotate(Vec2::new(50.0, 0.0));
        let expected_azimuth = -50.0 * CameraOptions::default().rotate_speed * 0.01;

        let first = c.update();
        // One damped step moves only part of the way.
        assert!(first.eye.distance(before.eye) > 0.0);
        assert!(c.is_moving());

        for _ in 0..2000 {
            let _ = c.update();
        }
        assert!(!c.is_moving());
        let offset = c.pose().eye - c.pose().target;
        let azimuth = offset.x.atan2(offset.z);
        assert!((azimuth - expected_azimuth).abs() < 1e-3);
    }

    #[test]
    fn set_pose_discards_pending_motion() {
        let mut c = controller();
        c.rotate(Vec2::new(30.0, 30.0));
        c.pan(Vec2::new(10.0, 0.0));
        let pose = CameraPose::new(Vec3::new(27.0, 10.0, 0.0), Vec3::new(12.0, 2.0, 0.0));
        c.set_pose(pose);
        assert!(!c.is_moving());
        let after = c.update();
        assert!((after.eye - pose.eye).length() < 1e-3);
    }

    #[test]
    fn pose_outside_limits_is_held_until_orbit_input() {
        let mut c = controller();
        // Closer than min_distance (10) and below the horizon.
        let pose = CameraPose::new(Vec3::new(4.0, -1.0, 3.0), Vec3::ZERO);
        c.set_pose(pose);
        for _ in 0..10 {
            let held = c.update();
            assert!((held.eye - pose.eye).length() < 1e-4);
        }

        c.zoom(0.0);
        assert_eq!(c.distance(), CameraOptions::default().min_distance);
        c.rotate(Vec2::ZERO);
        let _ = c.update();
        assert!(c.polar_angle() <= FRAC_PI_2 + 1e-6);
    }

    #[test]
    fn pan_moves_focus_point() {
        let mut c = controller();
        c.pan(Vec2::new(100.0, 0.0));
        for _ in 0..2000 {
            let _ = c.update();
        }
        assert!(c.pose().target.length() > 0.0);
    }
}
