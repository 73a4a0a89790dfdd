use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::picking::Ray;

/// Camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
}

impl CameraPose {
    /// Pose at `eye` looking at `target`.
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    /// Component-wise linear interpolation of eye and target.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, t),
            target: self.target.lerp(other.target, t),
        }
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at the given pose with projection parameters from `options`.
    #[must_use]
    pub fn new(pose: CameraPose, aspect: f32, options: &CameraOptions) -> Self {
        Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Current eye/target pair.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye, self.target)
    }

    /// Move the camera to `pose`.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    /// Update the aspect ratio from a viewport size in pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses the [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`x`, `y` in `[-1, 1]`, `y` up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.build_matrix().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// World-space ray through a pixel of a `width` x `height` viewport.
    #[must_use]
    pub fn ray_from_screen(&self, x: f32, y: f32, width: u32, height: u32) -> Ray {
        let ndc = Vec2::new(
            (x / width.max(1) as f32) * 2.0 - 1.0,
            -(y / height.max(1) as f32) * 2.0 + 1.0,
        );
        self.ray_from_ndc(ndc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(
            CameraPose::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO),
            1.0,
            &CameraOptions::default(),
        )
    }

    #[test]
    fn pose_lerp_endpoints() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::X);
        let b = CameraPose::new(Vec3::new(10.0, 4.0, -2.0), Vec3::Y);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.eye, Vec3::new(5.0, 2.0, -1.0));
    }

    #[test]
    fn centre_ray_points_at_target() {
        let camera = test_camera();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4);
    }

    #[test]
    fn screen_centre_matches_ndc_origin() {
        let camera = test_camera();
        let a = camera.ray_from_screen(400.0, 300.0, 800, 600);
        let b = camera.ray_from_ndc(Vec2::ZERO);
        assert!((a.direction - b.direction).length() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = test_camera();
        camera.resize(1600, 800);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(0, 0);
        assert_eq!(camera.aspect, 1.0);
    }
}
