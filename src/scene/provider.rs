use glam::Vec3;

use crate::camera::CameraPose;

/// What the timeline navigator needs from whatever owns the camera and the
/// scene.
///
/// The engine implements this over its own camera and [`SceneGraph`];
/// embedders driving a different renderer implement it over theirs.
///
/// [`SceneGraph`]: super::SceneGraph
pub trait SceneProvider {
    /// Current camera pose.
    fn camera_pose(&self) -> CameraPose;

    /// Move the camera.
    fn set_camera_pose(&mut self, pose: CameraPose);

    /// Live world position of a timeline entry's marker, if the scene has
    /// one.
    fn entry_world_position(&self, index: usize) -> Option<Vec3>;
}
