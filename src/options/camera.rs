use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position before the first flight.
    #[schemars(skip)]
    pub initial_eye: [f32; 3],
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Fraction of pending orbit motion applied per frame (0 = undamped).
    #[schemars(title = "Damping", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub damping: f32,
    /// Closest orbit distance.
    #[schemars(title = "Min Distance", range(min = 1.0, max = 50.0))]
    pub min_distance: f32,
    /// Farthest orbit distance.
    #[schemars(title = "Max Distance", range(min = 10.0, max = 200.0))]
    pub max_distance: f32,
    /// Largest angle down from straight overhead, in radians.
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            initial_eye: [20.0, 20.0, 20.0],
            rotate_speed: 0.5,
            pan_speed: 0.5,
            zoom_speed: 0.1,
            damping: 0.05,
            min_distance: 10.0,
            max_distance: 50.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
        }
    }
}
