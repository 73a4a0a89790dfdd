use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Timeline flight framing and timing.
///
/// Read once at startup; there is no runtime setter for the flight
/// duration.
pub struct NavigationOptions {
    /// Camera flight duration in milliseconds.
    #[schemars(skip)]
    pub flight_duration_ms: u64,
    /// Horizontal distance from the camera to the framed stop.
    #[schemars(title = "Camera Distance", range(min = 5.0, max = 40.0), extend("step" = 0.5))]
    pub camera_distance: f32,
    /// Absolute camera height while framing a stop.
    #[schemars(title = "Camera Height", range(min = 2.0, max = 30.0), extend("step" = 0.5))]
    pub camera_height: f32,
    /// Delay before the first stop is visited automatically, in
    /// milliseconds. `None` disables the intro visit.
    #[schemars(skip)]
    pub intro_delay_ms: Option<u64>,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            flight_duration_ms: 1000,
            camera_distance: 15.0,
            camera_height: 10.0,
            intro_delay_ms: Some(2000),
        }
    }
}
