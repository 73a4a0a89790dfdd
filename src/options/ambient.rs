use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ambient Motion", inline)]
#[serde(default)]
/// Per-frame ambient motion: floating, water sway, smoke, clouds.
pub struct AmbientOptions {
    /// Vertical bob amplitude of the island, factory and houses.
    #[schemars(title = "Float Amplitude", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub float_amplitude: f32,
    /// Bob angular frequency, radians per millisecond.
    #[schemars(skip)]
    pub float_frequency: f32,
    /// Peak water roll in radians.
    #[schemars(title = "Water Sway", range(min = 0.0, max = 0.2), extend("step" = 0.01))]
    pub water_sway_amplitude: f32,
    /// Water roll angular frequency, radians per millisecond.
    #[schemars(skip)]
    pub water_sway_frequency: f32,
    /// Opacity lost by a smoke particle each frame.
    #[schemars(skip)]
    pub smoke_fade: f32,
    /// Height a smoke particle rises before it resets.
    #[schemars(skip)]
    pub smoke_rise: f32,
    /// Opacity a smoke particle resets to.
    #[schemars(skip)]
    pub smoke_opacity: f32,
    /// Opacity below which a smoke particle resets.
    #[schemars(skip)]
    pub smoke_min_opacity: f32,
    /// Full width of the per-frame horizontal smoke jitter.
    #[schemars(skip)]
    pub smoke_jitter: f32,
    /// Distance a cloud drifts from its origin before wrapping.
    #[schemars(skip)]
    pub cloud_wrap: f32,
}

impl Default for AmbientOptions {
    fn default() -> Self {
        Self {
            float_amplitude: 0.2,
            float_frequency: 0.001,
            water_sway_amplitude: 0.05,
            water_sway_frequency: 0.0005,
            smoke_fade: 0.002,
            smoke_rise: 5.0,
            smoke_opacity: 0.7,
            smoke_min_opacity: 0.1,
            smoke_jitter: 0.01,
            cloud_wrap: 30.0,
        }
    }
}
