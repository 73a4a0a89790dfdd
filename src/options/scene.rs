use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timeline::RingPlacement;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Island layout parameters.
pub struct SceneOptions {
    /// Radius of the ring the houses stand on.
    #[schemars(title = "House Ring Radius", range(min = 6.0, max = 14.0), extend("step" = 0.5))]
    pub ring_radius: f32,
    /// Resting height of each house.
    #[schemars(skip)]
    pub house_height: f32,
    /// Number of cloud clusters.
    #[schemars(title = "Clouds", range(min = 0, max = 32))]
    pub cloud_count: usize,
    /// Smoke particles per chimney.
    #[schemars(title = "Smoke Particles", range(min = 0, max = 40))]
    pub smoke_per_chimney: usize,
    /// Seed for cloud placement and smoke jitter. Random when unset.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ring_radius: 12.0,
            house_height: 2.0,
            cloud_count: 12,
            smoke_per_chimney: 10,
            seed: None,
        }
    }
}

impl SceneOptions {
    /// Ring the timeline stops are placed on.
    #[must_use]
    pub fn ring(&self) -> RingPlacement {
        RingPlacement {
            radius: self.ring_radius,
            height: self.house_height,
        }
    }
}
