//! Ambient motion applied once per frame: the island bob, water roll,
//! chimney smoke and drifting clouds.
//!
//! Sine terms are driven by wall time since startup. Smoke and clouds
//! advance a fixed step per frame.

use glam::Quat;
use rand::rngs::StdRng;
use rand::Rng;
use web_time::Duration;

use super::graph::{NodeId, SceneGraph};
use super::island::IslandLayout;
use crate::options::AmbientOptions;

/// A node that bobs around its resting height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingNode {
    /// Animated node.
    pub node: NodeId,
    /// Height with zero float offset.
    pub rest_y: f32,
}

/// Live state of one smoke particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeParticle {
    /// Particle node.
    pub node: NodeId,
    /// Height the particle resets to.
    pub base_y: f32,
    /// Rise per frame.
    pub speed: f32,
    /// Current opacity.
    pub opacity: f32,
}

/// Live state of one cloud cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudDrift {
    /// Cluster node.
    pub node: NodeId,
    /// Spawn x coordinate.
    pub origin_x: f32,
    /// Drift along +x per frame.
    pub speed: f32,
}

/// Drives the island's idle motion.
#[derive(Debug)]
pub struct AmbientAnimator {
    options: AmbientOptions,
    floating: Vec<FloatingNode>,
    water: Option<(NodeId, Quat)>,
    smoke: Vec<SmokeParticle>,
    clouds: Vec<CloudDrift>,
    rng: StdRng,
}

impl AmbientAnimator {
    /// Capture resting state from a freshly built layout.
    #[must_use]
    pub fn new(
        graph: &SceneGraph,
        layout: &IslandLayout,
        options: AmbientOptions,
        rng: StdRng,
    ) -> Self {
        let floating = std::iter::once(layout.island)
            .chain(std::iter::once(layout.factory))
            .chain(layout.houses.iter().copied())
            .filter_map(|node| {
                graph.node(node).map(|n| FloatingNode {
                    node,
                    rest_y: n.transform.translation.y,
                })
            })
            .collect();
        let water = graph
            .node(layout.water)
            .map(|n| (layout.water, n.transform.rotation));
        let smoke = layout
            .smoke
            .iter()
            .map(|spec| SmokeParticle {
                node: spec.node,
                base_y: spec.base_y,
                speed: spec.speed,
                opacity: options.smoke_opacity,
            })
            .collect();
        let clouds = layout
            .clouds
            .iter()
            .map(|spec| CloudDrift {
                node: spec.node,
                origin_x: spec.origin_x,
                speed: spec.speed,
            })
            .collect();

        Self {
            options,
            floating,
            water,
            smoke,
            clouds,
            rng,
        }
    }

    /// Vertical offset shared by every floating node at `elapsed`.
    #[must_use]
    pub fn float_offset(&self, elapsed: Duration) -> f32 {
        let t = millis(elapsed);
        (t * f64::from(self.options.float_frequency)).sin() as f32
            * self.options.float_amplitude
    }

    /// Water roll angle at `elapsed`.
    #[must_use]
    pub fn water_sway(&self, elapsed: Duration) -> f32 {
        let t = millis(elapsed);
        (t * f64::from(self.options.water_sway_frequency)).sin() as f32
            * self.options.water_sway_amplitude
    }

    /// Smoke particle state.
    #[must_use]
    pub fn smoke_particles(&self) -> &[SmokeParticle] {
        &self.smoke
    }

    /// Cloud drift state.
    #[must_use]
    pub fn clouds(&self) -> &[CloudDrift] {
        &self.clouds
    }

    /// Advance one frame.
    pub fn update(&mut self, graph: &mut SceneGraph, elapsed: Duration) {
        let offset = self.float_offset(elapsed);
        for floating in &self.floating {
            if let Some(node) = graph.node_mut(floating.node) {
                node.transform.translation.y = floating.rest_y + offset;
            }
        }

        if let Some((water, rest)) = self.water {
            let sway = self.water_sway(elapsed);
            if let Some(node) = graph.node_mut(water) {
                node.transform.rotation = rest * Quat::from_rotation_z(sway);
            }
        }

        self.update_smoke(graph);
        self.update_clouds(graph);
    }

    fn update_smoke(&mut self, graph: &mut SceneGraph) {
        let opts = &self.options;
        for particle in &mut self.smoke {
            let Some(node) = graph.node_mut(particle.node) else {
                continue;
            };
            let jitter_x = (self.rng.random::<f32>() - 0.5) * opts.smoke_jitter;
            let jitter_z = (self.rng.random::<f32>() - 0.5) * opts.smoke_jitter;
            let pos = &mut node.transform.translation;
            pos.y += particle.speed;
            pos.x += jitter_x;
            pos.z += jitter_z;
            particle.opacity -= opts.smoke_fade;

            if pos.y > particle.base_y + opts.smoke_rise
                || particle.opacity < opts.smoke_min_opacity
            {
                pos.y = particle.base_y;
                particle.opacity = opts.smoke_opacity;
            }
        }
    }

    fn update_clouds(&self, graph: &mut SceneGraph) {
        let wrap = self.options.cloud_wrap;
        for cloud in &self.clouds {
            if let Some(node) = graph.node_mut(cloud.node) {
                let x = &mut node.transform.translation.x;
                *x += cloud.speed;
                if *x > cloud.origin_x + wrap {
                    *x = cloud.origin_x - wrap;
                }
            }
        }
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
