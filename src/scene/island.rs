//! Procedural island: base, factory, timeline houses, water and clouds.
//!
//! Everything pickable gets local-space bounds sized to the primitive it
//! stands in for. Randomized placement (rocks, trees, clouds, smoke) is
//! drawn from the caller's RNG so a fixed seed reproduces the layout.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::{Quat, Vec3};
use rand::Rng;

use super::graph::{Aabb, Node, NodeId, NodeTag, SceneGraph, Transform};
use crate::options::SceneOptions;
use crate::timeline::Timeline;

/// Resting height of the factory group.
pub const FACTORY_HEIGHT: f32 = 1.5;
/// Radius of the water disc.
pub const WATER_RADIUS: f32 = 60.0;
/// Height of the water surface.
pub const WATER_LEVEL: f32 = -1.0;

/// Chimney tops smoke rises from, as `(x, z, lowest particle y)`.
const CHIMNEY_VENTS: [(f32, f32, f32); 2] = [(2.0, 2.0, 14.0), (-2.0, -2.0, 14.5)];
/// Vertical spacing between a chimney's particles at rest.
const SMOKE_SPACING: f32 = 0.5;

/// A smoke particle as placed at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeSpec {
    /// Particle node (child of the factory).
    pub node: NodeId,
    /// Height the particle resets to.
    pub base_y: f32,
    /// Rise per frame.
    pub speed: f32,
}

/// A cloud cluster as placed at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudSpec {
    /// Cluster node.
    pub node: NodeId,
    /// Spawn x coordinate the drift wraps around.
    pub origin_x: f32,
    /// Drift along +x per frame.
    pub speed: f32,
}

/// Node ids of the island's animated and pickable parts.
#[derive(Debug, Clone)]
pub struct IslandLayout {
    /// Island group (base, grass, beach, rocks, trees).
    pub island: NodeId,
    /// Factory group.
    pub factory: NodeId,
    /// One house per timeline entry, in entry order.
    pub houses: Vec<NodeId>,
    /// Water surface.
    pub water: NodeId,
    /// Chimney smoke particles.
    pub smoke: Vec<SmokeSpec>,
    /// Drifting cloud clusters.
    pub clouds: Vec<CloudSpec>,
}

impl IslandLayout {
    /// Populate `graph` with the island scene for `timeline`.
    pub fn build<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        timeline: &Timeline,
        options: &SceneOptions,
        rng: &mut R,
    ) -> Self {
        let island = build_island(graph, rng);
        let (factory, smoke) =
            build_factory(graph, options.smoke_per_chimney, rng);
        let houses = timeline
            .iter()
            .map(|entry| build_house(graph, entry.index(), entry.world_position()))
            .collect();
        let water = build_water(graph);
        let clouds = (0..options.cloud_count)
            .map(|i| build_cloud(graph, i, rng))
            .collect();

        log::info!(
            "island built: {} nodes, {} houses, {} smoke, {} clouds",
            graph.len(),
            timeline.len(),
            2 * options.smoke_per_chimney,
            options.cloud_count
        );

        Self {
            island,
            factory,
            houses,
            water,
            smoke,
            clouds,
        }
    }
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_translation(Vec3::new(x, y, z))
}

fn solid(name: &str, transform: Transform, size: Vec3) -> Node {
    Node::new(name)
        .with_transform(transform)
        .with_bounds(Aabb::from_size(size))
}

/// Random rotation about all three axes, each in `[0, π)`.
fn tumble<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    Quat::from_euler(
        glam::EulerRot::XYZ,
        rng.random::<f32>() * PI,
        rng.random::<f32>() * PI,
        rng.random::<f32>() * PI,
    )
}

fn build_island<R: Rng + ?Sized>(graph: &mut SceneGraph, rng: &mut R) -> NodeId {
    let island = graph.add_root(Node::new("island").with_tag(NodeTag::Island));

    let layers = [
        ("base", 0.0, Vec3::new(30.0, 3.0, 30.0)),
        ("grass", 1.5, Vec3::new(29.0, 0.8, 29.0)),
        ("beach", -0.5, Vec3::new(32.0, 0.5, 32.0)),
    ];
    for (name, y, size) in layers {
        let _ = graph.add_child(island, solid(name, at(0.0, y, 0.0), size));
    }

    for i in 0..12 {
        let angle = i as f32 / 12.0 * TAU;
        let distance: f32 = rng.random_range(14.0..16.0);
        let radius: f32 = rng.random_range(0.8..1.5);
        let transform = at(
            angle.cos() * distance,
            rng.random_range(-0.5..0.0),
            angle.sin() * distance,
        )
        .with_rotation(tumble(rng))
        .with_scale(Vec3::new(
            rng.random_range(1.0..1.5),
            rng.random_range(0.8..1.2),
            rng.random_range(1.0..1.5),
        ));
        let _ = graph.add_child(
            island,
            solid(&format!("rock_{i}"), transform, Vec3::splat(2.0 * radius)),
        );
    }

    for i in 0..8 {
        let wobble: f32 = rng.random_range(0.0..0.5);
        let angle = i as f32 / 8.0 * TAU + wobble;
        let distance: f32 = rng.random_range(10.0..13.0);
        let tree = graph.add_child(
            island,
            Node::new(format!("tree_{i}")).with_transform(at(
                angle.cos() * distance,
                0.0,
                angle.sin() * distance,
            )),
        );
        let _ = graph.add_child(
            tree,
            solid("trunk", at(0.0, 1.5, 0.0), Vec3::new(0.6, 1.5, 0.6)),
        );
        let _ = graph.add_child(
            tree,
            solid("crown", at(0.0, 3.0, 0.0), Vec3::new(2.0, 2.0, 2.0)),
        );
    }

    island
}

fn build_factory<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    per_chimney: usize,
    rng: &mut R,
) -> (NodeId, Vec<SmokeSpec>) {
    let factory = graph.add_root(
        Node::new("factory")
            .with_tag(NodeTag::Factory)
            .with_transform(at(0.0, FACTORY_HEIGHT, 0.0)),
    );

    let parts = [
        ("building", at(0.0, 5.0, 0.0), Vec3::new(6.0, 8.0, 6.0)),
        ("roof", at(0.0, 9.5, 0.0), Vec3::new(7.0, 1.0, 7.0)),
        ("chimney_a", at(2.0, 12.0, 2.0), Vec3::new(1.2, 4.0, 1.2)),
        ("chimney_b", at(-2.0, 12.5, -2.0), Vec3::new(1.6, 5.0, 1.6)),
        ("door", at(0.0, 2.25, 3.01), Vec3::new(1.5, 2.5, 0.02)),
    ];
    for (name, transform, size) in parts {
        let _ = graph.add_child(factory, solid(name, transform, size));
    }

    let pane = Vec3::new(1.0, 1.0, 0.02);
    for i in [-1.5, 0.0, 1.5] {
        for j in [3.0, 6.0] {
            let front = at(i, j, 3.01).with_rotation(Quat::from_rotation_y(PI));
            let east = at(3.01, j, i).with_rotation(Quat::from_rotation_y(-FRAC_PI_2));
            let west = at(-3.01, j, i).with_rotation(Quat::from_rotation_y(FRAC_PI_2));
            for transform in [front, east, west] {
                let _ = graph.add_child(factory, solid("window", transform, pane));
            }
        }
    }

    let mut smoke = Vec::with_capacity(per_chimney * CHIMNEY_VENTS.len());
    for i in 0..per_chimney {
        for (vx, vz, lowest) in CHIMNEY_VENTS {
            let base_y = lowest + i as f32 * SMOKE_SPACING;
            let offset_x: f32 = rng.random_range(-0.25..0.25);
            let offset_z: f32 = rng.random_range(-0.25..0.25);
            let scale = Vec3::new(
                rng.random_range(0.8..1.2),
                rng.random_range(0.8..1.2),
                rng.random_range(0.8..1.2),
            );
            let transform = at(vx + offset_x, base_y, vz + offset_z).with_scale(scale);
            let node = graph.add_child(
                factory,
                solid("smoke", transform, Vec3::splat(0.8)).with_tag(NodeTag::Smoke),
            );
            smoke.push(SmokeSpec {
                node,
                base_y,
                speed: rng.random_range(0.01..0.02),
            });
        }
    }

    (factory, smoke)
}

fn build_house(graph: &mut SceneGraph, index: usize, position: Vec3) -> NodeId {
    let facing = position.z.atan2(position.x) + PI;
    let house = graph.add_root(
        Node::new(format!("house_{index}"))
            .with_tag(NodeTag::Timeline(index))
            .with_transform(
                Transform::from_translation(position)
                    .with_rotation(Quat::from_rotation_y(facing)),
            ),
    );

    let _ = graph.add_child(house, solid("base", at(0.0, 0.0, 0.0), Vec3::splat(2.0)));
    let _ = graph.add_child(
        house,
        solid(
            "roof",
            at(0.0, 1.75, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
            Vec3::new(2.2, 1.5, 2.2),
        ),
    );
    let _ = graph.add_child(
        house,
        solid("window", at(0.0, 0.2, 1.01), Vec3::new(0.6, 0.6, 0.02)),
    );
    let _ = graph.add_child(
        house,
        solid("door", at(0.5, -0.5, 1.01), Vec3::new(0.6, 1.0, 0.02)),
    );
    house
}

fn build_water(graph: &mut SceneGraph) -> NodeId {
    // The disc lies in its local XY plane and is tipped flat.
    graph.add_root(
        Node::new("water")
            .with_tag(NodeTag::Water)
            .with_transform(
                at(0.0, WATER_LEVEL, 0.0)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            )
            .with_bounds(Aabb::new(
                Vec3::new(-WATER_RADIUS, -WATER_RADIUS, -0.25),
                Vec3::new(WATER_RADIUS, WATER_RADIUS, 0.25),
            )),
    )
}

fn build_cloud<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    index: usize,
    rng: &mut R,
) -> CloudSpec {
    let origin_x: f32 = rng.random_range(-30.0..30.0);
    let cluster = graph.add_root(
        Node::new(format!("cloud_{index}"))
            .with_tag(NodeTag::Cloud)
            .with_transform(
                at(
                    origin_x,
                    rng.random_range(15.0..20.0),
                    rng.random_range(-30.0..30.0),
                )
                .with_rotation(Quat::from_rotation_y(rng.random::<f32>() * TAU)),
            ),
    );

    for j in 0..5 {
        let radius: f32 = rng.random_range(1.0..1.5);
        let scale: f32 = rng.random_range(0.5..1.0);
        let transform = at(
            j as f32 * 0.8 - 1.5 + rng.random::<f32>() * 0.3,
            rng.random::<f32>() * 0.2,
            rng.random::<f32>() * 0.3,
        )
        .with_rotation(tumble(rng))
        .with_scale(Vec3::new(scale, scale * 0.6, scale));
        let _ = graph.add_child(
            cluster,
            solid("puff", transform, Vec3::splat(2.0 * radius)),
        );
    }

    CloudSpec {
        node: cluster,
        origin_x,
        speed: rng.random_range(0.01..0.02),
    }
}
