//! CPU ray casting against node pick bounds.

use glam::Vec3;

use crate::scene::{Aabb, NodeId, SceneGraph};

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here).
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Entry distance into `bounds` (slab test), or `None` on a miss.
    /// Returns `0.0` when the origin is inside the box.
    #[must_use]
    pub fn intersect_aabb(&self, bounds: &Aabb) -> Option<f32> {
        slab_test(self.origin, self.direction, bounds)
    }
}

fn slab_test(origin: Vec3, direction: Vec3, bounds: &Aabb) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (bounds.min - origin) * inv;
    let t2 = (bounds.max - origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    (t_far >= t_near.max(0.0)).then_some(t_near.max(0.0))
}

/// A ray hit on a pickable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// The node whose bounds were hit.
    pub node: NodeId,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space point where the ray enters the bounds.
    pub point: Vec3,
}

/// Nearest pickable node along `ray`.
///
/// Bounds are tested in each node's local space, so rotated and scaled
/// nodes are hit exactly on their oriented boxes.
#[must_use]
pub fn pick_nearest(graph: &SceneGraph, ray: &Ray) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for (id, node) in graph.iter() {
        let Some(bounds) = node.bounds() else {
            continue;
        };
        let world = graph.world_matrix(id);
        if world.determinant().abs() < f32::EPSILON {
            continue;
        }
        let inv = world.inverse();
        let local_origin = inv.transform_point3(ray.origin);
        // Not renormalized: the hit parameter stays in world units.
        let local_dir = inv.transform_vector3(ray.direction);
        let Some(distance) = slab_test(local_origin, local_dir, bounds) else {
            continue;
        };
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(PickHit {
                node: id,
                distance,
                point: ray.at(distance),
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::scene::{Node, Transform};

    #[test]
    fn slab_hit_and_miss() {
        let bounds = Aabb::from_size(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert_eq!(ray.intersect_aabb(&bounds), Some(9.0));

        let miss = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        assert_eq!(miss.intersect_aabb(&bounds), None);

        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert_eq!(behind.intersect_aabb(&bounds), None);

        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(inside.intersect_aabb(&bounds), Some(0.0));
    }

    #[test]
    fn nearest_of_two_hits_wins() {
        let mut graph = SceneGraph::new();
        let far = graph.add_root(
            Node::new("far")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)))
                .with_bounds(Aabb::from_size(Vec3::ONE)),
        );
        let near = graph.add_root(
            Node::new("near")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)))
                .with_bounds(Aabb::from_size(Vec3::ONE)),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let hit = pick_nearest(&graph, &ray).unwrap();
        assert_eq!(hit.node, near);
        assert!((hit.distance - 7.5).abs() < 1e-5);
        assert_ne!(hit.node, far);
    }

    #[test]
    fn scaled_and_rotated_bounds() {
        let mut graph = SceneGraph::new();
        // A thin slab, rotated to lie flat and scaled up.
        let node = graph.add_root(
            Node::new("disk")
                .with_transform(
                    Transform::from_translation(Vec3::new(0.0, -1.0, 0.0))
                        .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                        .with_scale(Vec3::splat(2.0)),
                )
                .with_bounds(Aabb::new(Vec3::new(-1.0, -1.0, -0.1), Vec3::new(1.0, 1.0, 0.1))),
        );
        let down = Ray::new(Vec3::new(1.5, 10.0, 0.0), Vec3::NEG_Y);
        let hit = pick_nearest(&graph, &down).unwrap();
        assert_eq!(hit.node, node);
        assert!((hit.distance - 10.8).abs() < 1e-4);

        let outside = Ray::new(Vec3::new(2.5, 10.0, 0.0), Vec3::NEG_Y);
        assert!(pick_nearest(&graph, &outside).is_none());
    }

    #[test]
    fn unbounded_nodes_are_ignored() {
        let mut graph = SceneGraph::new();
        let _ = graph.add_root(Node::new("group"));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(pick_nearest(&graph, &ray).is_none());
    }
}
