use super::ray::{pick_nearest, Ray};
use crate::scene::{Node, NodeId, NodeTag, SceneGraph};

/// Maps picked scene nodes to timeline stops.
///
/// The nearest hit is walked up its parent chain until a node tagged with
/// a timeline index is found. Hits on water, clouds, smoke or the island
/// resolve to `None`, which callers treat as "ignore the click".
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionResolver;

impl SelectionResolver {
    /// Resolver instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Timeline index of the first tagged node on `picked`'s ancestor
    /// chain (including `picked` itself).
    #[must_use]
    pub fn resolve(&self, graph: &SceneGraph, picked: NodeId) -> Option<usize> {
        graph.ancestors(picked).find_map(|id| {
            graph
                .node(id)
                .and_then(Node::tag)
                .and_then(NodeTag::timeline_index)
        })
    }

    /// Cast `ray` and resolve the nearest hit only.
    #[must_use]
    pub fn pick(&self, graph: &SceneGraph, ray: &Ray) -> Option<usize> {
        let hit = pick_nearest(graph, ray)?;
        let resolved = self.resolve(graph, hit.node);
        log::debug!(
            "pick hit '{}' at {:.2} -> {resolved:?}",
            graph.node(hit.node).map_or("?", |n| n.name.as_str()),
            hit.distance
        );
        resolved
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{Aabb, Transform};

    #[test]
    fn window_of_tagged_house_resolves_to_its_index() {
        let mut graph = SceneGraph::new();
        let house = graph.add_root(Node::new("house").with_tag(NodeTag::Timeline(7)));
        let window = graph.add_child(house, Node::new("window"));
        assert_eq!(SelectionResolver::new().resolve(&graph, window), Some(7));
    }

    #[test]
    fn untagged_water_resolves_to_none() {
        let mut graph = SceneGraph::new();
        let water = graph.add_root(Node::new("water").with_tag(NodeTag::Water));
        assert_eq!(SelectionResolver::new().resolve(&graph, water), None);
    }

    #[test]
    fn nearest_tag_wins_in_nested_groups() {
        let mut graph = SceneGraph::new();
        let outer = graph.add_root(Node::new("outer").with_tag(NodeTag::Timeline(1)));
        let inner = graph.add_child(outer, Node::new("inner").with_tag(NodeTag::Timeline(2)));
        let leaf = graph.add_child(inner, Node::new("leaf"));
        assert_eq!(SelectionResolver::new().resolve(&graph, leaf), Some(2));
    }

    #[test]
    fn pick_uses_nearest_hit_only() {
        let mut graph = SceneGraph::new();
        // A smoke puff in front of a tagged house blocks the click.
        let house = graph.add_root(
            Node::new("house")
                .with_tag(NodeTag::Timeline(3))
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, -4.0))),
        );
        let _ = graph.add_child(
            house,
            Node::new("base").with_bounds(Aabb::from_size(Vec3::splat(2.0))),
        );
        let resolver = SelectionResolver::new();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert_eq!(resolver.pick(&graph, &ray), Some(3));

        let _ = graph.add_root(
            Node::new("smoke")
                .with_tag(NodeTag::Smoke)
                .with_bounds(Aabb::from_size(Vec3::splat(1.0))),
        );
        assert_eq!(resolver.pick(&graph, &ray), None);
    }
}
