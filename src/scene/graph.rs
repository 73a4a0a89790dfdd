//! Arena scene graph with typed node tags.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Each
//! node carries a local [`Transform`], an optional [`NodeTag`] and optional
//! local-space pick bounds. World transforms are composed on demand by
//! walking the parent chain.

use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Strongly-typed marker attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// Root of a timeline stop (a house), carrying its entry index.
    Timeline(usize),
    /// The island group.
    Island,
    /// The factory group.
    Factory,
    /// The water surface.
    Water,
    /// A cloud cluster.
    Cloud,
    /// A chimney smoke particle.
    Smoke,
}

impl NodeTag {
    /// Timeline index if this is a timeline tag.
    #[must_use]
    pub fn timeline_index(self) -> Option<usize> {
        match self {
            Self::Timeline(index) => Some(index),
            _ => None,
        }
    }
}

/// Local translation, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Non-uniform scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform translated to `translation`.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Replace the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

/// Axis-aligned box in a node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning `min`..`max`.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centred on the origin with the given full extents.
    #[must_use]
    pub fn from_size(size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(-half, half)
    }
}

/// A scene node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name.
    pub name: String,
    /// Local transform.
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: Option<NodeTag>,
    bounds: Option<Aabb>,
}

impl Node {
    /// Untagged, unbounded node at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            tag: None,
            bounds: None,
        }
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Attach a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: NodeTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Make the node pickable with local-space bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Parent node, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached tag.
    #[must_use]
    pub fn tag(&self) -> Option<NodeTag> {
        self.tag
    }

    /// Local-space pick bounds.
    #[must_use]
    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }
}

/// Flat node storage with parent links.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    /// Timeline index → tagged node.
    timeline_nodes: FxHashMap<usize, NodeId>,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root nodes in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Insert a root node.
    pub fn add_root(&mut self, node: Node) -> NodeId {
        self.insert(None, node)
    }

    /// Insert `node` under `parent`. An id from another graph is treated as
    /// absent and the node becomes a root.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        if self.nodes.get(parent.index()).is_none() {
            log::warn!(
                "add_child: unknown parent {parent:?}, inserting '{}' as root",
                node.name
            );
            return self.insert(None, node);
        }
        self.insert(Some(parent), node)
    }

    fn insert(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent;
        node.children.clear();
        if let Some(NodeTag::Timeline(index)) = node.tag {
            if let Some(previous) = self.timeline_nodes.insert(index, id) {
                log::warn!(
                    "timeline index {index} re-tagged: {previous:?} -> {id:?}"
                );
            }
        }
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable access to a node (transform edits).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// `id` followed by each ancestor up to its root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.node(id).map(|_| id),
        }
    }

    /// Local-to-world matrix of `id`.
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        for ancestor in self.ancestors(id) {
            if let Some(node) = self.node(ancestor) {
                matrix = node.transform.matrix() * matrix;
            }
        }
        matrix
    }

    /// World-space origin of `id`.
    #[must_use]
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id)
            .map(|_| self.world_matrix(id).transform_point3(Vec3::ZERO))
    }

    /// Node tagged with timeline index `index`.
    #[must_use]
    pub fn timeline_node(&self, index: usize) -> Option<NodeId> {
        self.timeline_nodes.get(&index).copied()
    }

    /// All nodes carrying `tag`, in insertion order.
    pub fn find_tagged(&self, tag: NodeTag) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, node)| node.tag == Some(tag))
            .map(|(id, _)| id)
    }

    /// Iterate over `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

/// Iterator over a node and its ancestors, leaf first.
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn children_inherit_parent_transform() {
        let mut graph = SceneGraph::new();
        let house = graph.add_root(
            Node::new("house")
                .with_transform(Transform::from_translation(Vec3::new(12.0, 2.0, 0.0)))
                .with_tag(NodeTag::Timeline(0)),
        );
        let window = graph.add_child(
            house,
            Node::new("window")
                .with_transform(Transform::from_translation(Vec3::new(0.0, 0.2, 1.0))),
        );

        let pos = graph.world_position(window).unwrap();
        assert!((pos - Vec3::new(12.0, 2.2, 1.0)).length() < 1e-5);
        assert_eq!(graph.parent(window), Some(house));
        assert_eq!(graph.node(house).unwrap().children(), &[window]);
    }

    #[test]
    fn rotation_applies_to_child_offsets() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root(Node::new("spun").with_transform(
            Transform::default().with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        ));
        let child = graph.add_child(
            parent,
            Node::new("child").with_transform(Transform::from_translation(Vec3::Z)),
        );
        let pos = graph.world_position(child).unwrap();
        assert!((pos - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut graph = SceneGraph::new();
        let a = graph.add_root(Node::new("a"));
        let b = graph.add_child(a, Node::new("b"));
        let c = graph.add_child(b, Node::new("c"));
        let chain: Vec<_> = graph.ancestors(c).collect();
        assert_eq!(chain, vec![c, b, a]);
        assert_eq!(graph.roots(), &[a]);
    }

    #[test]
    fn timeline_tags_are_indexed() {
        let mut graph = SceneGraph::new();
        let _ = graph.add_root(Node::new("water").with_tag(NodeTag::Water));
        let house = graph.add_root(Node::new("house").with_tag(NodeTag::Timeline(7)));
        assert_eq!(graph.timeline_node(7), Some(house));
        assert_eq!(graph.timeline_node(3), None);
        assert_eq!(graph.find_tagged(NodeTag::Water).count(), 1);
    }

    #[test]
    fn foreign_parent_becomes_root() {
        let mut other = SceneGraph::new();
        for i in 0..5 {
            let _ = other.add_root(Node::new(format!("n{i}")));
        }
        let foreign = other.roots()[4];

        let mut graph = SceneGraph::new();
        let id = graph.add_child(foreign, Node::new("orphan"));
        assert_eq!(graph.parent(id), None);
        assert_eq!(graph.roots(), &[id]);
    }

    #[test]
    fn aabb_normalizes_corners() {
        let b = Aabb::new(Vec3::ONE, -Vec3::ONE);
        assert_eq!(b.min, -Vec3::ONE);
        assert_eq!(b.max, Vec3::ONE);
        assert_eq!(Aabb::from_size(Vec3::new(2.0, 4.0, 6.0)).max, Vec3::new(1.0, 2.0, 3.0));
    }
}
