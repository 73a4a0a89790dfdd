//! Authoritative scene: the node graph, the island built into it, and the
//! idle motion that runs over it every frame.
//!
//! Everything pickable is a node in the [`SceneGraph`]. Timeline stops are
//! the nodes carrying a [`NodeTag::Timeline`] tag; the picking layer walks
//! up from whatever was hit until it finds one.

mod ambient;
mod graph;
mod island;
mod provider;

pub use ambient::{AmbientAnimator, CloudDrift, FloatingNode, SmokeParticle};
pub use graph::{Aabb, Ancestors, Node, NodeId, NodeTag, SceneGraph, Transform};
pub use island::{
    CloudSpec, IslandLayout, SmokeSpec, FACTORY_HEIGHT, WATER_LEVEL,
    WATER_RADIUS,
};
pub use provider::SceneProvider;
