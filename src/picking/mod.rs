//! Pointer picking: ray casts against the scene graph and resolution of
//! hits to timeline stops.

mod ray;
mod resolver;

pub use ray::{pick_nearest, PickHit, Ray};
pub use resolver::SelectionResolver;
