//! Obstacles and the query adapter the sweep consumes.
//!
//! Purpose
//! - `Shape`: closed set of supported obstacle kinds with one "vertices of shape"
//!   operation. Rectangles produce a CCW vertex loop; kinds without a vertex
//!   representation (`Circle`) produce none and are only seen through ray casts.
//! - `ObstacleQuery`: the broad-phase + ray-cast interface the sweep depends on.
//!   Everything is expressed in the anchor-local frame (anchor at the origin).
//! - `Scene`: a brute-force in-memory implementation for tests, tools and benches.
//!
//! Code cross-refs: `sweep::sweep`, `sweep::find_edge`

mod query;
mod scene;
mod shape;

pub use query::{ObstacleQuery, RayHit};
pub use scene::Scene;
pub use shape::{Obstacle, OwnerId, Rect, SegmentHit, Shape, ShapeVertex};

#[cfg(test)]
mod tests;
