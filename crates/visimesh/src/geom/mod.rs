//! 2D geometry for the radial sweep (anchor-local frame, anchor at the origin).
//!
//! Purpose
//! - Small, total primitives the sweep relies on: rectangle membership and edge
//!   clamping, quadrant detection, [0,360) angles, line projection.
//! - `Boundary` (the axis-aligned mesh extent) and `MeshCfg` (sweep thresholds).
//!
//! Conventions
//! - Every primitive is total: zero-magnitude vectors or axes produce a defined
//!   fallback (zero vector, zero angle) instead of NaN or a panic.
//! - Angles handed between modules are degrees in [0,360), counter-clockwise from +x.
//!
//! Code cross-refs: `sweep::{EdgePoint, is_continuous}`, `mesh::compute_uvs`

pub(crate) mod cfg;
mod types;
mod util;

pub use types::{Boundary, MeshCfg};
pub use util::{
    angle360, angle_between_deg, angular_gap, clamp_to_rect_edge, clip_segment_to_rect,
    normalize_or_zero, perp, point_in_rect, project_onto_line, quadrant, wrap360, Quadrant,
};

#[cfg(test)]
mod tests;
