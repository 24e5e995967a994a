//! Curated surface for embedding the mesher (renderer / paint-erasure glue).
//!
//! Prefer these re-exports over reaching into submodules.

// Configuration and output
pub use crate::geom::{Boundary, MeshCfg};
pub use crate::mesh::{compute_uvs, form_triangles, Mesh, VisionMesher};
// Adapter boundary
pub use crate::obstacle::{Obstacle, ObstacleQuery, OwnerId, RayHit, Rect, Scene, Shape};
// Sweep internals, for tools that inspect rings
pub use crate::sweep::{find_edge, is_continuous, sweep, EdgePoint, SweepBuffers, SweepOutcome};
// Random scenes
pub use crate::scenegen::{draw_scene, ObstacleCount, ReplayToken, SceneCfg};
