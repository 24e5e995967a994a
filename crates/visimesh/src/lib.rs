//! Radial visibility meshes.
//!
//! Given an anchor, an axis-aligned boundary and rectangular obstacles, build a
//! star-shaped polygon approximating the unoccluded area around the anchor and
//! fan-triangulate it. Silhouette discontinuities that ray casts alone cannot
//! reveal are located by bisection on a continuity predicate.
//!
//! All geometry is in the anchor-local frame: the anchor is the origin and the
//! boundary is centered on it. Obstacles and rays come from an `ObstacleQuery`.
//!
//! Layout
//! - `geom`: primitives, `Boundary`, `MeshCfg`.
//! - `obstacle`: shape kinds, the query trait, in-memory `Scene`.
//! - `sweep`: samples, angular ring, continuity, bisection, orchestration.
//! - `mesh`: triangulation and the reusable `VisionMesher`.
//! - `scenegen`: reproducible random scenes for tests and benches.

pub mod api;
pub mod geom;
pub mod mesh;
pub mod obstacle;
pub mod scenegen;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Boundary, MeshCfg};
pub use mesh::{Mesh, VisionMesher};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{Boundary, MeshCfg};
    pub use crate::mesh::{Mesh, VisionMesher};
    pub use crate::obstacle::{Obstacle, ObstacleQuery, OwnerId, RayHit, Rect, Scene, Shape};
    pub use crate::sweep::{EdgePoint, SweepOutcome};
    pub use nalgebra::Vector2 as Vec2;
}
