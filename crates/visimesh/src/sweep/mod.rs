//! Radial sweep: obstacle silhouettes → angle-sorted ring of samples.
//!
//! Purpose
//! - Gather obstacle vertices, boundary crossings of obstacle edges and boundary
//!   corners, sort them by angle, inject dropoff samples behind silhouette
//!   vertices, split gaps too wide for a fan triangle, then bisect every remaining
//!   discontinuity to locate the silhouette edges ray queries alone miss.
//!
//! Why this design
//! - Both passes are two-phase: a read-only walk over the ring collects
//!   `RingEdit`s, then `AngularRing::apply` merges them in one linear pass.
//!   Indices seen during a walk are never invalidated by its own inserts.
//! - All scratch storage lives in `SweepBuffers`, owned by the caller and reused
//!   across invocations; nothing is shared between instances.
//!
//! Known limitation
//! - Bisection assumes one continuity sign change per gap. Interleaved
//!   obstacles inside a single gap can make it converge on the wrong transition.
//!
//! Code cross-refs: `geom::{Boundary, MeshCfg}`, `obstacle::ObstacleQuery`, `mesh`

mod build;
mod refine;
mod ring;
mod types;

pub use build::{sweep, SweepBuffers, SweepOutcome};
pub use refine::{find_edge, is_continuous};
pub use ring::{AngularRing, RingEdit};
pub use types::{EdgeBracket, EdgePoint};
