//! Fixed tolerances for the sweep (internal).
//!
//! Policy
//! - These are absolute, not scaled to the boundary. Callers working at very
//!   large or very small scales should revalidate them; user-facing thresholds
//!   belong in `MeshCfg` instead.

/// Distance below which a ray hit counts as coincident with the vertex the ray
/// was cast through (dropoff search skips such hits).
pub(crate) const COINCIDENT_HIT_EPS: f64 = 1e-4;
/// Angular offset (degrees) between a silhouette vertex and its dropoff sample,
/// toward the occluded side. Keeps ring angles distinct.
pub(crate) const DROPOFF_NUDGE_DEG: f64 = 1e-6;
/// Rings shorter than this are not triangulated.
pub(crate) const MIN_RING_LEN: usize = 3;
/// Adjacent ring samples at least this far apart (degrees) cannot form one fan
/// triangle; the gap is split with extra casts first.
pub(crate) const MAX_FAN_GAP_DEG: f64 = 180.0;
/// Widest gap (degrees) left after splitting.
pub(crate) const FAN_SPLIT_DEG: f64 = 90.0;
