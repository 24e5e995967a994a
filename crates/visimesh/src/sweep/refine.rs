//! Continuity predicate and bisection search for silhouette discontinuities.

use nalgebra::Vector2;
use tracing::trace;

use super::types::{EdgeBracket, EdgePoint};
use crate::geom::{
    angle360, angle_between_deg, angular_gap, perp, project_onto_line, wrap360, Boundary,
    MeshCfg,
};
use crate::obstacle::ObstacleQuery;

/// Whether `min` and `max` (in that angular order) lie on one unbroken surface.
///
/// Fails if the facing normals deviate by more than `angle_continuity_threshold`,
/// or if either sample sits further than `projection_offset_threshold` off the
/// other's surface line.
pub fn is_continuous(min: &EdgePoint, max: &EdgePoint, cfg: &MeshCfg) -> bool {
    if angle_between_deg(min.next_normal, max.prev_normal) > cfg.angle_continuity_threshold {
        return false;
    }
    let limit2 = cfg.projection_offset_threshold * cfg.projection_offset_threshold;
    let on_max = project_onto_line(min.position, perp(max.prev_normal), max.position);
    if (on_max - min.position).norm_squared() > limit2 {
        return false;
    }
    let on_min = project_onto_line(max.position, perp(min.next_normal), min.position);
    (on_min - max.position).norm_squared() <= limit2
}

/// Cast from the anchor through `through`, clamped to the boundary, and wrap the
/// result as a sample whose angle is that of `through`.
pub(crate) fn cast_sample<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    through: Vector2<f64>,
) -> EdgePoint {
    let target = boundary.clamp_to_edge(through);
    let sample = match query.cast_ray(Vector2::zeros(), target) {
        Some(hit) => EdgePoint::mid_edge(hit.point, hit.normal, true),
        None => EdgePoint::mid_edge(target, boundary.wall_normal(target), false),
    };
    sample.with_angle(angle360(through.x, through.y))
}

/// Direction halfway between two samples: the mean of their positions.
///
/// The mean is a chord midpoint, not the angular bisector. It is only replaced
/// by the bisector when it leaves the bracket (reflex gaps, opposite samples).
fn bisect_direction(min: &EdgePoint, max: &EdgePoint, gap: f64) -> Vector2<f64> {
    let mean = (min.position + max.position) * 0.5;
    let offset = angular_gap(min.angle, angle360(mean.x, mean.y));
    if mean.norm_squared() > 0.0 && offset > 0.0 && offset < gap {
        return mean;
    }
    let a = wrap360(min.angle + gap * 0.5).to_radians();
    Vector2::new(a.cos(), a.sin())
}

/// Locate the discontinuity between `start` and `end` by bisection.
///
/// Call only when `is_continuous(start, end)` is false. Each step casts one ray;
/// a continuous midpoint advances `min`, otherwise it becomes `max`. Stops when the
/// bracket is narrower than `edge_search_min_angle_threshold` or the iteration
/// budget runs out; the last bracket is the answer either way.
pub fn find_edge<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    cfg: &MeshCfg,
    start: &EdgePoint,
    end: &EdgePoint,
) -> EdgeBracket {
    let mut bracket = EdgeBracket::new(*start, *end);
    for step in 0..cfg.max_edge_search_iterations {
        let gap = angular_gap(bracket.min.angle, bracket.max.angle);
        if gap <= cfg.edge_search_min_angle_threshold {
            break;
        }
        let through = bisect_direction(&bracket.min, &bracket.max, gap);
        let mid = cast_sample(query, boundary, through);
        if is_continuous(&bracket.min, &mid, cfg) {
            bracket.min = mid;
            bracket.min_moved = true;
        } else {
            bracket.max = mid;
            bracket.max_moved = true;
        }
        trace!(step, gap, angle = mid.angle, "bisect");
    }
    bracket
}
