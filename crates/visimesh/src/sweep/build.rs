//! Sweep orchestration: gather, sort, dropoffs behind silhouettes, gap splitting, refinement.

use nalgebra::Vector2;
use tracing::debug;

use super::refine::{cast_sample, find_edge, is_continuous};
use super::ring::{AngularRing, RingEdit};
use super::types::EdgePoint;
use crate::geom::cfg::{COINCIDENT_HIT_EPS, DROPOFF_NUDGE_DEG, FAN_SPLIT_DEG, MAX_FAN_GAP_DEG};
use crate::geom::{
    angular_gap, clip_segment_to_rect, normalize_or_zero, perp, wrap360, Boundary, MeshCfg,
    Quadrant,
};
use crate::obstacle::{ObstacleQuery, ShapeVertex};

/// Terminal state of one sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The ring in `SweepBuffers` is complete.
    Visible,
    /// The anchor lies inside an obstacle; the ring is empty.
    FullyOccluded,
}

/// Scratch storage for `sweep`, reused across calls by whoever owns it.
#[derive(Clone, Debug, Default)]
pub struct SweepBuffers {
    ring: AngularRing,
    gathered: Vec<EdgePoint>,
    edits: Vec<RingEdit>,
    seams: Vec<Seam>,
}

impl SweepBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring produced by the last `sweep`.
    pub fn ring(&self) -> &AngularRing {
        &self.ring
    }

    fn clear(&mut self) {
        self.ring.clear();
        self.gathered.clear();
        self.edits.clear();
        self.seams.clear();
    }
}

/// Which side of a silhouette vertex the occluded region (and its dropoff) is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// Normal rewrite for a silhouette vertex, applied after the read-only walk.
#[derive(Clone, Copy, Debug)]
struct Seam {
    index: usize,
    side: Side,
    normal: Vector2<f64>,
}

/// Build the ring for an anchor at the local origin.
///
/// Pipeline
/// 1. Broad phase over the boundary; an obstacle containing the anchor ends the
///    sweep as `FullyOccluded`.
/// 2. Obstacle vertices inside the boundary (optionally culled when back-facing or
///    occluded), points where front-facing obstacle edges cross the boundary, and
///    the boundary corners, sorted by angle.
/// 3. Dropoff samples behind silhouette vertices.
/// 4. Extra casts splitting any gap of `MAX_FAN_GAP_DEG` or more.
/// 5. Bisection of every adjacent pair that fails `is_continuous`.
pub fn sweep<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    cfg: &MeshCfg,
    buf: &mut SweepBuffers,
) -> SweepOutcome {
    buf.clear();
    let anchor = Vector2::zeros();
    let obstacles = query.obstacles_in_region(anchor, boundary.size(), 0.0);
    if let Some(o) = obstacles.iter().find(|o| o.shape.contains(anchor)) {
        debug!(owner = o.owner.0, "anchor inside obstacle, fully occluded");
        return SweepOutcome::FullyOccluded;
    }

    for o in &obstacles {
        let verts = o.shape.vertices();
        for (k, v) in verts.iter().enumerate() {
            if boundary.contains(v.position) {
                // Front-facing edges of a CCW loop run clockwise around the anchor:
                // the outgoing edge lies toward smaller angles.
                let sample = EdgePoint::vertex(v.position, v.out_normal, v.in_normal, true);
                if keep_vertex(query, cfg, &sample) {
                    buf.gathered.push(sample);
                }
            }
            let next = &verts[(k + 1) % verts.len()];
            gather_crossings(query, boundary, cfg, v, next, &mut buf.gathered);
        }
    }
    let obstacle_samples = buf.gathered.len();
    buf.ring.replace_sorted(buf.gathered.drain(..));

    for q in Quadrant::ALL {
        let (p, prev, next) = boundary.corner(q);
        if cfg.cull_occluded_vertices && is_occluded(query, cfg, p) {
            continue;
        }
        buf.ring.insert(EdgePoint::vertex(p, prev, next, false));
    }

    let dropoffs = insert_dropoffs(query, boundary, cfg, buf);
    let splits = split_wide_gaps(query, boundary, buf);
    let refined = resolve_discontinuities(query, boundary, cfg, buf);
    debug!(
        obstacles = obstacles.len(),
        obstacle_samples,
        dropoffs,
        splits,
        refined,
        samples = buf.ring.len(),
        "sweep complete"
    );
    SweepOutcome::Visible
}

/// Front-facing ⇔ the surface normal points toward the anchor.
#[inline]
fn faces_anchor(normal: Vector2<f64>, position: Vector2<f64>) -> bool {
    normal.dot(&(-position)) > 0.0
}

fn is_occluded<Q: ObstacleQuery + ?Sized>(query: &Q, cfg: &MeshCfg, point: Vector2<f64>) -> bool {
    query
        .cast_ray(Vector2::zeros(), point)
        .is_some_and(|hit| hit.fraction < cfg.occlusion_fraction_threshold)
}

fn keep_vertex<Q: ObstacleQuery + ?Sized>(query: &Q, cfg: &MeshCfg, s: &EdgePoint) -> bool {
    if cfg.cull_back_facing_vertices
        && !faces_anchor(s.prev_normal, s.position)
        && !faces_anchor(s.next_normal, s.position)
    {
        return false;
    }
    !(cfg.cull_occluded_vertices && is_occluded(query, cfg, s.position))
}

/// Samples where the edge `a → b` enters or leaves the boundary. Only front-facing
/// edges count; each sample joins the edge's surface to the wall it meets.
fn gather_crossings<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    cfg: &MeshCfg,
    a: &ShapeVertex,
    b: &ShapeVertex,
    out: &mut Vec<EdgePoint>,
) {
    let normal = a.out_normal;
    let Some((t0, t1)) = clip_segment_to_rect(a.position, b.position, boundary.half_size) else {
        return;
    };
    if t0 >= t1 {
        return;
    }
    let d = b.position - a.position;
    let ends = [(t0 > 0.0, t0, d), (t1 < 1.0, t1, -d)];
    for (crosses, t, inward) in ends {
        if !crosses {
            continue;
        }
        let p = a.position + d * t;
        if !faces_anchor(normal, p) {
            continue;
        }
        if cfg.cull_occluded_vertices && is_occluded(query, cfg, p) {
            continue;
        }
        let wall = boundary.wall_normal(p);
        // Walking inward along the edge turns counter-clockwise iff the cross
        // product is positive: the surface then lies toward larger angles.
        let sample = if p.x * inward.y - p.y * inward.x > 0.0 {
            EdgePoint::vertex(p, wall, normal, true)
        } else {
            EdgePoint::vertex(p, normal, wall, true)
        };
        out.push(sample);
    }
}

/// Whether `neighbor` carries on the front surface of silhouette vertex `v`,
/// in which case the two act as one occluder and no dropoff is needed.
fn continues_surface(v: &EdgePoint, neighbor: &EdgePoint, side: Side, cfg: &MeshCfg) -> bool {
    let front = match side {
        Side::After => v.prev_normal,
        Side::Before => v.next_normal,
    };
    let probe = EdgePoint {
        prev_normal: front,
        next_normal: front,
        ..*v
    };
    [neighbor.prev_normal, neighbor.next_normal]
        .into_iter()
        .any(|n| {
            let other = EdgePoint {
                prev_normal: n,
                next_normal: n,
                ..*neighbor
            };
            match side {
                Side::After => is_continuous(&probe, &other, cfg),
                Side::Before => is_continuous(&other, &probe, cfg),
            }
        })
}

/// Sample on whatever lies behind `v` along its anchor ray (hits coincident with
/// `v` skipped), or on the boundary wall if nothing does.
fn cast_behind<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    v: &EdgePoint,
) -> EdgePoint {
    let target = boundary.clamp_to_edge(v.position);
    let reach = target.norm();
    let vertex_fraction = if reach > 0.0 {
        v.position.norm() / reach
    } else {
        1.0
    };
    let behind = query
        .cast_ray_all(Vector2::zeros(), target)
        .into_iter()
        .find(|h| {
            h.fraction >= vertex_fraction && (h.point - v.position).norm() > COINCIDENT_HIT_EPS
        });
    match behind {
        Some(hit) => EdgePoint::mid_edge(hit.point, hit.normal, true),
        None => EdgePoint::mid_edge(target, boundary.wall_normal(target), false),
    }
}

/// Silhouette pass. A vertex with exactly one front-facing edge gets a dropoff
/// sample on its occluded side; both are marked degenerate and share the normal
/// of the seam joining them.
fn insert_dropoffs<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    cfg: &MeshCfg,
    buf: &mut SweepBuffers,
) -> usize {
    let ring = &buf.ring;
    if ring.len() < 2 {
        return 0;
    }
    for i in 0..ring.len() {
        let v = ring[i];
        if !v.on_surface || v.degenerate {
            continue;
        }
        let side = match (
            faces_anchor(v.prev_normal, v.position),
            faces_anchor(v.next_normal, v.position),
        ) {
            (true, false) => Side::After,
            (false, true) => Side::Before,
            _ => continue,
        };
        let neighbor = match side {
            Side::After => &ring[ring.next_index(i)],
            Side::Before => &ring[ring.prev_index(i)],
        };
        if continues_surface(&v, neighbor, side, cfg) {
            continue;
        }

        let mut dropoff = cast_behind(query, boundary, &v);
        let seam = normalize_or_zero(perp(dropoff.position - v.position));
        dropoff.degenerate = true;
        match side {
            Side::After => {
                dropoff.angle = wrap360(v.angle + DROPOFF_NUDGE_DEG);
                dropoff.prev_normal = seam;
            }
            Side::Before => {
                dropoff.angle = wrap360(v.angle - DROPOFF_NUDGE_DEG);
                dropoff.next_normal = seam;
            }
        }
        buf.seams.push(Seam {
            index: i,
            side,
            normal: seam,
        });
        buf.edits.push(ring.edit(dropoff));
    }

    for s in buf.seams.drain(..) {
        let v = &mut buf.ring[s.index];
        v.degenerate = true;
        match s.side {
            Side::After => v.next_normal = s.normal,
            Side::Before => v.prev_normal = s.normal,
        }
    }
    buf.ring.apply(&mut buf.edits)
}

/// Cast extra samples into every gap too wide for one fan triangle, so each gap
/// ends up at most `FAN_SPLIT_DEG`. An empty ring is seeded along the axes.
fn split_wide_gaps<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    buf: &mut SweepBuffers,
) -> usize {
    let ring = &buf.ring;
    let cast_at = |deg: f64| {
        let a = deg.to_radians();
        cast_sample(query, boundary, Vector2::new(a.cos(), a.sin()))
    };
    if ring.is_empty() {
        for deg in [0.0, 90.0, 180.0, 270.0] {
            buf.edits.push(ring.edit(cast_at(deg)));
        }
        return buf.ring.apply(&mut buf.edits);
    }
    for i in 0..ring.len() {
        let j = ring.next_index(i);
        let from = ring[i].angle;
        let mut gap = angular_gap(from, ring[j].angle);
        // The wrap pair of a ring whose samples all share one angle spans the full turn.
        if j == 0 && gap == 0.0 {
            gap = 360.0;
        }
        if gap < MAX_FAN_GAP_DEG {
            continue;
        }
        let pieces = (gap / FAN_SPLIT_DEG).ceil() as usize;
        for k in 1..pieces {
            let deg = wrap360(from + gap * k as f64 / pieces as f64);
            buf.edits.push(ring.edit(cast_at(deg)));
        }
    }
    buf.ring.apply(&mut buf.edits)
}

/// Discontinuity pass over the ring as it stood after the silhouette pass.
/// Refined samples take the abutting normal of the neighbor they continue.
fn resolve_discontinuities<Q: ObstacleQuery + ?Sized>(
    query: &Q,
    boundary: &Boundary,
    cfg: &MeshCfg,
    buf: &mut SweepBuffers,
) -> usize {
    let ring = &buf.ring;
    if ring.len() < 2 {
        return 0;
    }
    for i in 0..ring.len() {
        let a = &ring[i];
        let b = &ring[ring.next_index(i)];
        if is_continuous(a, b, cfg) {
            continue;
        }
        let bracket = find_edge(query, boundary, cfg, a, b);
        if bracket.min_moved {
            let mut m = bracket.min;
            if is_continuous(a, &m, cfg) {
                m.prev_normal = a.next_normal;
            }
            buf.edits.push(ring.edit(m));
        }
        if bracket.max_moved {
            let mut m = bracket.max;
            if is_continuous(&m, b, cfg) {
                m.next_normal = b.prev_normal;
            }
            buf.edits.push(ring.edit(m));
        }
    }
    buf.ring.apply(&mut buf.edits)
}
