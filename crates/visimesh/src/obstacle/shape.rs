use nalgebra::{Rotation2, Vector2};

use crate::geom::normalize_or_zero;

/// Opaque identifier of the thing an obstacle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u64);

/// Oriented rectangle: `half_size` extents around `center`, rotated by `rotation` radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vector2<f64>,
    pub half_size: Vector2<f64>,
    pub rotation: f64,
}

impl Rect {
    pub fn new(center: Vector2<f64>, size: Vector2<f64>, rotation: f64) -> Self {
        Self {
            center,
            half_size: size.map(|v| v.abs() * 0.5),
            rotation,
        }
    }

    pub fn axis_aligned(center: Vector2<f64>, size: Vector2<f64>) -> Self {
        Self::new(center, size, 0.0)
    }

    /// Corners in counter-clockwise order, starting at local (-w,-h).
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        let rot = Rotation2::new(self.rotation);
        let h = self.half_size;
        [
            Vector2::new(-h.x, -h.y),
            Vector2::new(h.x, -h.y),
            Vector2::new(h.x, h.y),
            Vector2::new(-h.x, h.y),
        ]
        .map(|c| self.center + rot * c)
    }

    fn to_local(&self, p: Vector2<f64>) -> Vector2<f64> {
        Rotation2::new(-self.rotation) * (p - self.center)
    }
}

/// A vertex of an obstacle loop with the outward normals of its two edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeVertex {
    pub position: Vector2<f64>,
    /// Edge arriving from the previous vertex (loop order).
    pub in_normal: Vector2<f64>,
    /// Edge leaving toward the next vertex (loop order).
    pub out_normal: Vector2<f64>,
}

/// Intersection of a segment with one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub fraction: f64,
    pub point: Vector2<f64>,
    pub normal: Vector2<f64>,
}

/// Supported obstacle shape kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rect(Rect),
    /// Ray-castable but without a vertex loop; the sweep only finds its outline
    /// through edge refinement.
    Circle { center: Vector2<f64>, radius: f64 },
}

impl Shape {
    /// CCW vertex loop; empty for kinds without one.
    pub fn vertices(&self) -> Vec<ShapeVertex> {
        match self {
            Shape::Rect(r) => loop_vertices(&r.corners()),
            Shape::Circle { .. } => Vec::new(),
        }
    }

    /// Strict interior membership (touching the outline does not count).
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        match self {
            Shape::Rect(r) => {
                let l = r.to_local(p);
                l.x.abs() < r.half_size.x && l.y.abs() < r.half_size.y
            }
            Shape::Circle { center, radius } => (p - center).norm_squared() < radius * radius,
        }
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn aabb(&self) -> (Vector2<f64>, Vector2<f64>) {
        match self {
            Shape::Rect(r) => {
                let cs = r.corners();
                let mut lo = cs[0];
                let mut hi = cs[0];
                for c in &cs[1..] {
                    lo = lo.inf(c);
                    hi = hi.sup(c);
                }
                (lo, hi)
            }
            Shape::Circle { center, radius } => {
                let r = Vector2::repeat(radius.abs());
                (center - r, center + r)
            }
        }
    }

    /// Every crossing of the segment `origin → target` with the outline, unordered.
    pub fn intersect_segment(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Vec<SegmentHit> {
        let d = target - origin;
        let mut out = Vec::new();
        match self {
            Shape::Rect(r) => {
                let cs = r.corners();
                for k in 0..cs.len() {
                    let p = cs[k];
                    let q = cs[(k + 1) % cs.len()];
                    if let Some(t) = segment_parameter(origin, d, p, q) {
                        out.push(SegmentHit {
                            fraction: t,
                            point: origin + d * t,
                            normal: outward_normal(p, q),
                        });
                    }
                }
            }
            Shape::Circle { center, radius } => {
                let f = origin - center;
                let a = d.norm_squared();
                let b = 2.0 * f.dot(&d);
                let c = f.norm_squared() - radius * radius;
                let disc = b * b - 4.0 * a * c;
                if a <= 0.0 || disc < 0.0 {
                    return out;
                }
                let sq = disc.sqrt();
                let roots = [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)];
                let count = if sq == 0.0 { 1 } else { 2 };
                for &t in &roots[..count] {
                    if (0.0..=1.0).contains(&t) {
                        let point = origin + d * t;
                        out.push(SegmentHit {
                            fraction: t,
                            point,
                            normal: normalize_or_zero(point - center),
                        });
                    }
                }
            }
        }
        out
    }
}

/// An obstacle as returned by the broad phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub owner: OwnerId,
    pub shape: Shape,
}

/// For CCW loop order the outward normal is the edge rotated 90° clockwise.
#[inline]
fn outward_normal(p: Vector2<f64>, q: Vector2<f64>) -> Vector2<f64> {
    let e = q - p;
    normalize_or_zero(Vector2::new(e.y, -e.x))
}

fn loop_vertices(corners: &[Vector2<f64>]) -> Vec<ShapeVertex> {
    let n = corners.len();
    (0..n)
        .map(|k| {
            let prev = corners[(k + n - 1) % n];
            let cur = corners[k];
            let next = corners[(k + 1) % n];
            ShapeVertex {
                position: cur,
                in_normal: outward_normal(prev, cur),
                out_normal: outward_normal(cur, next),
            }
        })
        .collect()
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Parameter `t` in [0,1] where `origin + t·d` crosses segment `p → q`, if any.
fn segment_parameter(
    origin: Vector2<f64>,
    d: Vector2<f64>,
    p: Vector2<f64>,
    q: Vector2<f64>,
) -> Option<f64> {
    let s = q - p;
    let denom = cross(d, s);
    if denom.abs() <= 1e-12 * d.norm() * s.norm() || denom == 0.0 {
        return None;
    }
    let w = p - origin;
    let t = cross(w, s) / denom;
    let u = cross(w, d) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}
