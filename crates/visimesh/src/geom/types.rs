//! Boundary rectangle and sweep configuration.
//!
//! - `Boundary`: axis-aligned rectangle centered on the anchor; bounds the mesh.
//! - `MeshCfg`: user-facing thresholds and culling switches, clamped (never
//!   rejected) by `MeshCfg::clamped`.

use nalgebra::Vector2;

use super::util::{clamp_to_rect_edge, point_in_rect, quadrant, Quadrant};

/// Axis-aligned rectangle with half-extents `half_size`, centered at the local origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub half_size: Vector2<f64>,
}

impl Boundary {
    /// Full width/height; negative or non-finite extents clamp to 0.
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_half_size(Vector2::new(width * 0.5, height * 0.5))
    }

    pub fn from_half_size(half_size: Vector2<f64>) -> Self {
        let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            half_size: Vector2::new(fix(half_size.x), fix(half_size.y)),
        }
    }

    #[inline]
    pub fn size(&self) -> Vector2<f64> {
        self.half_size * 2.0
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        point_in_rect(p, self.half_size)
    }

    /// Point on the boundary edge in the direction of `p`.
    #[inline]
    pub fn clamp_to_edge(&self, p: Vector2<f64>) -> Vector2<f64> {
        clamp_to_rect_edge(p, self.half_size, true)
    }

    /// Inward unit normal of the wall that `p` (assumed on the edge) lies on.
    /// Corners resolve to the vertical wall.
    pub fn wall_normal(&self, p: Vector2<f64>) -> Vector2<f64> {
        let h = self.half_size;
        let s = quadrant(p).signs();
        if p.x.abs() * h.y >= p.y.abs() * h.x {
            Vector2::new(-s.x, 0.0)
        } else {
            Vector2::new(0.0, -s.y)
        }
    }

    /// Corner in quadrant `q` as `(position, previous_normal, next_normal)`.
    ///
    /// Previous/next follow increasing angle: the corner at (+w,+h) has the right
    /// wall before it and the top wall after it. Normals point inward.
    pub fn corner(&self, q: Quadrant) -> (Vector2<f64>, Vector2<f64>, Vector2<f64>) {
        let s = q.signs();
        let position = self.half_size.component_mul(&s);
        let vertical = Vector2::new(-s.x, 0.0);
        let horizontal = Vector2::new(0.0, -s.y);
        // In the first and third quadrants the vertical wall comes first.
        match q {
            Quadrant::First | Quadrant::Third => (position, vertical, horizontal),
            Quadrant::Second | Quadrant::Fourth => (position, horizontal, vertical),
        }
    }
}

/// Sweep configuration (thresholds in degrees where angular).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshCfg {
    /// Bisection budget per discontinuity, [0,32].
    pub max_edge_search_iterations: u32,
    /// Bisection stops once the bracket is this narrow (degrees), [0.001,10].
    pub edge_search_min_angle_threshold: f64,
    /// Maximum perpendicular offset between two samples on one surface, >= 0.01.
    pub projection_offset_threshold: f64,
    /// Maximum normal deviation between two samples on one surface (degrees), [0.1,180].
    pub angle_continuity_threshold: f64,
    /// A vertex whose anchor ray hits something before this fraction is occluded, [0,1].
    pub occlusion_fraction_threshold: f64,
    pub cull_back_facing_vertices: bool,
    pub cull_occluded_vertices: bool,
    pub cull_continuous_vertices: bool,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            max_edge_search_iterations: 10,
            edge_search_min_angle_threshold: 0.01,
            projection_offset_threshold: 0.05,
            angle_continuity_threshold: 5.0,
            occlusion_fraction_threshold: 0.999,
            cull_back_facing_vertices: true,
            cull_occluded_vertices: true,
            cull_continuous_vertices: false,
        }
    }
}

impl MeshCfg {
    pub const MAX_EDGE_SEARCH_ITERATIONS: u32 = 32;

    /// Copy with every field clamped into its documented range. NaN falls back
    /// to the default for that field.
    pub fn clamped(self) -> Self {
        let d = Self::default();
        let clamp = |v: f64, lo: f64, hi: f64, fallback: f64| {
            if v.is_nan() {
                fallback
            } else {
                v.clamp(lo, hi)
            }
        };
        Self {
            max_edge_search_iterations: self
                .max_edge_search_iterations
                .min(Self::MAX_EDGE_SEARCH_ITERATIONS),
            edge_search_min_angle_threshold: clamp(
                self.edge_search_min_angle_threshold,
                0.001,
                10.0,
                d.edge_search_min_angle_threshold,
            ),
            projection_offset_threshold: clamp(
                self.projection_offset_threshold,
                0.01,
                f64::MAX,
                d.projection_offset_threshold,
            ),
            angle_continuity_threshold: clamp(
                self.angle_continuity_threshold,
                0.1,
                180.0,
                d.angle_continuity_threshold,
            ),
            occlusion_fraction_threshold: clamp(
                self.occlusion_fraction_threshold,
                0.0,
                1.0,
                d.occlusion_fraction_threshold,
            ),
            ..self
        }
    }
}
