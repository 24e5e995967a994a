//! Fan triangulation of the sweep ring and the per-instance mesher.
//!
//! Purpose
//! - Turn the finished ring into `[anchor] + ring` vertices, a triangle fan around
//!   the anchor, and UVs normalized to the boundary.
//! - `VisionMesher` owns the configuration and every buffer it reuses, so one
//!   instance serializes its own invocations and separate instances share nothing.
//!
//! Conventions
//! - Triangles wind `(next, current, anchor)`, i.e. clockwise for a CCW ring.
//! - Vertex 0 is always the anchor at the local origin.
//!
//! Code cross-refs: `sweep::{sweep, SweepBuffers}`, `geom::MeshCfg`

use nalgebra::Vector2;
use tracing::debug;

use crate::geom::cfg::MIN_RING_LEN;
use crate::geom::{Boundary, MeshCfg};
use crate::obstacle::ObstacleQuery;
use crate::sweep::{is_continuous, sweep, EdgePoint, SweepBuffers, SweepOutcome};

/// Triangle mesh handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector2<f64>>,
    /// Flat index triples into `vertices`.
    pub triangles: Vec<u32>,
    pub uv: Vec<Vector2<f64>>,
    /// The anchor is inside an obstacle; the mesh is empty.
    pub fully_occluded: bool,
}

impl Mesh {
    fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.uv.clear();
        self.fully_occluded = false;
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Outer polygon (every vertex but the anchor), in ring order.
    pub fn perimeter(&self) -> &[Vector2<f64>] {
        self.vertices.get(1..).unwrap_or(&[])
    }

    fn triangle(&self, t: usize) -> [Vector2<f64>; 3] {
        let idx = &self.triangles[3 * t..3 * t + 3];
        [0, 1, 2].map(|k| self.vertices[idx[k] as usize])
    }

    /// Covered area (sum of the fan's triangle areas).
    pub fn area(&self) -> f64 {
        (0..self.triangle_count())
            .map(|t| {
                let [a, b, c] = self.triangle(t);
                0.5 * signed_area2(a, b, c).abs()
            })
            .sum()
    }

    /// Whether `p` lies in (or on) any fan triangle.
    pub fn contains_point(&self, p: Vector2<f64>) -> bool {
        (0..self.triangle_count()).any(|t| {
            let [a, b, c] = self.triangle(t);
            let d0 = signed_area2(a, b, p);
            let d1 = signed_area2(b, c, p);
            let d2 = signed_area2(c, a, p);
            let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
            let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
            !(has_neg && has_pos) && signed_area2(a, b, c) != 0.0
        })
    }
}

#[inline]
fn signed_area2(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `[anchor] + ring positions` into `out`.
///
/// With `cull_continuous_vertices`, a sample whose neighbors are continuous with
/// each other is dropped (it sits mid-way along a straight, unbroken edge). The
/// previous neighbor is the last kept sample; at least `MIN_RING_LEN` samples stay.
pub fn build_vertices(ring: &[EdgePoint], cfg: &MeshCfg, out: &mut Vec<Vector2<f64>>) {
    out.clear();
    out.push(Vector2::zeros());
    let n = ring.len();
    if !cfg.cull_continuous_vertices || n <= MIN_RING_LEN {
        out.extend(ring.iter().map(|s| s.position));
        return;
    }
    let mut last_kept = n - 1;
    let mut remaining = n;
    for i in 0..n {
        let next = &ring[(i + 1) % n];
        if remaining > MIN_RING_LEN && is_continuous(&ring[last_kept], next, cfg) {
            remaining -= 1;
            continue;
        }
        out.push(ring[i].position);
        last_kept = i;
    }
}

/// Fan indices for `vertex_count` vertices (anchor included): `vertex_count - 1`
/// triangles `{ (i+2) wrapped to 1, i+1, 0 }`. Fewer than `MIN_RING_LEN` ring
/// vertices produce nothing.
pub fn form_triangles(vertex_count: usize, out: &mut Vec<u32>) {
    out.clear();
    if vertex_count < MIN_RING_LEN + 1 {
        return;
    }
    out.reserve(3 * (vertex_count - 1));
    for i in 0..vertex_count - 1 {
        let mut far = i + 2;
        if far >= vertex_count {
            far = far - vertex_count + 1;
        }
        out.extend_from_slice(&[far as u32, (i + 1) as u32, 0]);
    }
}

/// Per-vertex UVs in [0,1]²: `((x + w/2) / w, (y + h/2) / h)`, clamped. A zero
/// extent maps that coordinate to 0.
pub fn compute_uvs(vertices: &[Vector2<f64>], half_size: Vector2<f64>, out: &mut Vec<Vector2<f64>>) {
    let axis = |v: f64, half: f64| {
        let size = 2.0 * half;
        if size > 0.0 {
            ((v + half) / size).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };
    out.clear();
    out.extend(
        vertices
            .iter()
            .map(|p| Vector2::new(axis(p.x, half_size.x), axis(p.y, half_size.y))),
    );
}

/// One visibility mesh: configuration, scratch buffers, and the last output.
#[derive(Clone, Debug)]
pub struct VisionMesher {
    boundary: Boundary,
    cfg: MeshCfg,
    buffers: SweepBuffers,
    mesh: Mesh,
}

impl VisionMesher {
    /// `cfg` is clamped into range here.
    pub fn new(boundary: Boundary, cfg: MeshCfg) -> Self {
        Self {
            boundary,
            cfg: cfg.clamped(),
            buffers: SweepBuffers::new(),
            mesh: Mesh::default(),
        }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    pub fn cfg(&self) -> &MeshCfg {
        &self.cfg
    }

    pub fn set_cfg(&mut self, cfg: MeshCfg) {
        self.cfg = cfg.clamped();
    }

    /// Sweep, refine and triangulate from scratch.
    pub fn rebuild<Q: ObstacleQuery + ?Sized>(&mut self, query: &Q) -> &Mesh {
        let outcome = sweep(query, &self.boundary, &self.cfg, &mut self.buffers);
        self.mesh.clear();
        match outcome {
            SweepOutcome::FullyOccluded => {
                self.mesh.fully_occluded = true;
            }
            SweepOutcome::Visible => {
                build_vertices(
                    self.buffers.ring().as_slice(),
                    &self.cfg,
                    &mut self.mesh.vertices,
                );
                form_triangles(self.mesh.vertices.len(), &mut self.mesh.triangles);
                compute_uvs(
                    &self.mesh.vertices,
                    self.boundary.half_size,
                    &mut self.mesh.uv,
                );
            }
        }
        debug!(
            vertices = self.mesh.vertices.len(),
            triangles = self.mesh.triangle_count(),
            fully_occluded = self.mesh.fully_occluded,
            "mesh rebuilt"
        );
        &self.mesh
    }

    /// Last mesh produced by `rebuild`.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Raw ring from the last `rebuild` (before continuous-vertex culling).
    pub fn ring(&self) -> &[EdgePoint] {
        self.buffers.ring().as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::{Rect, Scene, Shape};
    use nalgebra::vector;

    fn corner_ring(half: f64) -> Vec<EdgePoint> {
        let b = Boundary::new(2.0 * half, 2.0 * half);
        crate::geom::Quadrant::ALL
            .iter()
            .map(|&q| {
                let (p, prev, next) = b.corner(q);
                EdgePoint::vertex(p, prev, next, false)
            })
            .collect()
    }

    #[test]
    fn fan_wraps_last_triangle_to_first_ring_vertex() {
        let mut tris = Vec::new();
        form_triangles(5, &mut tris);
        assert_eq!(tris, vec![2, 1, 0, 3, 2, 0, 4, 3, 0, 1, 4, 0]);
        form_triangles(3, &mut tris);
        assert!(tris.is_empty());
    }

    #[test]
    fn uvs_pin_boundary_corners() {
        let mut verts = Vec::new();
        build_vertices(&corner_ring(5.0), &MeshCfg::default(), &mut verts);
        let mut uv = Vec::new();
        compute_uvs(&verts, vector![5.0, 5.0], &mut uv);
        assert_eq!(uv[0], vector![0.5, 0.5]);
        for t in &uv[1..] {
            assert!(t.x == 0.0 || t.x == 1.0);
            assert!(t.y == 0.0 || t.y == 1.0);
        }
        compute_uvs(&[vector![3.0, 1.0]], Vector2::zeros(), &mut uv);
        assert_eq!(uv, vec![Vector2::zeros()]);
    }

    #[test]
    fn continuous_culling_drops_mid_edge_samples() {
        let mut ring = corner_ring(5.0);
        // A mid-edge sample on the top wall, between the first two corners.
        ring.insert(
            1,
            EdgePoint::mid_edge(vector![0.0, 5.0], vector![0.0, -1.0], false),
        );
        let mut plain = Vec::new();
        build_vertices(&ring, &MeshCfg::default(), &mut plain);
        assert_eq!(plain.len(), 6);

        let cfg = MeshCfg {
            cull_continuous_vertices: true,
            ..MeshCfg::default()
        };
        let mut culled = Vec::new();
        build_vertices(&ring, &cfg, &mut culled);
        assert_eq!(culled.len(), 5);
        assert!(!culled.contains(&vector![0.0, 5.0]));
    }

    #[test]
    fn mesh_area_and_containment() {
        let mut mesher = VisionMesher::new(Boundary::new(10.0, 10.0), MeshCfg::default());
        let mesh = mesher.rebuild(&Scene::new());
        assert!((mesh.area() - 100.0).abs() < 1e-9);
        assert!(mesh.contains_point(vector![4.9, -4.9]));
        assert!(!mesh.contains_point(vector![5.1, 0.0]));
        assert_eq!(mesh.perimeter().len(), 4);
    }

    #[test]
    fn occluded_mesh_is_empty_and_flagged() {
        let scene: Scene = [Shape::Rect(Rect::axis_aligned(
            Vector2::zeros(),
            vector![1.0, 1.0],
        ))]
        .into_iter()
        .collect();
        let mut mesher = VisionMesher::new(Boundary::new(10.0, 10.0), MeshCfg::default());
        let mesh = mesher.rebuild(&scene);
        assert!(mesh.fully_occluded);
        assert!(mesh.vertices.is_empty() && mesh.triangles.is_empty() && mesh.uv.is_empty());
        assert!(mesh.perimeter().is_empty());
        assert_eq!(mesh.area(), 0.0);
        // A later visible rebuild clears the flag.
        let mesh = mesher.rebuild(&Scene::new());
        assert!(!mesh.fully_occluded);
        assert_eq!(mesh.triangle_count(), 4);
    }
}
