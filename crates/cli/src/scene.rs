//! JSON scene and mesh files.
//!
//! Scene file: boundary size, optional `MeshCfg` overrides, obstacle list.
//! ```json
//! { "boundary": [10, 10],
//!   "cfg": { "cull_continuous_vertices": true },
//!   "obstacles": [ { "kind": "rect", "center": [3, 0], "size": [2, 2] } ] }
//! ```

use serde::{Deserialize, Serialize};
use visimesh::prelude::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFile {
    pub boundary: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg: Option<CfgOverrides>,
    #[serde(default)]
    pub obstacles: Vec<ShapeDef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDef {
    Rect {
        center: [f64; 2],
        size: [f64; 2],
        /// Radians.
        #[serde(default)]
        rotation: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
    },
}

/// Field-wise overrides on top of `MeshCfg::default()`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CfgOverrides {
    pub max_edge_search_iterations: Option<u32>,
    pub edge_search_min_angle_threshold: Option<f64>,
    pub projection_offset_threshold: Option<f64>,
    pub angle_continuity_threshold: Option<f64>,
    pub occlusion_fraction_threshold: Option<f64>,
    pub cull_back_facing_vertices: Option<bool>,
    pub cull_occluded_vertices: Option<bool>,
    pub cull_continuous_vertices: Option<bool>,
}

impl CfgOverrides {
    pub fn apply(&self, base: MeshCfg) -> MeshCfg {
        MeshCfg {
            max_edge_search_iterations: self
                .max_edge_search_iterations
                .unwrap_or(base.max_edge_search_iterations),
            edge_search_min_angle_threshold: self
                .edge_search_min_angle_threshold
                .unwrap_or(base.edge_search_min_angle_threshold),
            projection_offset_threshold: self
                .projection_offset_threshold
                .unwrap_or(base.projection_offset_threshold),
            angle_continuity_threshold: self
                .angle_continuity_threshold
                .unwrap_or(base.angle_continuity_threshold),
            occlusion_fraction_threshold: self
                .occlusion_fraction_threshold
                .unwrap_or(base.occlusion_fraction_threshold),
            cull_back_facing_vertices: self
                .cull_back_facing_vertices
                .unwrap_or(base.cull_back_facing_vertices),
            cull_occluded_vertices: self
                .cull_occluded_vertices
                .unwrap_or(base.cull_occluded_vertices),
            cull_continuous_vertices: self
                .cull_continuous_vertices
                .unwrap_or(base.cull_continuous_vertices),
        }
    }
}

/// Effective configuration as a JSON object (for provenance).
pub fn cfg_json(cfg: &MeshCfg) -> serde_json::Value {
    serde_json::json!({
        "max_edge_search_iterations": cfg.max_edge_search_iterations,
        "edge_search_min_angle_threshold": cfg.edge_search_min_angle_threshold,
        "projection_offset_threshold": cfg.projection_offset_threshold,
        "angle_continuity_threshold": cfg.angle_continuity_threshold,
        "occlusion_fraction_threshold": cfg.occlusion_fraction_threshold,
        "cull_back_facing_vertices": cfg.cull_back_facing_vertices,
        "cull_occluded_vertices": cfg.cull_occluded_vertices,
        "cull_continuous_vertices": cfg.cull_continuous_vertices,
    })
}

impl From<ShapeDef> for Shape {
    fn from(s: ShapeDef) -> Self {
        match s {
            ShapeDef::Rect {
                center,
                size,
                rotation,
            } => Shape::Rect(Rect::new(center.into(), size.into(), rotation)),
            ShapeDef::Circle { center, radius } => Shape::Circle {
                center: center.into(),
                radius,
            },
        }
    }
}

impl From<&Shape> for ShapeDef {
    fn from(s: &Shape) -> Self {
        match *s {
            Shape::Rect(r) => ShapeDef::Rect {
                center: r.center.into(),
                size: (r.half_size * 2.0).into(),
                rotation: r.rotation,
            },
            Shape::Circle { center, radius } => ShapeDef::Circle {
                center: center.into(),
                radius,
            },
        }
    }
}

impl SceneFile {
    pub fn from_scene(boundary: [f64; 2], scene: &Scene) -> Self {
        Self {
            boundary,
            cfg: None,
            obstacles: scene.obstacles().iter().map(|o| (&o.shape).into()).collect(),
        }
    }

    pub fn boundary(&self) -> Boundary {
        Boundary::new(self.boundary[0], self.boundary[1])
    }

    pub fn mesh_cfg(&self) -> MeshCfg {
        self.cfg.unwrap_or_default().apply(MeshCfg::default())
    }

    pub fn scene(&self) -> Scene {
        self.obstacles.iter().map(|&s| Shape::from(s)).collect()
    }
}

/// One ring sample as written next to the mesh.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RingSample {
    pub angle: f64,
    pub position: [f64; 2],
    pub on_surface: bool,
    pub degenerate: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeshFile {
    pub vertices: Vec<[f64; 2]>,
    pub triangles: Vec<u32>,
    pub uv: Vec<[f64; 2]>,
    pub fully_occluded: bool,
    pub area: f64,
    pub ring: Vec<RingSample>,
}

impl MeshFile {
    pub fn new(mesh: &Mesh, ring: &[EdgePoint]) -> Self {
        let pairs = |v: &[Vec2<f64>]| v.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>();
        Self {
            vertices: pairs(&mesh.vertices),
            triangles: mesh.triangles.clone(),
            uv: pairs(&mesh.uv),
            fully_occluded: mesh.fully_occluded,
            area: mesh.area(),
            ring: ring
                .iter()
                .map(|s| RingSample {
                    angle: s.angle,
                    position: [s.position.x, s.position.y],
                    on_surface: s.on_surface,
                    degenerate: s.degenerate,
                })
                .collect(),
        }
    }
}
