//! Print the ring and mesh summary for one scene.
//!
//! Usage:
//!   cargo run -p visimesh --example scenario -- box
//!   cargo run -p visimesh --example scenario -- random 7
//!
//! `box` is a single 2×2 obstacle right of the anchor; `random` draws a scene from
//! the given seed.

use visimesh::api::{draw_scene, ReplayToken, SceneCfg};
use visimesh::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "box".to_string());
    let scene: Scene = match mode.as_str() {
        "box" => [Shape::Rect(Rect::axis_aligned(
            Vec2::new(3.0, 0.0),
            Vec2::new(2.0, 2.0),
        ))]
        .into_iter()
        .collect(),
        "random" => {
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
            draw_scene(&SceneCfg::default(), ReplayToken { seed, index: 0 })
        }
        _ => {
            eprintln!("usage: scenario [box|random SEED]");
            return;
        }
    };

    let mut mesher = VisionMesher::new(Boundary::new(10.0, 10.0), MeshCfg::default());
    mesher.rebuild(&scene);
    println!("obstacles={}", scene.len());
    for s in mesher.ring() {
        println!(
            "  {:>10.5}°  ({:>8.4}, {:>8.4})  surface={} degenerate={}",
            s.angle, s.position.x, s.position.y, s.on_surface, s.degenerate
        );
    }
    let mesh = mesher.mesh();
    println!(
        "vertices={} triangles={} area={:.4} fully_occluded={}",
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.area(),
        mesh.fully_occluded
    );
}
