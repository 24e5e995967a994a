use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use visimesh::api::{draw_scene, ObstacleCount, ReplayToken, SceneCfg};
use visimesh::VisionMesher;

mod provenance;
mod scene;
mod table;

use scene::{MeshFile, SceneFile};

#[derive(Parser)]
#[command(name = "visimesh")]
#[command(about = "Build visibility meshes from scene files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the mesh for a JSON scene; writes mesh JSON, optional vertex table, provenance
    Run {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Vertex table (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Draw a reproducible random scene and write it as JSON
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 6)]
        obstacles: usize,
        #[arg(long, default_value_t = 12.0)]
        size: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { scene, out, table } => run(&scene, &out, table.as_deref()),
        Action::Random {
            seed,
            index,
            obstacles,
            size,
            out,
        } => random(seed, index, obstacles, size, &out),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn read_scene(path: &Path) -> Result<SceneFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
}

fn run(scene_path: &Path, out: &Path, table_path: Option<&Path>) -> Result<()> {
    let file = read_scene(scene_path)?;
    let scene = file.scene();
    let mut mesher = VisionMesher::new(file.boundary(), file.mesh_cfg());
    let mesh = mesher.rebuild(&scene).clone();
    tracing::info!(
        scene = %scene_path.display(),
        obstacles = scene.len(),
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        fully_occluded = mesh.fully_occluded,
        "run"
    );

    ensure_parent(out)?;
    let doc = MeshFile::new(&mesh, mesher.ring());
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let mut artifacts = vec![out.to_path_buf()];
    if let Some(path) = table_path {
        ensure_parent(path)?;
        let mut df = table::vertex_frame(&mesh)?;
        table::write_frame(&mut df, path)?;
        tracing::info!(rows = df.height(), table = %path.display(), "vertex_table");
        artifacts.push(path.to_path_buf());
    }

    let params = json!({
        "boundary": file.boundary,
        "cfg": scene::cfg_json(mesher.cfg()),
    });
    let payload = provenance::Payload::new(params).with_input(scene_path);
    provenance::write_sidecar(&artifacts, payload)?;
    Ok(())
}

fn random(seed: u64, index: u64, obstacles: usize, size: f64, out: &Path) -> Result<()> {
    let cfg = SceneCfg {
        count: ObstacleCount::Fixed(obstacles),
        spread: size.abs() * 0.5,
        ..SceneCfg::default()
    };
    let scene = draw_scene(&cfg, ReplayToken { seed, index });
    tracing::info!(seed, index, drawn = scene.len(), "random");
    ensure_parent(out)?;
    let file = SceneFile::from_scene([size, size], &scene);
    std::fs::write(out, serde_json::to_vec_pretty(&file)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params = json!({ "seed": seed, "index": index, "obstacles": obstacles, "size": size });
    provenance::write_sidecar(&[out], provenance::Payload::new(params))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "visimesh_version": visimesh::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn run_writes_mesh_table_and_provenance() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        std::fs::write(
            &scene,
            r#"{ "boundary": [10, 10],
                 "obstacles": [ { "kind": "rect", "center": [3, 0], "size": [2, 2] } ] }"#,
        )
        .unwrap();
        let out = dir.path().join("out/mesh.json");
        let table = dir.path().join("out/mesh.csv");
        run(&scene, &out, Some(table.as_path())).unwrap();

        let mesh: MeshFile = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.triangles.len(), 24);
        assert!(!mesh.fully_occluded);
        assert!((mesh.area - 89.5).abs() < 1e-6);
        assert_eq!(mesh.ring.len(), 8);

        let csv = std::fs::read_to_string(&table).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("x,y,u,v,anchor"));
        assert_eq!(lines.count(), 9);
        assert!(dir.path().join("out/mesh.provenance.json").exists());
    }

    #[test]
    fn random_scene_is_reproducible() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        random(5, 1, 4, 12.0, &a).unwrap();
        random(5, 1, 4, 12.0, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        let file = read_scene(&a).unwrap();
        assert!(file.obstacles.len() <= 4);
        assert_eq!(file.boundary, [12.0, 12.0]);
    }

    #[test]
    fn run_rejects_unknown_table_format() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        std::fs::write(&scene, r#"{ "boundary": [4, 4] }"#).unwrap();
        let table = dir.path().join("m.txt");
        let err = run(&scene, &dir.path().join("m.json"), Some(table.as_path()));
        assert!(err.is_err());
    }
}
