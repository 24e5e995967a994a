//! Criterion benchmarks for the full mesh rebuild over random scenes.
//! Focus sizes: obstacles in {0, 4, 16, 64}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p visimesh

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use visimesh::api::{draw_scene, ObstacleCount, ReplayToken, SceneCfg};
use visimesh::{Boundary, MeshCfg, VisionMesher};

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("vision_mesh");
    let boundary = Boundary::new(20.0, 20.0);
    for &n in &[0usize, 4, 16, 64] {
        let cfg = SceneCfg {
            count: ObstacleCount::Fixed(n),
            spread: 9.0,
            ..SceneCfg::default()
        };
        let scene = draw_scene(&cfg, ReplayToken { seed: 43, index: n as u64 });

        group.bench_with_input(BenchmarkId::new("rebuild", n), &scene, |b, scene| {
            // Reused across iterations: steady-state cost without allocation.
            let mut mesher = VisionMesher::new(boundary, MeshCfg::default());
            b.iter(|| mesher.rebuild(scene).triangle_count())
        });

        group.bench_with_input(BenchmarkId::new("rebuild_no_cull", n), &scene, |b, scene| {
            let cfg = MeshCfg {
                cull_back_facing_vertices: false,
                cull_occluded_vertices: false,
                ..MeshCfg::default()
            };
            let mut mesher = VisionMesher::new(boundary, cfg);
            b.iter(|| mesher.rebuild(scene).triangle_count())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rebuild);
criterion_main!(benches);
