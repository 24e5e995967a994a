use super::*;
use nalgebra::{vector, Vector2};

fn unit_box_at(x: f64, y: f64) -> Shape {
    Shape::Rect(Rect::axis_aligned(vector![x, y], vector![2.0, 2.0]))
}

#[test]
fn rect_vertices_are_ccw_with_outward_normals() {
    let verts = unit_box_at(3.0, 0.0).vertices();
    assert_eq!(verts.len(), 4);
    let expected = [
        vector![2.0, -1.0],
        vector![4.0, -1.0],
        vector![4.0, 1.0],
        vector![2.0, 1.0],
    ];
    for (v, e) in verts.iter().zip(expected.iter()) {
        assert!((v.position - e).norm() < 1e-12);
    }
    // Vertex (2,1): arriving along the top edge, leaving down the left edge.
    let v = verts[3];
    assert!((v.in_normal - vector![0.0, 1.0]).norm() < 1e-12);
    assert!((v.out_normal - vector![-1.0, 0.0]).norm() < 1e-12);
    // Signed area positive (CCW).
    let mut area = 0.0;
    for k in 0..4 {
        let p = verts[k].position;
        let q = verts[(k + 1) % 4].position;
        area += p.x * q.y - q.x * p.y;
    }
    assert!(area > 0.0);
}

#[test]
fn rotated_rect_keeps_normals_outward() {
    let r = Shape::Rect(Rect::new(
        vector![1.0, 1.0],
        vector![2.0, 1.0],
        std::f64::consts::FRAC_PI_6,
    ));
    let center = vector![1.0, 1.0];
    for v in r.vertices() {
        assert!(v.in_normal.dot(&(v.position - center)) > 0.0);
        assert!(v.out_normal.dot(&(v.position - center)) > 0.0);
        assert!((v.in_normal.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn circles_have_no_vertex_loop() {
    let c = Shape::Circle {
        center: vector![3.0, 0.0],
        radius: 1.0,
    };
    assert!(c.vertices().is_empty());
    assert!(c.contains(vector![3.5, 0.0]));
    assert!(!c.contains(vector![4.0, 0.0]));
}

#[test]
fn containment_is_strict() {
    let b = unit_box_at(0.0, 0.0);
    assert!(b.contains(Vector2::zeros()));
    assert!(!b.contains(vector![1.0, 0.0]));
    assert!(!unit_box_at(3.0, 0.0).contains(Vector2::zeros()));
}

#[test]
fn ray_hits_are_ordered_and_carry_normals() {
    let scene: Scene = [unit_box_at(3.0, 0.0), unit_box_at(7.0, 0.0)]
        .into_iter()
        .collect();
    let hits = scene.cast_ray_all(Vector2::zeros(), vector![10.0, 0.0]);
    assert_eq!(hits.len(), 4);
    let xs: Vec<f64> = hits.iter().map(|h| h.point.x).collect();
    assert!((xs[0] - 2.0).abs() < 1e-12);
    assert!((xs[1] - 4.0).abs() < 1e-12);
    assert!((xs[2] - 6.0).abs() < 1e-12);
    assert!((xs[3] - 8.0).abs() < 1e-12);
    assert_eq!(hits[0].owner, OwnerId(0));
    assert_eq!(hits[2].owner, OwnerId(1));
    assert!((hits[0].normal - vector![-1.0, 0.0]).norm() < 1e-12);
    assert!((hits[0].fraction - 0.2).abs() < 1e-12);

    let first = scene.cast_ray(Vector2::zeros(), vector![10.0, 0.0]).unwrap();
    assert_eq!(first, hits[0]);
    assert!(scene
        .cast_ray(Vector2::zeros(), vector![0.0, 10.0])
        .is_none());
    assert!(scene.cast_ray_all(Vector2::zeros(), Vector2::zeros()).is_empty());
}

#[test]
fn ray_through_circle_reports_entry_and_exit() {
    let scene: Scene = [Shape::Circle {
        center: vector![5.0, 0.0],
        radius: 1.0,
    }]
    .into_iter()
    .collect();
    let hits = scene.cast_ray_all(Vector2::zeros(), vector![10.0, 0.0]);
    assert_eq!(hits.len(), 2);
    assert!((hits[0].point - vector![4.0, 0.0]).norm() < 1e-12);
    assert!((hits[0].normal - vector![-1.0, 0.0]).norm() < 1e-12);
    assert!((hits[1].point - vector![6.0, 0.0]).norm() < 1e-12);
}

#[test]
fn region_query_filters_by_overlap() {
    let scene: Scene = [unit_box_at(3.0, 0.0), unit_box_at(30.0, 0.0)]
        .into_iter()
        .collect();
    let found = scene.obstacles_in_region(Vector2::zeros(), vector![10.0, 10.0], 0.0);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].owner, OwnerId(0));
    // A rotated query region reaches further along the diagonal.
    let corner: Scene = [unit_box_at(6.5, 0.0)].into_iter().collect();
    assert!(corner
        .obstacles_in_region(Vector2::zeros(), vector![10.0, 10.0], 0.0)
        .is_empty());
    assert_eq!(
        corner
            .obstacles_in_region(
                Vector2::zeros(),
                vector![10.0, 10.0],
                std::f64::consts::FRAC_PI_4
            )
            .len(),
        1
    );
}
