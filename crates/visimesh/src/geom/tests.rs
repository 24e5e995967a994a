use super::*;
use nalgebra::{vector, Vector2};

#[test]
fn rect_membership_is_closed() {
    let half = vector![5.0, 2.0];
    assert!(point_in_rect(vector![5.0, -2.0], half));
    assert!(point_in_rect(Vector2::zeros(), half));
    assert!(!point_in_rect(vector![5.0001, 0.0], half));
    assert!(!point_in_rect(vector![0.0, -2.5], half));
}

#[test]
fn clamp_scales_along_direction() {
    let half = vector![5.0, 5.0];
    // Points toward the right wall.
    let p = clamp_to_rect_edge(vector![2.0, 1.0], half, true);
    assert!((p - vector![5.0, 2.5]).norm() < 1e-12);
    // Points toward the top wall.
    let q = clamp_to_rect_edge(vector![-1.0, 4.0], half, true);
    assert!((q - vector![-1.25, 5.0]).norm() < 1e-12);
    // Inside and not edge-only: unchanged.
    let r = clamp_to_rect_edge(vector![1.0, 1.0], half, false);
    assert_eq!(r, vector![1.0, 1.0]);
    // Outside and not edge-only: pulled back onto the edge.
    let s = clamp_to_rect_edge(vector![20.0, 0.0], half, false);
    assert!((s - vector![5.0, 0.0]).norm() < 1e-12);
    // Diagonal lands on the corner.
    let c = clamp_to_rect_edge(vector![1.0, 1.0], half, true);
    assert!((c - vector![5.0, 5.0]).norm() < 1e-12);
}

#[test]
fn clamp_degenerate_inputs() {
    assert_eq!(
        clamp_to_rect_edge(Vector2::zeros(), vector![5.0, 5.0], true),
        Vector2::zeros()
    );
    // Zero-width rectangle: a vertical direction still reaches the top wall.
    let p = clamp_to_rect_edge(vector![0.0, 1.0], vector![0.0, 3.0], true);
    assert!((p - vector![0.0, 3.0]).norm() < 1e-12);
    // Zero-size rectangle collapses to the origin.
    let q = clamp_to_rect_edge(vector![1.0, 2.0], Vector2::zeros(), true);
    assert!(q.norm() < 1e-12);
}

#[test]
fn angles_wrap_into_range() {
    assert_eq!(angle360(1.0, 0.0), 0.0);
    assert!((angle360(0.0, 1.0) - 90.0).abs() < 1e-12);
    assert!((angle360(-1.0, 0.0) - 180.0).abs() < 1e-12);
    assert!((angle360(0.0, -1.0) - 270.0).abs() < 1e-12);
    assert_eq!(angle360(0.0, 0.0), 0.0);
    let tiny = angle360(1.0, -1e-300);
    assert!((0.0..360.0).contains(&tiny));
    assert_eq!(wrap360(-1e-20), 0.0);
    assert_eq!(wrap360(f64::NAN), 0.0);
    assert!((angular_gap(350.0, 10.0) - 20.0).abs() < 1e-12);
    assert!((angular_gap(10.0, 350.0) - 340.0).abs() < 1e-12);
}

#[test]
fn projection_and_fallbacks() {
    let p = project_onto_line(vector![3.0, 4.0], vector![0.0, 2.0], vector![1.0, 0.0]);
    assert!((p - vector![1.0, 4.0]).norm() < 1e-12);
    let q = project_onto_line(vector![3.0, 4.0], Vector2::zeros(), vector![1.0, 0.0]);
    assert_eq!(q, vector![1.0, 0.0]);
    assert_eq!(angle_between_deg(Vector2::zeros(), vector![1.0, 0.0]), 0.0);
    assert!((angle_between_deg(vector![1.0, 0.0], vector![0.0, 3.0]) - 90.0).abs() < 1e-9);
    assert_eq!(normalize_or_zero(Vector2::zeros()), Vector2::zeros());
}

#[test]
fn quadrants_cover_axes() {
    assert_eq!(quadrant(vector![0.0, 0.0]), Quadrant::First);
    assert_eq!(quadrant(vector![-1.0, 0.0]), Quadrant::Second);
    assert_eq!(quadrant(vector![-1.0, -1.0]), Quadrant::Third);
    assert_eq!(quadrant(vector![0.0, -1.0]), Quadrant::Fourth);
}

#[test]
fn boundary_corners_have_inward_wall_normals() {
    let b = Boundary::new(10.0, 6.0);
    for q in Quadrant::ALL {
        let (p, prev, next) = b.corner(q);
        assert_eq!(quadrant(p), q);
        // Both walls face the anchor.
        assert!(prev.dot(&(-p)) > 0.0);
        assert!(next.dot(&(-p)) > 0.0);
        // Walking the previous wall away from the corner lowers the angle.
        let along_prev = p + perp(prev) * 0.1;
        assert!(b.contains(along_prev));
        assert!(angular_gap(angle360(along_prev.x, along_prev.y), angle360(p.x, p.y)) < 180.0);
    }
    let (p, prev, next) = b.corner(Quadrant::First);
    assert_eq!(p, vector![5.0, 3.0]);
    assert_eq!(prev, vector![-1.0, 0.0]);
    assert_eq!(next, vector![0.0, -1.0]);
    assert_eq!(b.wall_normal(vector![5.0, 1.0]), vector![-1.0, 0.0]);
    assert_eq!(b.wall_normal(vector![-2.0, -3.0]), vector![0.0, 1.0]);
}

#[test]
fn wall_normals_on_axes_point_inward() {
    let b = Boundary::new(10.0, 10.0);
    assert_eq!(b.wall_normal(vector![5.0, 0.0]), vector![-1.0, 0.0]);
    assert_eq!(b.wall_normal(vector![-5.0, 0.0]), vector![1.0, 0.0]);
    assert_eq!(b.wall_normal(vector![0.0, 5.0]), vector![0.0, -1.0]);
    assert_eq!(b.wall_normal(vector![0.0, -5.0]), vector![0.0, 1.0]);
}

#[test]
fn clip_segment_reports_inside_interval() {
    let half = vector![5.0, 5.0];
    // Vertical line crossing the top and bottom walls.
    let (t0, t1) = clip_segment_to_rect(vector![3.0, 10.0], vector![3.0, -10.0], half).unwrap();
    assert!((t0 - 0.25).abs() < 1e-12);
    assert!((t1 - 0.75).abs() < 1e-12);
    // Fully inside: the whole segment.
    assert_eq!(
        clip_segment_to_rect(vector![1.0, 1.0], vector![2.0, -1.0], half),
        Some((0.0, 1.0))
    );
    // Entering through the right wall only.
    let (t0, t1) = clip_segment_to_rect(vector![8.0, 0.0], vector![0.0, 0.0], half).unwrap();
    assert!((t0 - 0.375).abs() < 1e-12);
    assert_eq!(t1, 1.0);
    // Parallel and outside, or passing beside the rectangle.
    assert!(clip_segment_to_rect(vector![6.0, -9.0], vector![6.0, 9.0], half).is_none());
    assert!(clip_segment_to_rect(vector![0.0, 11.0], vector![11.0, 0.0], half).is_none());
}

#[test]
fn boundary_rejects_negative_extent() {
    let b = Boundary::new(-4.0, f64::NAN);
    assert_eq!(b.half_size, Vector2::zeros());
}

#[test]
fn cfg_clamps_out_of_range() {
    let cfg = MeshCfg {
        max_edge_search_iterations: 99,
        edge_search_min_angle_threshold: 0.0,
        projection_offset_threshold: -1.0,
        angle_continuity_threshold: 500.0,
        occlusion_fraction_threshold: f64::NAN,
        ..MeshCfg::default()
    }
    .clamped();
    assert_eq!(cfg.max_edge_search_iterations, 32);
    assert_eq!(cfg.edge_search_min_angle_threshold, 0.001);
    assert_eq!(cfg.projection_offset_threshold, 0.01);
    assert_eq!(cfg.angle_continuity_threshold, 180.0);
    assert_eq!(
        cfg.occlusion_fraction_threshold,
        MeshCfg::default().occlusion_fraction_threshold
    );
    assert_eq!(MeshCfg::default().clamped(), MeshCfg::default());
}
