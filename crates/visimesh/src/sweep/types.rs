//! Sample model for the angular sweep.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::geom::angle360;

/// A directional sample on the sweep ("edge point").
///
/// `prev_normal` describes the surface toward smaller angles, `next_normal` the
/// surface toward larger angles. Mid-edge samples carry the same normal twice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePoint {
    pub position: Vector2<f64>,
    pub prev_normal: Vector2<f64>,
    pub next_normal: Vector2<f64>,
    /// Degrees in [0,360).
    pub angle: f64,
    /// Lies on an obstacle outline (false for boundary and open-air dropoff samples).
    pub on_surface: bool,
    /// Normals were rewritten to fake continuity across an inserted seam.
    pub degenerate: bool,
}

impl EdgePoint {
    /// Sample in the middle of a surface.
    pub fn mid_edge(position: Vector2<f64>, normal: Vector2<f64>, on_surface: bool) -> Self {
        Self::vertex(position, normal, normal, on_surface)
    }

    /// Sample where two surfaces meet.
    pub fn vertex(
        position: Vector2<f64>,
        prev_normal: Vector2<f64>,
        next_normal: Vector2<f64>,
        on_surface: bool,
    ) -> Self {
        Self {
            position,
            prev_normal,
            next_normal,
            angle: angle360(position.x, position.y),
            on_surface,
            degenerate: false,
        }
    }

    #[inline]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Total order by angle; equal angles compare equal (callers keep insertion order).
    #[inline]
    pub fn angle_cmp(&self, other: &Self) -> Ordering {
        self.angle.total_cmp(&other.angle)
    }
}

/// Result of bisecting one discontinuity: the last bracket, and whether each
/// side moved away from the sample the search started from.
#[derive(Clone, Copy, Debug)]
pub struct EdgeBracket {
    pub min: EdgePoint,
    pub max: EdgePoint,
    pub min_moved: bool,
    pub max_moved: bool,
}

impl EdgeBracket {
    pub(crate) fn new(start: EdgePoint, end: EdgePoint) -> Self {
        Self {
            min: start,
            max: end,
            min_moved: false,
            max_moved: false,
        }
    }
}
