use nalgebra::Vector2;

use super::shape::{Obstacle, OwnerId};

/// First (or any) intersection of a ray segment with an obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vector2<f64>,
    /// Outward unit normal of the surface that was hit.
    pub normal: Vector2<f64>,
    pub owner: OwnerId,
    /// Position along `origin → target`, in [0,1].
    pub fraction: f64,
}

/// Broad-phase and ray queries in the anchor-local frame.
///
/// Implementations report a failed query as "no hit" (`None` / empty); the
/// sweep never retries.
pub trait ObstacleQuery {
    /// Obstacles overlapping the rectangle of full extent `size` centered at
    /// `center`, rotated by `rotation` radians.
    fn obstacles_in_region(
        &self,
        center: Vector2<f64>,
        size: Vector2<f64>,
        rotation: f64,
    ) -> Vec<Obstacle>;

    /// Every hit on the segment `origin → target`, ordered by fraction.
    fn cast_ray_all(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Vec<RayHit>;

    /// First hit on the segment `origin → target`.
    fn cast_ray(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Option<RayHit> {
        self.cast_ray_all(origin, target).into_iter().next()
    }
}

impl<Q: ObstacleQuery + ?Sized> ObstacleQuery for &Q {
    fn obstacles_in_region(
        &self,
        center: Vector2<f64>,
        size: Vector2<f64>,
        rotation: f64,
    ) -> Vec<Obstacle> {
        (**self).obstacles_in_region(center, size, rotation)
    }

    fn cast_ray_all(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Vec<RayHit> {
        (**self).cast_ray_all(origin, target)
    }

    fn cast_ray(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Option<RayHit> {
        (**self).cast_ray(origin, target)
    }
}
