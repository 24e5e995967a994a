//! Brute-force in-memory obstacle set implementing `ObstacleQuery`.

use nalgebra::{Rotation2, Vector2};

use super::query::{ObstacleQuery, RayHit};
use super::shape::{Obstacle, OwnerId, Shape};

/// Flat list of obstacles; every query scans all of them.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    obstacles: Vec<Obstacle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape under the next free owner id.
    pub fn push(&mut self, shape: Shape) -> OwnerId {
        let owner = OwnerId(self.obstacles.len() as u64);
        self.obstacles.push(Obstacle { owner, shape });
        owner
    }

    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl FromIterator<Shape> for Scene {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for shape in iter {
            scene.push(shape);
        }
        scene
    }
}

impl ObstacleQuery for Scene {
    fn obstacles_in_region(
        &self,
        center: Vector2<f64>,
        size: Vector2<f64>,
        rotation: f64,
    ) -> Vec<Obstacle> {
        // Bounds of the rotated query rectangle.
        let rot = Rotation2::new(rotation).into_inner();
        let h = size.map(|v| v.abs() * 0.5);
        let ext = Vector2::new(
            rot[(0, 0)].abs() * h.x + rot[(0, 1)].abs() * h.y,
            rot[(1, 0)].abs() * h.x + rot[(1, 1)].abs() * h.y,
        );
        let (lo, hi) = (center - ext, center + ext);
        self.obstacles
            .iter()
            .filter(|o| {
                let (a, b) = o.shape.aabb();
                a.x <= hi.x && b.x >= lo.x && a.y <= hi.y && b.y >= lo.y
            })
            .copied()
            .collect()
    }

    fn cast_ray_all(&self, origin: Vector2<f64>, target: Vector2<f64>) -> Vec<RayHit> {
        if origin == target {
            return Vec::new();
        }
        let mut hits: Vec<RayHit> = self
            .obstacles
            .iter()
            .flat_map(|o| {
                o.shape
                    .intersect_segment(origin, target)
                    .into_iter()
                    .map(move |h| RayHit {
                        point: h.point,
                        normal: h.normal,
                        owner: o.owner,
                        fraction: h.fraction,
                    })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.fraction
                .total_cmp(&b.fraction)
                .then_with(|| a.owner.cmp(&b.owner))
        });
        hits
    }
}
