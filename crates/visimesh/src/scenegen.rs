//! Random obstacle scenes around the anchor (replay tokens for reproducibility).
//!
//! Purpose
//! - Feed property tests and benchmarks with varied but reproducible layouts.
//!
//! Model
//! - Draw an obstacle count, then place each obstacle uniformly in a square of
//!   half-extent `spread` around the anchor, with a random size (and rotation, if
//!   enabled). Obstacles that would reach within `clear_radius` of the anchor are
//!   redrawn, up to `max_attempts` times, then dropped.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::obstacle::{Rect, Scene, Shape};

/// Obstacle count distribution.
#[derive(Clone, Copy, Debug)]
pub enum ObstacleCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl ObstacleCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            ObstacleCount::Fixed(n) => n,
            ObstacleCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }
}

/// Scene sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SceneCfg {
    pub count: ObstacleCount,
    /// Half-extent of the placement square.
    pub spread: f64,
    /// Edge length range for rectangles (diameter for circles).
    pub size_min: f64,
    pub size_max: f64,
    /// Random rotation for rectangles.
    pub rotated: bool,
    /// Probability of a circle instead of a rectangle, clamped to [0,1].
    pub circle_fraction: f64,
    /// Keep every obstacle at least this far from the anchor.
    pub clear_radius: f64,
    pub max_attempts: usize,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            count: ObstacleCount::Uniform { min: 1, max: 8 },
            spread: 6.0,
            size_min: 0.5,
            size_max: 2.5,
            rotated: true,
            circle_fraction: 0.0,
            clear_radius: 0.5,
            max_attempts: 16,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a scene; owner ids follow draw order.
pub fn draw_scene(cfg: &SceneCfg, tok: ReplayToken) -> Scene {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.sample(&mut rng);
    let spread = cfg.spread.abs();
    let lo = cfg.size_min.abs().max(1e-6);
    let hi = cfg.size_max.abs().max(lo);
    let circle_p = cfg.circle_fraction.clamp(0.0, 1.0);
    let mut scene = Scene::new();
    for _ in 0..n {
        for _ in 0..cfg.max_attempts.max(1) {
            let center = Vector2::new(
                rng.gen_range(-spread..=spread),
                rng.gen_range(-spread..=spread),
            );
            let size = Vector2::new(rng.gen_range(lo..=hi), rng.gen_range(lo..=hi));
            let circle = rng.gen_bool(circle_p);
            // Circumradius bounds the reach of either shape kind.
            let reach = if circle { size.x * 0.5 } else { size.norm() * 0.5 };
            if center.norm() - reach < cfg.clear_radius {
                continue;
            }
            let shape = if circle {
                Shape::Circle {
                    center,
                    radius: size.x * 0.5,
                }
            } else {
                let rotation = if cfg.rotated {
                    rng.gen_range(0.0..std::f64::consts::TAU)
                } else {
                    0.0
                };
                Shape::Rect(Rect::new(center, size, rotation))
            };
            scene.push(shape);
            break;
        }
    }
    scene
}
