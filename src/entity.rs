use glam::{vec3, Vec3};
use rand::Rng;

use crate::math;

pub const DEFAULT_PARTICLE_COUNT: usize = 30;

/// Logical viewport dimensions plus the backing-store scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub resolution: f32,
}

impl Viewport {
    pub fn pixel_width(&self) -> u32 {
        (self.width * self.resolution) as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.height * self.resolution) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov: f32,
    pub position: Vec3,
    /// Simulation speed, held in [1, 10] by the step.
    pub speed: f32,
    /// Per-step speed nudge while the pointer is held (doubled) or released.
    pub acc: f32,
    /// Scales `speed` into forward travel per step.
    pub travel_rate: f32,
    pub jerk: f32,
    pub jounce: f32,
    pub height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            position: vec3(2.0, -0.5, -(1.0 / 25f32.to_radians().tan())),
            speed: 3.0,
            acc: 0.05,
            travel_rate: 0.05,
            jerk: 0.0,
            jounce: 0.0,
            height: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub base_scale: f32,
    pub alpha: f32,
    pub rotation: f32,
    pub sprite_index: usize,
}

/// The whole mutable simulation state. Created once and recycled in place;
/// only the simulation step writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub particles: Vec<Particle>,
    pub viewport: Viewport,
    pub pointer_down: bool,
}

impl Scene {
    /// `sprite_count` must be at least 1; every particle is assigned a
    /// random sprite it keeps for the process lifetime.
    pub fn new<R: Rng>(viewport: Viewport, sprite_count: usize, rng: &mut R) -> Self {
        Self::with_particle_count(viewport, sprite_count, DEFAULT_PARTICLE_COUNT, rng)
    }

    pub fn with_particle_count<R: Rng>(
        viewport: Viewport,
        sprite_count: usize,
        particle_count: usize,
        rng: &mut R,
    ) -> Self {
        let particles = (0..particle_count)
            .map(|_| {
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                Particle {
                    position: vec3(
                        math::random_in_two_ranges(rng, (-5.0, -3.0), (3.0, 5.0)),
                        rng.gen_range(-2.0..2.0),
                        rng.gen_range(10.0..20.0),
                    ),
                    base_scale: sign * rng.gen::<f32>() * 0.5 + 2.5,
                    alpha: 0.0,
                    rotation: 0.0,
                    sprite_index: rng.gen_range(0..sprite_count),
                }
            })
            .collect();

        Self {
            camera: Camera::default(),
            particles,
            viewport,
            pointer_down: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
            resolution: 1.0,
        }
    }

    #[test]
    fn scene_seeds_the_default_particle_count() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let scene = Scene::new(viewport(), 3, &mut rng);
        assert_eq!(scene.particles.len(), DEFAULT_PARTICLE_COUNT);
    }

    #[test]
    fn seeded_particles_start_transparent_and_ahead_of_the_camera() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let scene = Scene::new(viewport(), 3, &mut rng);
        for p in &scene.particles {
            assert_eq!(p.alpha, 0.0);
            assert!(p.position.z > scene.camera.position.z);
            assert!((10.0..20.0).contains(&p.position.z));
            assert!((2.0..=3.0).contains(&p.base_scale));
            assert!(p.sprite_index < 3);
        }
    }

    #[test]
    fn viewport_pixel_dimensions_scale_with_resolution() {
        let vp = Viewport {
            width: 800.0,
            height: 600.0,
            resolution: 2.0,
        };
        assert_eq!(vp.pixel_width(), 1600);
        assert_eq!(vp.pixel_height(), 1200);
    }
}
