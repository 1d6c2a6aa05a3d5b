use rand::Rng;

use crate::entity::Scene;
use crate::math;

/// Hysteresis band for the recycle crossover, preventing flicker when a
/// particle sits exactly on the camera plane.
pub const RECYCLE_EPSILON: f32 = 0.01;

/// Camera-relative depth under which a particle fades out instead of in.
pub const FADE_NEAR: f32 = 5.0;

pub const FADE_OUT_PER_STEP: f32 = 0.02;
pub const FADE_IN_PER_STEP: f32 = 0.01;
pub const ALPHA_MIN: f32 = 0.02;
pub const ALPHA_MAX: f32 = 0.98;

/// One full simulation step: camera advance, particle recycling, alpha fade.
pub fn step<R: Rng>(scene: &mut Scene, rng: &mut R) {
    advance(scene, rng);
    fade(scene);
}

/// Advances the camera and recycles every particle it has passed.
///
/// The speed nudge is a fixed per-step increment, so acceleration stays
/// linear in tick count; the trailing clamp keeps the stored speed in
/// [1, 10] between steps. Recycled particles respawn ahead of the camera
/// with alpha zeroed; `base_scale` and `sprite_index` keep their values for
/// the particle's whole lifetime.
pub fn advance<R: Rng>(scene: &mut Scene, rng: &mut R) {
    let camera = &mut scene.camera;

    camera.speed = camera.speed.clamp(1.0, 10.0);
    camera.speed += if scene.pointer_down {
        camera.acc * 2.0
    } else {
        -camera.acc
    };
    camera.speed = camera.speed.clamp(1.0, 10.0);

    camera.position.z += camera.travel_rate * camera.speed;

    let camera = scene.camera;
    for particle in &mut scene.particles {
        if camera.position.z > particle.position.z + RECYCLE_EPSILON {
            particle.position.z = camera.position.z + rng.gen_range(10.0..=20.0);
            particle.alpha = 0.0;
            particle.position.x = math::random_in_two_ranges(rng, (-8.0, -3.0), (3.0, 8.0));
            particle.position.y = -camera.position.y / 2.0;
        }
    }
}

/// Fades particles near the camera out and everything else in, clamped to
/// [`ALPHA_MIN`, `ALPHA_MAX`]. Runs after [`advance`] so the render pass can
/// stay read-only.
pub fn fade(scene: &mut Scene) {
    let camera_z = scene.camera.position.z;
    for particle in &mut scene.particles {
        if particle.position.z - camera_z < FADE_NEAR {
            particle.alpha -= FADE_OUT_PER_STEP;
        } else {
            particle.alpha += FADE_IN_PER_STEP;
        }
        particle.alpha = particle.alpha.clamp(ALPHA_MIN, ALPHA_MAX);
    }
}
