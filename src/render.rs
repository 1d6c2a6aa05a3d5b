use anyhow::{bail, Result};

use crate::entity::Scene;
use crate::projection;
use crate::render_target::{RenderTarget, Rgba};
use crate::sprite::SpriteResource;

pub const SKY_UP: (Rgba, Rgba) = (Rgba::new(165, 30, 210, 255), Rgba::new(11, 168, 255, 255));
pub const SKY_DOWN: (Rgba, Rgba) = (Rgba::new(75, 65, 205, 255), Rgba::new(187, 244, 255, 255));

/// Blend factor of the slow sky cycle at `current_time` milliseconds.
pub fn sky_phase(current_time: f64) -> f32 {
    (current_time / 10000.0).sin().abs() as f32
}

/// Composites one frame: clear, sky gradient, then every particle in store
/// order (no depth sort). Reads the scene only; the alpha fade already ran
/// inside the simulation step.
pub fn draw(
    scene: &Scene,
    sprites: &[SpriteResource],
    current_time: f64,
    target: &mut RenderTarget,
) -> Result<()> {
    target.clear();

    let t = sky_phase(current_time);
    target.fill_vertical_gradient(SKY_UP.0.lerp(SKY_UP.1, t), SKY_DOWN.0.lerp(SKY_DOWN.1, t));

    let viewport = scene.viewport;
    for particle in &scene.particles {
        let sprite = match sprites.get(particle.sprite_index) {
            Some(sprite) => sprite,
            None => bail!(
                "no decoded sprite for index {} ({} loaded); asset loading must finish before the loop starts",
                particle.sprite_index,
                sprites.len()
            ),
        };

        let projected = projection::project(particle.position, &scene.camera, viewport);
        let scale = particle.base_scale * projected.scale;

        // Anchor offset is width-relative on both axes, on purpose.
        let (sprite_w, sprite_h) = sprite.image.dimensions();
        let offset_x = -(sprite_w as f32 / viewport.width / 5.0);
        let offset_y = -(sprite_h as f32 / viewport.width / 5.0);

        target.draw_image(
            &sprite.image,
            (projected.x + offset_x * scale) * viewport.resolution,
            (projected.y + offset_y * scale) * viewport.resolution,
            scale * viewport.resolution,
            particle.alpha,
        );
    }

    Ok(())
}
