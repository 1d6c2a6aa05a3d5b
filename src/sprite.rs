use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbaImage;
use log::info;

/// Static descriptor for a sprite the engine needs decoded before ticking.
#[derive(Debug, Clone)]
pub struct SpriteAsset {
    pub name: String,
    pub path: PathBuf,
}

impl SpriteAsset {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A decoded sprite. Only the pixels and their dimensions matter to the
/// render pass.
#[derive(Debug, Clone)]
pub struct SpriteResource {
    pub image: RgbaImage,
}

impl SpriteResource {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }
}

/// Decodes every asset concurrently and resolves only once all of them have
/// landed. Any failed decode fails the whole load; there is no retry or
/// timeout here, the host owns those.
pub async fn load_all(assets: &[SpriteAsset]) -> Result<Vec<SpriteResource>> {
    let handles: Vec<_> = assets
        .iter()
        .cloned()
        .map(|asset| {
            tokio::task::spawn_blocking(move || -> Result<SpriteResource> {
                let image = image::open(&asset.path)
                    .with_context(|| {
                        format!(
                            "Failed to decode sprite {:?} from {}",
                            asset.name,
                            asset.path.display()
                        )
                    })?
                    .to_rgba8();
                Ok(SpriteResource::from_image(image))
            })
        })
        .collect();

    let mut sprites = Vec::with_capacity(handles.len());
    for handle in handles {
        sprites.push(handle.await.context("Sprite decode task panicked")??);
    }

    info!("Loaded {} sprites", sprites.len());
    Ok(sprites)
}

/// Procedural soft round puff, used by the demo binary and tests in place of
/// cloud textures shipped by a host.
pub fn puff(size: u32) -> SpriteResource {
    let mut image = RgbaImage::new(size, size);
    let center = (size as f32 - 1.0) / 2.0;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = (x as f32 - center) / center.max(1.0);
        let dy = (y as f32 - center) / center.max(1.0);
        let d = (dx * dx + dy * dy).sqrt();
        let a = ((1.0 - d) * 1.4).clamp(0.0, 1.0);
        *pixel = image::Rgba([255, 255, 255, (a * 255.0) as u8]);
    }
    SpriteResource::from_image(image)
}
