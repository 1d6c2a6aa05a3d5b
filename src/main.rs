use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use cloudfield::sprite::{self, SpriteAsset};
use cloudfield::{Engine, Options, SteppingMode};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let options = Options {
        width: 800.0,
        height: 600.0,
        resolution: 1.0,
        fps: 60,
        mode: SteppingMode::Throttled,
    };

    // With a directory argument the real cloud textures are decoded behind
    // the load barrier; otherwise procedural puffs stand in.
    let mut engine = match std::env::args().nth(1) {
        Some(dir) => {
            let assets: Vec<SpriteAsset> = (1..=3)
                .map(|i| {
                    SpriteAsset::new(
                        format!("Cloud {:02}", i),
                        Path::new(&dir).join(format!("cloud_{:02}.png", i)),
                    )
                })
                .collect();
            Engine::initialize(options, &assets).await?
        }
        None => {
            let sprites = vec![sprite::puff(96), sprite::puff(128), sprite::puff(160)];
            let mut engine = Engine::with_sprites(options, sprites)?;
            engine.start();
            engine
        }
    };

    let frame_interval = Duration::from_secs_f64(1.0 / 60.0);
    for tick in 0..300 {
        engine.tick()?;
        if tick == 120 {
            engine.pointer_down();
        }
        if tick == 240 {
            engine.pointer_up();
        }
        tokio::time::sleep(frame_interval).await;
    }
    engine.teardown();

    let frame = engine.frame();
    image::save_buffer(
        "frame.png",
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
    )
    .context("Failed to write frame.png")?;
    info!("Wrote frame.png");

    Ok(())
}
