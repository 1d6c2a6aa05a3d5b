use std::time::SystemTime;

use anyhow::{ensure, Result};
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::clock::{SystemClock, TimeSource};
use crate::entity::{Scene, Viewport};
use crate::render;
use crate::render_target::RenderTarget;
use crate::sim;
use crate::sprite::{self, SpriteAsset, SpriteResource};
use crate::stepper::{SteppingMode, SteppingPolicy, Timing};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub width: f32,
    pub height: f32,
    pub resolution: f32,
    pub fps: u32,
    pub mode: SteppingMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 360.0,
            resolution: 1.0,
            fps: 60,
            mode: SteppingMode::Throttled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped,
}

/// The simulation/render engine. The host schedules `tick()` at its display
/// refresh; everything else (cadence, recycling, compositing) lives here.
pub struct Engine {
    scene: Scene,
    sprites: Vec<SpriteResource>,
    target: RenderTarget,
    timing: Timing,
    policy: Box<dyn SteppingPolicy>,
    clock: Box<dyn TimeSource>,
    rng: Pcg64Mcg,
    state: LoopState,
    frame: u32,
}

impl Engine {
    /// Decodes all sprites (concurrently, resolving only when every one has
    /// landed) and returns a running engine. This is the host-facing
    /// initialization barrier: no tick can happen before it resolves.
    pub async fn initialize(options: Options, assets: &[SpriteAsset]) -> Result<Self> {
        let sprites = sprite::load_all(assets).await?;
        let mut engine = Self::with_sprites(options, sprites)?;
        engine.start();
        Ok(engine)
    }

    /// Builds a stopped engine around already-decoded sprites.
    pub fn with_sprites(options: Options, sprites: Vec<SpriteResource>) -> Result<Self> {
        Self::with_clock(options, sprites, Box::new(SystemClock))
    }

    pub fn with_clock(
        options: Options,
        sprites: Vec<SpriteResource>,
        clock: Box<dyn TimeSource>,
    ) -> Result<Self> {
        ensure!(
            options.width > 0.0 && options.height > 0.0,
            "viewport must have positive dimensions, got {}x{}",
            options.width,
            options.height
        );
        ensure!(
            options.resolution > 0.0,
            "resolution must be positive, got {}",
            options.resolution
        );
        ensure!(options.fps > 0, "target fps must be positive");
        ensure!(
            !sprites.is_empty(),
            "at least one decoded sprite is required before the loop starts"
        );

        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        info!("Seeded RNG with {}", seed);

        let viewport = Viewport {
            width: options.width,
            height: options.height,
            resolution: options.resolution,
        };
        let scene = Scene::new(viewport, sprites.len(), &mut rng);
        let target = RenderTarget::new(viewport.pixel_width(), viewport.pixel_height());
        let timing = Timing::new(options.fps, clock.now_ms());

        debug!(
            "Engine built: {}x{}@{} fps, {:?} stepping, {} sprites",
            options.width,
            options.height,
            options.fps,
            options.mode,
            sprites.len()
        );

        Ok(Self {
            scene,
            sprites,
            target,
            timing,
            policy: options.mode.policy(),
            clock,
            rng,
            state: LoopState::Stopped,
            frame: 0,
        })
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        // Reset the reference time so a long stopped gap is not replayed.
        let now = self.clock.now_ms();
        self.timing.current_time = now;
        self.timing.last_time = now;
        self.state = LoopState::Running;
        info!("Engine started");
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        info!("Engine stopped");
    }

    /// Idempotent teardown, safe even when the engine never started.
    pub fn teardown(&mut self) {
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// One scheduled tick. Returns `Ok(false)` without touching any state
    /// when the engine is stopped, which is what defuses a stray callback
    /// arriving after `stop()`. Simulation fully completes before the frame
    /// is composited.
    pub fn tick(&mut self) -> Result<bool> {
        if self.state == LoopState::Stopped {
            return Ok(false);
        }

        self.frame = (self.frame + 1) % 1200;
        self.timing.current_time = self.clock.now_ms();

        let steps = self.policy.begin_tick(&mut self.timing);
        for _ in 0..steps {
            sim::step(&mut self.scene, &mut self.rng);
        }

        render::draw(
            &self.scene,
            &self.sprites,
            self.timing.current_time,
            &mut self.target,
        )?;

        Ok(true)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        debug!("Resized to {}x{}", width, height);
        self.scene.viewport.width = width;
        self.scene.viewport.height = height;
        self.target.resize(
            self.scene.viewport.pixel_width(),
            self.scene.viewport.pixel_height(),
        );
    }

    pub fn pointer_down(&mut self) {
        self.scene.pointer_down = true;
    }

    pub fn pointer_up(&mut self) {
        self.scene.pointer_down = false;
    }

    /// The last composited frame.
    pub fn frame(&self) -> &RenderTarget {
        &self.target
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Ticks since construction, wrapping at 1200.
    pub fn frame_index(&self) -> u32 {
        self.frame
    }
}
