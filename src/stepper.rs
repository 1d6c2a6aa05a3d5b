/// Timing state shared by both cadence policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub current_time: f64,
    pub last_time: f64,
    /// Banked milliseconds, used only by the fixed-step policy.
    pub total_time: f64,
    /// Fixed step duration in seconds.
    pub step: f64,
    pub fps: u32,
}

impl Timing {
    pub fn new(fps: u32, now_ms: f64) -> Self {
        Self {
            current_time: now_ms,
            last_time: now_ms,
            total_time: 0.0,
            step: 1.0 / fps as f64,
            fps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteppingMode {
    /// Variable-step: at most one simulation step per tick, throttled to the
    /// target fps, remainder carried forward. Rendering still happens every
    /// tick.
    Throttled,
    /// Fixed-step accumulator: banked elapsed time drained in constant-sized
    /// simulation steps, deterministic regardless of render cadence.
    FixedStep,
}

impl SteppingMode {
    pub fn policy(self) -> Box<dyn SteppingPolicy> {
        match self {
            SteppingMode::Throttled => Box::new(Throttled),
            SteppingMode::FixedStep => Box::new(FixedStep),
        }
    }
}

/// One cadence policy. `begin_tick` inspects the already-updated
/// `current_time`, adjusts the timing bookkeeping, and says how many
/// simulation steps this tick runs. Simulation and render code stay
/// identical across policies.
pub trait SteppingPolicy {
    fn begin_tick(&mut self, timing: &mut Timing) -> u32;
}

pub struct Throttled;

impl SteppingPolicy for Throttled {
    fn begin_tick(&mut self, timing: &mut Timing) -> u32 {
        let interval = 1000.0 / timing.fps as f64;
        let elapsed = timing.current_time - timing.last_time;
        if elapsed >= interval {
            // Carry the remainder so the cadence does not drift.
            timing.last_time = timing.current_time - (elapsed - interval);
            1
        } else {
            0
        }
    }
}

pub struct FixedStep;

impl FixedStep {
    /// Clamp on per-tick elapsed time, guarding against suspend spikes.
    pub const MAX_ELAPSED_MS: f64 = 1000.0;
}

impl SteppingPolicy for FixedStep {
    fn begin_tick(&mut self, timing: &mut Timing) -> u32 {
        let elapsed = (timing.current_time - timing.last_time).min(Self::MAX_ELAPSED_MS);
        timing.total_time += elapsed;

        let step_ms = timing.step * 1000.0;
        let mut steps = 0;
        while timing.total_time >= step_ms {
            timing.total_time -= step_ms;
            steps += 1;
        }

        timing.last_time = timing.current_time;
        steps
    }
}
