use std::rc::Rc;

use cloudfield::clock::ManualClock;
use cloudfield::sprite;
use cloudfield::{Engine, Options, SteppingMode};

const INTERVAL_MS: f64 = 1000.0 / 60.0;

fn options(mode: SteppingMode) -> Options {
    Options {
        width: 800.0,
        height: 600.0,
        resolution: 1.0,
        fps: 60,
        mode,
    }
}

fn engine_with_clock(mode: SteppingMode) -> (Engine, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(0.0));
    let sprites = vec![sprite::puff(16), sprite::puff(16), sprite::puff(16)];
    let engine = Engine::with_clock(options(mode), sprites, Box::new(Rc::clone(&clock)))
        .expect("engine construction failed");
    (engine, clock)
}

#[test]
fn engine_starts_stopped_and_ticks_only_after_start() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    assert!(!engine.is_running());

    clock.advance(INTERVAL_MS);
    assert!(!engine.tick().unwrap());

    engine.start();
    clock.advance(INTERVAL_MS);
    assert!(engine.tick().unwrap());
    assert_eq!(engine.frame_index(), 1);
}

#[test]
fn no_tick_runs_after_stop() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();

    clock.advance(INTERVAL_MS);
    engine.tick().unwrap();
    let z_before = engine.scene().camera.position.z;

    engine.stop();

    // A stray scheduled callback arriving after cancellation.
    clock.advance(INTERVAL_MS);
    assert!(!engine.tick().unwrap());
    assert_eq!(engine.scene().camera.position.z, z_before);
}

#[test]
fn teardown_is_idempotent_even_when_never_started() {
    let (mut engine, _clock) = engine_with_clock(SteppingMode::Throttled);
    engine.teardown();
    engine.teardown();
    assert!(!engine.is_running());

    let (mut started, clock) = engine_with_clock(SteppingMode::Throttled);
    started.start();
    clock.advance(INTERVAL_MS);
    started.tick().unwrap();
    started.teardown();
    started.teardown();
    assert!(!started.tick().unwrap());
}

#[test]
fn engine_can_be_restarted_after_teardown() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();
    engine.teardown();

    engine.start();
    clock.advance(INTERVAL_MS);
    assert!(engine.tick().unwrap());
}

#[test]
fn throttled_mode_renders_every_tick_but_steps_at_the_target_rate() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();

    // Sub-interval tick: no simulation step, camera stays put.
    let z0 = engine.scene().camera.position.z;
    clock.advance(8.0);
    assert!(engine.tick().unwrap());
    assert_eq!(engine.scene().camera.position.z, z0);
    // The frame is still composited: the sky gradient covers the target.
    assert_ne!(engine.frame().pixel(0, 0).a, 0);

    // Crossing the interval runs exactly one step.
    clock.advance(INTERVAL_MS);
    assert!(engine.tick().unwrap());
    assert!(engine.scene().camera.position.z > z0);
}

#[test]
fn fixed_step_mode_drains_the_bank_deterministically() {
    let clock = Rc::new(ManualClock::new(0.0));
    let sprites = vec![sprite::puff(16)];
    let mut opts = options(SteppingMode::FixedStep);
    opts.fps = 32; // 31.25 ms step, binary-exact
    let mut engine =
        Engine::with_clock(opts, sprites, Box::new(Rc::clone(&clock))).unwrap();
    engine.start();

    // A 156.25 ms burst at 31.25 ms per step is exactly five simulation
    // steps. With the pointer up, speed decays 0.05 per step from 3.0 and
    // the camera advances by travel_rate * speed each step.
    clock.advance(156.25);
    let z0 = engine.scene().camera.position.z;
    engine.tick().unwrap();

    let expected: f32 = (1..=5).map(|i| 0.05 * (3.0 - 0.05 * i as f32)).sum();
    let moved = engine.scene().camera.position.z - z0;
    assert!(
        (moved - expected).abs() < 1e-4,
        "camera moved {} expected {}",
        moved,
        expected
    );
    assert!(engine.timing().total_time.abs() < 1e-9);
}

#[test]
fn pointer_held_for_100_ticks_saturates_speed_at_ten() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();
    engine.pointer_down();

    let mut last = engine.scene().camera.speed;
    for _ in 0..100 {
        clock.advance(INTERVAL_MS + 0.01);
        engine.tick().unwrap();
        let speed = engine.scene().camera.speed;
        assert!((1.0..=10.0).contains(&speed));
        assert!(speed >= last);
        last = speed;
    }
    assert_eq!(last, 10.0);

    engine.pointer_up();
    clock.advance(INTERVAL_MS + 0.01);
    engine.tick().unwrap();
    assert!(engine.scene().camera.speed < 10.0);
}

#[test]
fn alpha_invariant_holds_across_many_engine_ticks() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();

    for _ in 0..500 {
        clock.advance(INTERVAL_MS + 0.01);
        engine.tick().unwrap();
        for particle in &engine.scene().particles {
            assert!((0.02..=0.98).contains(&particle.alpha));
        }
    }
}

#[test]
fn resize_reallocates_the_frame() {
    let (mut engine, clock) = engine_with_clock(SteppingMode::Throttled);
    engine.start();
    engine.resize(400.0, 300.0);
    assert_eq!(engine.frame().width(), 400);
    assert_eq!(engine.frame().height(), 300);

    clock.advance(INTERVAL_MS);
    assert!(engine.tick().unwrap());
}

#[test]
fn invalid_options_are_rejected() {
    let sprites = || vec![sprite::puff(8)];

    let mut opts = options(SteppingMode::Throttled);
    opts.fps = 0;
    assert!(Engine::with_sprites(opts, sprites()).is_err());

    let mut opts = options(SteppingMode::Throttled);
    opts.width = 0.0;
    assert!(Engine::with_sprites(opts, sprites()).is_err());

    let mut opts = options(SteppingMode::Throttled);
    opts.resolution = 0.0;
    assert!(Engine::with_sprites(opts, sprites()).is_err());

    assert!(Engine::with_sprites(options(SteppingMode::Throttled), Vec::new()).is_err());
}
