use std::cell::Cell;
use std::rc::Rc;

use chrono::prelude::*;

/// Injected time source so the loop driver never reads the wall clock
/// directly and simulation stays deterministic under test.
pub trait TimeSource {
    /// Current time in milliseconds. Only differences matter.
    fn now_ms(&self) -> f64;
}

/// Wall-clock time source used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_ms(&self) -> f64 {
        Local::now().timestamp_millis() as f64
    }
}

/// Hand-cranked time source for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

// Lets a test keep a handle on the clock it hands to the engine.
impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}
