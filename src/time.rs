//! Elapsed-time helpers over an injectable [`Clock`].

use crate::hal::Clock;

/// Measures time since it was started or last reset.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_ms: u32,
}

impl Stopwatch {
    /// Starts timing now.
    pub fn start(clock: &impl Clock) -> Self {
        Self {
            start_ms: clock.now_ms(),
        }
    }

    /// Milliseconds since start. Correct across counter wraparound.
    pub fn elapsed_ms(&self, clock: &impl Clock) -> u32 {
        clock.now_ms().wrapping_sub(self.start_ms)
    }
}

/// A point in time after which a bounded wait gives up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    timer: Stopwatch,
    timeout_ms: u32,
}

impl Deadline {
    /// Expires `timeout_ms` from now.
    pub fn after(clock: &impl Clock, timeout_ms: u32) -> Self {
        Self {
            timer: Stopwatch::start(clock),
            timeout_ms,
        }
    }

    /// Whether the timeout has elapsed.
    pub fn expired(&self, clock: &impl Clock) -> bool {
        self.timer.elapsed_ms(clock) >= self.timeout_ms
    }
}
