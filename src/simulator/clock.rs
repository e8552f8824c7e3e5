use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Sleep};

pub const TICK_DELAY: Duration = Duration::from_millis(100);
pub const TIME_STEP: f64 = 0.1; // hours per tick
pub const HORIZON: f64 = 4.0; // hours
// Samples are accepted slightly past the horizon to absorb accumulated float error
pub const SAMPLE_LIMIT: f64 = 4.05;

/// Simulated time advanced by repeated addition of `TIME_STEP`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances one step and returns the new elapsed time.
    pub fn advance(&mut self) -> f64 {
        self.elapsed += TIME_STEP;
        self.elapsed
    }

    pub fn reached_horizon(&self) -> bool {
        self.elapsed >= HORIZON
    }

    /// Remaining sampled times from the current position, without mutating the clock.
    pub fn remaining(&self) -> impl Iterator<Item = f64> {
        let mut clock = *self;
        std::iter::from_fn(move || {
            if clock.reached_horizon() {
                return None;
            }
            Some(clock.advance())
        })
        .filter(|t| *t <= SAMPLE_LIMIT)
    }
}

/// Cancellable delayed callback. At most one delay is pending at a time and
/// dropping the timer drops it, so nothing can fire after teardown.
#[derive(Debug)]
pub struct TickTimer {
    delay: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl TickTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules the next tick, replacing any pending one.
    pub fn arm(&mut self) {
        self.pending = Some(Box::pin(sleep(self.delay)));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Completes once the pending delay elapses, then disarms. Never completes
    /// while unarmed. Cancel safe: dropping this future keeps the delay pending.
    pub async fn fired(&mut self) {
        match self.pending.as_mut() {
            Some(delay) => {
                delay.as_mut().await;
                self.pending = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TICK_DELAY)
    }
}
