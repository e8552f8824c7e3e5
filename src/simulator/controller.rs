use super::clock::{SimulationClock, TickTimer, SAMPLE_LIMIT};
use super::state::{Phase, Sample, SimulationState};

/// Owns the sample history and the single pending tick of a run.
#[derive(Debug, Default)]
pub struct SimulationController {
    clock: SimulationClock,
    timer: TickTimer,
    state: SimulationState,
    phase: Phase,
}

impl SimulationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh run. Ignored while a run is in progress; returns whether
    /// the request was accepted.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Running {
            tracing::debug!("Start ignored, simulation already running");
            return false;
        }

        self.clock.reset();
        self.state.elapsed_time = 0.0;
        self.state.history.clear();
        self.state.history.push(Sample::at(0.0));
        self.state.is_running = true;
        self.phase = Phase::Running;
        self.timer.arm();

        tracing::info!("Simulation started");
        true
    }

    /// Applies one clock tick. Ticks outside a run are dropped.
    pub fn on_tick(&mut self) {
        if self.phase != Phase::Running {
            tracing::warn!(phase = ?self.phase, "Tick outside a running simulation ignored");
            return;
        }

        let new_time = self.clock.advance();
        if new_time <= SAMPLE_LIMIT {
            let sample = Sample::at(new_time);
            tracing::debug!(%sample, "Sample appended");
            self.state.history.push(sample);
        }
        self.state.elapsed_time = new_time;

        if self.clock.reached_horizon() {
            self.finish();
        } else {
            self.timer.arm();
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.state.is_running = false;
        self.phase = Phase::Finished;
        tracing::info!(
            samples = self.state.history.len(),
            elapsed = self.state.elapsed_time,
            "Simulation finished"
        );
    }

    /// Waits for the pending tick. Never completes when no tick is armed.
    pub async fn next_tick(&mut self) {
        self.timer.fired().await;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn history(&self) -> &[Sample] {
        &self.state.history
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tick_pending(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn start_label(&self) -> &'static str {
        if self.state.is_running {
            "Simulating..."
        } else {
            "Start Simulation"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::physics::{decay, Scenario};

    fn run_to_completion(controller: &mut SimulationController) -> usize {
        let mut ticks = 0;
        while controller.phase() == Phase::Running {
            controller.on_tick();
            ticks += 1;
        }
        ticks
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let controller = SimulationController::new();
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.history().is_empty());
        assert!(!controller.is_running());
        assert!(!controller.tick_pending());
        assert_eq!(controller.start_label(), "Start Simulation");
    }

    #[tokio::test]
    async fn start_seeds_initial_sample() {
        let mut controller = SimulationController::new();
        assert!(controller.start());

        assert_eq!(controller.phase(), Phase::Running);
        assert!(controller.is_running());
        assert!(controller.tick_pending());
        assert_eq!(controller.start_label(), "Simulating...");
        assert_eq!(
            controller.history(),
            &[Sample {
                time: 0.0,
                without_anh: decay(0.0, Scenario::Baseline),
                with_anh: decay(0.0, Scenario::AnhPretreated),
            }]
        );
    }

    #[tokio::test]
    async fn start_while_running_is_ignored() {
        let mut controller = SimulationController::new();
        controller.start();
        controller.on_tick();
        controller.on_tick();
        let before = controller.state().clone();

        assert!(!controller.start());
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.phase(), Phase::Running);
    }

    #[tokio::test]
    async fn completes_with_samples_through_horizon() {
        let mut controller = SimulationController::new();
        controller.start();
        let ticks = run_to_completion(&mut controller);

        assert_eq!(ticks, 40);
        assert_eq!(controller.phase(), Phase::Finished);
        assert!(!controller.is_running());
        assert!(!controller.tick_pending());

        let history = controller.history();
        assert_eq!(history.len(), 41);
        for (i, sample) in history.iter().enumerate() {
            assert!((sample.time - i as f64 * 0.1).abs() < 1e-9);
        }
        assert!(history.windows(2).all(|w| w[1].time > w[0].time));
        assert_eq!(history.last().map(|s| s.time), Some(4.0));
        assert_eq!(history.last().map(|s| s.without_anh), Some(1.508));
        assert_eq!(history.last().map(|s| s.with_anh), Some(1.249));
    }

    #[tokio::test]
    async fn ticks_after_finish_append_nothing() {
        let mut controller = SimulationController::new();
        controller.start();
        run_to_completion(&mut controller);
        let finished = controller.state().clone();

        controller.on_tick();
        assert_eq!(controller.state(), &finished);
        assert!(!controller.tick_pending());
    }

    #[tokio::test]
    async fn restart_after_finish_resets_history() {
        let mut controller = SimulationController::new();
        controller.start();
        run_to_completion(&mut controller);

        assert!(controller.start());
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].time, 0.0);
        assert_eq!(controller.state().elapsed_time, 0.0);
        assert_eq!(controller.phase(), Phase::Running);

        controller.on_tick();
        assert_eq!(controller.history().len(), 2);
        assert_eq!(controller.history()[1].time, 0.1);
    }

    #[tokio::test(start_paused = true)]
    async fn next_tick_follows_the_timer() {
        let mut controller = SimulationController::new();
        controller.start();
        let started = tokio::time::Instant::now();

        controller.next_tick().await;
        assert_eq!(started.elapsed(), std::time::Duration::from_millis(100));
        assert!(!controller.tick_pending());
        controller.on_tick();
        assert!(controller.tick_pending());
    }
}
