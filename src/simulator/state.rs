use super::physics::{decay, round_to, Scenario};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One point of both curves. Time is kept at one decimal, volumes at three.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub without_anh: f64,
    pub with_anh: f64,
}

impl Sample {
    pub fn at(t: f64) -> Self {
        Self {
            time: round_to(t, 1),
            without_anh: decay(t, Scenario::Baseline),
            with_anh: decay(t, Scenario::AnhPretreated),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.1}h without_anh={:.3}L with_anh={:.3}L",
            self.time, self.without_anh, self.with_anh
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub elapsed_time: f64,
    pub is_running: bool,
    pub history: Vec<Sample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rounds_time_to_one_decimal() {
        let sample = Sample::at(0.1 + 0.2);
        assert_eq!(sample.time, 0.3);
    }

    #[test]
    fn sample_display_is_fixed_point() {
        let sample = Sample::at(0.0);
        assert_eq!(sample.to_string(), "t=0.0h without_anh=2.250L with_anh=1.863L");
    }

    #[test]
    fn fresh_state_is_zeroed() {
        let state = SimulationState::default();
        assert_eq!(state.elapsed_time, 0.0);
        assert!(!state.is_running);
        assert!(state.history.is_empty());
    }
}
