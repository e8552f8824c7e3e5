use serde::{Deserialize, Serialize};

pub const TOTAL_BLOOD_VOLUME: f64 = 5.0; // liters
pub const HEMATOCRIT: f64 = 0.45;
pub const ANH_EXTRACTION_VOLUME: f64 = 0.86; // liters withdrawn before surgery
pub const DECAY_TIME_CONSTANT: f64 = 10.0; // hours

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Scenario {
    Baseline,
    AnhPretreated,
}

/// Circulating RBC volume in liters at `t` hours, rounded to three decimals.
pub fn decay(t: f64, scenario: Scenario) -> f64 {
    let initial_rbc = match scenario {
        Scenario::Baseline => HEMATOCRIT * TOTAL_BLOOD_VOLUME,
        // Same hematocrit applied to the post-extraction volume
        Scenario::AnhPretreated => (9.0 / 20.0) * (TOTAL_BLOOD_VOLUME - ANH_EXTRACTION_VOLUME),
    };
    round_to(initial_rbc * (-t / DECAY_TIME_CONSTANT).exp(), 3)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn initial_volumes() {
        assert_eq!(decay(0.0, Scenario::Baseline), 2.25);
        assert_eq!(decay(0.0, Scenario::AnhPretreated), 1.863);
    }

    #[test]
    fn volumes_at_horizon() {
        assert_abs_diff_eq!(decay(4.0, Scenario::Baseline), 1.508, epsilon = 1e-9);
        assert_abs_diff_eq!(decay(4.0, Scenario::AnhPretreated), 1.249, epsilon = 1e-9);
    }

    #[test]
    fn matches_closed_form() {
        for step in 0..=60 {
            let t = step as f64 * 0.1;
            let expected_baseline = (2.25 * (-t / 10.0).exp() * 1000.0).round() / 1000.0;
            let expected_anh = (0.45 * 4.14 * (-t / 10.0).exp() * 1000.0).round() / 1000.0;
            assert_abs_diff_eq!(decay(t, Scenario::Baseline), expected_baseline, epsilon = 1e-9);
            assert_abs_diff_eq!(decay(t, Scenario::AnhPretreated), expected_anh, epsilon = 1.1e-3);
        }
    }

    #[test]
    fn anh_curve_stays_below_baseline() {
        let mut t = 0.0;
        while t <= 4.0 {
            assert!(decay(t, Scenario::AnhPretreated) < decay(t, Scenario::Baseline));
            t += 0.5;
        }
    }

    #[test]
    fn round_to_keeps_fixed_decimals() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(0.30000000000000004, 1), 0.3);
    }
}
