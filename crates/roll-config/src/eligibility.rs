//! Eligibility threshold settings.

use serde::{Deserialize, Serialize};

/// Default minimum attendance percentage for exam eligibility.
const fn default_min_attendance_percent() -> f64 {
    75.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EligibilityConfig {
    /// A student is eligible at or above this percentage of lectures attended.
    #[serde(default = "default_min_attendance_percent")]
    pub min_attendance_percent: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_attendance_percent: default_min_attendance_percent(),
        }
    }
}
