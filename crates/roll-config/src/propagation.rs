//! Eligibility propagation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bound on a single propagation call, in milliseconds.
const fn default_timeout_ms() -> u64 {
    5_000
}

/// Default number of pending sessions retried per reconcile sweep.
const fn default_reconcile_batch() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropagationConfig {
    /// Upper bound on one call into the eligibility subsystem.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How many pending sessions a reconcile sweep picks up.
    #[serde(default = "default_reconcile_batch")]
    pub reconcile_batch: u32,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            reconcile_batch: default_reconcile_batch(),
        }
    }
}

impl PropagationConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = PropagationConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.reconcile_batch, 50);
    }
}
