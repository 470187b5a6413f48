//! Attendance and eligibility database locations.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".rollcall/attendance.db".into()
}

fn default_eligibility_path() -> String {
    ".rollcall/eligibility.db".into()
}

/// Where the two libSQL databases live.
///
/// The eligibility ledger has its own file: it is a separate subsystem and
/// never shares a transaction with the attendance store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Attendance store path, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Eligibility ledger path, or `:memory:`.
    #[serde(default = "default_eligibility_path")]
    pub eligibility_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            eligibility_path: default_eligibility_path(),
        }
    }
}

impl DatabaseConfig {
    /// True when either database lives only in memory.
    pub fn is_ephemeral(&self) -> bool {
        self.path == ":memory:" || self.eligibility_path == ":memory:"
    }
}
