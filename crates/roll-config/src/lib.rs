//! # roll-config
//!
//! Layered configuration loading for Rollcall using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROLLCALL_*` prefix, `__` as separator)
//! 2. Project-level `.rollcall/config.toml`
//! 3. User-level `~/.config/rollcall/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROLLCALL_DATABASE__PATH` -> `database.path`,
//! `ROLLCALL_PROPAGATION__TIMEOUT_MS` -> `propagation.timeout_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use roll_config::RollConfig;
//!
//! let config = RollConfig::load_with_dotenv().expect("config");
//! println!("attendance db: {}", config.database.path);
//! ```

mod database;
mod eligibility;
mod error;
mod propagation;

pub use database::DatabaseConfig;
pub use eligibility::EligibilityConfig;
pub use error::ConfigError;
pub use propagation::PropagationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RollConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub propagation: PropagationConfig,
    #[serde(default)]
    pub eligibility: EligibilityConfig,
}

impl RollConfig {
    /// Load configuration from all sources, resolving the project config
    /// relative to the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with the project config taken from `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_from(project_dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the current directory.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain with the project layer read from
    /// `project_dir/.rollcall/config.toml`.
    pub fn figment_for(project_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_dir.join(".rollcall").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ROLLCALL_").split("__"))
    }

    /// Reject values that would make the services misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(invalid("database.path", "must not be empty"));
        }
        if self.database.eligibility_path.trim().is_empty() {
            return Err(invalid("database.eligibility_path", "must not be empty"));
        }
        if self.database.path == self.database.eligibility_path
            && self.database.path != ":memory:"
        {
            return Err(invalid(
                "database.eligibility_path",
                "must differ from database.path",
            ));
        }
        if self.propagation.timeout_ms == 0 {
            return Err(invalid("propagation.timeout_ms", "must be greater than zero"));
        }
        if self.propagation.reconcile_batch == 0 {
            return Err(invalid(
                "propagation.reconcile_batch",
                "must be greater than zero",
            ));
        }
        let pct = self.eligibility.min_attendance_percent;
        if !(0.0..=100.0).contains(&pct) {
            return Err(invalid(
                "eligibility.min_attendance_percent",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rollcall").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = RollConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.propagation.timeout_ms, 5_000);
    }

    #[test]
    fn shared_database_file_rejected() {
        let mut config = RollConfig::default();
        config.database.eligibility_path = config.database.path.clone();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "database.eligibility_path")
        );
    }

    #[test]
    fn in_memory_databases_may_share_the_marker() {
        let mut config = RollConfig::default();
        config.database.path = ":memory:".into();
        config.database.eligibility_path = ":memory:".into();
        assert!(config.validate().is_ok());
        assert!(config.database.is_ephemeral());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = RollConfig::default();
        config.propagation.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut config = RollConfig::default();
        config.eligibility.min_attendance_percent = 120.0;
        assert!(config.validate().is_err());
    }
}
