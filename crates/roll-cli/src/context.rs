use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use roll_config::RollConfig;
use roll_db::AttendanceStore;
use roll_eligibility::EligibilityLedger;
use roll_service::AttendanceService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AttendanceService<Arc<EligibilityLedger>>,
    pub config: RollConfig,
}

impl AppContext {
    /// Open both databases and wire the attendance service to the ledger.
    pub async fn init(config: RollConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let root = project_root(flags);
        let attendance_path = resolve_db_path(&root, &config.database.path)?;
        let eligibility_path = resolve_db_path(&root, &config.database.eligibility_path)?;

        let store = AttendanceStore::open_local(&attendance_path)
            .await
            .with_context(|| format!("failed to open attendance store at {attendance_path}"))?;
        let ledger = EligibilityLedger::open_local(
            &eligibility_path,
            config.eligibility.min_attendance_percent,
        )
        .await
        .with_context(|| format!("failed to open eligibility ledger at {eligibility_path}"))?;

        tracing::debug!(
            attendance = %attendance_path,
            eligibility = %eligibility_path,
            "databases opened"
        );

        let service =
            AttendanceService::new(store, Arc::new(ledger), config.propagation.timeout());
        Ok(Self { service, config })
    }

    pub fn ledger(&self) -> &EligibilityLedger {
        self.service.propagator()
    }
}

/// Load `.env` from the project root, then the layered config.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RollConfig> {
    let root = project_root(flags);
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    RollConfig::load_from(&root).context("failed to load rollcall configuration")
}

fn project_root(flags: &GlobalFlags) -> PathBuf {
    flags
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a configured database path against the project root and make
/// sure its directory exists. `:memory:` is passed through.
fn resolve_db_path(root: &Path, configured: &str) -> anyhow::Result<String> {
    if configured == ":memory:" {
        return Ok(configured.to_string());
    }
    let path = root.join(configured);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_path_is_passed_through() {
        let resolved = resolve_db_path(Path::new("/nonexistent"), ":memory:").unwrap();
        assert_eq!(resolved, ":memory:");
    }

    #[test]
    fn relative_path_is_joined_to_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let resolved = resolve_db_path(dir.path(), ".rollcall/attendance.db").unwrap();
        assert!(resolved.ends_with("attendance.db"));
        assert!(dir.path().join(".rollcall").is_dir());
    }
}
