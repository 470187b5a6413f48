//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::Jail;
use pretty_assertions::assert_eq;
use roll_config::{ConfigError, RollConfig};

#[test]
fn loads_project_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rollcall")?;
        jail.create_file(
            ".rollcall/config.toml",
            r#"
[database]
path = "/var/lib/rollcall/attendance.db"
eligibility_path = "/var/lib/rollcall/eligibility.db"

[propagation]
timeout_ms = 1500
reconcile_batch = 10

[eligibility]
min_attendance_percent = 70.0
"#,
        )?;

        let config = RollConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.database.path, "/var/lib/rollcall/attendance.db");
        assert_eq!(
            config.database.eligibility_path,
            "/var/lib/rollcall/eligibility.db"
        );
        assert_eq!(config.propagation.timeout_ms, 1500);
        assert_eq!(config.propagation.reconcile_batch, 10);
        assert!((config.eligibility.min_attendance_percent - 70.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rollcall")?;
        jail.create_file(
            ".rollcall/config.toml",
            r#"
[propagation]
timeout_ms = 250
"#,
        )?;

        let config = RollConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.propagation.timeout_ms, 250);
        assert_eq!(config.propagation.reconcile_batch, 50);
        assert_eq!(config.database.path, ".rollcall/attendance.db");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rollcall")?;
        jail.create_file(
            ".rollcall/config.toml",
            r#"
[propagation]
timeout_ms = 250
"#,
        )?;
        jail.set_env("ROLLCALL_PROPAGATION__TIMEOUT_MS", "900");
        jail.set_env("ROLLCALL_DATABASE__PATH", ":memory:");

        let config = RollConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.propagation.timeout_ms, 900);
        assert_eq!(config.database.path, ":memory:");
        Ok(())
    });
}

#[test]
fn invalid_values_fail_loading() {
    Jail::expect_with(|jail| {
        jail.set_env("ROLLCALL_ELIGIBILITY__MIN_ATTENDANCE_PERCENT", "-5");

        let err = RollConfig::load_from(jail.directory()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "got {err:?}");
        Ok(())
    });
}

#[test]
fn ill_typed_env_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("ROLLCALL_PROPAGATION__TIMEOUT_MS", "soon");

        let err = RollConfig::load_from(jail.directory()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");
        Ok(())
    });
}
