//! CLI command tests

use std::path::PathBuf;

use nest_core::Database;
use tempfile::TempDir;

use crate::commands::{self, format_amount, truncate};

/// Temp dir holding a category config with A = 500, B = 0
fn setup_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.toml");
    std::fs::write(&path, "[categories]\nA = 500\nB = 0\nC = 125.5\n").unwrap();
    (dir, path)
}

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Setup Command Tests ==========

#[test]
fn test_cmd_init_creates_db() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nest.db");

    commands::cmd_init(&db_path, true).unwrap();
    assert!(db_path.exists());

    let db = commands::open_db(&db_path, true).unwrap();
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_cmd_status_without_db() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_status(&dir.path().join("missing.db"), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_categories_from_file() {
    let (_dir, config) = setup_config();
    assert!(commands::cmd_categories(Some(config.as_path())).is_ok());

    let categories = commands::load_categories(Some(config.as_path())).unwrap();
    assert_eq!(categories.len(), 3);
}

#[test]
fn test_bad_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.toml");
    std::fs::write(&path, "[categories]\nA = -10\n").unwrap();

    assert!(commands::load_categories(Some(path.as_path())).is_err());
}

// ========== Quarter Command Tests ==========

#[test]
fn test_cmd_quarters_add_and_activate() {
    let db = setup_test_db();

    commands::cmd_quarters_add(&db, Some("2026-Q3"), None, None, false).unwrap();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    assert_eq!(db.get_active_quarter().unwrap().unwrap().label, "2026-Q4");

    commands::cmd_quarters_activate(&db, "2026-Q3").unwrap();
    assert_eq!(db.get_active_quarter().unwrap().unwrap().label, "2026-Q3");

    assert!(commands::cmd_quarters_activate(&db, "1999-Q1").is_err());
    assert!(commands::cmd_quarters_list(&db).is_ok());
    assert!(commands::cmd_quarters_current(&db).is_ok());

    commands::cmd_quarters_deactivate(&db).unwrap();
    assert!(db.get_active_quarter().unwrap().is_none());
}

#[test]
fn test_cmd_quarters_add_defaults_to_current_quarter() {
    let db = setup_test_db();

    commands::cmd_quarters_add(&db, None, None, None, true).unwrap();
    let active = db.get_active_quarter().unwrap().unwrap();
    assert!(active.start_date <= chrono::Local::now().date_naive());
    assert!(active.end_date >= chrono::Local::now().date_naive());
}

#[test]
fn test_cmd_quarters_add_with_dates() {
    let db = setup_test_db();

    commands::cmd_quarters_add(
        &db,
        Some("FY26-Q1"),
        Some("2025-07-01"),
        Some("2025-09-30"),
        false,
    )
    .unwrap();
    let q = db.get_quarter_by_label("FY26-Q1").unwrap().unwrap();
    assert_eq!(q.start_date.to_string(), "2025-07-01");

    let result = commands::cmd_quarters_add(
        &db,
        Some("bad"),
        Some("2025-13-01"),
        Some("2025-09-30"),
        false,
    );
    assert!(result.is_err());
}

// ========== User Command Tests ==========

#[test]
fn test_cmd_users_add_sets_target() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();

    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", Some("A")).unwrap();

    let targets = db.list_savings_targets().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].monthly_target, 500.0);
}

#[test]
fn test_cmd_users_set_category() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", None).unwrap();
    let user_id = db.list_users().unwrap()[0].id;

    commands::cmd_users_set_category(&db, Some(config.as_path()), user_id, "C").unwrap();
    let quarter_id = db.get_active_quarter().unwrap().unwrap().id;
    let target = db.get_savings_target(user_id, quarter_id).unwrap().unwrap();
    assert_eq!(target.monthly_target, 125.5);

    // Zero-amount category leaves the existing target alone
    commands::cmd_users_set_category(&db, Some(config.as_path()), user_id, "B").unwrap();
    let target = db.get_savings_target(user_id, quarter_id).unwrap().unwrap();
    assert_eq!(target.monthly_target, 125.5);

    assert!(commands::cmd_users_set_category(&db, Some(config.as_path()), 999, "A").is_err());
    assert!(commands::cmd_users_list(&db).is_ok());
}

// ========== Target Command Tests ==========

#[test]
fn test_cmd_resync_after_new_quarter() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();

    // No quarter yet: users get no targets
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", Some("A")).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Bob", Some("B")).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Cy", None).unwrap();
    assert!(db.list_savings_targets().unwrap().is_empty());

    commands::cmd_resync(&db, Some(config.as_path())).unwrap();
    assert!(db.list_savings_targets().unwrap().is_empty());

    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    commands::cmd_resync(&db, Some(config.as_path())).unwrap();

    let targets = db.list_savings_targets().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].monthly_target, 500.0);

    // Running again keeps a single record
    commands::cmd_resync(&db, Some(config.as_path())).unwrap();
    assert_eq!(db.list_savings_targets().unwrap().len(), 1);
}

#[test]
fn test_cmd_resync_without_active_quarter_writes_nothing() {
    let db = setup_test_db();
    let (dir, config) = setup_config();
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", Some("A")).unwrap();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, false).unwrap();

    commands::cmd_resync(&db, Some(config.as_path())).unwrap();
    assert!(db.list_savings_targets().unwrap().is_empty());
    assert!(db.list_audit_log(10).unwrap().is_empty());

    // The quarter check comes before the config is read
    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "[categories]\nA = -10\n").unwrap();
    assert!(commands::cmd_resync(&db, Some(bad.as_path())).is_ok());
}

#[test]
fn test_cmd_resync_with_corrupt_quarter_fails() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", None).unwrap();

    db.conn()
        .unwrap()
        .execute("UPDATE quarters SET end_date = 'garbage'", [])
        .unwrap();

    assert!(commands::cmd_resync(&db, Some(config.as_path())).is_err());
}

#[test]
fn test_cmd_targets_list_filters() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", Some("A")).unwrap();

    assert!(commands::cmd_targets_list(&db, None, None, false).is_ok());
    assert!(commands::cmd_targets_list(&db, Some("2026-Q4"), None, true).is_ok());
    assert!(commands::cmd_targets_list(&db, None, Some(1), false).is_ok());
    assert!(commands::cmd_targets_list(&db, Some("2020-Q1"), None, false).is_err());
}

#[test]
fn test_cmd_audit() {
    let db = setup_test_db();
    let (_dir, config) = setup_config();
    commands::cmd_quarters_add(&db, Some("2026-Q4"), None, None, true).unwrap();
    commands::cmd_users_add(&db, Some(config.as_path()), "Ada", Some("A")).unwrap();

    let actions: Vec<String> = db
        .list_audit_log(10)
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions.len(), 2);
    assert!(actions.contains(&"quarter.activate".to_string()));
    assert!(actions.contains(&"savings_target.upsert".to_string()));
    assert!(commands::cmd_audit(&db, 10).is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer name", 10), "a much ...");
}

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(500.0), "$500.00");
    assert_eq!(format_amount(125.5), "$125.50");
}
