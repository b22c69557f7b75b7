//! Status-related command implementations (status, categories, audit)

use std::path::Path;

use anyhow::Result;
use nest_core::config::default_config_path;
use nest_core::db::DB_KEY_ENV;
use nest_core::Database;

use super::{format_amount, load_categories, open_db, truncate};

pub fn cmd_status(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!();
    println!("📊 Nest Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database: {}", db_path.display());

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    if !db_path.exists() {
        println!("   (database not initialized)");
        println!();
        return Ok(());
    }

    match open_db(db_path, no_encrypt).and_then(|db| Ok(db.get_stats()?)) {
        Ok(stats) => {
            println!();
            println!("   Users: {}", stats.users);
            println!("   Quarters: {}", stats.quarters);
            println!("   Savings targets: {}", stats.savings_targets);
            println!(
                "   Active quarter: {}",
                stats.active_quarter.as_deref().unwrap_or("(none)")
            );
        }
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {:#}", e);
            if !no_encrypt && !has_key {
                println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
            }
        }
    }

    println!();
    Ok(())
}

pub fn cmd_categories(config: Option<&Path>) -> Result<()> {
    let categories = load_categories(config)?;

    println!();
    match categories.source() {
        Some(path) => println!("📁 Category config: {}", path.display()),
        None => {
            println!("📁 Category config: built-in defaults");
            if let Some(path) = default_config_path() {
                println!("   (override with {})", path.display());
            }
        }
    }
    println!();

    if categories.is_empty() {
        println!("   No categories configured.");
        return Ok(());
    }

    println!("   {:<20} {:>12}", "Category", "Monthly");
    println!("   {}", "─".repeat(33));
    for (name, amount) in categories.iter() {
        let shown = if amount > 0.0 {
            format_amount(amount)
        } else {
            "(no target)".to_string()
        };
        println!("   {:<20} {:>12}", truncate(name, 20), shown);
    }
    println!();

    Ok(())
}

pub fn cmd_audit(db: &Database, limit: i64) -> Result<()> {
    let entries = db.list_audit_log(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    println!();
    for entry in entries {
        println!(
            "   {}  {:<22} {:<24} {}",
            entry.timestamp,
            truncate(&entry.actor, 22),
            truncate(&entry.action, 24),
            entry.details.as_deref().unwrap_or("")
        );
    }
    println!();

    Ok(())
}
