//! Setup command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_categories` / `open_directory` - Rule wiring
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use nest_core::{CategoryConfig, Database, SavingsTargetRule, UserDirectory};

/// Rule over the given config and database
pub type DbRule = SavingsTargetRule<CategoryConfig, Database, Database>;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the category config, honoring an explicit --config path
pub fn load_categories(config: Option<&Path>) -> Result<CategoryConfig> {
    CategoryConfig::load_from(config).context("Failed to load category config")
}

/// Build the savings rule for this database
pub fn build_rule(db: &Database, config: Option<&Path>) -> Result<DbRule> {
    let categories = load_categories(config)?;
    Ok(SavingsTargetRule::new(categories, db.clone(), db.clone()))
}

/// User directory with the savings rule registered
pub fn open_directory(db: &Database, config: Option<&Path>) -> Result<UserDirectory> {
    let rule = build_rule(db, config)?;
    Ok(UserDirectory::new(db.clone()).with_hook(Box::new(rule)))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a quarter: nest quarters add 2026-Q4 --activate");
    println!("  2. Add members:   nest users add \"Ada\" --category gold");

    Ok(())
}
