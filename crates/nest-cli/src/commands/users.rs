//! User command implementations

use std::path::Path;

use anyhow::{Context, Result};
use nest_core::Database;

use super::{open_directory, truncate};

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users. Add one with: nest users add \"Name\" --category gold");
        return Ok(());
    }

    println!();
    println!("   {:>5}  {:<30} {:<16}", "ID", "Name", "Category");
    println!("   {}", "─".repeat(53));
    for user in users {
        println!(
            "   {:>5}  {:<30} {:<16}",
            user.id,
            truncate(&user.name, 30),
            user.category.as_deref().unwrap_or("-")
        );
    }
    println!();

    Ok(())
}

pub fn cmd_users_add(
    db: &Database,
    config: Option<&Path>,
    name: &str,
    category: Option<&str>,
) -> Result<()> {
    let directory = open_directory(db, config)?;
    let user = directory
        .create_user(name, category)
        .context("Failed to add user")?;

    println!(
        "✅ Added user {} ({}), category: {}",
        user.id,
        user.name,
        user.category.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub fn cmd_users_set_category(
    db: &Database,
    config: Option<&Path>,
    id: i64,
    category: &str,
) -> Result<()> {
    let directory = open_directory(db, config)?;
    let update = directory
        .set_category(id, Some(category))
        .with_context(|| format!("Failed to update user {}", id))?;

    if update.category_changed {
        println!(
            "✅ User {} category set to {}",
            id,
            update.new_category.as_deref().unwrap_or("-")
        );
    } else {
        println!("   User {} already in that category", id);
    }
    Ok(())
}
