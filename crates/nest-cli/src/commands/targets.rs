//! Savings target command implementations (list, resync)

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use nest_core::{Database, RuleOutcome};
use tracing::{info, warn};

use super::{build_rule, format_amount, truncate};

pub fn cmd_targets_list(
    db: &Database,
    quarter: Option<&str>,
    user: Option<i64>,
    json: bool,
) -> Result<()> {
    let quarter_id = match quarter {
        Some(label) => Some(
            db.get_quarter_by_label(label)?
                .with_context(|| format!("Quarter not found: {}", label))?
                .id,
        ),
        None => None,
    };

    let mut targets = match (quarter_id, user) {
        (Some(q), _) => db.list_savings_targets_for_quarter(q)?,
        (None, Some(u)) => db.list_savings_targets_for_user(u)?,
        (None, None) => db.list_savings_targets()?,
    };
    if let Some(u) = user {
        targets.retain(|t| t.user_id == u);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    if targets.is_empty() {
        println!("No savings targets.");
        return Ok(());
    }

    let users: HashMap<i64, String> = db
        .list_users()?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();
    let quarters: HashMap<i64, String> = db
        .list_quarters()?
        .into_iter()
        .map(|q| (q.id, q.label))
        .collect();

    println!();
    println!("   {:<10} {:<30} {:>12}", "Quarter", "User", "Monthly");
    println!("   {}", "─".repeat(54));
    for t in &targets {
        let user_name = users
            .get(&t.user_id)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "   {:<10} {:<30} {:>12}",
            quarters.get(&t.quarter_id).map(String::as_str).unwrap_or("?"),
            truncate(&format!("{} (#{})", user_name, t.user_id), 30),
            format_amount(t.monthly_target)
        );
    }
    println!();

    Ok(())
}

pub fn cmd_resync(db: &Database, config: Option<&Path>) -> Result<()> {
    let Some(quarter) = db.get_active_quarter()? else {
        warn!("Resync skipped: no active quarter");
        println!("⚠️  No active quarter; nothing to do.");
        return Ok(());
    };

    let rule = build_rule(db, config)?;
    let users = db.list_users()?;

    let outcomes = rule.resync(&users).context("Resync failed")?;

    let upserted = outcomes.iter().filter(|o| o.is_upserted()).count();
    let unconfigured = outcomes
        .iter()
        .filter(|o| matches!(o, RuleOutcome::NoConfiguredAmount { .. }))
        .count();
    let uncategorized = outcomes
        .iter()
        .filter(|o| matches!(o, RuleOutcome::Unchanged))
        .count();

    info!(
        quarter = %quarter.label,
        users = users.len(),
        upserted,
        "Resync complete"
    );

    println!("✅ Resync complete for {}", quarter.label);
    println!("   Targets set: {}", upserted);
    println!("   No amount configured: {}", unconfigured);
    println!("   No category: {}", uncategorized);
    Ok(())
}
