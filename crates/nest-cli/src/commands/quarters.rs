//! Quarter command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use nest_core::models::quarter_label_for;
use nest_core::{Database, Quarter};
use tracing::info;

/// Actor recorded in the audit log for CLI-driven changes
const CLI_ACTOR: &str = "cli";

pub fn cmd_quarters_list(db: &Database) -> Result<()> {
    let quarters = db.list_quarters()?;

    if quarters.is_empty() {
        println!("No quarters. Add one with: nest quarters add 2026-Q4 --activate");
        return Ok(());
    }

    println!();
    for q in quarters {
        let marker = if q.active { "●" } else { " " };
        println!(
            "   {} {:<10} {} → {}",
            marker, q.label, q.start_date, q.end_date
        );
    }
    println!();

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn activate(db: &Database, id: i64) -> Result<Quarter> {
    let quarter = db.activate_quarter(id)?;
    db.log_audit(
        CLI_ACTOR,
        "quarter.activate",
        Some("quarter"),
        Some(quarter.id),
        None,
    )?;
    info!(quarter = %quarter.label, "Quarter activated from CLI");
    Ok(quarter)
}

pub fn cmd_quarters_add(
    db: &Database,
    label: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    activate_now: bool,
) -> Result<()> {
    let label = label
        .map(str::to_string)
        .unwrap_or_else(|| quarter_label_for(chrono::Local::now().date_naive()));
    let label = label.as_str();

    let id = match (start, end) {
        (Some(start), Some(end)) => {
            db.create_quarter_with_dates(label, parse_date(start)?, parse_date(end)?)?
        }
        _ => db.create_quarter(label)?,
    };
    println!("✅ Added quarter {}", label);

    if activate_now {
        let quarter = activate(db, id)?;
        println!("   ● {} is now the active quarter", quarter.label);
        println!("   💡 Run `nest resync` to set targets for existing users");
    }
    Ok(())
}

pub fn cmd_quarters_activate(db: &Database, label: &str) -> Result<()> {
    let quarter = db
        .get_quarter_by_label(label)?
        .with_context(|| format!("Quarter not found: {}", label))?;

    let quarter = activate(db, quarter.id)?;
    println!("● {} is now the active quarter", quarter.label);
    println!("   💡 Run `nest resync` to set targets for existing users");
    Ok(())
}

pub fn cmd_quarters_deactivate(db: &Database) -> Result<()> {
    let changed = db.deactivate_quarters()?;
    if changed == 0 {
        println!("No quarter was active.");
    } else {
        println!("No quarter is active now.");
    }
    Ok(())
}

pub fn cmd_quarters_current(db: &Database) -> Result<()> {
    match db.get_active_quarter()? {
        Some(q) => println!("{} ({} → {})", q.label, q.start_date, q.end_date),
        None => println!("No active quarter."),
    }
    Ok(())
}
