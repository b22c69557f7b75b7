//! Nest CLI - quarterly savings targets
//!
//! Usage:
//!   nest init                          Initialize database
//!   nest quarters add 2026-Q4 --activate
//!   nest users add "Ada" --category gold
//!   nest users set-category 1 platinum
//!   nest targets

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Categories => commands::cmd_categories(config),
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(UsersAction::List) => commands::cmd_users_list(&db),
                Some(UsersAction::Add { name, category }) => {
                    commands::cmd_users_add(&db, config, &name, category.as_deref())
                }
                Some(UsersAction::SetCategory { id, category }) => {
                    commands::cmd_users_set_category(&db, config, id, &category)
                }
            }
        }
        Commands::Quarters { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(QuartersAction::List) => commands::cmd_quarters_list(&db),
                Some(QuartersAction::Add {
                    label,
                    start,
                    end,
                    activate,
                }) => commands::cmd_quarters_add(
                    &db,
                    label.as_deref(),
                    start.as_deref(),
                    end.as_deref(),
                    activate,
                ),
                Some(QuartersAction::Activate { label }) => {
                    commands::cmd_quarters_activate(&db, &label)
                }
                Some(QuartersAction::Deactivate) => commands::cmd_quarters_deactivate(&db),
                Some(QuartersAction::Current) => commands::cmd_quarters_current(&db),
            }
        }
        Commands::Targets {
            quarter,
            user,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_targets_list(&db, quarter.as_deref(), user, json)
        }
        Commands::Resync => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_resync(&db, config)
        }
        Commands::Audit { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_audit(&db, limit)
        }
    }
}
