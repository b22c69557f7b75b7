//! CLI argument definitions using clap
//!
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nest - quarterly savings targets driven by member category
#[derive(Parser)]
#[command(name = "nest")]
#[command(about = "Keep members' quarterly savings targets in line with their category", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "nest.db", global = true)]
    pub db: PathBuf,

    /// Category config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set NEST_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, counts, active quarter)
    Status,

    /// Show configured monthly savings per category
    Categories,

    /// Manage users
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Manage quarters
    Quarters {
        #[command(subcommand)]
        action: Option<QuartersAction>,
    },

    /// List savings targets
    Targets {
        /// Only targets for this quarter label (e.g. 2026-Q4)
        #[arg(short, long)]
        quarter: Option<String>,

        /// Only targets for this user ID
        #[arg(short, long)]
        user: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply category targets to every user for the active quarter
    Resync,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List users
    List,

    /// Add a user
    Add {
        /// Display name
        name: String,

        /// Savings category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Change a user's savings category (empty string clears it)
    SetCategory {
        /// User ID
        id: i64,

        /// New category
        category: String,
    },
}

#[derive(Subcommand)]
pub enum QuartersAction {
    /// List quarters
    List,

    /// Add a quarter
    Add {
        /// Quarter label in YYYY-Qn form (defaults to today's quarter)
        label: Option<String>,

        /// Start date (YYYY-MM-DD), derived from the label if omitted
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// End date (YYYY-MM-DD), derived from the label if omitted
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Make this the active quarter
        #[arg(long)]
        activate: bool,
    },

    /// Make a quarter the only active one
    Activate {
        /// Quarter label
        label: String,
    },

    /// Leave no quarter active
    Deactivate,

    /// Show the active quarter
    Current,
}
