//! Nest Core Library
//!
//! Shared functionality for the Nest savings tool:
//! - Database access and migrations (users, quarters, savings targets)
//! - Category savings configuration
//! - User directory with change hooks
//! - Savings target rule that keeps each user's quarterly target in sync
//!   with their category

pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod models;
pub mod savings;

pub use config::{CategoryAmounts, CategoryConfig};
pub use db::{AuditEntry, Database, DbStats};
pub use directory::{UserDirectory, UserHook};
pub use error::{Error, Result};
pub use models::{Quarter, SavingsTarget, User, UserUpdate};
pub use savings::{QuarterRegistry, RuleOutcome, SavingsTargetRule, SavingsTargetStore};
