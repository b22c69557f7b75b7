//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `quarters` - Quarter list/add/activate
//! - `setup` - Init and shared utilities (open_db, rule wiring)
//! - `status` - Status, category config and audit log
//! - `users` - User list/add/set-category
//! - `targets` - Savings target listing and resync

pub mod quarters;
pub mod setup;
pub mod status;
pub mod targets;
pub mod users;

// Re-export command functions for main.rs
pub use quarters::*;
pub use setup::*;
pub use status::*;
pub use targets::*;
pub use users::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount for display
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}
