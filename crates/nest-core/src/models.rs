//! Domain models for Nest

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A member whose savings policy is driven by their category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Savings category label (e.g. "gold"); `None` when unassigned
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A calendar quarter that savings targets are tracked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quarter {
    pub id: i64,
    /// Label in `YYYY-Qn` form
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// At most one quarter is active at a time
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Monthly savings a user is expected to make during a quarter
///
/// Unique per (user_id, quarter_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTarget {
    pub id: i64,
    pub user_id: i64,
    pub quarter_id: i64,
    pub monthly_target: f64,
    pub updated_at: DateTime<Utc>,
}

/// Change notification emitted after a user record is updated
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    /// The user as stored after the update
    pub user: User,
    /// Whether the category field differs from its previous value
    pub category_changed: bool,
    /// The category after the update
    pub new_category: Option<String>,
}

impl UserUpdate {
    /// Build an update by diffing the previous category against the stored user
    pub fn from_change(previous: Option<&str>, user: User) -> Self {
        let new_category = user.category.clone();
        Self {
            category_changed: previous != new_category.as_deref(),
            new_category,
            user,
        }
    }

    /// The new category, if it changed and is non-empty
    pub fn changed_category(&self) -> Option<&str> {
        if !self.category_changed {
            return None;
        }
        self.new_category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Normalize a user-supplied category: blank means unassigned
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Parse a `YYYY-Qn` label into its first and last day
pub fn parse_quarter_label(label: &str) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || {
        Error::InvalidData(format!(
            "Invalid quarter label: {} (expected YYYY-Qn)",
            label
        ))
    };

    let (year, quarter) = label.trim().split_once("-Q").ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
    if !(1..=4).contains(&quarter) {
        return Err(invalid());
    }

    let start_month = (quarter - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or_else(invalid)?;
    let next_start = if quarter == 4 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, start_month + 3, 1)
    }
    .ok_or_else(invalid)?;

    Ok((start, next_start.pred_opt().ok_or_else(invalid)?))
}

/// Label of the quarter containing `date`
pub fn quarter_label_for(date: NaiveDate) -> String {
    format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1)
}
