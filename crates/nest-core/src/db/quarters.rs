//! Quarter operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{parse_quarter_label, Quarter};

const QUARTER_COLUMNS: &str = "id, label, start_date, end_date, active, created_at";

fn map_quarter(row: &Row<'_>) -> rusqlite::Result<Quarter> {
    let start_str: String = row.get(2)?;
    let end_str: String = row.get(3)?;
    let created_at_str: String = row.get(5)?;
    Ok(Quarter {
        id: row.get(0)?,
        label: row.get(1)?,
        start_date: parse_date(2, &start_str)?,
        end_date: parse_date(3, &end_str)?,
        active: row.get(4)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a quarter from a `YYYY-Qn` label, returning its ID
    pub fn create_quarter(&self, label: &str) -> Result<i64> {
        let (start, end) = parse_quarter_label(label)?;
        self.create_quarter_with_dates(label.trim(), start, end)
    }

    /// Create a quarter with explicit boundaries, returning its ID
    pub fn create_quarter_with_dates(
        &self,
        label: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i64> {
        if end_date < start_date {
            return Err(Error::InvalidData(format!(
                "Quarter {} ends ({}) before it starts ({})",
                label, end_date, start_date
            )));
        }
        if self.get_quarter_by_label(label)?.is_some() {
            return Err(Error::InvalidData(format!(
                "Quarter {} already exists",
                label
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO quarters (label, start_date, end_date) VALUES (?, ?, ?)",
            params![label, start_date.to_string(), end_date.to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a quarter by ID
    pub fn get_quarter(&self, id: i64) -> Result<Option<Quarter>> {
        let conn = self.conn()?;
        let quarter = conn
            .query_row(
                &format!("SELECT {} FROM quarters WHERE id = ?", QUARTER_COLUMNS),
                params![id],
                map_quarter,
            )
            .optional()?;
        Ok(quarter)
    }

    /// Get a quarter by its label
    pub fn get_quarter_by_label(&self, label: &str) -> Result<Option<Quarter>> {
        let conn = self.conn()?;
        let quarter = conn
            .query_row(
                &format!("SELECT {} FROM quarters WHERE label = ?", QUARTER_COLUMNS),
                params![label.trim()],
                map_quarter,
            )
            .optional()?;
        Ok(quarter)
    }

    /// List all quarters, oldest first
    pub fn list_quarters(&self) -> Result<Vec<Quarter>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM quarters ORDER BY start_date, id",
            QUARTER_COLUMNS
        ))?;

        let quarters = stmt
            .query_map([], map_quarter)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(quarters)
    }

    /// The currently active quarter, if any
    pub fn get_active_quarter(&self) -> Result<Option<Quarter>> {
        let conn = self.conn()?;
        let quarter = conn
            .query_row(
                &format!(
                    "SELECT {} FROM quarters WHERE active = 1 LIMIT 1",
                    QUARTER_COLUMNS
                ),
                [],
                map_quarter,
            )
            .optional()?;
        Ok(quarter)
    }

    /// Make `id` the only active quarter
    pub fn activate_quarter(&self, id: i64) -> Result<Quarter> {
        let conn = self.conn()?;

        // Use explicit transaction so there is never a second active quarter
        conn.execute("BEGIN IMMEDIATE TRANSACTION", [])?;

        let result = (|| -> Result<()> {
            conn.execute("UPDATE quarters SET active = 0 WHERE active = 1", [])?;
            let updated = conn.execute(
                "UPDATE quarters SET active = 1 WHERE id = ?",
                params![id],
            )?;
            if updated == 0 {
                return Err(Error::NotFound(format!("quarter {}", id)));
            }
            Ok(())
        })();

        match result {
            Ok(()) => conn.execute("COMMIT", [])?,
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                return Err(e);
            }
        };
        drop(conn);

        let quarter = self
            .get_quarter(id)?
            .ok_or_else(|| Error::NotFound(format!("quarter {}", id)))?;
        info!("Activated quarter {}", quarter.label);
        Ok(quarter)
    }

    /// Leave no quarter active
    pub fn deactivate_quarters(&self) -> Result<usize> {
        let conn = self.conn()?;
        let changed = conn.execute("UPDATE quarters SET active = 0 WHERE active = 1", [])?;
        Ok(changed)
    }
}
