//! Savings target operations

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::audit::insert_audit;
use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::SavingsTarget;

const TARGET_COLUMNS: &str = "id, user_id, quarter_id, monthly_target, updated_at";

fn write_target(
    conn: &Connection,
    user_id: i64,
    quarter_id: i64,
    monthly_target: f64,
) -> Result<SavingsTarget> {
    if !monthly_target.is_finite() || monthly_target < 0.0 {
        return Err(Error::InvalidData(format!(
            "Invalid monthly target: {}",
            monthly_target
        )));
    }

    conn.execute(
        r#"
        INSERT INTO savings_targets (user_id, quarter_id, monthly_target)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, quarter_id) DO UPDATE SET
            monthly_target = excluded.monthly_target,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![user_id, quarter_id, monthly_target],
    )?;

    let target = conn.query_row(
        &format!(
            "SELECT {} FROM savings_targets WHERE user_id = ? AND quarter_id = ?",
            TARGET_COLUMNS
        ),
        params![user_id, quarter_id],
        map_target,
    )?;

    Ok(target)
}

fn map_target(row: &Row<'_>) -> rusqlite::Result<SavingsTarget> {
    let updated_at_str: String = row.get(4)?;
    Ok(SavingsTarget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        quarter_id: row.get(2)?,
        monthly_target: row.get(3)?,
        updated_at: parse_datetime(&updated_at_str),
    })
}

impl Database {
    /// Create or overwrite the target for (user, quarter)
    ///
    /// A single statement, so the record is either fully written or untouched.
    pub fn upsert_savings_target(
        &self,
        user_id: i64,
        quarter_id: i64,
        monthly_target: f64,
    ) -> Result<SavingsTarget> {
        let conn = self.conn()?;
        write_target(&conn, user_id, quarter_id, monthly_target)
    }

    /// Upsert a target and record it in the audit log in one transaction
    pub fn upsert_savings_target_audited(
        &self,
        actor: &str,
        user_id: i64,
        quarter_id: i64,
        monthly_target: f64,
    ) -> Result<SavingsTarget> {
        let conn = self.conn()?;

        conn.execute("BEGIN IMMEDIATE TRANSACTION", [])?;

        let result = (|| -> Result<SavingsTarget> {
            let target = write_target(&conn, user_id, quarter_id, monthly_target)?;
            let details = serde_json::json!({
                "user_id": user_id,
                "quarter_id": quarter_id,
                "monthly_target": monthly_target,
            })
            .to_string();
            insert_audit(
                &conn,
                actor,
                "savings_target.upsert",
                Some("savings_target"),
                Some(target.id),
                Some(&details),
            )?;
            Ok(target)
        })();

        match result {
            Ok(target) => {
                conn.execute("COMMIT", [])?;
                Ok(target)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// Get the target for (user, quarter)
    pub fn get_savings_target(
        &self,
        user_id: i64,
        quarter_id: i64,
    ) -> Result<Option<SavingsTarget>> {
        let conn = self.conn()?;
        let target = conn
            .query_row(
                &format!(
                    "SELECT {} FROM savings_targets WHERE user_id = ? AND quarter_id = ?",
                    TARGET_COLUMNS
                ),
                params![user_id, quarter_id],
                map_target,
            )
            .optional()?;
        Ok(target)
    }

    /// List targets for a quarter, ordered by user
    pub fn list_savings_targets_for_quarter(&self, quarter_id: i64) -> Result<Vec<SavingsTarget>> {
        self.query_targets(
            &format!(
                "SELECT {} FROM savings_targets WHERE quarter_id = ? ORDER BY user_id",
                TARGET_COLUMNS
            ),
            quarter_id,
        )
    }

    /// List a user's targets across quarters
    pub fn list_savings_targets_for_user(&self, user_id: i64) -> Result<Vec<SavingsTarget>> {
        self.query_targets(
            &format!(
                "SELECT {} FROM savings_targets WHERE user_id = ? ORDER BY quarter_id",
                TARGET_COLUMNS
            ),
            user_id,
        )
    }

    /// List every target
    pub fn list_savings_targets(&self) -> Result<Vec<SavingsTarget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM savings_targets ORDER BY quarter_id, user_id",
            TARGET_COLUMNS
        ))?;

        let targets = stmt
            .query_map([], map_target)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(targets)
    }

    fn query_targets(&self, sql: &str, id: i64) -> Result<Vec<SavingsTarget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;

        let targets = stmt
            .query_map(params![id], map_target)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(targets)
    }
}
