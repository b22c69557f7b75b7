//! User operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

const USER_COLUMNS: &str = "id, name, category, created_at";

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a user, returning its ID
    pub fn create_user(&self, name: &str, category: Option<&str>) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(Error::InvalidData("User name cannot be empty".to_string()));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (name, category) VALUES (?, ?)",
            params![name.trim(), category],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                params![id],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], map_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Set a user's category, returning the previous value
    ///
    /// The read of the previous value and the write share one transaction.
    pub fn update_user_category(
        &self,
        id: i64,
        category: Option<&str>,
    ) -> Result<Option<String>> {
        let conn = self.conn()?;

        conn.execute("BEGIN IMMEDIATE TRANSACTION", [])?;

        let result = (|| -> Result<Option<String>> {
            let previous: Option<String> = conn
                .query_row(
                    "SELECT category FROM users WHERE id = ?",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| Error::NotFound(format!("user {}", id)))?;

            conn.execute(
                "UPDATE users SET category = ? WHERE id = ?",
                params![category, id],
            )?;

            Ok(previous)
        })();

        match result {
            Ok(previous) => {
                conn.execute("COMMIT", [])?;
                Ok(previous)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}
