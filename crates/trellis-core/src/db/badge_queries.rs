//! User-profile badge queries.
//!
//! Progress-record badge grants propagate to the user's profile through
//! [`grant_badge_to_user`]; the read side makes those grants observable.

use rusqlite::{params, Connection};

use crate::error::{DatabaseResultExt, Result};

const INSERT_USER_BADGE_SQL: &str =
    "INSERT OR IGNORE INTO user_badges (user_id, badge) VALUES (?1, ?2)";
const SELECT_USER_BADGES_SQL: &str =
    "SELECT badge FROM user_badges WHERE user_id = ?1 ORDER BY rowid";

/// Add a badge to a user's profile, keeping the set unique.
///
/// Takes a plain connection so progress mutations can call it inside their
/// own transaction; the profile grant then commits or rolls back together
/// with the record-side grant.
pub(crate) fn grant_badge_to_user(conn: &Connection, user_id: &str, badge: &str) -> Result<()> {
    conn.execute(INSERT_USER_BADGE_SQL, params![user_id, badge])
        .db_context("Failed to insert user badge")?;
    Ok(())
}

impl super::Database {
    /// Lists the badges on a user's profile, in grant order.
    pub fn user_badges(&self, user_id: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_USER_BADGES_SQL)
            .db_context("Failed to prepare user badge query")?;

        let badges = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))
            .db_context("Failed to query user badges")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch user badges")?;

        Ok(badges)
    }
}
