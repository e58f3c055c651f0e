//! Session storage: at most one signed-in session at a time.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use crate::session::Session;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Stores `session`, replacing any previous one.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO session (slot, token, email, started_at)
             VALUES (0, ?1, ?2, ?3)",
            params![
                session.token.to_string(),
                &session.email,
                session.started_at.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn load_session(&self) -> Result<Option<Session>> {
        let row = self
            .conn
            .query_row(
                "SELECT token, email, started_at FROM session WHERE slot = 0",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((token, email, started_at)) = row else {
            return Ok(None);
        };
        let token = token
            .parse::<Uuid>()
            .map_err(|e| StorageError::Corrupt(format!("invalid session token: {e}")))?;
        let started_at = started_at
            .parse::<Timestamp>()
            .map_err(|e| StorageError::Corrupt(format!("invalid session start: {e}")))?;

        Ok(Some(Session {
            token,
            email,
            started_at,
        }))
    }

    /// Removes the session. Returns whether one existed.
    pub fn clear_session(&self) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM session", [])?;
        Ok(rows > 0)
    }
}
