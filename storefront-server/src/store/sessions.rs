//! Session collection operations

use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use shared::models::Role;

use super::{SESSIONS_TABLE, Store, StorageResult};

/// Server-issued session record
///
/// The token itself is opaque random material; everything the server
/// needs to know about the bearer lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub created_at: i64,
    /// UTC millis after which the session is rejected
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

impl Store {
    /// Persist a session
    pub fn insert_session(&self, session: &Session) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSIONS_TABLE)?;
            let value = serde_json::to_vec(session)?;
            table.insert(session.token.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up a session by token
    pub fn get_session(&self, token: &str) -> StorageResult<Option<Session>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SESSIONS_TABLE)?;

        match table.get(token)? {
            Some(value) => {
                let session: Session = serde_json::from_slice(value.value())?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Remove a session (logout)
    pub fn remove_session(&self, token: &str) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSIONS_TABLE)?;
            table.remove(token)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Drop every session past its expiry; returns how many were removed
    pub fn sweep_expired_sessions(&self, now: i64) -> StorageResult<usize> {
        let read_txn = self.begin_read()?;
        let mut expired: Vec<String> = Vec::new();
        {
            let table = read_txn.open_table(SESSIONS_TABLE)?;
            for result in table.iter()? {
                let (key, value) = result?;
                let session: Session = serde_json::from_slice(value.value())?;
                if session.is_expired(now) {
                    expired.push(key.value().to_string());
                }
            }
        }

        if expired.is_empty() {
            return Ok(0);
        }

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSIONS_TABLE)?;
            for token in &expired {
                table.remove(token.as_str())?;
            }
        }
        write_txn.commit()?;
        Ok(expired.len())
    }
}
