//! redb-based persistence boundary
//!
//! Single embedded key-value database holding every collection the
//! storefront needs. One table per collection, JSON-serialized
//! values:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `users` | `user_id` | `User` |
//! | `users_by_email` | `email` | `user_id` |
//! | `sessions` | `token` | `Session` |
//! | `carts` | `user_id` | `Cart` |
//! | `orders` | `order_id` | `Order` |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: a commit is persistent
//! as soon as it returns and the file is always in a consistent
//! state. Every mutation here runs inside a single write
//! transaction, so each record write is atomic; there is no
//! cross-record transaction guarantee beyond what a single
//! transaction covers.

mod carts;
mod orders;
mod sessions;
mod users;

pub use sessions::Session;
pub(crate) use orders::AssignOutcome;

use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Registered accounts: key = user_id, value = JSON User
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Login lookup index: key = email, value = user_id
const USERS_BY_EMAIL_TABLE: TableDefinition<&str, &str> = TableDefinition::new("users_by_email");

/// Active sessions: key = opaque token, value = JSON Session
const SESSIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("sessions");

/// Per-user carts: key = user_id, value = JSON Cart
const CARTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carts");

/// Orders: key = order_id, value = JSON Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storefront storage backed by redb
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Create all tables so later reads never hit a missing table
    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(USERS_BY_EMAIL_TABLE)?;
            let _ = write_txn.open_table(SESSIONS_TABLE)?;
            let _ = write_txn.open_table(CARTS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub(crate) fn begin_write(&self) -> StorageResult<redb::WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    pub(crate) fn begin_read(&self) -> StorageResult<redb::ReadTransaction> {
        Ok(self.db.begin_read()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Role, User};
    use shared::util::now_millis;

    #[test]
    fn reopening_a_database_keeps_its_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.redb");

        let user = User {
            id: "user-persist".into(),
            email: "persist@example.com".into(),
            password_hash: "hash".into(),
            name: "P".into(),
            phone: "9000000000".into(),
            role: Role::Customer,
            vehicle_number: None,
            created_at: now_millis(),
        };

        {
            let store = Store::open(&path).unwrap();
            assert!(store.insert_user(&user).unwrap());
        }

        let store = Store::open(&path).unwrap();
        let back = store.get_user("user-persist").unwrap().unwrap();
        assert_eq!(back.email, user.email);
    }
}
