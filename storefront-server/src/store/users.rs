//! User collection operations

use redb::ReadableTable;
use shared::models::User;

use super::{Store, StorageError, StorageResult, USERS_BY_EMAIL_TABLE, USERS_TABLE};

impl Store {
    /// Insert a new user and its email index entry in one transaction.
    ///
    /// Returns `false` without writing when the email is already
    /// taken; uniqueness is checked against the index inside the same
    /// write transaction.
    pub fn insert_user(&self, user: &User) -> StorageResult<bool> {
        let write_txn = self.begin_write()?;
        let inserted = {
            let mut email_table = write_txn.open_table(USERS_BY_EMAIL_TABLE)?;
            if email_table.get(user.email.as_str())?.is_some() {
                false
            } else {
                email_table.insert(user.email.as_str(), user.id.as_str())?;
                let mut users_table = write_txn.open_table(USERS_TABLE)?;
                let value = serde_json::to_vec(user)?;
                users_table.insert(user.id.as_str(), value.as_slice())?;
                true
            }
        };
        write_txn.commit()?;
        Ok(inserted)
    }

    /// Overwrite an existing user record (password reset)
    pub fn update_user(&self, user: &User) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            if users_table.get(user.id.as_str())?.is_none() {
                return Err(StorageError::UserNotFound(user.id.clone()));
            }
            let value = serde_json::to_vec(user)?;
            users_table.insert(user.id.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a user by ID
    pub fn get_user(&self, user_id: &str) -> StorageResult<Option<User>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;

        match table.get(user_id)? {
            Some(value) => {
                let user: User = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Get a user by email (login path)
    pub fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let read_txn = self.begin_read()?;
        let email_table = read_txn.open_table(USERS_BY_EMAIL_TABLE)?;

        let user_id = match email_table.get(email)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };

        let users_table = read_txn.open_table(USERS_TABLE)?;
        match users_table.get(user_id.as_str())? {
            Some(value) => {
                let user: User = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Get all users
    pub fn get_all_users(&self) -> StorageResult<Vec<User>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;

        let mut users = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let user: User = serde_json::from_slice(value.value())?;
            users.push(user);
        }

        Ok(users)
    }

    /// Number of registered accounts
    pub fn count_users(&self) -> StorageResult<u64> {
        use redb::ReadableTableMetadata;
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        Ok(table.len()?)
    }
}
