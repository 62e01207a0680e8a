//! Cart collection operations

use redb::ReadableTable;
use shared::models::Cart;

use super::{CARTS_TABLE, Store, StorageResult};

impl Store {
    /// Load a user's cart; a missing record is an empty cart
    pub fn get_cart(&self, user_id: &str) -> StorageResult<Cart> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(CARTS_TABLE)?;

        match table.get(user_id)? {
            Some(value) => {
                let cart: Cart = serde_json::from_slice(value.value())?;
                Ok(cart)
            }
            None => Ok(Cart::default()),
        }
    }

    /// Persist a user's cart; an empty cart removes the record
    pub fn save_cart(&self, user_id: &str, cart: &Cart) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(CARTS_TABLE)?;
            if cart.is_empty() {
                table.remove(user_id)?;
            } else {
                let value = serde_json::to_vec(cart)?;
                table.insert(user_id, value.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a user's cart outright
    pub fn clear_cart(&self, user_id: &str) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(CARTS_TABLE)?;
            table.remove(user_id)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
