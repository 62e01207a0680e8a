//! Order collection operations
//!
//! Listings come back sorted by `created_at` descending. `save_order`
//! is an upsert atomic per record. The partner-assignment
//! compare-and-set lives here so the check and the write share one
//! write transaction; redb serializes writers, which closes the
//! two-partner acceptance race.

use redb::ReadableTable;
use shared::order::{Order, OrderStatus};
use shared::util::now_millis;

use super::{CARTS_TABLE, ORDERS_TABLE, Store, StorageError, StorageResult};

/// Outcome of the partner-assignment compare-and-set
#[derive(Debug)]
pub(crate) enum AssignOutcome {
    Assigned(Order),
    /// Some partner got there first; carries the winner's id
    AlreadyAssigned(String),
    /// Order is not in the `confirmed` state
    NotAvailable(OrderStatus),
}

impl Store {
    /// Upsert an order record
    pub fn save_order(&self, order: &Order) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            table.insert(order.id.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Insert a freshly placed order and drop the owning cart in the
    /// same transaction, so a storage failure leaves neither half
    /// applied.
    pub fn insert_order_and_clear_cart(&self, order: &Order) -> StorageResult<()> {
        let write_txn = self.begin_write()?;
        {
            let mut orders_table = write_txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            orders_table.insert(order.id.as_str(), value.as_slice())?;

            let mut carts_table = write_txn.open_table(CARTS_TABLE)?;
            carts_table.remove(order.user_id.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get an order by ID
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => {
                let order: Order = serde_json::from_slice(value.value())?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// All orders, newest first
    pub fn get_all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            orders.push(order);
        }

        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    /// A customer's orders, newest first
    pub fn get_orders_by_user(&self, user_id: &str) -> StorageResult<Vec<Order>> {
        let mut orders = self.get_all_orders()?;
        orders.retain(|o| o.user_id == user_id);
        Ok(orders)
    }

    /// A delivery partner's assigned orders, newest first
    pub fn get_orders_by_partner(&self, partner_id: &str) -> StorageResult<Vec<Order>> {
        let mut orders = self.get_all_orders()?;
        orders.retain(|o| o.delivery_partner_id.as_deref() == Some(partner_id));
        Ok(orders)
    }

    /// Confirmed orders with no partner yet, newest first
    pub fn get_available_orders(&self) -> StorageResult<Vec<Order>> {
        let mut orders = self.get_all_orders()?;
        orders.retain(|o| o.is_available_for_pickup());
        Ok(orders)
    }

    /// Atomically assign a delivery partner.
    ///
    /// Check-then-set inside one write transaction: reads the current
    /// record, and only writes when the order is `confirmed` with no
    /// partner. On success also moves the order to `preparing` and
    /// stamps `accepted_at`.
    pub(crate) fn assign_partner(
        &self,
        order_id: &str,
        partner_id: &str,
    ) -> StorageResult<AssignOutcome> {
        let write_txn = self.begin_write()?;
        let outcome = {
            let mut table = write_txn.open_table(ORDERS_TABLE)?;

            let mut order: Order = match table.get(order_id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::OrderNotFound(order_id.to_string())),
            };

            if let Some(winner) = &order.delivery_partner_id {
                AssignOutcome::AlreadyAssigned(winner.clone())
            } else if order.status != OrderStatus::Confirmed {
                AssignOutcome::NotAvailable(order.status)
            } else {
                order.delivery_partner_id = Some(partner_id.to_string());
                order.status = OrderStatus::Preparing;
                order.accepted_at = Some(now_millis());
                let value = serde_json::to_vec(&order)?;
                table.insert(order_id, value.as_slice())?;
                AssignOutcome::Assigned(order)
            }
        };
        write_txn.commit()?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DeliveryAddress;
    use shared::order::{OrderItem, PaymentMethod, PaymentStatus};

    fn confirmed_order(id: &str, created_at: i64) -> Order {
        Order {
            id: id.into(),
            user_id: "user-1".into(),
            restaurant_id: "rest-1".into(),
            delivery_partner_id: None,
            items: vec![OrderItem {
                dish_id: "dish-1".into(),
                name: "Masala Dosa".into(),
                price: 120.0,
                quantity: 1,
                total: 120.0,
            }],
            subtotal: 120.0,
            delivery_fee: 40.0,
            tax: 6.0,
            total: 166.0,
            delivery_address: DeliveryAddress::Legacy("123 Main Street, Mumbai".into()),
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::CashOnDelivery,
            status: OrderStatus::Confirmed,
            created_at,
            estimated_delivery: created_at + 35 * 60 * 1000,
            accepted_at: None,
            delivered_at: None,
        }
    }

    #[test]
    fn listings_come_back_newest_first() {
        let store = Store::open_in_memory().unwrap();
        store.save_order(&confirmed_order("ORD-a", 100)).unwrap();
        store.save_order(&confirmed_order("ORD-b", 300)).unwrap();
        store.save_order(&confirmed_order("ORD-c", 200)).unwrap();

        let all = store.get_all_orders().unwrap();
        let ids: Vec<&str> = all.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-b", "ORD-c", "ORD-a"]);
    }

    #[test]
    fn assign_partner_is_first_writer_wins() {
        let store = Store::open_in_memory().unwrap();
        store.save_order(&confirmed_order("ORD-x", 100)).unwrap();

        let first = store.assign_partner("ORD-x", "partner-1").unwrap();
        assert!(matches!(first, AssignOutcome::Assigned(_)));

        let second = store.assign_partner("ORD-x", "partner-2").unwrap();
        match second {
            AssignOutcome::AlreadyAssigned(winner) => assert_eq!(winner, "partner-1"),
            other => panic!("expected AlreadyAssigned, got {:?}", other),
        }

        // Losing call must not have touched the record
        let order = store.get_order("ORD-x").unwrap().unwrap();
        assert_eq!(order.delivery_partner_id.as_deref(), Some("partner-1"));
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[test]
    fn assign_partner_rejects_unconfirmed_orders() {
        let store = Store::open_in_memory().unwrap();
        let mut order = confirmed_order("ORD-y", 100);
        order.status = OrderStatus::Pending;
        store.save_order(&order).unwrap();

        let outcome = store.assign_partner("ORD-y", "partner-1").unwrap();
        assert!(matches!(
            outcome,
            AssignOutcome::NotAvailable(OrderStatus::Pending)
        ));
    }
}
