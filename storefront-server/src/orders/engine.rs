//! Order lifecycle engine
//!
//! The one component allowed to write `status`,
//! `delivery_partner_id` and the timestamp fields of an order.
//! Everything else reads projections of the store.
//!
//! # State machine
//!
//! ```text
//! pending -> confirmed -> preparing -> on_the_way -> delivered
//! any of {pending, confirmed, preparing, on_the_way} -> cancelled
//! ```
//!
//! `preparing` is only ever entered through [`OrderEngine::accept_order`],
//! which arbitrates partner assignment with a compare-and-set; it is
//! not reachable through [`OrderEngine::advance_status`].

use shared::models::DeliveryAddress;
use shared::order::{Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus};
use shared::util::{now_millis, order_id};

use super::money;
use super::{OrderError, OrderResult};
use crate::store::{AssignOutcome, Store};

/// Who is asking for a transition.
///
/// A closed set so every permission check is an exhaustive match;
/// `System` covers background work like auto-confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Customer { user_id: String },
    DeliveryPartner { user_id: String },
    Admin { user_id: String },
    System,
}

impl Actor {
    fn describe(&self) -> String {
        match self {
            Actor::Customer { user_id } => format!("customer {}", user_id),
            Actor::DeliveryPartner { user_id } => format!("partner {}", user_id),
            Actor::Admin { user_id } => format!("admin {}", user_id),
            Actor::System => "system".to_string(),
        }
    }
}

/// Order lifecycle engine
#[derive(Clone, Debug)]
pub struct OrderEngine {
    store: Store,
    /// Promised delivery window added to `created_at` (minutes)
    estimated_delivery_minutes: i64,
}

impl OrderEngine {
    pub fn new(store: Store, estimated_delivery_minutes: i64) -> Self {
        Self {
            store,
            estimated_delivery_minutes,
        }
    }

    /// Create an order from the user's current cart.
    ///
    /// Fails with a validation error when the cart is empty or the
    /// address is incomplete; on success the cart lines are
    /// snapshotted into immutable order items, charges computed,
    /// timestamps stamped, and the cart cleared in the same write
    /// transaction as the order insert.
    pub fn place_order(
        &self,
        user_id: &str,
        address: DeliveryAddress,
        payment_method: PaymentMethod,
        payment_status: PaymentStatus,
    ) -> OrderResult<Order> {
        let cart = self.store.get_cart(user_id)?;
        if cart.is_empty() {
            return Err(OrderError::Validation("Your cart is empty".to_string()));
        }
        if !address.is_complete() {
            return Err(OrderError::Validation(
                "Please provide a complete delivery address".to_string(),
            ));
        }

        for line in &cart.lines {
            money::validate_line(line)?;
        }

        let restaurant_id = cart
            .restaurant_id()
            .map(str::to_string)
            .unwrap_or_default();
        let charges = money::compute_charges(&cart.lines);
        let items: Vec<OrderItem> = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                dish_id: line.dish_id.clone(),
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                total: money::line_total(line),
            })
            .collect();

        let created_at = now_millis();
        let order = Order {
            id: order_id(),
            user_id: user_id.to_string(),
            restaurant_id,
            delivery_partner_id: None,
            items,
            subtotal: charges.subtotal,
            delivery_fee: charges.delivery_fee,
            tax: charges.tax,
            total: charges.total,
            delivery_address: address,
            payment_method,
            payment_status,
            status: OrderStatus::Pending,
            created_at,
            estimated_delivery: created_at + self.estimated_delivery_minutes * 60 * 1000,
            accepted_at: None,
            delivered_at: None,
        };

        self.store.insert_order_and_clear_cart(&order)?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = order.total,
            "Order placed"
        );
        Ok(order)
    }

    /// Accept an order for delivery (first writer wins).
    ///
    /// Arbitration is a compare-and-set inside a single storage
    /// write transaction; the losing partner gets
    /// [`OrderError::AlreadyAssigned`] and the record is untouched.
    /// On success the partner is set once and forever, status moves
    /// to `preparing` and `accepted_at` is stamped.
    pub fn accept_order(&self, order_id: &str, actor: &Actor) -> OrderResult<Order> {
        let partner_id = match actor {
            Actor::DeliveryPartner { user_id } => user_id.as_str(),
            Actor::Customer { .. } | Actor::Admin { .. } | Actor::System => {
                return Err(OrderError::Forbidden(format!(
                    "only a delivery partner can accept orders ({} tried)",
                    actor.describe()
                )));
            }
        };

        let outcome = self
            .store
            .assign_partner(order_id, partner_id)
            .map_err(|e| match e {
                crate::store::StorageError::OrderNotFound(id) => OrderError::NotFound(id),
                other => OrderError::Storage(other),
            })?;

        match outcome {
            AssignOutcome::Assigned(order) => {
                tracing::info!(order_id = %order.id, partner_id = %partner_id, "Order accepted");
                Ok(order)
            }
            AssignOutcome::AlreadyAssigned(winner) => {
                tracing::warn!(
                    order_id = %order_id,
                    partner_id = %partner_id,
                    winner = %winner,
                    "Acceptance lost to another partner"
                );
                Err(OrderError::AlreadyAssigned(order_id.to_string()))
            }
            AssignOutcome::NotAvailable(status) => Err(OrderError::InvalidTransition {
                from: status,
                to: OrderStatus::Preparing,
            }),
        }
    }

    /// Advance an order one step along the pipeline.
    ///
    /// Rejects anything that is not the immediate successor of the
    /// current status, and checks who may drive each step:
    /// admin/system for `pending -> confirmed`, the assigned partner
    /// for `preparing -> on_the_way -> delivered`. `preparing` is
    /// owned by [`Self::accept_order`] and rejected here.
    pub fn advance_status(
        &self,
        order_id: &str,
        target: OrderStatus,
        actor: &Actor,
    ) -> OrderResult<Order> {
        let mut order = self.load(order_id)?;

        if order.status.successor() != Some(target) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        match target {
            OrderStatus::Confirmed => match actor {
                Actor::Admin { .. } | Actor::System => {}
                Actor::Customer { .. } | Actor::DeliveryPartner { .. } => {
                    return Err(OrderError::Forbidden(format!(
                        "only admin can confirm orders ({} tried)",
                        actor.describe()
                    )));
                }
            },
            OrderStatus::Preparing => {
                return Err(OrderError::Forbidden(
                    "preparing is entered when a delivery partner accepts the order".to_string(),
                ));
            }
            OrderStatus::OnTheWay | OrderStatus::Delivered => match actor {
                Actor::DeliveryPartner { user_id }
                    if order.delivery_partner_id.as_deref() == Some(user_id.as_str()) => {}
                Actor::DeliveryPartner { .. } => {
                    return Err(OrderError::Forbidden(
                        "order is assigned to a different delivery partner".to_string(),
                    ));
                }
                Actor::Customer { .. } | Actor::Admin { .. } | Actor::System => {
                    return Err(OrderError::Forbidden(format!(
                        "only the assigned delivery partner can move an order to {} ({} tried)",
                        target,
                        actor.describe()
                    )));
                }
            },
            // successor() never yields these
            OrderStatus::Pending | OrderStatus::Cancelled => {
                return Err(OrderError::InvalidTransition {
                    from: order.status,
                    to: target,
                });
            }
        }

        let from = order.status;
        order.status = target;
        if target == OrderStatus::Delivered {
            order.delivered_at = Some(now_millis());
        }
        self.store.save_order(&order)?;

        tracing::info!(
            order_id = %order.id,
            from = %from,
            to = %target,
            actor = %actor.describe(),
            "Order status advanced"
        );
        Ok(order)
    }

    /// Cancel an order.
    ///
    /// Customers may cancel their own order before the kitchen
    /// starts (`pending` or `confirmed`); admins may cancel any
    /// non-terminal order. Cancellation is a status, not a deletion.
    pub fn cancel_order(&self, order_id: &str, actor: &Actor) -> OrderResult<Order> {
        let mut order = self.load(order_id)?;

        if order.status.is_terminal() {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        match actor {
            Actor::Admin { .. } | Actor::System => {}
            Actor::Customer { user_id } => {
                if order.user_id != *user_id {
                    return Err(OrderError::Forbidden(
                        "customers can only cancel their own orders".to_string(),
                    ));
                }
                if !matches!(order.status, OrderStatus::Pending | OrderStatus::Confirmed) {
                    return Err(OrderError::Forbidden(format!(
                        "order can no longer be cancelled (status: {})",
                        order.status
                    )));
                }
            }
            Actor::DeliveryPartner { .. } => {
                return Err(OrderError::Forbidden(
                    "delivery partners cannot cancel orders".to_string(),
                ));
            }
        }

        let from = order.status;
        order.status = OrderStatus::Cancelled;
        self.store.save_order(&order)?;

        tracing::info!(
            order_id = %order.id,
            from = %from,
            actor = %actor.describe(),
            "Order cancelled"
        );
        Ok(order)
    }

    /// Orders a delivery partner can pick up: `confirmed` with no
    /// partner assigned. Polling read, no side effects.
    pub fn list_available(&self) -> OrderResult<Vec<Order>> {
        Ok(self.store.get_available_orders()?)
    }

    /// Remaining promised delivery time in milliseconds, clamped to
    /// zero. Purely presentational.
    pub fn compute_eta(order: &Order, now: i64) -> i64 {
        (order.estimated_delivery - now).max(0)
    }

    /// Confirm every pending order older than `min_age_millis` as the
    /// system actor. Used by the auto-confirm background worker;
    /// returns how many orders were confirmed.
    pub fn auto_confirm_pending(&self, min_age_millis: i64) -> OrderResult<usize> {
        let cutoff = now_millis() - min_age_millis;
        let mut confirmed = 0;
        for order in self.store.get_all_orders()? {
            if order.status == OrderStatus::Pending && order.created_at <= cutoff {
                self.advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)?;
                confirmed += 1;
            }
        }
        Ok(confirmed)
    }

    fn load(&self, order_id: &str) -> OrderResult<Order> {
        self.store
            .get_order(order_id)?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }
}

#[cfg(test)]
mod tests;
