//! Cart service
//!
//! Per-user mutable line-item list tied to one restaurant at a time.
//! Quantity handling deliberately keeps the storefront's two paths:
//! the cart view adjusts with a delta clamped at 1
//! ([`CartService::adjust_quantity`]), while the menu view's
//! decrement removes the line at zero ([`CartService::decrement`]).
//! Unknown dish ids are silent no-ops on adjust/remove, matching the
//! original behavior.

use shared::models::{Cart, CartLine, Dish};

use crate::orders::money::{self, Charges};
use crate::store::{Store, StorageResult};
use crate::utils::{AppError, AppResult};

/// Cart service over the persistent store
#[derive(Clone, Debug)]
pub struct CartService {
    store: Store,
}

impl CartService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Current cart for a user (empty when none saved)
    pub fn get(&self, user_id: &str) -> StorageResult<Cart> {
        self.store.get_cart(user_id)
    }

    /// Add one unit of a dish.
    ///
    /// An existing line gains quantity 1; otherwise a new line is
    /// appended. Adding from a different restaurant than the cart's
    /// current one is rejected; the client must clear first.
    pub fn add_item(&self, user_id: &str, dish: &Dish) -> AppResult<Cart> {
        let mut cart = self.store.get_cart(user_id)?;

        if let Some(current) = cart.restaurant_id()
            && current != dish.restaurant_id
        {
            return Err(AppError::validation(
                "Your cart has items from another restaurant. Clear it to order from here.",
            ));
        }

        match cart.lines.iter_mut().find(|l| l.dish_id == dish.id) {
            Some(line) => line.quantity += 1,
            None => cart.lines.push(CartLine {
                dish_id: dish.id.clone(),
                name: dish.name.clone(),
                price: dish.price,
                quantity: 1,
                restaurant_id: dish.restaurant_id.clone(),
                is_veg: dish.is_veg,
            }),
        }

        self.store.save_cart(user_id, &cart)?;
        Ok(cart)
    }

    /// Cart-view quantity adjustment: apply `delta`, clamped at 1.
    /// This path never removes a line.
    pub fn adjust_quantity(&self, user_id: &str, dish_id: &str, delta: i32) -> AppResult<Cart> {
        let mut cart = self.store.get_cart(user_id)?;

        if let Some(line) = cart.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            line.quantity = (line.quantity + delta).max(1);
            self.store.save_cart(user_id, &cart)?;
        }

        Ok(cart)
    }

    /// Menu-view decrement: quantity - 1, removing the line at zero
    pub fn decrement(&self, user_id: &str, dish_id: &str) -> AppResult<Cart> {
        let mut cart = self.store.get_cart(user_id)?;

        if let Some(pos) = cart.lines.iter().position(|l| l.dish_id == dish_id) {
            if cart.lines[pos].quantity <= 1 {
                cart.lines.remove(pos);
            } else {
                cart.lines[pos].quantity -= 1;
            }
            self.store.save_cart(user_id, &cart)?;
        }

        Ok(cart)
    }

    /// Remove a line outright
    pub fn remove_item(&self, user_id: &str, dish_id: &str) -> AppResult<Cart> {
        let mut cart = self.store.get_cart(user_id)?;
        let before = cart.lines.len();
        cart.lines.retain(|l| l.dish_id != dish_id);

        if cart.lines.len() != before {
            self.store.save_cart(user_id, &cart)?;
        }

        Ok(cart)
    }

    /// Drop the whole cart (order placed, logout, or restaurant switch)
    pub fn clear(&self, user_id: &str) -> AppResult<()> {
        self.store.clear_cart(user_id)?;
        Ok(())
    }

    /// Charge breakdown for the current lines. Pure function of the
    /// cart, recomputed on every call.
    pub fn totals(cart: &Cart) -> Charges {
        money::compute_charges(&cart.lines)
    }
}
