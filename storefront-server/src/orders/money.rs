//! Money calculation utilities using rust_decimal for precision
//!
//! All charge arithmetic runs on `Decimal` internally and converts to
//! `f64` only at the storage/serialization boundary, rounded to two
//! decimal places half-up.

use rust_decimal::prelude::*;
use shared::models::CartLine;

use super::OrderError;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Subtotal above which delivery is free
const FREE_DELIVERY_THRESHOLD: f64 = 200.0;

/// Flat delivery fee below the threshold
const FLAT_DELIVERY_FEE: f64 = 40.0;

/// Tax rate applied to the subtotal (5%)
const TAX_RATE_PERCENT: i64 = 5;

/// Maximum allowed price per dish
const MAX_PRICE: f64 = 100_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 99;

/// Derived charges for a cart or order
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
}

/// Convert f64 to Decimal for precise arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 amount to 2 decimal places
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Validate a cart line before it enters pricing
pub fn validate_line(line: &CartLine) -> Result<(), OrderError> {
    if !line.price.is_finite() {
        return Err(OrderError::Validation(format!(
            "price must be a finite number, got {}",
            line.price
        )));
    }
    if line.price < 0.0 {
        return Err(OrderError::Validation(format!(
            "price must be non-negative, got {}",
            line.price
        )));
    }
    if line.price > MAX_PRICE {
        return Err(OrderError::Validation(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, line.price
        )));
    }
    if line.quantity < 1 {
        return Err(OrderError::Validation(format!(
            "quantity must be at least 1, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(OrderError::Validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }
    Ok(())
}

/// Line total: price * quantity, rounded
pub fn line_total(line: &CartLine) -> f64 {
    to_f64(to_decimal(line.price) * Decimal::from(line.quantity))
}

/// Compute the full charge breakdown for a set of cart lines.
///
/// - `delivery_fee = 0` when `subtotal > 200`, else flat `40`
/// - `tax = round2(subtotal * 0.05)`
/// - `total = subtotal + delivery_fee + tax`
///
/// Pure function of the lines; callers recompute on every read
/// rather than caching.
pub fn compute_charges(lines: &[CartLine]) -> Charges {
    let subtotal: Decimal = lines
        .iter()
        .map(|l| to_decimal(l.price) * Decimal::from(l.quantity))
        .sum();

    let delivery_fee = if subtotal > to_decimal(FREE_DELIVERY_THRESHOLD) {
        Decimal::ZERO
    } else {
        to_decimal(FLAT_DELIVERY_FEE)
    };

    let tax = (subtotal * Decimal::new(TAX_RATE_PERCENT, 2))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    let total = subtotal + delivery_fee + tax;

    Charges {
        subtotal: to_f64(subtotal),
        delivery_fee: to_f64(delivery_fee),
        tax: to_f64(tax),
        total: to_f64(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: i32) -> CartLine {
        CartLine {
            dish_id: "dish-1".into(),
            name: "Test Dish".into(),
            price,
            quantity,
            restaurant_id: "rest-1".into(),
            is_veg: true,
        }
    }

    #[test]
    fn free_delivery_above_threshold() {
        // 150 x 2 => subtotal 300, free delivery, 5% tax
        let charges = compute_charges(&[line(150.0, 2)]);
        assert_eq!(charges.subtotal, 300.0);
        assert_eq!(charges.delivery_fee, 0.0);
        assert_eq!(charges.tax, 15.0);
        assert_eq!(charges.total, 315.0);
    }

    #[test]
    fn flat_fee_below_threshold() {
        // 50 x 1 => subtotal 50, flat fee 40, tax 2.50
        let charges = compute_charges(&[line(50.0, 1)]);
        assert_eq!(charges.subtotal, 50.0);
        assert_eq!(charges.delivery_fee, 40.0);
        assert_eq!(charges.tax, 2.5);
        assert_eq!(charges.total, 92.5);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Exactly 200 still pays the flat fee
        let charges = compute_charges(&[line(200.0, 1)]);
        assert_eq!(charges.delivery_fee, 40.0);

        let charges = compute_charges(&[line(200.01, 1)]);
        assert_eq!(charges.delivery_fee, 0.0);
    }

    #[test]
    fn total_is_sum_of_parts() {
        for lines in [
            vec![line(120.0, 1), line(30.0, 3)],
            vec![line(99.99, 2)],
            vec![line(320.0, 1), line(240.0, 2), line(30.0, 4)],
        ] {
            let c = compute_charges(&lines);
            assert_eq!(c.total, round2(c.subtotal + c.delivery_fee + c.tax));
        }
    }

    #[test]
    fn tax_rounds_to_currency_precision() {
        // 33.33 * 0.05 = 1.6665 -> 1.67
        let charges = compute_charges(&[line(33.33, 1)]);
        assert_eq!(charges.tax, 1.67);
    }

    #[test]
    fn empty_cart_charges_are_flat_fee_only() {
        // Never reachable through place_order (empty carts are
        // rejected), but the function itself stays total-consistent.
        let charges = compute_charges(&[]);
        assert_eq!(charges.subtotal, 0.0);
        assert_eq!(charges.total, charges.delivery_fee);
    }

    #[test]
    fn validation_rejects_bad_lines() {
        assert!(validate_line(&line(f64::NAN, 1)).is_err());
        assert!(validate_line(&line(-1.0, 1)).is_err());
        assert!(validate_line(&line(50.0, 0)).is_err());
        assert!(validate_line(&line(50.0, 100)).is_err());
        assert!(validate_line(&line(50.0, 1)).is_ok());
    }
}
