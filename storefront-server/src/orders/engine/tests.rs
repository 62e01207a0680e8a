use super::*;
use shared::models::{Cart, CartLine, DeliveryAddress, StructuredAddress};

fn test_engine() -> OrderEngine {
    let store = Store::open_in_memory().unwrap();
    OrderEngine::new(store, 35)
}

fn line(dish_id: &str, price: f64, quantity: i32) -> CartLine {
    CartLine {
        dish_id: dish_id.into(),
        name: format!("Dish {}", dish_id),
        price,
        quantity,
        restaurant_id: "rest-1".into(),
        is_veg: true,
    }
}

fn address() -> DeliveryAddress {
    DeliveryAddress::Structured(StructuredAddress {
        house_no: "12".into(),
        street: "Park Street".into(),
        landmark: Some("Opposite metro".into()),
        area: "Salt Lake".into(),
        city: "Kolkata".into(),
        pincode: "700091".into(),
        location: None,
    })
}

fn stock_cart(engine: &OrderEngine, user_id: &str, lines: Vec<CartLine>) {
    engine
        .store
        .save_cart(user_id, &Cart { lines })
        .unwrap();
}

fn placed_order(engine: &OrderEngine, user_id: &str) -> Order {
    stock_cart(engine, user_id, vec![line("dish-1", 150.0, 2)]);
    engine
        .place_order(
            user_id,
            address(),
            PaymentMethod::Online,
            PaymentStatus::Paid,
        )
        .unwrap()
}

/// Place, confirm and accept, returning the preparing order
fn accepted_order(engine: &OrderEngine, user_id: &str, partner_id: &str) -> Order {
    let order = placed_order(engine, user_id);
    engine
        .advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();
    engine
        .accept_order(
            &order.id,
            &Actor::DeliveryPartner {
                user_id: partner_id.into(),
            },
        )
        .unwrap()
}

fn partner(id: &str) -> Actor {
    Actor::DeliveryPartner {
        user_id: id.into(),
    }
}

// ========================================================================
// place_order
// ========================================================================

#[test]
fn place_order_snapshots_cart_and_computes_charges() {
    let engine = test_engine();
    stock_cart(
        &engine,
        "user-1",
        vec![line("dish-1", 150.0, 2)],
    );

    let order = engine
        .place_order(
            "user-1",
            address(),
            PaymentMethod::Online,
            PaymentStatus::Paid,
        )
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal, 300.0);
    assert_eq!(order.delivery_fee, 0.0);
    assert_eq!(order.tax, 15.0);
    assert_eq!(order.total, 315.0);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].total, 300.0);
    assert_eq!(order.restaurant_id, "rest-1");
    assert!(order.delivery_partner_id.is_none());
    assert_eq!(
        order.estimated_delivery,
        order.created_at + 35 * 60 * 1000
    );

    // Cart is cleared in the same transaction
    assert!(engine.store.get_cart("user-1").unwrap().is_empty());
    // And the order is persisted
    assert!(engine.store.get_order(&order.id).unwrap().is_some());
}

#[test]
fn place_order_with_empty_cart_is_rejected_and_store_unchanged() {
    let engine = test_engine();

    let err = engine
        .place_order(
            "user-1",
            address(),
            PaymentMethod::CashOnDelivery,
            PaymentStatus::CashOnDelivery,
        )
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    assert!(engine.store.get_all_orders().unwrap().is_empty());
}

#[test]
fn place_order_requires_a_complete_address() {
    let engine = test_engine();
    stock_cart(&engine, "user-1", vec![line("dish-1", 50.0, 1)]);

    let err = engine
        .place_order(
            "user-1",
            DeliveryAddress::Legacy("   ".into()),
            PaymentMethod::CashOnDelivery,
            PaymentStatus::CashOnDelivery,
        )
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(_)));
    // Cart survives a failed placement
    assert!(!engine.store.get_cart("user-1").unwrap().is_empty());
}

// ========================================================================
// accept_order arbitration
// ========================================================================

#[test]
fn second_accept_fails_and_first_assignment_stands() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");
    engine
        .advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();

    let won = engine.accept_order(&order.id, &partner("partner-1")).unwrap();
    assert_eq!(won.status, OrderStatus::Preparing);
    assert_eq!(won.delivery_partner_id.as_deref(), Some("partner-1"));
    assert!(won.accepted_at.is_some());

    let err = engine
        .accept_order(&order.id, &partner("partner-2"))
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyAssigned(_)));

    let stored = engine.store.get_order(&order.id).unwrap().unwrap();
    assert_eq!(stored.delivery_partner_id.as_deref(), Some("partner-1"));
}

#[test]
fn accept_requires_a_confirmed_order() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    // Still pending: not in the worklist, not acceptable
    let err = engine
        .accept_order(&order.id, &partner("partner-1"))
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[test]
fn only_delivery_partners_accept() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");
    engine
        .advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();

    let err = engine
        .accept_order(
            &order.id,
            &Actor::Customer {
                user_id: "user-1".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
}

#[test]
fn list_available_shows_only_unassigned_confirmed_orders() {
    let engine = test_engine();
    let a = placed_order(&engine, "user-1");
    let b = placed_order(&engine, "user-2");
    engine
        .advance_status(&a.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();
    engine
        .advance_status(&b.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();
    engine.accept_order(&a.id, &partner("partner-1")).unwrap();

    let available = engine.list_available().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, b.id);
}

// ========================================================================
// advance_status
// ========================================================================

#[test]
fn skipping_a_step_is_rejected() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    // pending -> on_the_way skips confirmed and preparing
    let err = engine
        .advance_status(&order.id, OrderStatus::OnTheWay, &partner("partner-1"))
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    let stored = engine.store.get_order(&order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[test]
fn only_admin_or_system_confirms() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    let err = engine
        .advance_status(
            &order.id,
            OrderStatus::Confirmed,
            &Actor::Customer {
                user_id: "user-1".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));

    engine
        .advance_status(
            &order.id,
            OrderStatus::Confirmed,
            &Actor::Admin {
                user_id: "admin-1".into(),
            },
        )
        .unwrap();
}

#[test]
fn assigned_partner_drives_delivery_and_delivered_is_stamped() {
    let engine = test_engine();
    let order = accepted_order(&engine, "user-1", "partner-1");

    // A different partner cannot advance
    let err = engine
        .advance_status(&order.id, OrderStatus::OnTheWay, &partner("partner-2"))
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));

    let order = engine
        .advance_status(&order.id, OrderStatus::OnTheWay, &partner("partner-1"))
        .unwrap();
    assert_eq!(order.status, OrderStatus::OnTheWay);
    assert!(order.delivered_at.is_none());

    let order = engine
        .advance_status(&order.id, OrderStatus::Delivered, &partner("partner-1"))
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert!(order.delivered_at.is_some());
}

#[test]
fn terminal_states_admit_no_transition() {
    let engine = test_engine();
    let order = accepted_order(&engine, "user-1", "partner-1");
    engine
        .advance_status(&order.id, OrderStatus::OnTheWay, &partner("partner-1"))
        .unwrap();
    engine
        .advance_status(&order.id, OrderStatus::Delivered, &partner("partner-1"))
        .unwrap();

    let err = engine
        .advance_status(&order.id, OrderStatus::Delivered, &partner("partner-1"))
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    let err = engine
        .cancel_order(
            &order.id,
            &Actor::Admin {
                user_id: "admin-1".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

#[test]
fn preparing_is_not_reachable_through_advance() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");
    engine
        .advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)
        .unwrap();

    let err = engine
        .advance_status(
            &order.id,
            OrderStatus::Preparing,
            &Actor::Admin {
                user_id: "admin-1".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));
}

// ========================================================================
// cancel_order
// ========================================================================

#[test]
fn customer_cancels_own_order_before_preparing() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    let cancelled = engine
        .cancel_order(
            &order.id,
            &Actor::Customer {
                user_id: "user-1".into(),
            },
        )
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[test]
fn customer_cannot_cancel_someone_elses_order_or_one_in_the_kitchen() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    let err = engine
        .cancel_order(
            &order.id,
            &Actor::Customer {
                user_id: "user-2".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));

    // Once preparing, the customer window has closed
    let order = accepted_order(&engine, "user-3", "partner-1");
    let err = engine
        .cancel_order(
            &order.id,
            &Actor::Customer {
                user_id: "user-3".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, OrderError::Forbidden(_)));

    // But admin can still cancel a non-terminal order
    engine
        .cancel_order(
            &order.id,
            &Actor::Admin {
                user_id: "admin-1".into(),
            },
        )
        .unwrap();
}

// ========================================================================
// compute_eta / auto-confirm
// ========================================================================

#[test]
fn eta_is_clamped_and_non_increasing() {
    let engine = test_engine();
    let order = placed_order(&engine, "user-1");

    let t0 = order.created_at;
    let eta_now = OrderEngine::compute_eta(&order, t0);
    let eta_later = OrderEngine::compute_eta(&order, t0 + 10 * 60 * 1000);
    let eta_way_past = OrderEngine::compute_eta(&order, t0 + 24 * 60 * 60 * 1000);

    assert_eq!(eta_now, 35 * 60 * 1000);
    assert!(eta_later < eta_now);
    assert_eq!(eta_way_past, 0);
}

#[test]
fn auto_confirm_promotes_only_aged_pending_orders() {
    let engine = test_engine();
    let aged = placed_order(&engine, "user-1");
    let fresh = placed_order(&engine, "user-2");

    // Backdate the first order past the confirmation delay
    let mut backdated = engine.store.get_order(&aged.id).unwrap().unwrap();
    backdated.created_at -= 60_000;
    engine.store.save_order(&backdated).unwrap();

    let confirmed = engine.auto_confirm_pending(30_000).unwrap();
    assert_eq!(confirmed, 1);
    assert_eq!(
        engine.store.get_order(&aged.id).unwrap().unwrap().status,
        OrderStatus::Confirmed
    );
    assert_eq!(
        engine.store.get_order(&fresh.id).unwrap().unwrap().status,
        OrderStatus::Pending
    );
}
