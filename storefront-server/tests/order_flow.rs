//! End-to-end order lifecycle over a fresh in-memory state: register,
//! fill a cart from the catalog, check out, confirm, race two
//! partners for acceptance, drive delivery to the end and read the
//! admin counters.

use storefront_server::orders::engine::Actor;
use storefront_server::{Config, ServerState};

use shared::models::{DeliveryAddress, Role, StructuredAddress};
use shared::order::{OrderStatus, PaymentMethod, PaymentStatus};

fn fresh_state() -> ServerState {
    let config = Config::with_overrides("/tmp/unused", 0);
    ServerState::initialize_in_memory(&config).unwrap()
}

fn address() -> DeliveryAddress {
    DeliveryAddress::Structured(StructuredAddress {
        house_no: "42".into(),
        street: "MG Road".into(),
        landmark: None,
        area: "Indiranagar".into(),
        city: "Bengaluru".into(),
        pincode: "560038".into(),
        location: None,
    })
}

#[test]
fn full_lifecycle_from_cart_to_delivered() {
    let state = fresh_state();

    // Demo data is seeded on first open
    let customer = state
        .directory
        .authenticate("demo@foodify.com", "demo123")
        .unwrap();
    assert_eq!(customer.role, Role::Customer);
    let partner_a = state
        .directory
        .authenticate("partner@foodify.com", "partner123")
        .unwrap();
    let partner_b = state
        .directory
        .authenticate("amit@foodify.com", "partner123")
        .unwrap();
    let admin = state
        .directory
        .authenticate("admin@foodify.com", "admin123")
        .unwrap();

    // Build a cart from real catalog dishes
    let restaurant = state.catalog.restaurants()[0].clone();
    let menu: Vec<_> = state
        .catalog
        .menu(&restaurant.id)
        .into_iter()
        .cloned()
        .collect();
    assert!(menu.len() >= 2);
    state.carts.add_item(&customer.id, &menu[0]).unwrap();
    state.carts.add_item(&customer.id, &menu[0]).unwrap();
    state.carts.add_item(&customer.id, &menu[1]).unwrap();

    let order = state
        .engine
        .place_order(
            &customer.id,
            address(),
            PaymentMethod::CashOnDelivery,
            PaymentStatus::CashOnDelivery,
        )
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.restaurant_id, restaurant.id);
    assert!(state.carts.get(&customer.id).unwrap().is_empty());

    // Totals written on the order match the pricing rules
    let expected_subtotal = menu[0].price * 2.0 + menu[1].price;
    assert!((order.subtotal - expected_subtotal).abs() < 0.01);
    assert!(
        (order.total - (order.subtotal + order.delivery_fee + order.tax)).abs() < 0.01
    );

    // Admin confirms, both partners race for it
    let admin_actor = Actor::Admin {
        user_id: admin.id.clone(),
    };
    let confirmed = state
        .engine
        .advance_status(&order.id, OrderStatus::Confirmed, &admin_actor)
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(state.engine.list_available().unwrap().len(), 1);

    let actor_a = Actor::DeliveryPartner {
        user_id: partner_a.id.clone(),
    };
    let actor_b = Actor::DeliveryPartner {
        user_id: partner_b.id.clone(),
    };
    let accepted = state.engine.accept_order(&order.id, &actor_a).unwrap();
    assert_eq!(accepted.status, OrderStatus::Preparing);
    assert_eq!(accepted.delivery_partner_id.as_deref(), Some(partner_a.id.as_str()));
    assert!(accepted.accepted_at.is_some());

    // The loser gets a conflict and the assignment stands
    assert!(state.engine.accept_order(&order.id, &actor_b).is_err());
    let reloaded = state.store.get_order(&order.id).unwrap().unwrap();
    assert_eq!(reloaded.delivery_partner_id.as_deref(), Some(partner_a.id.as_str()));
    assert!(state.engine.list_available().unwrap().is_empty());

    // Only the assigned partner can drive the remaining steps
    assert!(
        state
            .engine
            .advance_status(&order.id, OrderStatus::OnTheWay, &actor_b)
            .is_err()
    );
    state
        .engine
        .advance_status(&order.id, OrderStatus::OnTheWay, &actor_a)
        .unwrap();
    let delivered = state
        .engine
        .advance_status(&order.id, OrderStatus::Delivered, &actor_a)
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.delivered_at.is_some());

    // Partner order views
    let mine = state.store.get_orders_by_partner(&partner_a.id).unwrap();
    assert_eq!(mine.len(), 1);
    assert!(state.store.get_orders_by_partner(&partner_b.id).unwrap().is_empty());
}

#[test]
fn cancelled_orders_stay_out_of_revenue_and_pickup() {
    let state = fresh_state();
    let customer = state
        .directory
        .authenticate("demo@foodify.com", "demo123")
        .unwrap();
    let restaurant = state.catalog.restaurants()[0].clone();
    let menu = state.catalog.menu(&restaurant.id);
    state.carts.add_item(&customer.id, menu[0]).unwrap();

    let order = state
        .engine
        .place_order(
            &customer.id,
            address(),
            PaymentMethod::Online,
            PaymentStatus::Paid,
        )
        .unwrap();

    let customer_actor = Actor::Customer {
        user_id: customer.id.clone(),
    };
    let cancelled = state.engine.cancel_order(&order.id, &customer_actor).unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // Terminal: nothing moves it again
    assert!(
        state
            .engine
            .advance_status(&order.id, OrderStatus::Confirmed, &Actor::System)
            .is_err()
    );
    assert!(state.engine.list_available().unwrap().is_empty());
}

#[test]
fn sessions_authenticate_requests() {
    let state = fresh_state();
    let user = state
        .directory
        .authenticate("demo@foodify.com", "demo123")
        .unwrap();

    let session = state.sessions().issue(&user).unwrap();
    let current = state.sessions().resolve(&session.token).unwrap();
    assert_eq!(current.id, user.id);
    assert_eq!(current.role, Role::Customer);

    state.sessions().revoke(&session.token).unwrap();
    assert!(state.sessions().resolve(&session.token).is_err());
}
