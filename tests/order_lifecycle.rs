mod common;

use std::fs;

use tailor_booking::{
    core::{services::DraftUpdate, Transition, WizardStep},
    domain::{OrderStatus, Route},
    errors::BookingError,
};
use uuid::Uuid;

#[test]
fn submitted_booking_is_persisted_as_pending_order() {
    let (orders, base) = common::json_order_service();
    let mut wizard = common::wizard();
    wizard.update(DraftUpdate::SelectFabric("silk".into())).unwrap();
    wizard.update(DraftUpdate::HasMeasurements(true)).unwrap();
    while wizard.current_step() != Some(WizardStep::Review) {
        wizard.next(&orders).unwrap();
    }

    let Transition::Submitted(Route::OrderDetail { order_id }) = wizard.next(&orders).unwrap()
    else {
        panic!("expected submission");
    };
    let id = Uuid::parse_str(&order_id).expect("real order id");

    let file = base.join("orders").join(format!("{id}.json"));
    assert!(file.exists(), "order file written to {}", file.display());

    let order = orders.get(id).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.tailor_id, "tailor-7");
    assert_eq!(order.total_price, wizard.draft().total_price());
}

#[test]
fn lifecycle_reaches_completion_and_timeline_follows() {
    let (orders, _) = common::json_order_service();
    let order = orders
        .create_from_summary(common::wizard().review())
        .unwrap();

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::InProgress,
        OrderStatus::ReadyForFitting,
        OrderStatus::Completed,
    ] {
        orders.advance(order.id, status).unwrap();
        let timeline = orders.timeline(order.id).unwrap();
        assert_eq!(timeline.current().map(|entry| entry.status), Some(status));
    }

    let timeline = orders.timeline(order.id).unwrap();
    assert!(timeline.entries.iter().all(|entry| entry.reached));
    assert!(matches!(
        orders.cancel(order.id),
        Err(BookingError::InvalidTransition(_))
    ));
}

#[test]
fn corrupt_files_do_not_hide_valid_orders() {
    let (orders, base) = common::json_order_service();
    orders
        .create_from_summary(common::wizard().review())
        .unwrap();
    fs::write(base.join("orders").join("garbage.json"), "not json").unwrap();

    assert_eq!(orders.list().unwrap().len(), 1);
}

#[test]
fn orders_survive_a_new_service_instance() {
    let (orders, base) = common::json_order_service();
    let created = orders
        .create_from_summary(common::wizard().review())
        .unwrap();
    orders.advance(created.id, OrderStatus::Confirmed).unwrap();
    drop(orders);

    let store = tailor_booking::storage::JsonOrderStore::new(Some(base)).unwrap();
    let reopened = tailor_booking::core::services::OrderService::new(Box::new(store));
    let order = reopened.get(created.id).unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.history.len(), 2);
}
