mod common;

use actor_framework::mock::MockClient;
use actor_framework::{FrameworkError, InMemoryRemote};
use common::{equipment, order};
use elevator_console::clients::{ActorClient, OrderClient};
use elevator_console::equipment_actor::{EquipmentActionResult, EquipmentError};
use elevator_console::model::{EquipmentStatus, OrderStatus, ServiceOrder};

/// Real Equipment actor, order store mocked.
///
/// The guard asks the order store for the non-terminal orders on the unit; the mock answers
/// that query, so no order actor is needed.
#[tokio::test]
async fn test_status_change_refused_while_an_order_is_open() {
    let mut orders = MockClient::<ServiceOrder>::new();
    orders
        .expect_query()
        .return_ok(vec![order("o1", "OS-2024-001", OrderStatus::Open, "e1")]);

    let remote = InMemoryRemote::with_items(vec![equipment("e1", "c1")]).shared();
    let (actor, client) = elevator_console::equipment_actor::new(16, remote.clone());
    tokio::spawn(actor.run(OrderClient::new(orders.client())));
    client.load().await.unwrap();

    let err = client
        .set_status("e1".into(), EquipmentStatus::OutOfService)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EquipmentError::ActiveOrders {
            requested: EquipmentStatus::OutOfService,
            open_orders: 1,
        }
    );

    let stored = client.get("e1".into()).await.unwrap().unwrap();
    assert_eq!(stored.status, EquipmentStatus::Operational);
    assert_eq!(remote.calls().update, 0);
    orders.verify();
}

#[tokio::test]
async fn test_status_change_allowed_once_orders_are_closed() {
    let mut orders = MockClient::<ServiceOrder>::new();
    orders.expect_query().return_ok(vec![]);

    let remote = InMemoryRemote::with_items(vec![equipment("e1", "c1")]).shared();
    let (actor, client) = elevator_console::equipment_actor::new(16, remote.clone());
    tokio::spawn(actor.run(OrderClient::new(orders.client())));
    client.load().await.unwrap();

    let changed = client
        .set_status("e1".into(), EquipmentStatus::Maintenance)
        .await
        .unwrap();
    assert_eq!(
        changed,
        EquipmentActionResult::StatusChanged {
            from: EquipmentStatus::Operational,
            to: EquipmentStatus::Maintenance,
        }
    );
    assert_eq!(remote.items()[0].status, EquipmentStatus::Maintenance);
    orders.verify();
}

#[tokio::test]
async fn test_same_status_does_not_consult_orders() {
    // No expectation queued: a query would fail the call.
    let orders = MockClient::<ServiceOrder>::new();

    let remote = InMemoryRemote::with_items(vec![equipment("e1", "c1")]).shared();
    let (actor, client) = elevator_console::equipment_actor::new(16, remote);
    tokio::spawn(actor.run(OrderClient::new(orders.client())));
    client.load().await.unwrap();

    let result = client
        .set_status("e1".into(), EquipmentStatus::Operational)
        .await
        .unwrap();
    assert_eq!(result, EquipmentActionResult::Unchanged);
}

#[tokio::test]
async fn test_unreachable_order_store_blocks_the_change() {
    let mut orders = MockClient::<ServiceOrder>::new();
    orders.expect_query().return_err(FrameworkError::ActorClosed);

    let remote = InMemoryRemote::with_items(vec![equipment("e1", "c1")]).shared();
    let (actor, client) = elevator_console::equipment_actor::new(16, remote);
    tokio::spawn(actor.run(OrderClient::new(orders.client())));
    client.load().await.unwrap();

    let err = client
        .set_status("e1".into(), EquipmentStatus::OutOfService)
        .await
        .unwrap_err();
    assert!(matches!(err, EquipmentError::OrderLookup(_)));
    let stored = client.get("e1".into()).await.unwrap().unwrap();
    assert_eq!(stored.status, EquipmentStatus::Operational);
}
