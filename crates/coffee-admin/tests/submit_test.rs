//! Order submission against mock tables: every gateway failure path, checked
//! with call counts and request payloads.

use chrono::Utc;
use coffee_admin::clients::{OrderClient, OrderItemClient};
use coffee_admin::composer::{
    ComposeError, ErrorKind, OrderComposition, OrderNumberGenerator, OrderSubmitter,
};
use coffee_admin::model::{
    Order, OrderId, OrderItem, OrderItemId, OrderStatus, PaymentMethod, Product, ProductId,
    ProfileId, Role,
};
use coffee_admin::session::Identity;
use rust_decimal::Decimal;
use std::sync::Arc;
use table_actor::mock::{mock_table, next_insert, next_insert_batch, MockTable};
use table_actor::GatewayError;

// --- Fixtures ---

fn product(id: u32, name: &str, cents: i64) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        image_url: None,
        category: "coffee".to_string(),
        stock: 5,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn saved_order(id: u32, number: &str, total: Decimal) -> Order {
    Order {
        id: OrderId(id),
        order_number: number.to_string(),
        customer_name: None,
        table_number: None,
        total_amount: total,
        status: OrderStatus::Pending,
        payment_method: None,
        notes: None,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Latte 4.50 × 2 and Muffin 3.25 × 1.
fn breakfast() -> OrderComposition {
    let latte = product(1, "Latte", 450);
    let muffin = product(2, "Muffin", 325);
    let mut cart = OrderComposition::new();
    cart.add_item(&latte);
    cart.add_item(&latte);
    cart.add_item(&muffin);
    cart
}

fn submitter(orders: &MockTable<Order>, items: &MockTable<OrderItem>) -> OrderSubmitter {
    OrderSubmitter::new(
        OrderClient::new(orders.client()),
        OrderItemClient::new(items.client()),
        Arc::new(OrderNumberGenerator::default()),
    )
}

// --- Tests ---

#[tokio::test]
async fn test_empty_order_makes_no_gateway_calls() {
    let orders = MockTable::<Order>::new();
    let items = MockTable::<OrderItem>::new();

    let result = submitter(&orders, &items)
        .submit(&OrderComposition::new(), None)
        .await;

    assert_eq!(result, Err(ComposeError::EmptyOrder));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(orders.calls(), 0);
    assert_eq!(items.calls(), 0);
}

#[tokio::test]
async fn test_header_failure_never_inserts_lines() {
    let mut orders = MockTable::<Order>::new();
    let items = MockTable::<OrderItem>::new();
    orders
        .expect_insert()
        .return_err(GatewayError::rejected("connection reset"));

    let result = submitter(&orders, &items).submit(&breakfast(), None).await;

    match result {
        Err(ComposeError::OrderPersistenceFailed(reason)) => {
            assert!(reason.contains("connection reset"))
        }
        other => panic!("expected OrderPersistenceFailed, got {other:?}"),
    }
    assert_eq!(orders.calls(), 1);
    assert_eq!(items.calls(), 0);
    orders.verify();
    items.verify();
}

#[tokio::test]
async fn test_failed_lines_roll_the_header_back() {
    let mut orders = MockTable::<Order>::new();
    let mut items = MockTable::<OrderItem>::new();
    orders
        .expect_insert()
        .return_ok(saved_order(1, "ORD1", Decimal::new(1225, 2)));
    items
        .expect_insert_batch()
        .return_err(GatewayError::rejected("timeout"));
    orders.expect_delete().return_ok(());

    let result = submitter(&orders, &items).submit(&breakfast(), None).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        ComposeError::LinePersistenceFailed { rolled_back: true, .. }
    ));
    assert_eq!(err.kind(), ErrorKind::Gateway);
    assert_eq!(orders.calls(), 2);
    assert_eq!(items.calls(), 1);
    orders.verify();
    items.verify();
}

#[tokio::test]
async fn test_failed_rollback_reports_partial_commit() {
    let mut orders = MockTable::<Order>::new();
    let mut items = MockTable::<OrderItem>::new();
    orders
        .expect_insert()
        .return_ok(saved_order(4, "ORD4", Decimal::new(1225, 2)));
    items
        .expect_insert_batch()
        .return_err(GatewayError::rejected("timeout"));
    orders.expect_delete().return_err(GatewayError::TableClosed);

    let err = submitter(&orders, &items)
        .submit(&breakfast(), None)
        .await
        .unwrap_err();

    match &err {
        ComposeError::PartialCommit {
            order_id,
            order_number,
            reason,
        } => {
            assert_eq!(*order_id, OrderId(4));
            assert_eq!(order_number, "ORD4");
            assert!(reason.contains("rollback failed"));
        }
        other => panic!("expected PartialCommit, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::PartialCommit);
    orders.verify();
    items.verify();
}

#[tokio::test]
async fn test_without_compensation_the_header_is_left_behind() {
    let mut orders = MockTable::<Order>::new();
    let mut items = MockTable::<OrderItem>::new();
    orders
        .expect_insert()
        .return_ok(saved_order(2, "ORD2", Decimal::new(1225, 2)));
    items
        .expect_insert_batch()
        .return_err(GatewayError::rejected("timeout"));

    let err = submitter(&orders, &items)
        .with_compensation(false)
        .submit(&breakfast(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ComposeError::PartialCommit { order_id: OrderId(2), .. }));
    // header insert only, no delete
    assert_eq!(orders.calls(), 1);
    orders.verify();
    items.verify();
}

#[tokio::test]
async fn test_submitted_payloads() {
    let (orders, mut order_requests) = mock_table::<Order>(10);
    let (items, mut item_requests) = mock_table::<OrderItem>(10);
    let submitter = OrderSubmitter::new(
        OrderClient::new(orders),
        OrderItemClient::new(items),
        Arc::new(OrderNumberGenerator::new("ORD")),
    );
    let barista = Identity {
        id: ProfileId(3),
        email: "kai@beanhouse.test".to_string(),
        full_name: "Kai".to_string(),
        role: Role::Staff,
    };

    let mut cart = breakfast();
    cart.set_customer_name(Some("Jo".to_string()));
    cart.set_payment_method(Some(PaymentMethod::Cash));

    let task = tokio::spawn(async move { submitter.submit(&cart, Some(&barista)).await });

    // 1. Header
    let (header, responder) = next_insert(&mut order_requests)
        .await
        .expect("Expected header insert");
    assert!(header.order_number.starts_with("ORD"));
    assert!(header.order_number["ORD".len()..].parse::<i64>().is_ok());
    assert_eq!(header.total_amount, Decimal::new(1225, 2));
    assert_eq!(header.created_by, Some(ProfileId(3)));
    assert_eq!(header.customer_name.as_deref(), Some("Jo"));
    assert_eq!(header.payment_method, Some(PaymentMethod::Cash));
    let mut stored = saved_order(9, &header.order_number, header.total_amount);
    stored.created_by = header.created_by;
    responder.send(Ok(stored.clone())).unwrap();

    // 2. Lines
    let (lines, responder) = next_insert_batch(&mut item_requests)
        .await
        .expect("Expected line batch");
    let summary: Vec<(OrderId, ProductId, u32, Decimal, Decimal)> = lines
        .iter()
        .map(|l| (l.order_id, l.product_id, l.quantity, l.unit_price, l.subtotal))
        .collect();
    assert_eq!(
        summary,
        vec![
            (OrderId(9), ProductId(1), 2, Decimal::new(450, 2), Decimal::new(900, 2)),
            (OrderId(9), ProductId(2), 1, Decimal::new(325, 2), Decimal::new(325, 2)),
        ]
    );
    let saved_lines: Vec<OrderItem> = lines
        .into_iter()
        .enumerate()
        .map(|(i, l)| OrderItem {
            id: OrderItemId(i as u32 + 1),
            order_id: l.order_id,
            product_id: l.product_id,
            quantity: l.quantity,
            unit_price: l.unit_price,
            subtotal: l.subtotal,
            created_at: Utc::now(),
        })
        .collect();
    responder.send(Ok(saved_lines)).unwrap();

    let submitted = task.await.unwrap().unwrap();
    assert_eq!(submitted.order, stored);
    assert_eq!(submitted.lines.len(), 2);
}
