//! Postgres-backed tests for the shipments domain
//!
//! Run with `cargo test -p domain_shipments -- --ignored` (requires Docker).

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_helpers::Principal;
use domain_orders::{CreateOrder, OrderLine, OrderService, PgOrderRepository, ShippingDetails};
use domain_shipments::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_some};
use uuid::Uuid;

async fn place_order(db: &TestDatabase, user: Principal) -> Uuid {
    let product_id = db.create_test_product("Armchair", 250.0, 2).await;
    let orders = OrderService::new(PgOrderRepository::new(db.connection()));
    orders
        .place(
            user,
            CreateOrder {
                details: ShippingDetails {
                    payment_method: "credit_card".to_string(),
                    shipping_method: "express".to_string(),
                    shipping_address: "9 Side Rd".to_string(),
                },
                items: vec![OrderLine {
                    product_id,
                    quantity: 1,
                    price: 250.0,
                    discount: 0.0,
                }],
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delivery_lifecycle_and_tracking() {
    let db = TestDatabase::new().await;
    let service = ShipmentService::new(PgShipmentRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("shipment_lifecycle");

    let user = Principal::user(db.create_test_user(builder.id(1)).await);
    let admin = Principal::admin(builder.id(2));
    let order_id = place_order(&db, user).await;

    let shipment = service
        .create(
            admin,
            CreateShipment {
                order_id,
                carrier: Some("DHL".to_string()),
                tracking_number: Some("DHL123456789".to_string()),
                status: ShipmentStatus::Pending,
            },
        )
        .await
        .unwrap();
    assert!(shipment.shipped_at.is_none());

    let tracked = service.track("DHL123456789").await.unwrap();
    assert_eq!(tracked.id, shipment.id);

    let delivered = service
        .update(
            admin,
            shipment.id,
            UpdateShipment {
                status: Some(ShipmentStatus::Delivered),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let delivered_at = assert_some(delivered.delivered_at, "delivered_at");
    let shipped_at = assert_some(delivered.shipped_at, "backfilled shipped_at");
    assert_eq!(shipped_at, delivered_at);

    let result = service
        .update(
            admin,
            shipment.id,
            UpdateShipment {
                status: Some(ShipmentStatus::Shipped),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ShipmentError::InvalidTransition { .. })));

    let listed = service
        .list(admin, ShipmentFilter { order_id: Some(order_id) })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    service.delete(admin, shipment.id).await.unwrap();
    let result = service.track("DHL123456789").await;
    assert!(matches!(result, Err(ShipmentError::TrackingNotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_tracking_number_is_conflict() {
    let db = TestDatabase::new().await;
    let service = ShipmentService::new(PgShipmentRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("shipment_tracking_unique");

    let user = Principal::user(db.create_test_user(builder.id(1)).await);
    let admin = Principal::admin(builder.id(2));
    let order_id = place_order(&db, user).await;

    let input = CreateShipment {
        order_id,
        carrier: Some("UPS".to_string()),
        tracking_number: Some("1Z-DUP".to_string()),
        status: ShipmentStatus::Shipped,
    };
    service.create(admin, input.clone()).await.unwrap();

    let result = service.create(admin, input).await;
    let response = result.unwrap_err().into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
