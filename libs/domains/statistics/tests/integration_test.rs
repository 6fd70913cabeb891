//! Postgres-backed tests for the dashboard aggregates
//!
//! Run with `cargo test -p domain_statistics -- --ignored` (requires Docker).

use axum_helpers::Principal;
use domain_orders::{CreateOrder, OrderLine, OrderService, PgOrderRepository, ShippingDetails};
use domain_payments::{CreatePayment, PaymentService, PaymentStatus, PgPaymentRepository};
use domain_statistics::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_money_eq};
use uuid::Uuid;

fn order_of(product_id: Uuid, quantity: i32, price: f64) -> CreateOrder {
    CreateOrder {
        details: ShippingDetails {
            payment_method: "credit_card".to_string(),
            shipping_method: "standard".to_string(),
            shipping_address: "1 Main St".to_string(),
        },
        items: vec![OrderLine {
            product_id,
            quantity,
            price,
            discount: 0.0,
        }],
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_dashboard_reflects_orders_and_payments() {
    let db = TestDatabase::new().await;
    let stats = StatisticsService::new(PgStatisticsRepository::new(db.connection()));
    let orders = OrderService::new(PgOrderRepository::new(db.connection()));
    let payments = PaymentService::new(PgPaymentRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("stats_dashboard");
    let admin = Principal::admin(builder.id(99));

    let alice = Principal::user(db.create_test_user(builder.id(1)).await);
    let bob = Principal::user(db.create_test_user(builder.id(2)).await);

    let chair = db.create_test_product("Chair", 40.0, 15).await;
    let _table = db.create_test_product("Table", 200.0, 11).await;
    let _stool = db.create_test_product("Stool", 25.0, 3).await;

    // Leaves the chair at exactly the threshold
    let first = orders.place(alice, order_of(chair, 5, 40.0)).await.unwrap();
    let _second = orders.place(bob, order_of(chair, 2, 40.0)).await.unwrap();

    payments
        .create(
            alice,
            CreatePayment {
                order_id: first.id,
                amount: 200.0,
                method: "credit_card".to_string(),
                status: PaymentStatus::Completed,
            },
        )
        .await
        .unwrap();

    let overview = stats.overview(admin).await.unwrap();
    assert_eq!(overview.total_users, 2);
    assert_eq!(overview.total_products, 3);
    assert_eq!(overview.total_orders, 2);
    assert_eq!(overview.pending_orders, 2);
    assert_eq!(overview.low_stock_products, 2);
    assert_money_eq(overview.total_revenue, 200.0, "completed payments");

    let sales = stats.sales(admin).await.unwrap();
    assert_eq!(sales.today_orders, 2);
    assert_eq!(sales.monthly_orders, 2);
    assert_money_eq(sales.today_revenue, 200.0, "today revenue");
    assert_eq!(
        sales.order_status_stats,
        vec![StatusCount {
            status: "pending".to_string(),
            count: 2,
        }]
    );

    let products = stats.products(admin).await.unwrap();
    assert_eq!(products.top_selling_products.len(), 1);
    assert_eq!(products.top_selling_products[0].product_id, chair);
    assert_eq!(products.top_selling_products[0].total_sold, 7);
    assert_eq!(
        products.products_by_category,
        vec![CategoryCount {
            category_name: None,
            count: 3,
        }]
    );
    let low: Vec<(&str, i32)> = products
        .low_stock_products
        .iter()
        .map(|p| (p.name.as_str(), p.stock))
        .collect();
    assert_eq!(low, vec![("Stool", 3), ("Chair", 8)]);

    let users = stats.users(admin).await.unwrap();
    assert_eq!(users.new_users_today, 2);
    assert_eq!(users.active_users, 2);
    assert_eq!(users.registration_trend.len(), 7);
    assert_eq!(users.registration_trend.last().map(|d| d.count), Some(2));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_store_reports_zeroes() {
    let db = TestDatabase::new().await;
    let stats = StatisticsService::new(PgStatisticsRepository::new(db.connection()));
    let admin = Principal::admin(Uuid::now_v7());

    let overview = stats.overview(admin).await.unwrap();
    assert_eq!(overview.total_orders, 0);
    assert_money_eq(overview.total_revenue, 0.0, "no payments");

    let products = stats.products(admin).await.unwrap();
    assert!(products.top_selling_products.is_empty());
    assert!(products.products_by_category.is_empty());

    let users = stats.users(admin).await.unwrap();
    assert!(users.registration_trend.iter().all(|d| d.count == 0));
}
