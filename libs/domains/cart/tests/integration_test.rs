//! Postgres-backed tests for the cart domain
//!
//! Run with `cargo test -p domain_cart -- --ignored` (requires Docker).

use axum_helpers::Principal;
use domain_cart::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_money_eq};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_adding_same_product_merges_quantities() {
    let db = TestDatabase::new().await;
    let service = CartService::new(PgCartRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("cart_merge");

    let user_id = db.create_test_user(builder.user_id()).await;
    let product_id = db.create_test_product("Desk Lamp", 100.0, 5).await;
    let principal = Principal::user(user_id);

    service
        .add(principal, AddToCart { product_id, quantity: 2 })
        .await
        .unwrap();
    let merged = service
        .add(principal, AddToCart { product_id, quantity: 3 })
        .await
        .unwrap();
    assert_eq!(merged.quantity, 5);

    let view = service.view(principal).await.unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product_name, "Desk Lamp");
    assert_money_eq(view.total, 500.0, "cart total");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_items_are_scoped_to_owner() {
    let db = TestDatabase::new().await;
    let service = CartService::new(PgCartRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("cart_scope");

    let owner = Principal::user(db.create_test_user(builder.id(1)).await);
    let other = Principal::user(db.create_test_user(builder.id(2)).await);
    let product_id = db.create_test_product("Kettle", 30.0, 5).await;

    let item = service
        .add(owner, AddToCart { product_id, quantity: 1 })
        .await
        .unwrap();

    let result = service
        .update(other, item.id, UpdateCartItem { quantity: 9 })
        .await;
    assert!(matches!(result, Err(CartError::ItemNotFound(_))));

    let result = service.remove(other, item.id).await;
    assert!(matches!(result, Err(CartError::ItemNotFound(_))));

    let updated = service
        .update(owner, item.id, UpdateCartItem { quantity: 4 })
        .await
        .unwrap();
    assert_eq!(updated.quantity, 4);

    assert_eq!(service.clear(owner).await.unwrap(), 1);
    assert!(service.view(owner).await.unwrap().items.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_merge_past_limit_keeps_existing_quantity() {
    let db = TestDatabase::new().await;
    let service = CartService::new(PgCartRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("cart_limit");

    let principal = Principal::user(db.create_test_user(builder.user_id()).await);
    let product_id = db.create_test_product("Notebook", 4.0, 50).await;

    service
        .add(principal, AddToCart { product_id, quantity: 600 })
        .await
        .unwrap();
    let result = service
        .add(principal, AddToCart { product_id, quantity: 600 })
        .await;
    assert!(matches!(result, Err(CartError::QuantityLimitExceeded(id)) if id == product_id));

    let view = service.view(principal).await.unwrap();
    assert_eq!(view.items[0].quantity, 600);
}
