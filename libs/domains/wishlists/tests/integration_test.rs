//! Postgres-backed tests for the wishlists domain
//!
//! Run with `cargo test -p domain_wishlists -- --ignored` (requires Docker).

use axum_helpers::Principal;
use domain_wishlists::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_wishlist_round_trip() {
    let db = TestDatabase::new().await;
    let service = WishlistService::new(PgWishlistRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("wishlist_round_trip");

    let user = Principal::user(db.create_test_user(builder.id(1)).await);
    let other = Principal::user(db.create_test_user(builder.id(2)).await);
    let lamp = db.create_test_product("Floor Lamp", 75.0, 4).await;
    let vase = db.create_test_product("Vase", 20.0, 9).await;

    let item = service
        .add(user, AddToWishlist { product_id: lamp })
        .await
        .unwrap();
    service
        .add(user, AddToWishlist { product_id: vase })
        .await
        .unwrap();

    let result = service.add(user, AddToWishlist { product_id: lamp }).await;
    assert!(matches!(result, Err(WishlistError::AlreadyInWishlist)));

    let entries = service.list(user).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].product_name, "Vase");

    assert!(service.check(user, lamp).await.unwrap().in_wishlist);
    assert!(!service.check(other, lamp).await.unwrap().in_wishlist);

    let result = service.remove(other, item.id).await;
    assert!(matches!(result, Err(WishlistError::ItemNotFound(_))));

    service.remove(user, item.id).await.unwrap();
    assert!(!service.check(user, lamp).await.unwrap().in_wishlist);

    assert_eq!(service.clear(user).await.unwrap(), 1);
    assert!(service.list(user).await.unwrap().is_empty());
}
