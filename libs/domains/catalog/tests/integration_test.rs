//! Postgres-backed tests for the catalog domain
//!
//! Run with `cargo test -p domain_catalog -- --ignored` (requires Docker).

use axum_helpers::Principal;
use domain_catalog::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn services(db: &TestDatabase) -> (
    ProductService<PgProductRepository, PgCategoryRepository>,
    CategoryService<PgCategoryRepository>,
) {
    (
        ProductService::new(
            PgProductRepository::new(db.connection()),
            PgCategoryRepository::new(db.connection()),
        ),
        CategoryService::new(PgCategoryRepository::new(db.connection())),
    )
}

fn product(name: &str, price: f64, stock: i32, category_id: Option<uuid::Uuid>) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        price,
        discount: 0.0,
        stock,
        category_id,
        images: vec![format!("{}.jpg", name)],
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_filters_sorting_and_pagination() {
    let db = TestDatabase::new().await;
    let (products, categories) = services(&db);
    let admin = Principal::admin(TestDataBuilder::from_test_name("filters").id(1));

    let lighting = categories
        .create_category(
            admin,
            CreateCategory {
                name: "Lighting".to_string(),
                description: None,
                parent_id: None,
            },
        )
        .await
        .unwrap();

    for (name, price) in [("Desk Lamp", 40.0), ("Floor Lamp", 120.0), ("Lamp Shade", 15.0)] {
        products
            .create_product(admin, product(name, price, 5, Some(lighting.id)))
            .await
            .unwrap();
    }
    products
        .create_product(admin, product("Armchair", 300.0, 2, None))
        .await
        .unwrap();

    let page = products
        .list_products(ProductFilter {
            search: Some("LAMP".to_string()),
            min_price: Some(20.0),
            sort_by: ProductSortField::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<_> = page.data.iter().map(|p| p.product.name.as_str()).collect();
    assert_eq!(names, vec!["Desk Lamp", "Floor Lamp"]);
    assert_eq!(page.total, 2);

    let first = products
        .list_products(ProductFilter {
            limit: 3,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first.data.len(), 3);
    assert_eq!(first.total, 4);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next);

    let by_category = products.products_by_category(lighting.id).await.unwrap();
    assert_eq!(by_category.len(), 3);
    assert!(by_category.iter().all(|p| p.average_rating == 0.0));

    let with_count = categories.get_category(lighting.id).await.unwrap();
    assert_eq!(with_count.product_count, 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deleting_category_detaches_products() {
    let db = TestDatabase::new().await;
    let (products, categories) = services(&db);
    let admin = Principal::admin(TestDataBuilder::from_test_name("detach").id(1));

    let category_id = db.create_test_category("Garden").await;
    let created = products
        .create_product(admin, product("Hose", 25.0, 10, Some(category_id)))
        .await
        .unwrap();

    categories.delete_category(admin, category_id).await.unwrap();

    let reloaded = products.get_product(created.id).await.unwrap();
    assert_eq!(reloaded.product.category_id, None);
    assert_eq!(reloaded.product.images, vec!["Hose.jpg".to_string()]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete_product() {
    let db = TestDatabase::new().await;
    let (products, _) = services(&db);
    let admin = Principal::admin(TestDataBuilder::from_test_name("update_delete").id(1));

    let product_id = db.create_test_product("Kettle", 30.0, 4).await;

    let updated = products
        .update_product(
            admin,
            product_id,
            UpdateProduct {
                stock: Some(9),
                discount: Some(5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.stock, 9);
    assert_eq!(db.product_stock(product_id).await, 9);

    products.delete_product(admin, product_id).await.unwrap();
    let gone = products.get_product(product_id).await;
    assert!(matches!(gone, Err(CatalogError::ProductNotFound(_))));
}
