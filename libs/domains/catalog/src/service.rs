use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CategoryWithCount, CreateCategory, CreateProduct, Product, ProductFilter,
    ProductPage, ProductWithRating, UpdateCategory, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};

/// Product reads are public; writes require an admin
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> CatalogResult<ProductPage> {
        let (page, limit) = (filter.page, filter.limit);
        let (data, total) = self.products.list(filter).await?;
        Ok(ProductPage::new(data, total, page, limit))
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductWithRating> {
        self.products
            .get_with_rating(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    pub async fn products_by_category(
        &self,
        category_id: Uuid,
    ) -> CatalogResult<Vec<ProductWithRating>> {
        self.products.list_by_category(category_id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(
        &self,
        principal: Principal,
        input: CreateProduct,
    ) -> CatalogResult<Product> {
        principal.require_admin()?;

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        self.products.create(Product::new(input)).await
    }

    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateProduct,
    ) -> CatalogResult<Product> {
        principal.require_admin()?;

        let mut product = self
            .products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        product.apply_update(input);
        if product.discount > product.price {
            return Err(CatalogError::DiscountExceedsPrice);
        }

        self.products.update(product).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, principal: Principal, id: Uuid) -> CatalogResult<()> {
        principal.require_admin()?;

        if !self.products.delete(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }

    async fn ensure_category(&self, id: Uuid) -> CatalogResult<()> {
        match self.categories.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::CategoryNotFound(id)),
        }
    }
}

pub struct CategoryService<C: CategoryRepository> {
    repository: Arc<C>,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub fn new(repository: C) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryWithCount>> {
        self.repository.list().await
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<CategoryWithCount> {
        self.repository
            .get_with_count(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(
        &self,
        principal: Principal,
        input: CreateCategory,
    ) -> CatalogResult<Category> {
        principal.require_admin()?;

        if let Some(parent_id) = input.parent_id {
            self.ensure_exists(parent_id).await?;
        }

        self.repository.create(Category::new(input)).await
    }

    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        principal.require_admin()?;

        let mut category = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        if let Some(parent_id) = input.parent_id {
            if parent_id == id {
                return Err(CatalogError::SelfParent);
            }
            self.ensure_exists(parent_id).await?;
        }

        category.apply_update(input);
        self.repository.update(category).await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, principal: Principal, id: Uuid) -> CatalogResult<()> {
        principal.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn ensure_exists(&self, id: Uuid) -> CatalogResult<()> {
        match self.repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::CategoryNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCategoryRepository, MockProductRepository};
    use chrono::Utc;

    fn sample_product(price: f64, discount: f64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::now_v7(),
            name: "Desk Lamp".to_string(),
            description: None,
            price,
            discount,
            stock: 5,
            category_id: None,
            images: vec![],
            no_of_sell: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_input(category_id: Option<Uuid>) -> CreateProduct {
        CreateProduct {
            name: "Desk Lamp".to_string(),
            description: None,
            price: 100.0,
            discount: 0.0,
            stock: 5,
            category_id,
            images: vec!["lamp.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn test_list_products_builds_page_metadata() {
        let mut products = MockProductRepository::new();
        products
            .expect_list()
            .withf(|f| f.page == 2 && f.limit == 10)
            .returning(|_| Ok((vec![], 25)));

        let service = ProductService::new(products, MockCategoryRepository::new());
        let page = service
            .list_products(ProductFilter {
                page: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_get_with_rating().returning(|_| Ok(None));

        let service = ProductService::new(products, MockCategoryRepository::new());
        let result = service.get_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_product_requires_admin() {
        let service =
            ProductService::new(MockProductRepository::new(), MockCategoryRepository::new());
        let result = service
            .create_product(Principal::user(Uuid::now_v7()), create_input(None))
            .await;

        assert!(matches!(result, Err(CatalogError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_product_with_unknown_category_is_not_found() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(MockProductRepository::new(), categories);
        let result = service
            .create_product(
                Principal::admin(Uuid::now_v7()),
                create_input(Some(Uuid::now_v7())),
            )
            .await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_product_persists_new_product() {
        let mut products = MockProductRepository::new();
        products
            .expect_create()
            .withf(|p| p.no_of_sell == 0 && p.images == vec!["lamp.jpg".to_string()])
            .returning(Ok);

        let service = ProductService::new(products, MockCategoryRepository::new());
        let product = service
            .create_product(Principal::admin(Uuid::now_v7()), create_input(None))
            .await
            .unwrap();

        assert_eq!(product.stock, 5);
    }

    #[tokio::test]
    async fn test_update_rejects_discount_above_price() {
        let mut products = MockProductRepository::new();
        products
            .expect_get_by_id()
            .returning(|_| Ok(Some(sample_product(100.0, 0.0))));

        let service = ProductService::new(products, MockCategoryRepository::new());
        let result = service
            .update_product(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                UpdateProduct {
                    discount: Some(120.0),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::DiscountExceedsPrice)));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(products, MockCategoryRepository::new());
        let result = service
            .delete_product(Principal::admin(Uuid::now_v7()), Uuid::now_v7())
            .await;

        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_category_cannot_be_its_own_parent() {
        let id = Uuid::now_v7();
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().returning(move |_| {
            let now = Utc::now();
            Ok(Some(Category {
                id,
                name: "Lighting".to_string(),
                description: None,
                parent_id: None,
                created_at: now,
                updated_at: now,
            }))
        });

        let service = CategoryService::new(categories);
        let result = service
            .update_category(
                Principal::admin(Uuid::now_v7()),
                id,
                UpdateCategory {
                    parent_id: Some(id),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::SelfParent)));
    }
}
