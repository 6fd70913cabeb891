use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, CategoryWithCount, Product, ProductFilter, ProductWithRating};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    async fn get_with_rating(&self, id: Uuid) -> CatalogResult<Option<ProductWithRating>>;

    /// One page of matching products and the total match count
    async fn list(&self, filter: ProductFilter)
    -> CatalogResult<(Vec<ProductWithRating>, u64)>;

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ProductWithRating>>;

    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn get_with_count(&self, id: Uuid) -> CatalogResult<Option<CategoryWithCount>>;

    /// All categories by name
    async fn list(&self) -> CatalogResult<Vec<CategoryWithCount>>;

    async fn update(&self, category: Category) -> CatalogResult<Category>;

    /// Products and child categories are detached, not deleted
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}
