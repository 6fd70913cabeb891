use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    prelude::{DateTimeWithTimeZone, Json},
};
use uuid::Uuid;

use crate::{
    entity::{category, product},
    error::CatalogResult,
    models::{
        Category, CategoryWithCount, Product, ProductFilter, ProductSortField, ProductWithRating,
        SortOrder,
    },
    repository::{CategoryRepository, ProductRepository},
};

const AVERAGE_RATING_SQL: &str = "COALESCE((SELECT AVG(reviews.rating)::float8 FROM reviews WHERE reviews.product_id = products.id), 0)";

const PRODUCT_COUNT_SQL: &str =
    "(SELECT COUNT(*) FROM products WHERE products.category_id = categories.id)";

#[derive(Debug, FromQueryResult)]
struct ProductRatingRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: f64,
    discount: f64,
    stock: i32,
    category_id: Option<Uuid>,
    images: Json,
    no_of_sell: i32,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    average_rating: f64,
}

impl From<ProductRatingRow> for ProductWithRating {
    fn from(row: ProductRatingRow) -> Self {
        Self {
            product: Product {
                id: row.id,
                name: row.name,
                description: row.description,
                price: row.price,
                discount: row.discount,
                stock: row.stock,
                category_id: row.category_id,
                images: product::images_from_json(row.images),
                no_of_sell: row.no_of_sell,
                created_at: row.created_at.into(),
                updated_at: row.updated_at.into(),
            },
            average_rating: row.average_rating,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CategoryCountRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    parent_id: Option<Uuid>,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    product_count: i64,
}

impl From<CategoryCountRow> for CategoryWithCount {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: Category {
                id: row.id,
                name: row.name,
                description: row.description,
                parent_id: row.parent_id,
                created_at: row.created_at.into(),
                updated_at: row.updated_at.into(),
            },
            product_count: row.product_count,
        }
    }
}

fn with_rating(query: Select<product::Entity>) -> Select<product::Entity> {
    query.column_as(Expr::cust(AVERAGE_RATING_SQL), "average_rating")
}

fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(category_id) = filter.category_id {
        condition = condition.add(product::Column::CategoryId.eq(category_id));
    }

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::cust_with_values(
            "(products.name ILIKE $1 OR products.description ILIKE $2)",
            [pattern.clone(), pattern],
        ));
    }

    if let Some(min_price) = filter.min_price {
        condition = condition.add(product::Column::Price.gte(min_price));
    }

    if let Some(max_price) = filter.max_price {
        condition = condition.add(product::Column::Price.lte(max_price));
    }

    condition
}

fn sort_column(field: ProductSortField) -> product::Column {
    match field {
        ProductSortField::Name => product::Column::Name,
        ProductSortField::Price => product::Column::Price,
        ProductSortField::CreatedAt => product::Column::CreatedAt,
        ProductSortField::Stock => product::Column::Stock,
    }
}

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: Product) -> CatalogResult<Product> {
        let active_model: product::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, name = %model.name, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_with_rating(&self, id: Uuid) -> CatalogResult<Option<ProductWithRating>> {
        let row = with_rating(product::Entity::find_by_id(id))
            .into_model::<ProductRatingRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: ProductFilter,
    ) -> CatalogResult<(Vec<ProductWithRating>, u64)> {
        let condition = filter_condition(&filter);

        let total = product::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let order = match filter.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let rows = with_rating(product::Entity::find().filter(condition))
            .order_by(sort_column(filter.sort_by), order.clone())
            .order_by(product::Column::Id, order)
            .limit(filter.limit)
            .offset(filter.offset())
            .into_model::<ProductRatingRow>()
            .all(&self.db)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ProductWithRating>> {
        let rows = with_rating(
            product::Entity::find().filter(product::Column::CategoryId.eq(category_id)),
        )
        .order_by_desc(product::Column::CreatedAt)
        .into_model::<ProductRatingRow>()
        .all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, input: Product) -> CatalogResult<Product> {
        let id = input.id;
        let active_model: product::ActiveModel = input.into();
        let model = active_model.update(&self.db).await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: Category) -> CatalogResult<Category> {
        let active_model: category::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(category_id = %model.id, name = %model.name, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_with_count(&self, id: Uuid) -> CatalogResult<Option<CategoryWithCount>> {
        let row = category::Entity::find_by_id(id)
            .column_as(Expr::cust(PRODUCT_COUNT_SQL), "product_count")
            .into_model::<CategoryCountRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> CatalogResult<Vec<CategoryWithCount>> {
        let rows = category::Entity::find()
            .column_as(Expr::cust(PRODUCT_COUNT_SQL), "product_count")
            .order_by_asc(category::Column::Name)
            .into_model::<CategoryCountRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, input: Category) -> CatalogResult<Category> {
        let id = input.id;
        let active_model: category::ActiveModel = input.into();
        let model = active_model.update(&self.db).await?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = category::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(result.rows_affected > 0)
    }
}
